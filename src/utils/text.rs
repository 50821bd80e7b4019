use std::collections::BTreeMap;

use regex::Regex;

/// Find the auto-reply for the first keyword that appears in `text` as a
/// whole word. Matching is case-insensitive; at most one reply is returned
/// per message.
pub fn find_keyword_reply<'a>(text: &str, keywords: &'a BTreeMap<String, String>) -> Option<&'a str> {
    let text = text.to_lowercase();
    for (keyword, reply) in keywords {
        let pattern = format!(r"\b{}\b", regex::escape(&keyword.to_lowercase()));
        // An operator-supplied keyword is escaped, so the pattern can only
        // fail to compile if it exceeds the regex size limit.
        let Ok(re) = Regex::new(&pattern) else {
            tracing::warn!("Skipping unmatchable keyword '{keyword}'");
            continue;
        };
        if re.is_match(&text) {
            return Some(reply);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn matches_whole_words_only() {
        let keywords = table(&[("price", "See our pricing page")]);

        assert_eq!(
            find_keyword_reply("what is the PRICE today?", &keywords),
            Some("See our pricing page")
        );
        assert_eq!(find_keyword_reply("priceless artifacts", &keywords), None);
    }

    #[test]
    fn replies_at_most_once() {
        let keywords = table(&[("demo", "demo reply"), ("trial", "trial reply")]);

        let reply = find_keyword_reply("book a demo trial", &keywords);
        assert_eq!(reply, Some("demo reply"));
    }

    #[test]
    fn empty_table_never_replies() {
        assert_eq!(find_keyword_reply("anything", &BTreeMap::new()), None);
    }
}
