/// Utility functions for Telegram HTML formatting.
///
/// Outgoing broadcast bodies are operator-authored and pass through
/// verbatim, but interpolated values (chat titles, template names) must be
/// escaped so stray angle brackets cannot break the HTML parse mode.

/// Escapes the three characters with special meaning in Telegram HTML.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Inline mention link for a user, mirroring Telegram's `mention_html`.
pub fn mention_html(user_id: u64, name: &str) -> String {
    format!("<a href=\"tg://user?id={user_id}\">{}</a>", escape_html(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_html("a < b & b > c"), "a &lt; b &amp; b &gt; c");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn mention_links_the_user_id() {
        assert_eq!(
            mention_html(7, "Ada <3"),
            "<a href=\"tg://user?id=7\">Ada &lt;3</a>"
        );
    }
}
