use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)([dhms])").expect("duration token pattern is valid"));

/// Parse a compact duration like `1d2h3m4s` into seconds.
///
/// Tokens may appear in any order and repeat; repeated units accumulate.
/// Characters that are not part of a `<integer><unit>` token are skipped,
/// and an input with no recognizable tokens parses to 0. Rejecting a zero
/// result is the caller's job, since "0 is invalid" is a scheduling rule
/// rather than a grammar rule.
pub fn parse_duration(text: &str) -> u64 {
    let text = text.to_lowercase();
    let mut total: u64 = 0;
    for capture in TOKEN.captures_iter(&text) {
        let value: u64 = match capture[1].parse() {
            Ok(v) => v,
            Err(_) => continue,
        };
        let unit = match &capture[2] {
            "d" => 86_400,
            "h" => 3_600,
            "m" => 60,
            _ => 1,
        };
        total = total.saturating_add(value.saturating_mul(unit));
    }
    total
}
