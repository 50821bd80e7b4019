use marketing_bot::utils::duration::parse_duration;

#[test]
fn parses_the_full_grammar() {
    assert_eq!(parse_duration("1d2h3m4s"), 93_784);
}

#[test]
fn empty_input_parses_to_zero() {
    assert_eq!(parse_duration(""), 0);
}

#[test]
fn unknown_units_yield_no_tokens() {
    assert_eq!(parse_duration("10x"), 0);
    assert_eq!(parse_duration("tomorrow"), 0);
}

#[test]
fn repeated_units_accumulate() {
    assert_eq!(parse_duration("5m5m"), 600);
    assert_eq!(parse_duration("1h1h1h"), 10_800);
}

#[test]
fn token_order_does_not_matter() {
    assert_eq!(parse_duration("4s3m2h1d"), parse_duration("1d2h3m4s"));
}

#[test]
fn matching_is_case_insensitive() {
    assert_eq!(parse_duration("1D2H3M4S"), 93_784);
}

#[test]
fn garbage_between_tokens_is_ignored() {
    assert_eq!(parse_duration("in about 2m, maybe 30s later"), 150);
    assert_eq!(parse_duration("1h30x"), 3_600);
}

#[test]
fn bare_numbers_without_units_are_not_tokens() {
    assert_eq!(parse_duration("90"), 0);
}
