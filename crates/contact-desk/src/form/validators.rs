use regex::Regex;
use std::sync::LazyLock;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static PHONE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("valid phone pattern"));

pub fn is_not_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Permissive `local@domain.tld` check on the trimmed value.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value.trim())
}

/// Ignores spaces, hyphens, parentheses and dots, then expects an optional `+`
/// and 7 to 15 digits.
pub fn is_valid_phone(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|ch| !ch.is_whitespace() && !matches!(ch, '-' | '(' | ')' | '.'))
        .collect();
    PHONE_SHAPE.is_match(&compact)
}
