use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static CONTACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9\s\-+()]+$").expect("valid contact regex"));

const MIN_CONTACT_DIGITS: usize = 10;

/// Checks for a `local@domain.tld` shape. No deliverability check is made.
pub fn validate_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Accepts phone numbers made of digits, spaces, dashes, parentheses and `+`
/// holding at least ten digits.
pub fn validate_contact(value: &str) -> bool {
    CONTACT_RE.is_match(value)
        && value.chars().filter(char::is_ascii_digit).count() >= MIN_CONTACT_DIGITS
}
