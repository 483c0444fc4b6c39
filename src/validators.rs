//! Input validation.

use regex::Regex;
use std::sync::LazyLock;

/// Longest address accepted, per RFC 5321.
pub const EMAIL_MAX_LEN: usize = 254;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+",
        r"@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?",
        r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    ))
    .expect("valid regex")
});

/// Return true if `email` is a syntactically valid address.
///
/// The domain needs at least one dot. No DNS lookup is made.
///
/// ```
/// use dynamodb_user_api::validators::is_email_valid;
///
/// assert!(is_email_valid("jane.doe@example.com"));
/// assert!(!is_email_valid("jane@localhost"));
/// ```
pub fn is_email_valid(email: &str) -> bool {
    (3..=EMAIL_MAX_LEN).contains(&email.len()) && EMAIL_RE.is_match(email)
}
