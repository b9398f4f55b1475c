//! Phone number normalization.
//!
//! Phone is the login key and must be stored in one canonical form so that
//! the store-level uniqueness constraint actually deduplicates.

/// Error returned when a phone number cannot be normalized.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid phone number")]
pub struct InvalidPhone;

/// Normalize a phone number: strips spaces, hyphens and parentheses, keeps a
/// single leading `+`, and requires 10-15 digits (the legacy bound).
pub fn normalize(raw: &str) -> Result<String, InvalidPhone> {
    let trimmed = raw.trim();
    let (plus, rest) = match trimmed.strip_prefix('+') {
        Some(rest) => ("+", rest),
        None => ("", trimmed),
    };

    let digits: String = rest
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(InvalidPhone);
    }
    if !(10..=15).contains(&digits.len()) {
        return Err(InvalidPhone);
    }

    Ok(format!("{plus}{digits}"))
}
