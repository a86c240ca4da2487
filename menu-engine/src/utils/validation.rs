//! Input validation helpers
//!
//! Length limits for customer-entered text. Lengths are counted in
//! characters, not bytes.

use thiserror::Error;

/// Customer name and other display names
pub const MAX_NAME_LEN: usize = 200;

/// Special instructions and free-form notes
pub const MAX_NOTE_LEN: usize = 500;

/// Phone numbers, table numbers and other short identifiers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Reason a text field was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextViolation {
    #[error("must not be empty")]
    Empty,

    #[error("must be at most {max} characters")]
    TooLong { max: usize },
}

/// Trimmed value; empty or over-long text is rejected
pub fn validate_required_text(value: &str, max_len: usize) -> Result<String, TextViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TextViolation::Empty);
    }
    if trimmed.chars().count() > max_len {
        return Err(TextViolation::TooLong { max: max_len });
    }
    Ok(trimmed.to_string())
}

/// Trimmed value, `None` when blank
pub fn validate_optional_text(
    value: Option<&str>,
    max_len: usize,
) -> Result<Option<String>, TextViolation> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) if v.chars().count() > max_len => Err(TextViolation::TooLong { max: max_len }),
        Some(v) => Ok(Some(v.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_trims() {
        assert_eq!(
            validate_required_text("  Asha  ", MAX_NAME_LEN),
            Ok("Asha".to_string())
        );
    }

    #[test]
    fn test_required_text_rejects_blank() {
        assert_eq!(validate_required_text("   ", MAX_NAME_LEN), Err(TextViolation::Empty));
    }

    #[test]
    fn test_length_counts_chars() {
        // 100 multi-byte chars fit the short limit
        let name = "é".repeat(MAX_SHORT_TEXT_LEN);
        assert!(validate_required_text(&name, MAX_SHORT_TEXT_LEN).is_ok());

        let too_long = "x".repeat(MAX_SHORT_TEXT_LEN + 1);
        assert_eq!(
            validate_required_text(&too_long, MAX_SHORT_TEXT_LEN),
            Err(TextViolation::TooLong { max: MAX_SHORT_TEXT_LEN })
        );
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(validate_optional_text(None, MAX_NOTE_LEN), Ok(None));
        assert_eq!(validate_optional_text(Some("  "), MAX_NOTE_LEN), Ok(None));
        assert_eq!(
            validate_optional_text(Some(" less spicy "), MAX_NOTE_LEN),
            Ok(Some("less spicy".to_string()))
        );
        assert!(validate_optional_text(Some(&"x".repeat(MAX_NOTE_LEN + 1)), MAX_NOTE_LEN).is_err());
    }

    #[test]
    fn test_violation_messages() {
        assert_eq!(TextViolation::Empty.to_string(), "must not be empty");
        assert_eq!(
            TextViolation::TooLong { max: 100 }.to_string(),
            "must be at most 100 characters"
        );
    }
}
