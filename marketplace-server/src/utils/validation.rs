//! Input validation helpers
//!
//! Text limits and presence checks shared by the catalog, vendor and order
//! handlers. SQLite TEXT has no built-in length enforcement.

use shared::{AppError, ErrorCode};

/// Entity names: product, category, subcategory, store name
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions and free text
pub const MAX_NOTE_LEN: usize = 5000;

/// Short identifiers: phone, SKU, IFSC, account number
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Return the trimmed value of a required field, or `RequiredField`.
pub fn require_text<'a>(value: &'a Option<String>) -> Result<&'a str, AppError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::new(ErrorCode::RequiredField)),
    }
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_rejects_missing_and_blank() {
        assert_eq!(
            require_text(&None).unwrap_err().code,
            ErrorCode::RequiredField
        );
        assert!(require_text(&Some("   ".into())).is_err());
        assert_eq!(require_text(&Some(" ok ".into())).unwrap(), "ok");
    }

    #[test]
    fn length_limits() {
        assert!(validate_required_text("abc", "name", 3).is_ok());
        assert!(validate_required_text("abcd", "name", 3).is_err());
        assert!(validate_optional_text(&None, "note", 1).is_ok());
        assert!(validate_optional_text(&Some("xy".into()), "note", 1).is_err());
    }
}
