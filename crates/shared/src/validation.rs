//! Common validation utilities.

use validator::ValidationError;

/// Maximum length of an invite display name.
pub const MAX_DISPLAY_NAME_LEN: usize = 40;

/// Maximum length of a group title.
pub const MAX_TITLE_LEN: usize = 100;

/// Validates that a string is non-empty after trimming.
pub fn validate_non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Validates a display name: non-blank and at most 40 characters after trimming.
pub fn validate_display_name(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("display_name_blank");
        err.message = Some("display_name is required".into());
        return Err(err);
    }
    if trimmed.chars().count() > MAX_DISPLAY_NAME_LEN {
        let mut err = ValidationError::new("display_name_length");
        err.message = Some("Name is too long (max 40 characters)".into());
        return Err(err);
    }
    Ok(())
}

/// Validates a group title: non-blank and at most 100 characters after trimming.
pub fn validate_title(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("title_blank");
        err.message = Some("title is required".into());
        return Err(err);
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        let mut err = ValidationError::new("title_length");
        err.message = Some("Title is too long (max 100 characters)".into());
        return Err(err);
    }
    Ok(())
}
