//! Field length limits and text checks.
//!
//! Limits mirror the `CHECK` constraints in `migrations/`. Lengths are
//! counted in characters, the same way SQLite's `length()` counts TEXT.

/// Menu item names.
pub const MAX_MENU_NAME_LEN: usize = 255;

/// Menu item descriptions.
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Guest first and last names.
pub const MAX_GUEST_NAME_LEN: usize = 200;

/// Booking comments.
pub const MAX_COMMENT_LEN: usize = 1000;

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const INTEGER_MESSAGE: &str = "Enter a whole number.";

/// Error text for a value longer than `max_len` characters, if it is.
pub fn length_error(value: &str, max_len: usize) -> Option<String> {
    let len = value.chars().count();
    (len > max_len).then(|| {
        format!("Ensure this value has at most {max_len} characters (it has {len}).")
    })
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, max_len: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(REQUIRED_MESSAGE.to_string());
    }
    validate_text_len(value, max_len)
}

/// Validate that a string is within the length limit.
pub fn validate_text_len(value: &str, max_len: usize) -> Result<(), String> {
    match length_error(value, max_len) {
        Some(message) => Err(message),
        None => Ok(()),
    }
}
