//! Input validation for contact and category fields.
//!
//! Each rule has a fixed message shown to the user when the input is
//! rejected; the console layer keeps asking until a value passes.

use std::sync::LazyLock;

use regex::Regex;

use crate::categories::{Category, CategoryId};

/// Maximum length of any stored text field.
pub const MAX_FIELD_LEN: usize = 50;

/// Value entered to leave an optional field empty.
pub const NO_VALUE: &str = "-";

static PLAIN_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]+(?: [A-Za-z0-9]+)*$").unwrap_or_else(|e| unreachable!("{e}"))
});

static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[0-9]+$").unwrap_or_else(|e| unreachable!("{e}")));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .unwrap_or_else(|e| unreachable!("{e}"))
});

/// Why a field value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Not alphanumeric words separated by single spaces.
    InvalidText,
    /// Not `+` followed by digits.
    InvalidPhoneNumber,
    /// Not a valid email address.
    InvalidEmail,
    /// Malformed category name, or the name is already taken.
    InvalidCategoryName,
    /// Empty or whitespace only.
    Blank,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::InvalidText => "Can contain only alphanumeric characters with spaces in between",
            Self::InvalidPhoneNumber => {
                "Phone number needs to start with '+' followed by digits, no spaces are allowed"
            }
            Self::InvalidEmail => "Enter a email address in correct format",
            Self::InvalidCategoryName => "Invalid input format or category already exists",
            Self::Blank => "Value cannot be empty",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Alphanumeric words separated by single spaces, e.g. names.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidText`] if the input does not match.
pub fn validate_text(input: &str) -> Result<(), ValidationError> {
    if input.len() <= MAX_FIELD_LEN && PLAIN_TEXT.is_match(input) {
        Ok(())
    } else {
        Err(ValidationError::InvalidText)
    }
}

/// A leading `+` followed only by digits.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPhoneNumber`] if the input does not match.
pub fn validate_phone_number(input: &str) -> Result<(), ValidationError> {
    if input.len() <= MAX_FIELD_LEN && PHONE_NUMBER.is_match(input) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhoneNumber)
    }
}

/// An email address, or [`NO_VALUE`] to leave it blank.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidEmail`] if the input is neither.
pub fn validate_optional_email(input: &str) -> Result<(), ValidationError> {
    if input.trim() == NO_VALUE || is_valid_email(input) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// An email address entered for a contact: [`is_email_address`] within
/// [`MAX_FIELD_LEN`].
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    email.len() <= MAX_FIELD_LEN && is_email_address(email)
}

/// Basic email address format check, without a length limit.
#[must_use]
pub fn is_email_address(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}

/// Any text with at least one non-whitespace character.
///
/// # Errors
///
/// Returns [`ValidationError::Blank`] if the input is empty or whitespace.
pub fn validate_not_blank(input: &str) -> Result<(), ValidationError> {
    if input.trim().is_empty() {
        Err(ValidationError::Blank)
    } else {
        Ok(())
    }
}

/// Turns validated optional-email input into the stored value.
#[must_use]
pub fn parse_optional_email(input: &str) -> Option<String> {
    let input = input.trim();
    if input == NO_VALUE || input.is_empty() {
        None
    } else {
        Some(input.to_string())
    }
}

/// A plain-text name not already used by another category (case-insensitive).
///
/// `renaming` is the category being renamed, which may keep its own name
/// with different capitalization.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidCategoryName`] if the name is malformed
/// or taken.
pub fn validate_category_name(
    input: &str,
    existing: &[Category],
    renaming: Option<CategoryId>,
) -> Result<(), ValidationError> {
    if validate_text(input).is_err() {
        return Err(ValidationError::InvalidCategoryName);
    }

    let taken = existing
        .iter()
        .filter(|c| renaming.is_none() || c.id != renaming)
        .any(|c| c.has_name(input));

    if taken {
        Err(ValidationError::InvalidCategoryName)
    } else {
        Ok(())
    }
}
