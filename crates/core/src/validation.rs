//! Input validation for people, dates and exercise payload values.
//!
//! Every validator returns `CoreError::Validation` with a message that can be
//! shown to the user as-is.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use validator::ValidateEmail;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum length of a free-text description.
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Maximum length of a person or entity name.
pub const MAX_NAME_LENGTH: usize = 120;

/// Upper bound (exclusive) for a recorded body weight or exercise load.
pub const MAX_WEIGHT_KG: f64 = 500.0;

/// Date format accepted for birth dates and assignment dates.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\s'-]+$").expect("valid regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{8,15}$").expect("valid regex"));

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0[1-9]|[12][0-9]|3[01])/(0[1-9]|1[0-2])/\d{4}$").expect("valid regex")
});

// ---------------------------------------------------------------------------
// People
// ---------------------------------------------------------------------------

/// Letters (any script), spaces, apostrophes and hyphens.
pub fn validate_person_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Name must be between 1 and {MAX_NAME_LENGTH} characters"
        )));
    }
    if !NAME_RE.is_match(trimmed) {
        return Err(CoreError::Validation(
            "Invalid name format. Name must contain only letters, spaces, apostrophes and hyphens"
                .to_string(),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Invalid email format. Please provide a valid email address".to_string(),
        ))
    }
}

/// Optional leading `+`, then 8 to 15 digits.
pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Invalid phone format. Phone number must be 8 to 15 digits and may start with '+'"
                .to_string(),
        ))
    }
}

/// At least [`MIN_PASSWORD_LENGTH`] characters with a letter, a digit and a symbol.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    let long_enough = password.chars().count() >= MIN_PASSWORD_LENGTH;
    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace());

    if long_enough && has_letter && has_digit && has_symbol {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long and contain \
             a letter, a number and a special character"
        )))
    }
}

// ---------------------------------------------------------------------------
// Dates and text
// ---------------------------------------------------------------------------

/// Parse a `DD/MM/YYYY` date, rejecting impossible calendar dates.
pub fn parse_date(date: &str) -> Result<NaiveDate, CoreError> {
    let invalid = || {
        CoreError::Validation(format!(
            "Invalid date '{date}'. Date must be in the format DD/MM/YYYY"
        ))
    };
    if !DATE_RE.is_match(date) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| invalid())
}

pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description must be at most {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Require a non-blank string field.
pub fn validate_required(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

/// Weight must be finite, positive and below [`MAX_WEIGHT_KG`].
pub fn validate_weight_kg(weight: f64) -> Result<(), CoreError> {
    if weight.is_finite() && weight > 0.0 && weight < MAX_WEIGHT_KG {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid weight. Weight must be a positive number below {MAX_WEIGHT_KG} kg"
        )))
    }
}

/// Counters such as reps, series and rest seconds must not be negative.
pub fn validate_non_negative(field: &str, value: i32) -> Result<(), CoreError> {
    if value < 0 {
        return Err(CoreError::Validation(format!(
            "{field} must not be negative"
        )));
    }
    Ok(())
}

/// Apply [`validate_non_negative`] to an optional value.
pub fn validate_optional_non_negative(field: &str, value: Option<i32>) -> Result<(), CoreError> {
    value.map_or(Ok(()), |v| validate_non_negative(field, v))
}

/// Apply [`validate_weight_kg`] to an optional load; zero means body weight.
pub fn validate_optional_load(value: Option<f64>) -> Result<(), CoreError> {
    match value {
        Some(w) if w == 0.0 => Ok(()),
        Some(w) => validate_weight_kg(w),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
