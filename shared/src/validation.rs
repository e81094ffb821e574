use regex::Regex;
use std::sync::OnceLock;
use crate::error::ErrorCode;

pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter your name")]
    MissingName,
    #[error("Please pick at least one date")]
    NoDatesSelected,
    #[error("Please enter your name and pick at least one date")]
    MissingNameAndDates,
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

impl ValidationError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::ValidationError
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Reject a non-empty email that does not look like an address.
    pub require_valid_email: bool,
}

pub fn is_valid(name: &str, date_count: usize) -> bool {
    !name.trim().is_empty() && date_count > 0
}

pub fn is_email_valid(email: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
        .map_or(false, |re| re.is_match(email))
}

pub fn validate_form(
    name: &str,
    email: &str,
    date_count: usize,
    policy: ValidationPolicy,
) -> Result<(), ValidationError> {
    match (name.trim().is_empty(), date_count == 0) {
        (true, true) => return Err(ValidationError::MissingNameAndDates),
        (true, false) => return Err(ValidationError::MissingName),
        (false, true) => return Err(ValidationError::NoDatesSelected),
        (false, false) => {}
    }

    let email = email.trim();
    if policy.require_valid_email && !email.is_empty() && !is_email_valid(email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(())
}
