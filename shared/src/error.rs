use serde::{Serialize, Deserialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    #[error("Validation failed")]
    ValidationError,
    #[error("Date already selected")]
    DuplicateDate,
    #[error("Date is in the past")]
    PastDate,
    #[error("Date could not be read")]
    InvalidDate,
    #[error("Primary transport failed")]
    TransportPrimaryFailure,
    #[error("Fallback transport failed")]
    TransportFallbackFailure,
    #[error("All transports failed")]
    TransportFailure,
    #[error("Simulated failure")]
    SimulatedFailure,
    #[error("Submission already in progress")]
    SubmissionInFlight,
    #[error("Encoding failed")]
    Encoding,
}

/// A coded failure surfaced to the form; `message` is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    fn encoding(context: &str, cause: impl fmt::Display) -> Self {
        Self::new(ErrorCode::Encoding, format!("{context}: {cause}"))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::encoding("could not encode submission", e)
    }
}

impl From<time::error::Format> for Error {
    fn from(e: time::error::Format) -> Self {
        Error::encoding("could not format voting time", e)
    }
}

impl From<time::error::ComponentRange> for Error {
    fn from(e: time::error::ComponentRange) -> Self {
        Error::encoding("invalid time zone offset", e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
