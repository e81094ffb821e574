pub mod error;
pub mod date_key;
pub mod date_set;
pub mod calendar;
pub mod validation;
pub mod models;
pub mod message;
pub mod transport;
pub mod submission;
pub mod form;

pub use error::{Error, ErrorCode, Result};
pub use date_key::DateKey;
pub use date_set::{DateSet, SelectionChange, SelectionError};
pub use calendar::{CalendarCell, CalendarCursor, CalendarGrid, Direction};
pub use validation::{is_valid, validate_form, ValidationError, ValidationPolicy};
pub use models::*;
pub use message::{MessageChannel, Severity, StatusMessage};
pub use transport::{Sleep, SimulatedTransport, SimulationSettings, Transport, TransportError, TransportKind};
pub use submission::{SubmissionFailure, SubmissionOutcome, SubmissionPhase, SubmissionPipeline};
pub use form::VoteForm;

#[cfg(test)]
mod tests;
