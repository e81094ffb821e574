use time::{OffsetDateTime, UtcOffset};
use tracing::{debug, error};
use crate::{
    calendar::{self, CalendarCursor, CalendarGrid, Direction},
    date_key::DateKey,
    date_set::{DateSet, SelectionChange, SelectionError},
    error::{Error, ErrorCode, Result},
    message::{MessageChannel, StatusMessage},
    models::{build_batch, SubmissionBatch},
    submission::{SubmissionOutcome, SubmissionPhase},
    validation::{is_valid, validate_form, ValidationPolicy},
};

pub const MSG_DATE_ADDED: &str = "Date added";
pub const MSG_DATE_REMOVED: &str = "Date removed";
pub const MSG_SUBMITTING: &str = "Submitting...";
pub const MSG_SUBMITTED: &str = "Submitted! Thank you for taking part.";
pub const MSG_SUBMIT_FAILED: &str = "Submission failed, please try again later. If this keeps happening, contact the site administrator.";
pub const MSG_FORM_CLEARED: &str = "Form cleared";

/// State of the date voting form: selection, inputs, calendar cursor and the
/// current submission phase.
///
/// Any change to the selection refreshes the calendar grid and then the form
/// validity before the call returns.
#[derive(Debug, Clone)]
pub struct VoteForm {
    dates: DateSet,
    cursor: CalendarCursor,
    voter_name: String,
    email_address: String,
    policy: ValidationPolicy,
    offset: UtcOffset,
    messages: MessageChannel,
    phase: SubmissionPhase,
    grid: CalendarGrid,
    valid: bool,
    revision: u64,
}

impl VoteForm {
    pub fn new(today: DateKey, offset: UtcOffset, policy: ValidationPolicy) -> Self {
        let dates = DateSet::new(today);
        let cursor = CalendarCursor::containing(today);
        let grid = calendar::render(cursor, today, &dates);
        Self {
            dates,
            cursor,
            voter_name: String::new(),
            email_address: String::new(),
            policy,
            offset,
            messages: MessageChannel::default(),
            phase: SubmissionPhase::Idle,
            grid,
            valid: false,
            revision: 0,
        }
    }

    pub fn today(&self) -> DateKey {
        self.dates.today()
    }

    pub fn dates(&self) -> &DateSet {
        &self.dates
    }

    pub fn sorted_dates(&self) -> Vec<DateKey> {
        self.dates.to_sorted_list()
    }

    pub fn cursor(&self) -> CalendarCursor {
        self.cursor
    }

    pub fn grid(&self) -> &CalendarGrid {
        &self.grid
    }

    pub fn voter_name(&self) -> &str {
        &self.voter_name
    }

    pub fn email_address(&self) -> &str {
        &self.email_address
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase.in_flight()
    }

    pub fn submit_enabled(&self) -> bool {
        self.valid && !self.is_submitting()
    }

    pub fn message(&self) -> &StatusMessage {
        self.messages.current()
    }

    pub fn message_generation(&self) -> u64 {
        self.messages.generation()
    }

    /// Number of grid refreshes so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Selection and input edits are ignored while a submission is in flight.
    pub fn add_date(&mut self, key: DateKey) -> std::result::Result<SelectionChange, SelectionError> {
        if self.is_submitting() {
            return Ok(SelectionChange::Unchanged);
        }
        match self.dates.add(key) {
            Ok(change) => {
                self.refresh();
                self.messages.success(MSG_DATE_ADDED);
                Ok(change)
            }
            Err(e) => {
                self.messages.error(e.to_string());
                Err(e)
            }
        }
    }

    /// Adds a date typed as `YYYY-MM-DD`.
    pub fn add_date_text(&mut self, text: &str) -> std::result::Result<SelectionChange, SelectionError> {
        if self.is_submitting() {
            return Ok(SelectionChange::Unchanged);
        }
        match text.parse::<DateKey>() {
            Ok(key) => self.add_date(key),
            Err(e) => {
                self.messages.error(e.to_string());
                Err(e)
            }
        }
    }

    pub fn remove_date(&mut self, key: DateKey) -> SelectionChange {
        if self.is_submitting() {
            return SelectionChange::Unchanged;
        }
        let change = self.dates.remove(key);
        if change.is_change() {
            self.refresh();
            self.messages.success(MSG_DATE_REMOVED);
        }
        change
    }

    pub fn toggle_date(&mut self, key: DateKey) -> std::result::Result<SelectionChange, SelectionError> {
        if self.dates.contains(key) {
            Ok(self.remove_date(key))
        } else {
            self.add_date(key)
        }
    }

    pub fn navigate(&mut self, direction: Direction) {
        self.cursor = self.cursor.navigate(direction);
        debug!(month = %self.cursor.label(), "calendar navigated");
        self.render();
    }

    pub fn set_voter_name(&mut self, name: impl Into<String>) {
        if self.is_submitting() {
            return;
        }
        self.voter_name = name.into();
        self.evaluate();
    }

    pub fn set_email_address(&mut self, email: impl Into<String>) {
        if self.is_submitting() {
            return;
        }
        self.email_address = email.into();
        self.evaluate();
    }

    pub fn show_info(&mut self, text: impl Into<String>) -> u64 {
        self.messages.info(text)
    }

    pub fn clear_message_if_current(&mut self, generation: u64) -> bool {
        self.messages.clear_if_current(generation)
    }

    /// Validates and snapshots the form into a batch, marking the form as
    /// submitting. Nothing is sent from here.
    pub fn begin_submission(&mut self, now: OffsetDateTime) -> Result<SubmissionBatch> {
        if self.is_submitting() {
            return Err(Error::new(ErrorCode::SubmissionInFlight, "A submission is already in progress"));
        }

        self.phase = SubmissionPhase::Validating;
        if let Err(e) = validate_form(&self.voter_name, &self.email_address, self.dates.size(), self.policy) {
            self.phase = SubmissionPhase::Idle;
            self.messages.error(e.to_string());
            return Err(Error::new(e.code(), e.to_string()));
        }

        self.phase = SubmissionPhase::BuildingRecords;
        match build_batch(&self.dates, &self.voter_name, &self.email_address, now, self.offset) {
            Ok(batch) => {
                self.messages.info(MSG_SUBMITTING);
                Ok(batch)
            }
            Err(e) => {
                error!("could not build submission: {}", e);
                self.phase = SubmissionPhase::Idle;
                self.messages.error(MSG_SUBMIT_FAILED);
                Err(e)
            }
        }
    }

    /// Tracks transport progress. Terminal phases are left to `finish_submission`.
    pub fn record_phase(&mut self, phase: SubmissionPhase) {
        if self.is_submitting() && phase.in_flight() {
            self.phase = phase;
        }
    }

    /// Applies the outcome and returns to idle. Returns the generation of the
    /// message shown.
    pub fn finish_submission(&mut self, outcome: &SubmissionOutcome) -> u64 {
        self.phase = SubmissionPhase::Idle;
        match outcome {
            SubmissionOutcome::Success { .. } => {
                self.clear_inputs();
                self.refresh();
                self.messages.success(MSG_SUBMITTED)
            }
            SubmissionOutcome::Failure(failure) => {
                debug!(attempts = failure.attempts.len(), "keeping selection after failed submission");
                self.evaluate();
                self.messages.error(MSG_SUBMIT_FAILED)
            }
        }
    }

    /// Clears the selection and both inputs.
    pub fn reset(&mut self) {
        if self.is_submitting() {
            return;
        }
        self.clear_inputs();
        self.refresh();
        self.messages.info(MSG_FORM_CLEARED);
    }

    fn clear_inputs(&mut self) {
        self.dates.clear();
        self.voter_name.clear();
        self.email_address.clear();
    }

    fn refresh(&mut self) {
        self.render();
        self.evaluate();
    }

    fn render(&mut self) {
        self.grid = calendar::render(self.cursor, self.dates.today(), &self.dates);
        self.revision += 1;
    }

    fn evaluate(&mut self) {
        self.valid = is_valid(&self.voter_name, self.dates.size())
            && validate_form(&self.voter_name, &self.email_address, self.dates.size(), self.policy).is_ok();
    }
}
