use futures::future::{self, Either, LocalBoxFuture};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{cell::RefCell, fmt, rc::Rc, time::Duration};
use thiserror::Error;
use tracing::info;
use crate::{error::ErrorCode, models::{RemoteReply, SubmitEnvelope}};

/// Returns a future that completes after the given duration.
pub type Sleep = Rc<dyn Fn(Duration) -> LocalBoxFuture<'static, ()>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Multipart POST with the envelope in one form field.
    FormPost,
    /// POST of the raw envelope as `text/plain`.
    PlainText,
    Simulated,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransportKind::FormPost => "form-post",
            TransportKind::PlainText => "plain-text",
            TransportKind::Simulated => "simulated",
        })
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("Endpoint rejected the submission: {0}")]
    Rejected(String),
    #[error("Unreadable reply (status {0})")]
    Malformed(u16),
    #[error("No reply within {0:?}")]
    Timeout(Duration),
    #[error("Simulated network error")]
    Simulated,
    #[error("Could not encode request: {0}")]
    Encode(String),
}

impl TransportError {
    /// Code for a failed attempt at `position` in the transport chain.
    pub fn code_at(&self, position: usize) -> ErrorCode {
        match (self, position) {
            (TransportError::Simulated, _) => ErrorCode::SimulatedFailure,
            (_, 0) => ErrorCode::TransportPrimaryFailure,
            _ => ErrorCode::TransportFallbackFailure,
        }
    }
}

/// One way of getting an envelope to the endpoint.
pub trait Transport {
    fn kind(&self) -> TransportKind;

    fn deliver<'a>(&'a self, envelope: &'a SubmitEnvelope) -> LocalBoxFuture<'a, Result<(), TransportError>>;
}

fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Form posts only look at the status line; the body may be anything.
pub fn interpret_form_reply(status: u16) -> Result<(), TransportError> {
    if is_success_status(status) {
        Ok(())
    } else {
        Err(TransportError::Status(status))
    }
}

/// Plain-text posts need a JSON body with `success: true`.
pub fn interpret_plain_text_reply(status: u16, body: &str) -> Result<(), TransportError> {
    let reply = serde_json::from_str::<RemoteReply>(body).ok();
    if !is_success_status(status) {
        return match reply {
            Some(RemoteReply { success: false, error: Some(error) }) => Err(TransportError::Rejected(error)),
            _ => Err(TransportError::Status(status)),
        };
    }

    match reply {
        Some(RemoteReply { success: true, .. }) => Ok(()),
        Some(RemoteReply { error: Some(error), .. }) => Err(TransportError::Rejected(error)),
        Some(_) => Err(TransportError::Rejected("reply did not report success".into())),
        None => Err(TransportError::Malformed(status)),
    }
}

/// Races `attempt` against `sleep(limit)`.
pub async fn with_deadline<T>(
    attempt: LocalBoxFuture<'_, Result<T, TransportError>>,
    sleep: &Sleep,
    limit: Duration,
) -> Result<T, TransportError> {
    match future::select(attempt, sleep(limit)).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(TransportError::Timeout(limit)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSettings {
    pub delay: Duration,
    pub failure_rate: f64,
    pub seed: Option<u64>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(1500),
            failure_rate: 0.1,
            seed: None,
        }
    }
}

/// Offline stand-in used when no endpoint is configured.
pub struct SimulatedTransport {
    settings: SimulationSettings,
    rng: RefCell<StdRng>,
    sleep: Sleep,
}

impl SimulatedTransport {
    pub fn new(settings: SimulationSettings, sleep: Sleep) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { settings, rng: RefCell::new(rng), sleep }
    }
}

impl Transport for SimulatedTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Simulated
    }

    fn deliver<'a>(&'a self, envelope: &'a SubmitEnvelope) -> LocalBoxFuture<'a, Result<(), TransportError>> {
        Box::pin(async move {
            (self.sleep)(self.settings.delay).await;

            info!(records = envelope.data.len(), "simulated submission");
            for (index, record) in envelope.data.iter().enumerate() {
                info!(
                    index = index + 1,
                    voter = %record.voter_name,
                    email = record.email_address.as_deref().unwrap_or(""),
                    date = %record.voting_date,
                    time = %record.voting_time,
                    status = %record.validity_status,
                    "simulated record"
                );
            }

            let roll: f64 = self.rng.borrow_mut().gen();
            if roll < self.settings.failure_rate {
                Err(TransportError::Simulated)
            } else {
                Ok(())
            }
        })
    }
}
