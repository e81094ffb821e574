use std::{fmt, time::Duration};
use tracing::{error, info, warn};
use crate::{
    error::ErrorCode,
    models::SubmissionBatch,
    transport::{with_deadline, Sleep, SimulatedTransport, SimulationSettings, Transport, TransportError, TransportKind},
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Validating,
    BuildingRecords,
    SubmittingPrimary,
    SubmittingFallback,
    Success,
    Failure,
}

impl SubmissionPhase {
    pub fn in_flight(self) -> bool {
        !matches!(self, SubmissionPhase::Idle | SubmissionPhase::Success | SubmissionPhase::Failure)
    }
}

/// Every transport that was tried, in order, with what went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFailure {
    pub attempts: Vec<(TransportKind, TransportError)>,
}

impl fmt::Display for SubmissionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.attempts.is_empty() {
            return f.write_str("no transport configured");
        }
        let parts = self
            .attempts
            .iter()
            .map(|(kind, e)| format!("{kind}: {e}"))
            .collect::<Vec<_>>();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for SubmissionFailure {}

impl SubmissionFailure {
    pub fn code(&self) -> ErrorCode {
        match self.attempts.as_slice() {
            [(_, TransportError::Simulated)] => ErrorCode::SimulatedFailure,
            _ => ErrorCode::TransportFailure,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success { delivered_by: TransportKind, records: usize },
    Failure(SubmissionFailure),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success { .. })
    }
}

/// Ordered transports, tried until one succeeds.
pub struct SubmissionPipeline {
    transports: Vec<Box<dyn Transport>>,
    timeout: Duration,
    sleep: Sleep,
}

impl SubmissionPipeline {
    pub fn new(transports: Vec<Box<dyn Transport>>, timeout: Duration, sleep: Sleep) -> Self {
        Self { transports, timeout, sleep }
    }

    pub fn simulated(settings: SimulationSettings, timeout: Duration, sleep: Sleep) -> Self {
        let transports: Vec<Box<dyn Transport>> = vec![Box::new(SimulatedTransport::new(settings, sleep.clone()))];
        Self::new(transports, timeout, sleep)
    }

    pub fn transport_kinds(&self) -> Vec<TransportKind> {
        self.transports.iter().map(|t| t.kind()).collect()
    }

    pub async fn submit(
        &self,
        batch: &SubmissionBatch,
        mut observe: impl FnMut(SubmissionPhase),
    ) -> SubmissionOutcome {
        info!(batch = %batch.id, records = batch.len(), "submitting batch");
        let mut attempts = Vec::new();

        for (index, transport) in self.transports.iter().enumerate() {
            observe(if index == 0 { SubmissionPhase::SubmittingPrimary } else { SubmissionPhase::SubmittingFallback });

            let kind = transport.kind();
            match with_deadline(transport.deliver(&batch.envelope), &self.sleep, self.timeout).await {
                Ok(()) => {
                    info!(batch = %batch.id, transport = %kind, "batch delivered");
                    observe(SubmissionPhase::Success);
                    return SubmissionOutcome::Success { delivered_by: kind, records: batch.len() };
                }
                Err(e) => {
                    warn!(batch = %batch.id, transport = %kind, code = %e.code_at(index), error = %e, "transport failed");
                    attempts.push((kind, e));
                }
            }
        }

        let failure = SubmissionFailure { attempts };
        error!(batch = %batch.id, code = %failure.code(), "submission failed: {}", failure);
        observe(SubmissionPhase::Failure);
        SubmissionOutcome::Failure(failure)
    }
}
