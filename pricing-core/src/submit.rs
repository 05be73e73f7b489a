//! Batch submission orchestration
//!
//! Gates the external creation API behind the validation pipeline and an
//! at-most-one-in-flight guard. The persisted draft is cleared only when
//! the API reports success; any failure leaves it intact so the operator
//! loses no work. Retry and backoff belong to the API implementation, not
//! here.

use crate::draft::DraftStore;
use crate::validate::{ValidationReport, validate_batch};
use async_trait::async_trait;
use shared::models::{Batch, BatchOutcome, BatchPayload};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Submission failure modes
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("batch failed validation with {} error(s)", .0.len())]
    Validation(ValidationReport),
    #[error("creation API rejected the batch ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("transport failure: {0}")]
    Transport(String),
}

/// External batch creation API (black box)
#[async_trait]
pub trait BatchApi: Send + Sync {
    async fn create_batch(&self, payload: &BatchPayload) -> Result<BatchOutcome, SubmitError>;
}

/// Validates, serializes, and submits batches with an in-flight guard
pub struct BatchSubmitter<A: BatchApi> {
    api: Arc<A>,
    in_flight: AtomicBool,
}

impl<A: BatchApi> BatchSubmitter<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a submission is currently pending. The UI disables the
    /// submit action while this is true.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Validate and submit a batch.
    ///
    /// Rejects immediately if another submission is pending. On success the
    /// draft is cleared; on any failure it is retained.
    pub async fn submit(
        &self,
        batch: &Batch,
        draft: &dyn DraftStore,
    ) -> Result<BatchOutcome, SubmitError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(SubmitError::InFlight);
        }
        let result = self.submit_inner(batch, draft).await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn submit_inner(
        &self,
        batch: &Batch,
        draft: &dyn DraftStore,
    ) -> Result<BatchOutcome, SubmitError> {
        let report = validate_batch(batch);
        if !report.is_ok() {
            tracing::debug!(errors = report.len(), "batch failed validation");
            return Err(SubmitError::Validation(report));
        }

        let payload = batch.to_payload();
        match self.api.create_batch(&payload).await {
            Ok(outcome) => {
                tracing::debug!(services = outcome.services.len(), "batch created");
                // Submission succeeded; a stale draft is only cosmetic, so a
                // failed clear downgrades to a warning.
                if let Err(err) = draft.clear().await {
                    tracing::warn!(error = %err, "failed to clear draft after submission");
                }
                Ok(outcome)
            }
            Err(err) => {
                tracing::error!(error = %err, "batch submission failed, draft retained");
                Err(err)
            }
        }
    }
}
