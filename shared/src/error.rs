//! Error types for the shared model layer

use thiserror::Error;

/// A modifier's condition payload could not be parsed from its wire form.
///
/// This never propagates out of condition ingestion: malformed payloads are
/// captured as [`crate::models::ConditionSlot::Malformed`] so the pricing
/// engine can fail closed instead of raising mid-edit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid condition payload: {reason}")]
pub struct ConditionParseError {
    /// Parser message describing what was wrong with the payload
    pub reason: String,
}

impl ConditionParseError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
