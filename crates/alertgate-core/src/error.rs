//! Rejection taxonomy for inbound event evaluation.
//!
//! A rejected event is not a process failure: both variants are recovered
//! locally and mapped to a well-formed response by the HTTP layer. The
//! distinction matters because a malformed payload surfaces as a generic
//! error while an unrecognized workflow is acknowledged and ignored.

use thiserror::Error;

/// Reason an inbound event did not produce an alert.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    /// A required field was missing or had the wrong shape.
    #[error("malformed payload: {detail}")]
    MalformedPayload {
        /// Decoder error describing what was missing or mistyped.
        detail: String,
    },

    /// The event's workflow id is not in the configured set.
    #[error("unrecognized workflow: {workflow_id}")]
    UnrecognizedWorkflow {
        /// The workflow id carried by the event.
        workflow_id: String,
    },
}

impl RejectReason {
    /// Creates a malformed-payload rejection.
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedPayload { detail: detail.into() }
    }

    /// Creates an unrecognized-workflow rejection.
    pub fn unrecognized(workflow_id: impl Into<String>) -> Self {
        Self::UnrecognizedWorkflow { workflow_id: workflow_id.into() }
    }

    /// Returns whether the caller should still acknowledge the event.
    ///
    /// Unknown workflows are deliberately acknowledged so the sending
    /// platform does not keep resending them; malformed payloads are not.
    pub const fn is_acknowledged(&self) -> bool {
        matches!(self, Self::UnrecognizedWorkflow { .. })
    }
}
