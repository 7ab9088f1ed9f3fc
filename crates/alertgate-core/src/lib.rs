//! Core domain types and the event evaluation pipeline.
//!
//! Provides the inbound event model, alert message construction, and the
//! workflow validation logic for the webhook-to-alert bridge. The other
//! crates depend on these foundational types; this crate performs no I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod evaluate;
pub mod event;

pub use error::RejectReason;
pub use evaluate::{Evaluation, WorkflowRegistry};
pub use event::{AlertMessage, Credential, EventMeta, InboundEvent, RawPayload};
