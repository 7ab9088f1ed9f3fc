//! Outbound alert dispatch.
//!
//! This crate owns the single HTTP call the bridge makes: posting an
//! accepted alert to the paging API. There is deliberately no retry logic,
//! no response parsing, and no local recovery; the alerting API's status
//! code and body pass through unmodified so the caller can forward them to
//! the triggering system.

pub mod client;
pub mod error;

pub use client::{AlertClient, ClientConfig, DispatchResponse};
pub use error::{DispatchError, Result};

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
