//! Inbound event model, alert message, and credential handling.
//!
//! `InboundEvent` mirrors the notification shape sent by the monitoring
//! platform. All required fields are modelled strictly so that a missing
//! field becomes an explicit rejection during deserialization instead of a
//! panic deeper in the pipeline.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// Event notification received from the monitoring platform.
///
/// ```
/// use alertgate_core::InboundEvent;
///
/// let event: InboundEvent = serde_json::from_str(
///     r#"{"meta":{"workflow_id":"wf-1","trigger_name":"new detection"},"data":{}}"#,
/// )
/// .unwrap();
/// assert_eq!(event.meta.workflow_id, "wf-1");
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct InboundEvent {
    /// Workflow metadata identifying the notification rule that fired.
    pub meta: EventMeta,
    /// Field/value pairs describing the event, in the sender's order.
    ///
    /// Values are usually strings but the sender does not guarantee it;
    /// non-string values are coerced during formatting.
    pub data: serde_json::Map<String, Value>,
}

/// Metadata block of an inbound event.
#[derive(Debug, Clone, Deserialize)]
pub struct EventMeta {
    /// Identifier tying the event to a configured notification workflow.
    pub workflow_id: String,
    /// Free-text descriptor of what kind of event fired.
    pub trigger_name: String,
}

/// Structured alert forwarded to the paging API.
///
/// Constructed exclusively by [`WorkflowRegistry::evaluate`] from events
/// whose workflow id passed validation.
///
/// [`WorkflowRegistry::evaluate`]: crate::evaluate::WorkflowRegistry::evaluate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    /// Subject line shown on the page.
    pub subject: String,
    /// Multi-line rendering of the event's data fields.
    pub description: String,
}

/// Raw inbound payload, either JSON text or an already-decoded value.
///
/// The evaluator accepts both transparently; text is parsed first.
#[derive(Debug, Clone)]
pub enum RawPayload {
    /// JSON-encoded text as received on the wire.
    Text(String),
    /// Payload already decoded by an upstream layer.
    Json(Value),
}

impl From<&str> for RawPayload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for RawPayload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for RawPayload {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// Secret used to authenticate to the alerting API.
///
/// Resolved once at process start and injected into the dispatcher. The
/// value is reachable only through [`Credential::expose`]; `Debug` output is
/// redacted so the secret cannot leak through logs.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    /// Wraps a resolved secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Returns the raw secret for constructing the Authorization header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
