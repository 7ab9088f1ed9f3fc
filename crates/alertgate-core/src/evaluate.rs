//! Event validation and alert message formatting.
//!
//! The pipeline decodes a raw payload, checks its workflow id against the
//! configured set, and renders the accepted event into a subject line plus a
//! line-per-field description. Rejections are explicit outcomes, never
//! panics: a malformed payload must not take the process down, and an
//! unknown workflow is acknowledged and ignored rather than treated as an
//! error.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::{
    error::RejectReason,
    event::{AlertMessage, InboundEvent, RawPayload},
};

/// Subject used when the trigger name matches no known event kind.
const GENERIC_SUBJECT: &str = "New event has occurred";
/// Subject for detection-style triggers.
const DETECTION_SUBJECT: &str = "New detection has occurred";
/// Subject for incident-style triggers.
const INCIDENT_SUBJECT: &str = "New incident has occurred";

/// Outcome of evaluating one inbound payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// The event belongs to a known workflow; forward this alert.
    Accepted(AlertMessage),
    /// The event was dropped; the reason decides the response shape.
    Rejected(RejectReason),
}

impl Evaluation {
    /// Returns the alert message if the event was accepted.
    pub fn accepted(self) -> Option<AlertMessage> {
        match self {
            Self::Accepted(message) => Some(message),
            Self::Rejected(_) => None,
        }
    }
}

/// Read-only set of workflow ids this bridge is configured to accept.
///
/// Built once at startup from configuration and shared across requests.
/// Updated by configuration change and redeploy when new notification
/// workflows are added on the sending platform.
#[derive(Debug, Clone, Default)]
pub struct WorkflowRegistry {
    workflows: HashSet<String>,
}

impl WorkflowRegistry {
    /// Builds a registry from configured workflow ids.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { workflows: ids.into_iter().map(Into::into).collect() }
    }

    /// Returns whether the given workflow id is recognized.
    pub fn contains(&self, workflow_id: &str) -> bool {
        self.workflows.contains(workflow_id)
    }

    /// Number of configured workflows.
    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    /// Returns whether no workflows are configured.
    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }

    /// Validates a raw payload and formats it into an alert message.
    ///
    /// Accepts JSON text or an already-decoded value. Any missing required
    /// field rejects the event with [`RejectReason::MalformedPayload`]; the
    /// raw payload is logged for offline diagnosis. An id outside the
    /// registry rejects with [`RejectReason::UnrecognizedWorkflow`].
    pub fn evaluate(&self, payload: impl Into<RawPayload>) -> Evaluation {
        let value = match payload.into() {
            RawPayload::Json(value) => value,
            RawPayload::Text(text) => match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(err) => {
                    warn!(payload = %text, error = %err, "inbound payload is not valid JSON");
                    return Evaluation::Rejected(RejectReason::malformed(err.to_string()));
                },
            },
        };

        let event = match InboundEvent::deserialize(&value) {
            Ok(event) => event,
            Err(err) => {
                warn!(payload = %value, error = %err, "inbound fields were not as expected");
                return Evaluation::Rejected(RejectReason::malformed(err.to_string()));
            },
        };

        if !self.contains(&event.meta.workflow_id) {
            warn!(workflow_id = %event.meta.workflow_id, "unexpected workflow id, ignoring event");
            return Evaluation::Rejected(RejectReason::unrecognized(event.meta.workflow_id));
        }

        let subject = derive_subject(&event.meta.trigger_name);

        let mut description = String::new();
        for (key, value) in &event.data {
            description.push_str(&display_field_name(key));
            description.push_str(":  ");
            description.push_str(&display_value(value));
            description.push('\n');
        }

        Evaluation::Accepted(AlertMessage { subject: subject.to_string(), description })
    }
}

/// Picks the subject line from the trigger name.
///
/// Ordered, first-match-wins substring checks against the lower-cased
/// trigger; the detection check takes precedence when both match.
fn derive_subject(trigger_name: &str) -> &'static str {
    let trigger = trigger_name.to_lowercase();
    if trigger.contains("new detection") {
        DETECTION_SUBJECT
    } else if trigger.contains("new incident") {
        INCIDENT_SUBJECT
    } else {
        GENERIC_SUBJECT
    }
}

/// Derives a human-readable field name from a data key.
///
/// Keys arrive in `section.field_name` form; everything before the first
/// dot is dropped, underscores become spaces, and only the first character
/// is uppercased. The rest of the string keeps its casing.
fn display_field_name(key: &str) -> String {
    let base = key.split_once('.').map_or(key, |(_, rest)| rest);
    let spaced = base.replace('_', " ");

    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}

/// Renders a data value for the description.
///
/// Values are contractually strings but the sender has been seen to drift;
/// anything else falls back to its compact JSON rendering instead of
/// failing the whole event.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
