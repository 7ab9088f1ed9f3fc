//! Inbound event bridge handler.
//!
//! Accepts the platform's webhook POST, runs the evaluation pipeline, and
//! forwards accepted events to the alerting API. Every path produces a
//! well-formed `{statusCode, body}` response for the triggering system.

use alertgate_core::{Evaluation, RejectReason};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::AppState;

/// Generic body for the malformed-payload and dispatch-failure paths.
///
/// Deliberately uninformative: failure detail stays in the logs rather than
/// going back to the triggering system.
const ERROR_BODY: &str = "An error occurred";

/// Body acknowledging an event from an unconfigured workflow.
const IGNORED_BODY: &str = "ignored";

/// Response envelope returned to the triggering system.
///
/// The HTTP status of the response mirrors `statusCode`; on the accepted
/// path both carry the alerting API's own status so the sender sees the
/// downstream outcome.
#[derive(Debug, Serialize)]
pub struct BridgeResponse {
    /// Outcome status, mirrored in the HTTP status line.
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// Raw body: the alerting API's reply, an ack, or a generic error.
    pub body: String,
}

/// Bridges one inbound event notification to the alerting API.
///
/// Rejected events never reach the dispatcher: unknown workflows are
/// acknowledged with 200/"ignored" and malformed payloads collapse to the
/// generic 500 body. A dispatch failure is logged and also collapses to the
/// generic 500 body; the invocation itself never fails.
#[instrument(name = "receive_event", skip(state, body), fields(payload_size = body.len()))]
pub async fn receive_event(State(state): State<AppState>, body: Bytes) -> Response {
    debug!("processing inbound event notification");

    let text = match std::str::from_utf8(&body) {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "inbound payload is not valid UTF-8");
            return bridge_response(StatusCode::INTERNAL_SERVER_ERROR, ERROR_BODY.to_string());
        },
    };

    match state.registry.evaluate(text) {
        Evaluation::Accepted(message) => {
            match state.client.dispatch(&message, &state.credential).await {
                Ok(dispatched) => {
                    info!(
                        status = dispatched.status_code,
                        subject = %message.subject,
                        "alert forwarded"
                    );
                    let status = StatusCode::from_u16(dispatched.status_code)
                        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                    bridge_response(status, dispatched.body)
                },
                Err(e) => {
                    error!(error = %e, url = %state.client.endpoint(), "alert dispatch failed");
                    bridge_response(StatusCode::INTERNAL_SERVER_ERROR, ERROR_BODY.to_string())
                },
            }
        },
        Evaluation::Rejected(RejectReason::UnrecognizedWorkflow { workflow_id }) => {
            debug!(workflow_id = %workflow_id, "event acknowledged and ignored");
            bridge_response(StatusCode::OK, IGNORED_BODY.to_string())
        },
        Evaluation::Rejected(RejectReason::MalformedPayload { .. }) => {
            bridge_response(StatusCode::INTERNAL_SERVER_ERROR, ERROR_BODY.to_string())
        },
    }
}

/// Builds the `{statusCode, body}` envelope with a matching HTTP status.
fn bridge_response(status: StatusCode, body: String) -> Response {
    (status, Json(BridgeResponse { status_code: status.as_u16(), body })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_uses_wire_field_names() {
        let rendered = serde_json::to_value(BridgeResponse {
            status_code: 200,
            body: "ignored".to_string(),
        })
        .unwrap();

        assert_eq!(rendered, serde_json::json!({"statusCode": 200, "body": "ignored"}));
    }

    #[test]
    fn bridge_response_mirrors_status() {
        let response = bridge_response(StatusCode::INTERNAL_SERVER_ERROR, ERROR_BODY.to_string());
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
