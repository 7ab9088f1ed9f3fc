//! HTTP client for forwarding alerts to the paging API.
//!
//! Performs exactly one POST per accepted event. The response status and
//! raw body are returned unmodified; transport failures propagate as
//! [`DispatchError`] for the handler to convert into a generic error
//! response.

use std::time::Duration;

use alertgate_core::{AlertMessage, Credential};
use serde::Serialize;
use tracing::{debug, info_span, warn, Instrument};

use crate::error::{DispatchError, Result};

/// Configuration for the alert dispatch client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Alerting API endpoint receiving the POST.
    pub endpoint: String,
    /// Timeout for the outbound request.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.opsgenie.com/v2/alerts".to_string(),
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT_SECONDS),
            user_agent: concat!("alertgate/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Wire format of the create-alert call.
#[derive(Debug, Serialize)]
struct AlertPayload<'a> {
    message: &'a str,
    description: &'a str,
}

/// Response from an alert dispatch, passed through to the caller.
#[derive(Debug, Clone)]
pub struct DispatchResponse {
    /// HTTP status code returned by the alerting API.
    pub status_code: u16,
    /// Raw response body.
    pub body: String,
    /// Whether the request got a 2xx status.
    pub is_success: bool,
}

/// HTTP client for the alerting API.
///
/// Wraps a pooled `reqwest::Client`; cheap to clone and share across
/// request handlers.
#[derive(Debug, Clone)]
pub struct AlertClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl AlertClient {
    /// Creates a new dispatch client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::Configuration` if the HTTP client cannot be
    /// built with the provided settings.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                DispatchError::configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Endpoint this client posts alerts to.
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Posts one alert to the alerting API.
    ///
    /// Sends `{"message": subject, "description": description}` with the
    /// `GenieKey` authorization scheme. No retries: the caller decides what
    /// a failure means.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Timeout`] when the request exceeds the
    /// configured timeout and [`DispatchError::Network`] for any other
    /// transport failure. Non-2xx responses are `Ok`.
    pub async fn dispatch(
        &self,
        message: &AlertMessage,
        credential: &Credential,
    ) -> Result<DispatchResponse> {
        let span = info_span!("alert_dispatch", url = %self.config.endpoint, subject = %message.subject);

        async move {
            debug!("posting alert");

            let payload =
                AlertPayload { message: &message.subject, description: &message.description };

            let response = self
                .client
                .post(&self.config.endpoint)
                .header("content-type", "application/json")
                .header("authorization", format!("GenieKey {}", credential.expose()))
                .json(&payload)
                .send()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        DispatchError::timeout(self.config.timeout.as_secs())
                    } else if e.is_connect() {
                        DispatchError::network(format!("connection failed: {e}"))
                    } else {
                        DispatchError::network(e.to_string())
                    }
                })?;

            let status_code = response.status().as_u16();
            let is_success = response.status().is_success();

            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!("failed to read response body: {}", e);
                    format!("[failed to read response body: {e}]")
                },
            };

            if is_success {
                debug!(status = status_code, "alert accepted by paging API");
            } else {
                warn!(status = status_code, "paging API returned non-success status");
            }

            Ok(DispatchResponse { status_code, body, is_success })
        }
        .instrument(span)
        .await
    }
}
