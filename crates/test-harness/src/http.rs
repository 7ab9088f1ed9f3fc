//! HTTP mocking utilities for the alerting API.

use wiremock::{
    matchers::{header, method},
    Mock, MockServer, Request, ResponseTemplate,
};

/// Mock alerting API for dispatch testing.
///
/// Wraps a wiremock server on a random port. Tests point the dispatch
/// client's endpoint at [`AlertApiMock::alerts_url`] and assert on the
/// requests the bridge actually sent.
pub struct AlertApiMock {
    server: MockServer,
}

impl AlertApiMock {
    /// Starts a new mock server on a random port.
    pub async fn start() -> Self {
        Self { server: MockServer::start().await }
    }

    /// Returns the base URL of the mock server.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Returns the create-alert endpoint URL for client configuration.
    pub fn alerts_url(&self) -> String {
        format!("{}/v2/alerts", self.server.uri())
    }

    /// Configures every POST to succeed with the paging API's usual reply.
    pub async fn respond_accepted(&self) {
        self.respond_with(202, r#"{"result":"Request will be processed","took":0.1}"#).await;
    }

    /// Configures every POST to return the given status and body.
    pub async fn respond_with(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Configures a mock that only matches the expected GenieKey credential.
    pub async fn respond_to_credential(&self, credential: &str, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(header("authorization", format!("GenieKey {credential}").as_str()))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Returns all requests received by the server.
    pub async fn received_requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Asserts that exactly n requests were received.
    pub async fn assert_request_count(&self, expected: usize) {
        let requests = self.received_requests().await;
        assert_eq!(
            requests.len(),
            expected,
            "Expected {} requests, received {}",
            expected,
            requests.len()
        );
    }
}

/// HTTP assertions for dispatched alerts.
pub mod assertions {
    use serde_json::Value;
    use wiremock::Request;

    /// Asserts that a request contains the expected header.
    pub fn assert_header_present(request: &Request, key: &str, value: &str) {
        let header_value = request
            .headers
            .get(key)
            .unwrap_or_else(|| panic!("Header '{}' not present", key));

        assert_eq!(header_value.to_str().unwrap(), value, "Header '{}' has unexpected value", key);
    }

    /// Asserts that the request body matches expected JSON.
    pub fn assert_json_body(request: &Request, expected: &Value) {
        let actual: Value =
            serde_json::from_slice(&request.body).expect("Failed to parse request body as JSON");

        assert_eq!(actual, *expected, "Request body does not match expected JSON");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_server_starts() {
        let server = AlertApiMock::start().await;
        assert!(!server.url().is_empty());
        assert!(server.url().starts_with("http://"));
        assert!(server.alerts_url().ends_with("/v2/alerts"));
    }
}
