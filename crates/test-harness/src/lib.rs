//! Test harness for alertgate integration and unit tests.
//!
//! Provides a mocked alerting API and inbound payload fixtures so tests can
//! drive the full bridge pipeline without touching the real paging service.

pub mod fixtures;
pub mod http;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Test environment with the mocked alerting API.
pub struct TestEnv {
    /// Mock standing in for the paging service.
    pub alert_api: http::AlertApiMock,
}

impl TestEnv {
    /// Creates a new test environment with tracing initialized.
    pub async fn new() -> Result<Self> {
        // Initialize tracing for tests
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("warn,alertgate=debug")),
            )
            .with_test_writer()
            .try_init();

        let alert_api = http::AlertApiMock::start().await;

        Ok(Self { alert_api })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_environment_setup() {
        let env = TestEnv::new().await.unwrap();

        assert!(env.alert_api.url().starts_with("http://"));
    }
}
