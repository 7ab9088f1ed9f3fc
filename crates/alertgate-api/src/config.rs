//! Configuration management for the alertgate bridge.

use std::{net::SocketAddr, str::FromStr, time::Duration};

use alertgate_core::{Credential, WorkflowRegistry};
use alertgate_delivery::ClientConfig;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";

/// Complete service configuration with defaults, file, and environment
/// overrides.
///
/// Configuration is loaded in priority order:
/// 1. Environment variables (highest priority)
/// 2. Configuration file (`config.toml`)
/// 3. Built-in defaults (lowest priority)
///
/// The API key has no usable default; set `API_KEY` (the deployment's
/// secret-retrieval mechanism resolves it into the environment) or put it in
/// `config.toml`. The key is held in memory for the process lifetime and is
/// never logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server
    /// Server bind address.
    ///
    /// Environment variable: `HOST`
    #[serde(default = "default_host", alias = "HOST")]
    pub host: String,
    /// Server bind port.
    ///
    /// Environment variable: `PORT`
    #[serde(default = "default_port", alias = "PORT")]
    pub port: u16,
    /// Inbound HTTP request timeout in seconds.
    ///
    /// Environment variable: `REQUEST_TIMEOUT`
    #[serde(default = "default_request_timeout", alias = "REQUEST_TIMEOUT")]
    pub request_timeout: u64,

    // Alerting API
    /// Alerting API endpoint alerts are posted to.
    ///
    /// Environment variable: `ALERT_API_URL`
    #[serde(default = "default_alert_api_url", alias = "ALERT_API_URL")]
    pub alert_api_url: String,
    /// API key for the alerting API.
    ///
    /// Environment variable: `API_KEY`
    #[serde(default, alias = "API_KEY")]
    pub api_key: String,
    /// Timeout for the outbound dispatch call in seconds.
    ///
    /// Environment variable: `DISPATCH_TIMEOUT`
    #[serde(default = "default_dispatch_timeout", alias = "DISPATCH_TIMEOUT")]
    pub dispatch_timeout: u64,

    // Workflows
    /// Workflow ids accepted by this bridge.
    ///
    /// Shown in the sending platform's URL bar when editing a notification
    /// workflow; extend this list when new workflows are added.
    ///
    /// Environment variable: `WORKFLOWS` (TOML list syntax, e.g.
    /// `WORKFLOWS='["id1","id2"]'`)
    #[serde(default, alias = "WORKFLOWS")]
    pub workflows: Vec<String>,

    // Logging
    /// Log level configuration.
    ///
    /// Environment variable: `RUST_LOG`
    #[serde(default = "default_log_level", alias = "RUST_LOG")]
    pub rust_log: String,
}

impl Config {
    /// Load configuration from defaults, config file, and environment
    /// variable overrides.
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(""));

        let config: Self = figment.extract().context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Convert to the delivery crate's client configuration.
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig {
            endpoint: self.alert_api_url.clone(),
            timeout: Duration::from_secs(self.dispatch_timeout),
            ..ClientConfig::default()
        }
    }

    /// Wraps the resolved API key as a redacted credential.
    pub fn credential(&self) -> Credential {
        Credential::new(self.api_key.clone())
    }

    /// Builds the known-workflow set from configuration.
    pub fn workflow_registry(&self) -> WorkflowRegistry {
        WorkflowRegistry::new(self.workflows.iter().cloned())
    }

    /// Parse server socket address from host and port configuration.
    pub fn parse_server_addr(&self) -> Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.host, self.port);
        SocketAddr::from_str(&addr_str).context("Invalid server address")
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }

        if self.api_key.is_empty() {
            anyhow::bail!("api_key must be set (API_KEY environment variable)");
        }

        if self.alert_api_url.is_empty() {
            anyhow::bail!("alert_api_url must not be empty");
        }

        if self.request_timeout == 0 {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        if self.dispatch_timeout == 0 {
            anyhow::bail!("dispatch_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            alert_api_url: default_alert_api_url(),
            api_key: String::new(),
            dispatch_timeout: default_dispatch_timeout(),
            workflows: Vec::new(),
            rust_log: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_alert_api_url() -> String {
    "https://api.opsgenie.com/v2/alerts".to_string()
}

fn default_dispatch_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, env, sync::Mutex};

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct TestEnvGuard {
        _lock: std::sync::MutexGuard<'static, ()>,
        vars: Vec<String>,
        originals: HashMap<String, Option<String>>,
    }

    impl TestEnvGuard {
        fn new() -> Self {
            let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            Self { _lock: lock, vars: Vec::new(), originals: HashMap::new() }
        }

        fn set_var(&mut self, key: &str, value: &str) {
            if !self.vars.contains(&key.to_string()) {
                self.originals.insert(key.to_string(), env::var(key).ok());
                self.vars.push(key.to_string());
            }
            env::set_var(key, value);
        }
    }

    impl Drop for TestEnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                match self.originals.get(var) {
                    Some(Some(value)) => env::set_var(var, value),
                    Some(None) => env::remove_var(var),
                    None => {},
                }
            }
        }
    }

    #[test]
    fn defaults_are_sane_but_need_an_api_key() {
        let config = Config::default();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.alert_api_url, "https://api.opsgenie.com/v2/alerts");
        assert!(config.workflows.is_empty());

        // An unset API key must fail validation, not limp along.
        assert!(config.validate().is_err());
    }

    #[test]
    fn env_overrides_take_priority() {
        let mut guard = TestEnvGuard::new();
        guard.set_var("API_KEY", "env-secret");
        guard.set_var("HOST", "0.0.0.0");
        guard.set_var("PORT", "9090");
        guard.set_var("ALERT_API_URL", "https://alerts.example.com/v2/alerts");
        guard.set_var("WORKFLOWS", r#"["wf-1","wf-2"]"#);
        guard.set_var("DISPATCH_TIMEOUT", "10");

        let config = Config::load().expect("config should load with env overrides");

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9090);
        assert_eq!(config.api_key, "env-secret");
        assert_eq!(config.alert_api_url, "https://alerts.example.com/v2/alerts");
        assert_eq!(config.workflows, ["wf-1", "wf-2"]);
        assert_eq!(config.dispatch_timeout, 10);
    }

    #[test]
    fn invalid_config_validation_fails() {
        let mut config = Config::default();
        config.api_key = "key".to_string();

        config.port = 0;
        assert!(config.validate().is_err());

        config = Config::default();
        config.api_key = "key".to_string();
        config.alert_api_url = String::new();
        assert!(config.validate().is_err());

        config = Config::default();
        config.api_key = "key".to_string();
        config.dispatch_timeout = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn conversions_carry_configured_values() {
        let mut config = Config::default();
        config.api_key = "key-123".to_string();
        config.alert_api_url = "https://alerts.example.com/v2/alerts".to_string();
        config.dispatch_timeout = 5;
        config.workflows = vec!["wf-1".to_string()];

        let client_config = config.to_client_config();
        assert_eq!(client_config.endpoint, "https://alerts.example.com/v2/alerts");
        assert_eq!(client_config.timeout, Duration::from_secs(5));

        let registry = config.workflow_registry();
        assert!(registry.contains("wf-1"));
        assert_eq!(registry.len(), 1);

        assert_eq!(config.credential().expose(), "key-123");
    }

    #[test]
    fn socket_address_parsing() {
        let mut config = Config::default();
        config.host = "127.0.0.1".to_string();
        config.port = 9000;

        let addr = config.parse_server_addr().expect("should parse socket address");

        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 9000);
    }
}
