//! Application configuration loaded from environment variables.

use std::net::IpAddr;

use serde::Deserialize;
use url::Url;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Address the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    // === Authorization ===
    /// Shared secret expected as the bearer token on the data endpoint.
    #[serde(default)]
    pub api_secret_key: Option<String>,

    /// Reject data requests that do not carry the configured bearer token.
    #[serde(default)]
    pub enforce_auth: bool,

    // === Client Configuration ===
    /// Base URL the client fetches the greeting from.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Client request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,

    // === Observability ===
    /// Serve Prometheus metrics on a separate listener.
    #[serde(default)]
    pub metrics_enabled: bool,

    /// Prometheus exporter port.
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_api_base_url() -> String {
    "http://localhost:5000/".to_string()
}

fn default_http_timeout_ms() -> u64 {
    5000
}

fn default_metrics_port() -> u16 {
    9090
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_secret_key: None,
            enforce_auth: false,
            api_base_url: default_api_base_url(),
            http_timeout_ms: default_http_timeout_ms(),
            metrics_enabled: false,
            metrics_port: default_metrics_port(),
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.enforce_auth && self.secret().is_none() {
            return Err("API_SECRET_KEY is required when ENFORCE_AUTH is set".to_string());
        }

        if self.host.parse::<IpAddr>().is_err() {
            return Err(format!("HOST is not a valid IP address: {}", self.host));
        }

        if let Err(e) = Url::parse(&self.api_base_url) {
            return Err(format!("API_BASE_URL is not a valid URL: {}", e));
        }

        if self.http_timeout_ms == 0 {
            return Err("HTTP_TIMEOUT_MS must be greater than 0".to_string());
        }

        if self.metrics_enabled && self.metrics_port == self.port {
            return Err("METRICS_PORT must differ from PORT".to_string());
        }

        Ok(())
    }

    /// Log filter directive: crate debug logging when verbose, else `RUST_LOG`.
    pub fn log_directive(&self, verbose: bool) -> String {
        if verbose || self.verbose {
            "hello_api=debug,info".to_string()
        } else {
            self.rust_log.clone()
        }
    }

    /// The configured secret, ignoring blank values.
    pub fn secret(&self) -> Option<&str> {
        self.api_secret_key
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Secret with all but the last four characters masked, for display.
    pub fn masked_secret(&self) -> String {
        match self.secret() {
            Some(secret) if secret.chars().count() > 4 => {
                let start = secret
                    .char_indices()
                    .rev()
                    .nth(3)
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                format!("****{}", &secret[start..])
            }
            Some(_) => "****".to_string(),
            None => "(unset)".to_string(),
        }
    }
}
