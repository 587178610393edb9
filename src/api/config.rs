//! Client configuration with builder pattern
//!
//! Transport settings and monitoring toggles with sane defaults. Values can be
//! overridden from the environment (and a `.env` file) via
//! [`ClientConfig::from_env`].

use std::time::Duration;

use super::constants::API_BASE_URL;

/// Configuration for [`crate::api::ComboCurveClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub user_agent: String,
    pub monitoring: MonitoringConfig,
}

/// Monitoring and logging configuration
#[derive(Debug, Clone)]
pub struct MonitoringConfig {
    pub correlation_ids: bool,
    pub request_logging: bool,
    pub performance_metrics: bool,
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            timeout: Duration::from_secs(120), // exports and production pages can be large
            connect_timeout: Duration::from_secs(10),
            pool_max_idle_per_host: 10,
            user_agent: concat!("combocurve-api/", env!("CARGO_PKG_VERSION")).to_string(),
            monitoring: MonitoringConfig::default(),
        }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            correlation_ids: true,
            request_logging: true,
            performance_metrics: true,
            log_level: LogLevel::Info,
        }
    }
}

impl MonitoringConfig {
    /// Silence everything (for tests)
    pub fn disabled() -> Self {
        Self {
            correlation_ids: false,
            request_logging: false,
            performance_metrics: false,
            log_level: LogLevel::Error,
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Defaults overridden by `COMBOCURVE_BASE_URL` and `COMBOCURVE_TIMEOUT_SECS`
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("COMBOCURVE_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Ok(timeout) = std::env::var("COMBOCURVE_TIMEOUT_SECS") {
            let secs: u64 = timeout
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid COMBOCURVE_TIMEOUT_SECS '{}': {}", timeout, e))?;
            config.timeout = Duration::from_secs(secs);
        }

        log::debug!("Loaded client config for {}", config.base_url);
        Ok(config)
    }
}

/// Builder for ClientConfig
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.config.pool_max_idle_per_host = max;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn monitoring_config(mut self, monitoring: MonitoringConfig) -> Self {
        self.config.monitoring = monitoring;
        self
    }

    pub fn correlation_ids(mut self, enabled: bool) -> Self {
        self.config.monitoring.correlation_ids = enabled;
        self
    }

    pub fn request_logging(mut self, enabled: bool) -> Self {
        self.config.monitoring.request_logging = enabled;
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config.monitoring.log_level = level;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();

        assert_eq!(config.base_url, "https://api.combocurve.com/v1");
        assert_eq!(config.pool_max_idle_per_host, 10);
        assert!(config.user_agent.starts_with("combocurve-api/"));
        assert!(config.monitoring.correlation_ids);
        assert_eq!(config.monitoring.log_level, LogLevel::Info);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::builder()
            .base_url("http://127.0.0.1:8080/v1/")
            .timeout(Duration::from_secs(5))
            .correlation_ids(false)
            .log_level(LogLevel::Debug)
            .build();

        assert_eq!(config.base_url, "http://127.0.0.1:8080/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!config.monitoring.correlation_ids);
        assert_eq!(config.monitoring.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_disabled_monitoring() {
        let monitoring = MonitoringConfig::disabled();

        assert!(!monitoring.correlation_ids);
        assert!(!monitoring.request_logging);
        assert!(!monitoring.performance_metrics);
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Debug < LogLevel::Trace);
    }
}
