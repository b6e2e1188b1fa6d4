use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid timing configuration: {0}")]
    InvalidTiming(String),
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub timing: TimingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Durations driving the dashboard lifecycle, in milliseconds.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TimingSettings {
    #[serde(default = "default_loading_delay_ms")]
    pub loading_delay_ms: u64,
    #[serde(default = "default_live_update_interval_ms")]
    pub live_update_interval_ms: u64,
    #[serde(default = "default_refresh_delay_ms")]
    pub refresh_delay_ms: u64,
    /// A session with no open stream and no requests for this long is reclaimed.
    #[serde(default = "default_session_idle_timeout_ms")]
    pub session_idle_timeout_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            loading_delay_ms: default_loading_delay_ms(),
            live_update_interval_ms: default_live_update_interval_ms(),
            refresh_delay_ms: default_refresh_delay_ms(),
            session_idle_timeout_ms: default_session_idle_timeout_ms(),
        }
    }
}

impl TimingSettings {
    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.loading_delay_ms)
    }

    pub fn live_update_interval(&self) -> Duration {
        Duration::from_millis(self.live_update_interval_ms)
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }

    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_millis(self.session_idle_timeout_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        // tokio intervals panic on a zero period
        if self.live_update_interval_ms == 0 {
            return Err(ConfigError::InvalidTiming(
                "live_update_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.session_idle_timeout_ms == 0 {
            return Err(ConfigError::InvalidTiming(
                "session_idle_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_loading_delay_ms() -> u64 {
    1_500
}

fn default_live_update_interval_ms() -> u64 {
    10_000
}

fn default_refresh_delay_ms() -> u64 {
    2_000
}

fn default_session_idle_timeout_ms() -> u64 {
    300_000
}

/// Load `config/dashboard.toml` (optional), overridden by `DASHBOARD__*` env vars.
pub fn load_dashboard_config() -> Result<DashboardConfig, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(environment());

    finish(builder)
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("DASHBOARD")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn finish(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<DashboardConfig, ConfigError> {
    let config: DashboardConfig = builder.build()?.try_deserialize()?;
    config.timing.validate()?;
    Ok(config)
}
