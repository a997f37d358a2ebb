use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_APP_NAME: &str = "FastAPI Backend Template";
pub const DEFAULT_LOG_LEVEL: &str = "INFO";
pub const DEFAULT_TOOLS_BASE_URL: &str = "http://localhost:8000/tools";
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a positive number of seconds, got '{value}'")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("{var} is not a valid socket address: '{value}'")]
    InvalidAddr { var: &'static str, value: String },

    #[error("{var} must be true or false, got '{value}'")]
    InvalidFlag { var: &'static str, value: String },
}

// The process configuration. Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Settings {
    pub app_name: String,
    pub log_level: String,
    pub tools_base_url: String,
    pub tool_timeout: Duration,
    pub request_timeout: Duration,
    pub bind_addr: SocketAddr,
    pub serve_tools: bool,
}

impl Settings {
    /// Loads `.env` (if present) and then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_name = lookup("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string());
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let tools_base_url = lookup("TOOLS_BASE_URL")
            .unwrap_or_else(|| DEFAULT_TOOLS_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let tool_timeout = parse_timeout(&lookup, "TOOL_TIMEOUT_SECS", DEFAULT_TOOL_TIMEOUT_SECS)?;
        let request_timeout =
            parse_timeout(&lookup, "REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        let raw_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidAddr {
                var: "BIND_ADDR",
                value: raw_addr.clone(),
            })?;

        let serve_tools = match lookup("SERVE_TOOLS") {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                var: "SERVE_TOOLS",
                value: raw,
            })?,
            None => true,
        };

        Ok(Self {
            app_name,
            log_level,
            tools_base_url,
            tool_timeout,
            request_timeout,
            bind_addr,
            serve_tools,
        })
    }

    /// Translates `LOG_LEVEL` into a tracing filter directive.
    ///
    /// Accepts tracing's own names in any case, plus the `WARNING` and
    /// `CRITICAL` spellings. Anything unrecognised falls back to `info`.
    pub fn log_filter(&self) -> &'static str {
        match self.log_level.trim().to_ascii_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" | "warning" => "warn",
            "error" | "critical" | "fatal" => "error",
            "off" => "off",
            _ => "info",
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            tools_base_url: DEFAULT_TOOLS_BASE_URL.to_string(),
            tool_timeout: Duration::from_secs(DEFAULT_TOOL_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            serve_tools: true,
        }
    }
}

fn parse_timeout<F>(lookup: &F, var: &'static str, default_secs: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(Duration::from_secs(default_secs));
    };
    let parsed = raw.trim().parse::<u64>();
    match parsed {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout { var, value: raw }),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
