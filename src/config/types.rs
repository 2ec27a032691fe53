//! Configuration types and CLI options.
//!
//! `Config` is parsed by `clap` from flags and environment variables, and can
//! also be built programmatically through `Default`.

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_FRONTEND_ORIGIN, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SHEETS_API_URL,
    DEFAULT_TIMEOUT_SECS, DEFAULT_VEDASTRO_API_URL,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Service configuration.
///
/// Every option can come from a flag or from the environment (a `.env` file
/// is loaded first by the binary). The spreadsheet id and the service-account
/// document are both optional; persistence is enabled only when both are set.
///
/// # Examples
///
/// ```bash
/// # Defaults: listen on 0.0.0.0:8000, public calculation API, no spreadsheet
/// panchang_service
///
/// # Restrict CORS and enable the spreadsheet log
/// FRONTEND_ORIGIN=https://example.org \
/// GSHEET_ID=1AbC... GOOGLE_SERVICE_ACCOUNT_JSON="$(cat sa.json)" \
/// panchang_service --port 9000
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "panchang_service",
    about = "Serves Panchang data (tithi, nakshatra, yoga, karan, kaal windows) over HTTP."
)]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Allowed cross-origin value (`*` allows any origin)
    #[arg(long, env = "FRONTEND_ORIGIN", default_value = DEFAULT_FRONTEND_ORIGIN)]
    pub frontend_origin: String,

    /// Spreadsheet id for the result log
    #[arg(long, env = "GSHEET_ID")]
    pub gsheet_id: Option<String>,

    /// Full service-account credential document (JSON text)
    #[arg(long, env = "GOOGLE_SERVICE_ACCOUNT_JSON", hide_env_values = true)]
    pub google_service_account_json: Option<String>,

    /// Base URL of the calculation API
    #[arg(long, env = "VEDASTRO_API_URL", default_value = DEFAULT_VEDASTRO_API_URL)]
    pub vedastro_api_url: String,

    /// Base URL of the Google Sheets API
    #[arg(long, env = "SHEETS_API_URL", default_value = DEFAULT_SHEETS_API_URL)]
    pub sheets_api_url: String,

    /// Timeout for outbound HTTP calls, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Config {
    /// Returns the spreadsheet id and credential document when both are set.
    ///
    /// Blank values count as unset, so `GSHEET_ID=` in a `.env` file disables
    /// persistence the same way a missing variable does.
    pub fn sheet_settings(&self) -> Option<(&str, &str)> {
        let id = non_blank(self.gsheet_id.as_deref())?;
        let credentials = non_blank(self.google_service_account_json.as_deref())?;
        Some((id, credentials))
    }

    /// Socket address string the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            frontend_origin: DEFAULT_FRONTEND_ORIGIN.to_string(),
            gsheet_id: None,
            google_service_account_json: None,
            vedastro_api_url: DEFAULT_VEDASTRO_API_URL.to_string(),
            sheets_api_url: DEFAULT_SHEETS_API_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
