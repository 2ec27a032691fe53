//! Error type definitions.
//!
//! Each concern of the service gets its own error enum. Only
//! `InitializationError` and construction failures (`HandleError`) can stop a
//! request or the process; the others are folded into response diagnostics.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for startup failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The configured frontend origin is not a valid header value.
    #[error("Invalid frontend origin {0:?}")]
    OriginError(String),
}

/// Errors initializing the remote calculation backend.
///
/// Any of these leaves the calculation facility unavailable; the message is
/// reported on every Panchang request.
#[derive(Error, Debug)]
pub enum BackendError {
    /// No backend URL configured.
    #[error("calculation backend URL is empty")]
    EmptyUrl,

    /// The backend URL does not parse.
    #[error("invalid calculation backend URL: {0}")]
    Url(#[from] url::ParseError),

    /// The backend URL is not http or https.
    #[error("unsupported calculation backend scheme {0:?}")]
    Scheme(String),
}

/// Failure reported by a single calculation capability.
#[derive(Error, Debug)]
pub enum CapabilityError {
    /// Transport-level failure talking to the calculation backend.
    #[error("calculation request failed: {0}")]
    Transport(#[from] ReqwestError),

    /// The backend answered with a non-success HTTP status.
    #[error("calculation backend returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body (truncated)
        body: String,
    },

    /// The backend answered but refused the calculation.
    #[error("calculation rejected: {0}")]
    Rejected(String),

    /// The capability does not accept the supplied arguments.
    #[error("invalid arguments: {0}")]
    Arguments(String),

    /// Any other failure raised inside a capability.
    #[error("{0}")]
    Failed(String),
}

/// Errors surfaced by the capability prober.
///
/// "Nothing resolved" is not an error: the prober returns `Ok(None)` for it.
#[derive(Error, Debug)]
pub enum FacilityError {
    /// The facility failed to initialize; carries the original reason.
    #[error("VedAstro not available: {0}")]
    Unavailable(String),

    /// A capability was found under `name` but failed when invoked.
    #[error("{name} failed: {source}")]
    Invocation {
        /// The catalog name that resolved
        name: String,
        /// The capability's own error
        #[source]
        source: CapabilityError,
    },
}

/// Errors constructing location and time handles.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HandleError {
    /// A coordinate is outside its valid range or not finite.
    #[error("invalid {axis} {value} for location {name:?}")]
    Coordinate {
        /// Place name the handle was built for
        name: String,
        /// `latitude` or `longitude`
        axis: &'static str,
        /// Rejected value
        value: f64,
    },

    /// The time string matches none of the accepted formats.
    #[error(
        "unrecognized time {0:?}; expected \"HH:MM DD/MM/YYYY +HH:MM\", \"HH:MM YYYY-MM-DD +HH:MM\" or RFC 3339"
    )]
    Time(String),
}

/// Errors in the spreadsheet write sequence.
///
/// These never reach the HTTP response directly: the recorder logs them and
/// reports `false`.
#[derive(Error, Debug)]
pub enum RecorderError {
    /// The service-account document is not valid JSON or lacks fields.
    #[error("invalid service account credentials: {0}")]
    Credentials(#[from] serde_json::Error),

    /// The private key could not sign the assertion.
    #[error("failed to sign service account assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// The Sheets API base URL does not parse or cannot take a path.
    #[error("invalid spreadsheet API URL: {0}")]
    Url(String),

    /// Transport-level failure talking to Google.
    #[error("spreadsheet request failed: {0}")]
    Http(#[from] ReqwestError),

    /// Google answered with a non-success status.
    #[error("{operation} returned HTTP {status}: {body}")]
    Api {
        /// Which step failed (token, open, add worksheet, ...)
        operation: &'static str,
        /// HTTP status code
        status: u16,
        /// Response body (truncated)
        body: String,
    },
}
