//! Error handling.
//!
//! This module provides:
//! - Typed errors for initialization, calculation, handle construction and
//!   spreadsheet persistence
//! - Body truncation for error messages built from HTTP responses
//!
//! Failure policy: a per-quantity calculation error or a persistence error is
//! recorded in the response diagnostics and never fails the request.

mod types;

// Re-export public API
pub use types::{
    BackendError, CapabilityError, FacilityError, HandleError, InitializationError, RecorderError,
};

/// Maximum number of characters of a response body kept in an error message
pub(crate) const MAX_ERROR_BODY_CHARS: usize = 300;

/// Truncates an HTTP response body for inclusion in an error message.
pub(crate) fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        return body.to_string();
    }
    let mut truncated: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    truncated.push_str("...");
    truncated
}
