//! Calculation facility.
//!
//! The astronomical work is done by an external calculation backend. This
//! module wraps it behind a catalog of named capabilities and provides:
//! - [`CalculationFacility`]: the backend plus its initialization state
//! - Name probing ([`probe`]): several spellings of a name are tried in order
//! - Location and time handles passed to calculations
//!
//! A facility that failed to initialize stays in place and reports the
//! original reason on every call, so the service can run without a backend.

mod catalog;
mod handles;
pub mod probe;
mod remote;

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error_handling::{CapabilityError, FacilityError};

pub use catalog::Catalog;
pub use handles::{GeoLocation, TimePoint};
pub use remote::{RemoteBackend, REMOTE_CALCULATIONS};

/// Argument passed to a calculation.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcArg {
    /// An instant observed from a place
    Time(TimePoint),
}

/// Result object returned by a calculation.
///
/// Backends return loosely structured values. `name` holds the name-like
/// attribute when the value has one; `text` is the value's string form.
#[derive(Debug, Clone, PartialEq)]
pub struct CalcValue {
    name: Option<String>,
    text: String,
}

impl CalcValue {
    /// A value with a name-like attribute.
    pub fn named(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            text: text.into(),
        }
    }

    /// A value with only a string form.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            name: None,
            text: text.into(),
        }
    }

    /// Builds a value from a JSON payload.
    ///
    /// A single-key object is unwrapped first (`{"TithiAtTime": {...}}`). The
    /// name comes from a `Name` or `name` string field. Strings keep their raw
    /// text; `null`, `{}` and `[]` give an empty value; everything else is
    /// rendered as compact JSON.
    pub fn from_json(value: Value) -> Self {
        let value = match value {
            Value::Object(map) if map.len() == 1 => match map.into_iter().next() {
                Some((_, inner)) => inner,
                None => Value::Null,
            },
            other => other,
        };

        let name = value
            .get("Name")
            .or_else(|| value.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string);
        let text = match value {
            Value::Null => String::new(),
            Value::String(s) => s,
            Value::Array(items) if items.is_empty() => String::new(),
            Value::Object(fields) if fields.is_empty() => String::new(),
            other => other.to_string(),
        };
        Self { name, text }
    }

    /// True when the calculation produced nothing usable.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.text.trim().is_empty()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Human-readable label: the name-like attribute, else the string form.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.text)
    }
}

impl fmt::Display for CalcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A single named calculation.
#[async_trait]
pub trait Capability: Send + Sync {
    /// Runs the calculation.
    async fn invoke(&self, args: &[CalcArg]) -> Result<CalcValue, CapabilityError>;
}

/// The calculation backend as seen by request handlers.
///
/// Built once at startup and shared read-only.
#[derive(Debug)]
pub struct CalculationFacility {
    state: Result<Catalog, String>,
}

impl CalculationFacility {
    /// A facility serving `catalog`.
    pub fn new(catalog: Catalog) -> Self {
        Self { state: Ok(catalog) }
    }

    /// A facility that failed to initialize for `reason`.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: Err(reason.into()),
        }
    }

    /// Connects the REST backend at `base_url`.
    ///
    /// Initialization problems do not fail this call; they leave the facility
    /// unavailable with the error message as its reason.
    pub fn remote(base_url: &str, client: reqwest::Client) -> Self {
        match RemoteBackend::new(base_url, client) {
            Ok(backend) => Self::new(backend.catalog()),
            Err(e) => Self::unavailable(e.to_string()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.state.is_ok()
    }

    /// The initialization failure, if any.
    pub fn init_error(&self) -> Option<&str> {
        self.state.as_ref().err().map(String::as_str)
    }

    /// Locates `name` (or one of its spelling variants) and invokes it.
    ///
    /// Returns `Ok(None)` when no variant is registered or the capability
    /// returned an empty value. A capability that fails is reported as
    /// `FacilityError::Invocation` and is not retried under another spelling.
    ///
    /// # Errors
    ///
    /// `FacilityError::Unavailable` if the facility failed to initialize,
    /// `FacilityError::Invocation` if the resolved capability failed.
    pub async fn safe_call(
        &self,
        name: &str,
        args: &[CalcArg],
    ) -> Result<Option<CalcValue>, FacilityError> {
        let catalog = self
            .state
            .as_ref()
            .map_err(|reason| FacilityError::Unavailable(reason.clone()))?;

        let Some((resolved, capability)) = probe::resolve(catalog, name) else {
            log::debug!("No capability registered for {} or its variants", name);
            return Ok(None);
        };
        if resolved != name {
            log::debug!("Resolved {} as {}", name, resolved);
        }

        match capability.invoke(args).await {
            Ok(value) if value.is_empty() => {
                log::debug!("{} returned no value", resolved);
                Ok(None)
            }
            Ok(value) => Ok(Some(value)),
            Err(source) => Err(FacilityError::Invocation {
                name: resolved,
                source,
            }),
        }
    }
}
