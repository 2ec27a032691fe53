//! Registry of named calculation capabilities.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::{CalcArg, CalcValue, Capability};
use crate::error_handling::CapabilityError;

/// Named capabilities offered by a calculation backend.
///
/// Names are matched exactly; spelling variants are the prober's concern.
#[derive(Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, Arc<dyn Capability>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `capability` under `name`, replacing any previous entry.
    pub fn with(mut self, name: impl Into<String>, capability: impl Capability + 'static) -> Self {
        self.entries.insert(name.into(), Arc::new(capability));
        self
    }

    /// Registers a synchronous function as a capability.
    pub fn with_fn<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[CalcArg]) -> Result<CalcValue, CapabilityError> + Send + Sync + 'static,
    {
        self.with(name, FnCapability(f))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Capability>> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("names", &self.names())
            .finish()
    }
}

/// Adapter turning a plain function into a [`Capability`].
struct FnCapability<F>(F);

#[async_trait]
impl<F> Capability for FnCapability<F>
where
    F: Fn(&[CalcArg]) -> Result<CalcValue, CapabilityError> + Send + Sync,
{
    async fn invoke(&self, args: &[CalcArg]) -> Result<CalcValue, CapabilityError> {
        (self.0)(args)
    }
}
