use crate::error::Error;
use std::sync::{Mutex, PoisonError};

/// Execution paths offered by the inference engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Decluttered and optimized plan.
    Optimized,
    /// Decluttered plan without the optimizer passes.
    #[default]
    Reference,
}

impl Backend {
    pub const ALL: [Backend; 2] = [Backend::Optimized, Backend::Reference];

    pub fn name(&self) -> &'static str {
        match self {
            Backend::Optimized => "tract-optimized",
            Backend::Reference => "tract-reference",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, Error> {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|backend| backend.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::BackendSelection {
                backend: wanted.to_string(),
                reason: format!(
                    "unknown backend, expected one of: {}",
                    Self::ALL.map(|b| b.name()).join(", ")
                ),
            })
    }
}

/// Backend shared by every load of one classifier. Starts on the default
/// backend so classification works even if selection never succeeds.
#[derive(Debug, Default)]
pub struct BackendSelector {
    active: Mutex<Backend>,
}

impl BackendSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&self, name: &str) -> Result<Backend, Error> {
        let backend = Backend::from_name(name)?;
        *self.active.lock().unwrap_or_else(PoisonError::into_inner) = backend;
        Ok(backend)
    }

    pub fn active(&self) -> Backend {
        *self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
