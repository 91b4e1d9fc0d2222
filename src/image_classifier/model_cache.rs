use crate::error::Error;
use crate::image_classifier::backend::Backend;
use crate::image_classifier::interface::ModelHandle;
use std::sync::{Mutex, PoisonError};

/// Holds on to the last loaded model when enabled. A handle is only handed
/// out again for the backend it was built for.
pub struct ModelCache {
    enabled: bool,
    slot: Mutex<Option<ModelHandle>>,
}

impl ModelCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            slot: Mutex::new(None),
        }
    }

    pub fn get(&self, backend: Backend) -> Option<ModelHandle> {
        if !self.enabled {
            return None;
        }
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|handle| handle.backend == backend)
            .cloned()
    }

    /// Cached handle for `backend`, or a fresh one from `load`. Failed loads
    /// leave the cache untouched.
    pub fn get_or_load(
        &self,
        backend: Backend,
        load: impl FnOnce(Backend) -> Result<ModelHandle, Error>,
    ) -> Result<ModelHandle, Error> {
        if let Some(handle) = self.get(backend) {
            return Ok(handle);
        }

        let handle = load(backend)?;
        if self.enabled {
            *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle.clone());
        }
        Ok(handle)
    }
}
