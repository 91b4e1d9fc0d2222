use crate::error::Error;
use crate::image_classifier::backend::Backend;
use crate::uploaded_image::UploadedImage;
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub probability: f32,
}

impl Prediction {
    pub fn new(label: impl Into<String>, probability: f32) -> Self {
        Self {
            label: label.into(),
            probability,
        }
    }

    pub fn to_display_string(&self) -> String {
        format!("{}: {:.2}", self.label, self.probability)
    }
}

static NEXT_HANDLE_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque reference to a loaded model. Each classifier implementation stores
/// its own model type inside and recovers it with [`ModelHandle::downcast`].
#[derive(Clone)]
pub struct ModelHandle {
    id: u64,
    pub name: String,
    pub backend: Backend,
    model: Arc<dyn Any + Send + Sync>,
}

impl ModelHandle {
    pub fn new<T: Any + Send + Sync>(name: impl Into<String>, backend: Backend, model: T) -> Self {
        Self {
            id: NEXT_HANDLE_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            backend,
            model: Arc::new(model),
        }
    }

    pub fn downcast<T: Any>(&self) -> Option<&T> {
        self.model.downcast_ref::<T>()
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHandle")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("backend", &self.backend)
            .finish()
    }
}

impl PartialEq for ModelHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

pub trait ImageClassifier {
    /// Switches the execution backend used by later loads.
    fn set_backend(&self, name: &str) -> Result<Backend, Error>;

    #[allow(dead_code)]
    fn backend(&self) -> Backend;

    fn load(&self) -> Result<ModelHandle, Error>;

    /// Returns predictions in the order the model ranked them.
    fn classify(&self, image: &UploadedImage, handle: &ModelHandle) -> Result<Vec<Prediction>, Error>;
}
