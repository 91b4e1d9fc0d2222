use crate::error::Error;
use crate::image_classifier::backend::{Backend, BackendSelector};
use crate::image_classifier::interface::{ImageClassifier, ModelHandle, Prediction};
use crate::image_classifier::model_cache::ModelCache;
use crate::library::logger::interface::Logger;
use crate::uploaded_image::UploadedImage;
use rand::distr::{Distribution, Uniform};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

type PredictFn = Box<dyn Fn(&UploadedImage) -> Vec<Prediction> + Send + Sync>;
type DelayFn = Box<dyn Fn(&UploadedImage) -> Duration + Send + Sync>;

const OBJECTS: [&str; 18] = [
    "golden retriever", "tabby, tabby cat", "seashore", "sports car", "folding chair",
    "dining table", "goldfinch", "oak", "mountain bike", "book jacket", "notebook computer",
    "cellular telephone", "coffee mug", "water bottle", "computer keyboard", "mouse",
    "pot, flowerpot", "wall clock",
];

/// Stand-in classifier. Without scripted predictions it answers with random
/// labels, which is enough to drive the window without model files.
pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    backends: BackendSelector,
    cache: ModelCache,
    predict: Option<PredictFn>,
    classify_delay: Option<DelayFn>,
    load_delay: Duration,
    fail_backend: bool,
    fail_load: bool,
    fail_classify: bool,
    loads: AtomicUsize,
    classifications: AtomicUsize,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("classifier").with_namespace("fake"),
            backends: BackendSelector::new(),
            cache: ModelCache::new(false),
            predict: None,
            classify_delay: None,
            load_delay: Duration::ZERO,
            fail_backend: false,
            fail_load: false,
            fail_classify: false,
            loads: AtomicUsize::new(0),
            classifications: AtomicUsize::new(0),
        }
    }

    pub fn with_cache_model(mut self, enabled: bool) -> Self {
        self.cache = ModelCache::new(enabled);
        self
    }

    #[allow(dead_code)]
    pub fn with_predictions(self, predictions: Vec<Prediction>) -> Self {
        self.with_predictions_fn(move |_| predictions.clone())
    }

    #[allow(dead_code)]
    pub fn with_predictions_fn(
        mut self,
        predict: impl Fn(&UploadedImage) -> Vec<Prediction> + Send + Sync + 'static,
    ) -> Self {
        self.predict = Some(Box::new(predict));
        self
    }

    #[allow(dead_code)]
    pub fn with_classify_delay(
        mut self,
        delay: impl Fn(&UploadedImage) -> Duration + Send + Sync + 'static,
    ) -> Self {
        self.classify_delay = Some(Box::new(delay));
        self
    }

    #[allow(dead_code)]
    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    #[allow(dead_code)]
    pub fn failing_backend(mut self) -> Self {
        self.fail_backend = true;
        self
    }

    #[allow(dead_code)]
    pub fn failing_load(mut self) -> Self {
        self.fail_load = true;
        self
    }

    #[allow(dead_code)]
    pub fn failing_classify(mut self) -> Self {
        self.fail_classify = true;
        self
    }

    #[allow(dead_code)]
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn classify_count(&self) -> usize {
        self.classifications.load(Ordering::SeqCst)
    }

    fn random_predictions(&self) -> Result<Vec<Prediction>, Error> {
        let mut rng = rand::rng();
        let index_dist =
            Uniform::new(0, OBJECTS.len()).map_err(|e| Error::Classify(e.to_string()))?;
        let confidence_dist =
            Uniform::new(0.0f32, 1.0).map_err(|e| Error::Classify(e.to_string()))?;

        let mut predictions: Vec<Prediction> = (0..3)
            .map(|_| {
                Prediction::new(
                    OBJECTS[index_dist.sample(&mut rng)],
                    confidence_dist.sample(&mut rng),
                )
            })
            .collect();
        predictions.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(predictions)
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn set_backend(&self, name: &str) -> Result<Backend, Error> {
        self.logger.info(&format!("set_backend({})", name)).ok();
        if self.fail_backend {
            return Err(Error::BackendSelection {
                backend: name.to_string(),
                reason: "fake backend failure".to_string(),
            });
        }
        self.backends.select(name)
    }

    fn backend(&self) -> Backend {
        self.backends.active()
    }

    fn load(&self) -> Result<ModelHandle, Error> {
        self.cache.get_or_load(self.backends.active(), |backend| {
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.logger.info("load()").ok();
            std::thread::sleep(self.load_delay);

            if self.fail_load {
                return Err(Error::ModelLoad("fake load failure".to_string()));
            }

            Ok(ModelHandle::new("FakeNet", backend, ()))
        })
    }

    fn classify(&self, image: &UploadedImage, _handle: &ModelHandle) -> Result<Vec<Prediction>, Error> {
        self.classifications.fetch_add(1, Ordering::SeqCst);
        self.logger
            .info(&format!("classify({})", image.file_name()))
            .ok();

        if let Some(delay) = &self.classify_delay {
            std::thread::sleep(delay(image));
        }

        if self.fail_classify {
            return Err(Error::Classify("fake classify failure".to_string()));
        }

        match &self.predict {
            Some(predict) => Ok(predict(image)),
            None => self.random_predictions(),
        }
    }
}
