use crate::error::Error;
use crate::image_classifier::backend::{Backend, BackendSelector};
use crate::image_classifier::download::ensure_file;
use crate::image_classifier::interface::{ImageClassifier, ModelHandle, Prediction};
use crate::image_classifier::labels::read_labels;
use crate::image_classifier::model_cache::ModelCache;
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_classifier::tract::image::preprocess;
use crate::library::logger::interface::Logger;
use crate::uploaded_image::UploadedImage;
use std::sync::Arc;
use tract_onnx::prelude::*;

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>;

struct LoadedModel {
    plan: Plan,
    labels: Vec<String>,
}

pub struct ImageClassifierTractOnnx {
    config: ModelConfig,
    backends: BackendSelector,
    cache: ModelCache,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierTractOnnx {
    pub fn new(config: ModelConfig, cache_model: bool, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            config,
            backends: BackendSelector::new(),
            cache: ModelCache::new(cache_model),
            logger: logger.with_namespace("classifier").with_namespace("tract"),
        }
    }

    fn build_plan(&self, backend: Backend) -> Result<Plan, Error> {
        let (height, width) = self.config.input_shape;

        let model = tract_onnx::onnx()
            .model_for_path(&self.config.onnx_model_path)
            .map_err(load_error)?
            .with_input_fact(0, f32::fact([1, 3, height as usize, width as usize]).into())
            .map_err(load_error)?;

        let typed = match backend {
            Backend::Optimized => model.into_optimized(),
            Backend::Reference => model.into_typed().and_then(|m| m.into_decluttered()),
        }
        .map_err(load_error)?;

        typed.into_runnable().map_err(load_error)
    }

    fn load_model(&self, backend: Backend) -> Result<ModelHandle, Error> {
        ensure_file(
            &self.config.onnx_model_path,
            self.config.model_url.as_deref(),
            self.logger.as_ref(),
        )?;
        ensure_file(
            &self.config.labels_path,
            self.config.labels_url.as_deref(),
            self.logger.as_ref(),
        )?;

        let labels = read_labels(&self.config.labels_path)?;
        let plan = self.build_plan(backend)?;

        let handle = ModelHandle::new(self.config.name.clone(), backend, LoadedModel { plan, labels });
        let _ = self.logger.info(&format!("Loaded model {:?}", handle));
        Ok(handle)
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn set_backend(&self, name: &str) -> Result<Backend, Error> {
        let backend = self.backends.select(name)?;
        let _ = self.logger.info(&format!("Backend set to {}", backend.name()));
        Ok(backend)
    }

    fn backend(&self) -> Backend {
        self.backends.active()
    }

    fn load(&self) -> Result<ModelHandle, Error> {
        self.cache
            .get_or_load(self.backends.active(), |backend| self.load_model(backend))
    }

    fn classify(&self, image: &UploadedImage, handle: &ModelHandle) -> Result<Vec<Prediction>, Error> {
        let loaded = handle.downcast::<LoadedModel>().ok_or_else(|| {
            Error::Classify(format!("{:?} was not loaded by the tract classifier", handle))
        })?;

        let input = preprocess(image.image(), &self.config)?;

        let outputs = loaded
            .plan
            .run(tvec!(input.into_tvalue()))
            .map_err(|e| Error::Classify(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| Error::Classify("model produced no outputs".to_string()))?;

        let scores: Vec<f32> = output
            .to_array_view::<f32>()
            .map_err(|e| Error::Classify(e.to_string()))?
            .iter()
            .copied()
            .collect();

        let predictions = rank_predictions(
            &scores,
            &loaded.labels,
            self.config.top_k,
            self.config.apply_softmax,
        );

        let _ = self.logger.info(&format!(
            "Classified {} as {:?}",
            image.file_name(),
            predictions
        ));

        Ok(predictions)
    }
}

fn load_error(err: impl std::fmt::Display) -> Error {
    Error::ModelLoad(err.to_string())
}

fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    let exp: Vec<f32> = scores.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exp.iter().sum();
    if sum > 0.0 {
        exp.iter().map(|x| x / sum).collect()
    } else {
        exp
    }
}

/// Top `top_k` classes, most probable first.
pub fn rank_predictions(
    scores: &[f32],
    labels: &[String],
    top_k: usize,
    apply_softmax: bool,
) -> Vec<Prediction> {
    let probabilities = if apply_softmax {
        softmax(scores)
    } else {
        scores.to_vec()
    };

    let mut indexed: Vec<(usize, f32)> = probabilities.into_iter().enumerate().collect();
    indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    indexed.truncate(top_k);

    indexed
        .into_iter()
        .map(|(index, probability)| {
            let label = labels
                .get(index)
                .cloned()
                .unwrap_or_else(|| format!("class_{}", index));
            Prediction::new(label, probability)
        })
        .collect()
}
