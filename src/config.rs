use crate::image_classifier::backend::Backend;
use crate::image_classifier::models::model_config::ModelConfig;
use crate::notifier::interface::Position;
use chrono::Offset;
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_MODEL_DIR: &str = "IMAGE_PREDICTOR_MODEL_DIR";
pub const ENV_BACKEND: &str = "IMAGE_PREDICTOR_BACKEND";
pub const ENV_CACHE_MODEL: &str = "IMAGE_PREDICTOR_CACHE_MODEL";
pub const ENV_CLASSIFIER: &str = "IMAGE_PREDICTOR_CLASSIFIER";
pub const ENV_TOAST_POSITION: &str = "IMAGE_PREDICTOR_TOAST_POSITION";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierKind {
    TractOnnx,
    Fake,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationConfig {
    pub duration: Duration,
    pub position: Position,
    pub max_visible: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(10),
            position: Position::TopCenter,
            max_visible: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend requested once at start-up.
    pub backend: String,
    pub classifier: ClassifierKind,
    pub model: ModelConfig,
    /// Keep the loaded model between classifications instead of reloading it.
    pub cache_model: bool,
    pub notifications: NotificationConfig,
    pub logger_timezone: chrono::FixedOffset,
    pub repaint_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::Optimized.name().to_string(),
            classifier: ClassifierKind::TractOnnx,
            model: ModelConfig::default(),
            cache_model: false,
            notifications: NotificationConfig::default(),
            logger_timezone: utc(),
            repaint_interval: Duration::from_millis(100),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_MODEL_DIR) {
            config.model = ModelConfig::mobilenet(&PathBuf::from(dir));
        }

        if let Some(backend) = lookup(ENV_BACKEND) {
            config.backend = backend;
        }

        if let Some(cache) = lookup(ENV_CACHE_MODEL) {
            config.cache_model = matches!(cache.to_lowercase().as_str(), "1" | "true" | "yes");
        }

        if let Some(kind) = lookup(ENV_CLASSIFIER) {
            if kind.eq_ignore_ascii_case("fake") {
                config.classifier = ClassifierKind::Fake;
            }
        }

        if let Some(position) = lookup(ENV_TOAST_POSITION).and_then(|p| Position::from_name(&p)) {
            config.notifications.position = position;
        }

        config
    }
}

fn utc() -> chrono::FixedOffset {
    chrono::Utc.fix()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend, "tract-optimized");
        assert_eq!(config.notifications.duration, Duration::from_secs(10));
        assert_eq!(config.notifications.position, Position::TopCenter);
        assert_eq!(config.model.top_k, 3);
        assert!(!config.cache_model);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            (ENV_MODEL_DIR, "/tmp/weights"),
            (ENV_BACKEND, "webgl"),
            (ENV_CACHE_MODEL, "true"),
            (ENV_CLASSIFIER, "FAKE"),
            (ENV_TOAST_POSITION, "bottom-right"),
        ]));

        assert_eq!(config.backend, "webgl");
        assert!(config.cache_model);
        assert_eq!(config.classifier, ClassifierKind::Fake);
        assert_eq!(config.notifications.position, Position::BottomRight);
        assert_eq!(
            config.model.onnx_model_path,
            PathBuf::from("/tmp/weights/mobilenetv2-7.onnx")
        );
    }

    #[test]
    fn test_unknown_values_keep_defaults() {
        let config = Config::from_lookup(lookup(&[
            (ENV_CLASSIFIER, "gpu"),
            (ENV_TOAST_POSITION, "middle"),
        ]));
        assert_eq!(config.classifier, ClassifierKind::TractOnnx);
        assert_eq!(config.notifications.position, Position::TopCenter);
    }
}
