use crate::config::{ClassifierKind, Config};
use crate::image_classifier::impl_fake::ImageClassifierFake;
use crate::image_predictor::core::Model;
use crate::image_predictor::main::ImagePredictor;
use crate::library::logger::{impl_console::LoggerConsole, interface::Logger};
use crate::notifier::impl_fake::NotifierFake;
use image::{ImageBuffer, Rgb};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub fn config() -> Config {
    Config {
        classifier: ClassifierKind::Fake,
        ..Config::default()
    }
}

pub fn logger(config: &Config) -> Arc<dyn Logger + Send + Sync> {
    Arc::new(LoggerConsole::new(config.logger_timezone))
}

/// Writes a solid image into a fresh temp directory and returns its path.
pub fn write_image(name: &str, width: u32, height: u32) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("image-predictor-test-{}", rand::random::<u64>()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    ImageBuffer::from_pixel(width, height, Rgb([120u8, 80, 40]))
        .save(&path)
        .unwrap();
    path
}

pub struct Fixture {
    pub config: Config,
    pub image_classifier: Arc<ImageClassifierFake>,
    pub notifier: Arc<NotifierFake>,
    pub predictor: ImagePredictor,
}

impl Fixture {
    pub fn new(build: impl FnOnce(ImageClassifierFake) -> ImageClassifierFake) -> Self {
        let config = config();
        let logger = logger(&config);
        let image_classifier = Arc::new(build(ImageClassifierFake::new(logger.clone())));
        let notifier = Arc::new(NotifierFake::new());
        let predictor = ImagePredictor::new(
            config.clone(),
            logger,
            image_classifier.clone(),
            notifier.clone(),
        );

        Self {
            config,
            image_classifier,
            notifier,
            predictor,
        }
    }

    /// Handles events until `done` holds for the model, panicking after five seconds.
    pub fn pump_until(&self, done: impl Fn(&Model) -> bool) -> Model {
        let start = Instant::now();
        loop {
            let model = self.predictor.snapshot();
            if done(&model) {
                return model;
            }
            if start.elapsed() > Duration::from_secs(5) {
                panic!("timed out waiting, last model: {:?}", model);
            }
            self.predictor.step(Duration::from_millis(20));
        }
    }

    pub fn pump_for(&self, duration: Duration) -> Model {
        let start = Instant::now();
        while start.elapsed() < duration {
            self.predictor.step(Duration::from_millis(20));
        }
        self.predictor.snapshot()
    }
}
