use config::{ClassifierKind, Config};
use gui::window::PredictorWindow;
use image_classifier::impl_fake::ImageClassifierFake;
use image_classifier::impl_tract_onnx::ImageClassifierTractOnnx;
use image_classifier::interface::ImageClassifier;
use image_predictor::main::ImagePredictor;
use library::logger::{impl_console::LoggerConsole, interface::Logger};
use notifier::impl_toast::NotifierToast;
use std::sync::Arc;

mod config;
mod error;
mod gui;
mod image_classifier;
mod image_predictor;
mod library;
mod notifier;
mod uploaded_image;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env();

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.logger_timezone));

    let image_classifier: Arc<dyn ImageClassifier + Send + Sync> = match config.classifier {
        ClassifierKind::TractOnnx => Arc::new(ImageClassifierTractOnnx::new(
            config.model.clone(),
            config.cache_model,
            logger.clone(),
        )),
        ClassifierKind::Fake => Arc::new(
            ImageClassifierFake::new(logger.clone()).with_cache_model(config.cache_model),
        ),
    };

    let toasts = NotifierToast::new(logger.clone(), config.notifications.max_visible);

    let predictor = ImagePredictor::new(
        config.clone(),
        logger.clone(),
        image_classifier,
        Arc::new(toasts.clone()),
    );

    let window = PredictorWindow::new(
        config,
        logger.clone(),
        predictor.model.clone(),
        predictor.sender(),
        toasts,
    );

    std::thread::spawn(move || {
        if let Err(e) = predictor.run() {
            let _ = predictor.logger.error(&format!("Controller stopped: {}", e));
        }
    });

    gui::window::run(window)
}
