use crate::config::Config;
use crate::image_classifier::interface::ImageClassifier;
use crate::image_predictor::core::{Event, Model};
use crate::library::logger::interface::Logger;
use crate::notifier::interface::Notifier;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};

/// Controller that owns the application state. Events come in over a
/// channel, effects run on worker threads and report back as events.
#[derive(Clone)]
pub struct ImagePredictor {
    pub model: Arc<Mutex<Model>>,
    pub event_sender: Sender<Event>,
    pub event_receiver: Arc<Mutex<Receiver<Event>>>,
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    pub notifier: Arc<dyn Notifier + Send + Sync>,
}

impl ImagePredictor {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();

        Self {
            model: Arc::new(Mutex::new(Model::default())),
            event_sender,
            event_receiver: Arc::new(Mutex::new(event_receiver)),
            config,
            logger: logger.with_namespace("predictor"),
            image_classifier,
            notifier,
        }
    }

    pub fn sender(&self) -> Sender<Event> {
        self.event_sender.clone()
    }

    pub fn snapshot(&self) -> Model {
        self.model
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(super) fn send(&self, event: Event) {
        if let Err(e) = self.event_sender.send(event) {
            let _ = self.logger.error(&format!("Dropped event: {:?}", e.0));
        }
    }
}
