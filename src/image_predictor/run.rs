use super::main::ImagePredictor;
use crate::image_predictor::core::{init, transition, Effect, Event};
use std::sync::mpsc::{RecvError, RecvTimeoutError};
use std::sync::PoisonError;
use std::time::Duration;

impl ImagePredictor {
    /// Resets the state and runs the start-up effects.
    pub fn start(&self) {
        let (model, effects) = init(&self.config);
        *self.model.lock().unwrap_or_else(PoisonError::into_inner) = model;
        self.execute_effects(effects);
    }

    pub fn run(&self) -> Result<(), RecvError> {
        self.start();

        loop {
            let event = self
                .event_receiver
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .recv()?;
            self.handle(event);
        }
    }

    /// Handles at most one event. Returns false when nothing arrived in time.
    #[allow(dead_code)]
    pub fn step(&self, timeout: Duration) -> bool {
        let received = self
            .event_receiver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .recv_timeout(timeout);

        match received {
            Ok(event) => {
                self.handle(event);
                true
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    pub fn handle(&self, event: Event) {
        let current_model = self.snapshot();

        let _ = self.logger.info(&format!(
            "\nold model:\n\t{:?}\n\nevent:\n\t{:?}",
            current_model, event,
        ));

        let (new_model, effects) = transition(&self.config, current_model, event);

        let _ = self.logger.info(&format!(
            "\nnew model:\n\t{:?}\n\neffects:\n\t{:?}",
            new_model, effects
        ));

        *self.model.lock().unwrap_or_else(PoisonError::into_inner) = new_model;

        self.execute_effects(effects);
    }

    // Notifications are delivered inline so they always precede the work
    // spawned after them.
    fn execute_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Notify(notification) => self.notify(notification),
                effect => {
                    let self_clone = self.clone();
                    std::thread::spawn(move || self_clone.run_effect(effect));
                }
            }
        }
    }
}
