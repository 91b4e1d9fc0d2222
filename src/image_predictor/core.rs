use crate::config::Config;
use crate::error::Error;
use crate::image_classifier::backend::Backend;
use crate::image_classifier::interface::{ModelHandle, Prediction};
use crate::notifier::interface::Notification;
use crate::uploaded_image::{RequestId, UploadedImage};
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    ImageSelected,
    Loading,
    ResultsReady,
    Failed {
        message: String,
    },
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum BackendStatus {
    #[default]
    Pending,
    Active(Backend),
    Unavailable {
        requested: String,
    },
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Model {
    pub phase: Phase,
    pub image: Option<UploadedImage>,
    pub predictions: Vec<Prediction>,
    pub loading: bool,
    pub backend: BackendStatus,
    /// Id of the most recent upload. Completions for any other id are stale.
    pub latest_request: RequestId,
}

impl Model {
    fn is_current(&self, request: RequestId) -> bool {
        request == self.latest_request
    }
}

#[derive(Debug)]
pub enum Event {
    BackendSetDone {
        requested: String,
        result: Result<Backend, Error>,
    },
    ImageChosen {
        path: PathBuf,
    },
    ImageDecodeDone {
        request: RequestId,
        result: Result<UploadedImage, Error>,
    },
    ModelLoadDone {
        request: RequestId,
        result: Result<ModelHandle, Error>,
    },
    ClassifyDone {
        request: RequestId,
        result: Result<Vec<Prediction>, Error>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    SetBackend {
        name: String,
    },
    Notify(Notification),
    DecodeImage {
        request: RequestId,
        path: PathBuf,
    },
    LoadModel {
        request: RequestId,
    },
    ClassifyImage {
        request: RequestId,
        image: UploadedImage,
        handle: ModelHandle,
    },
}

pub fn init(config: &Config) -> (Model, Vec<Effect>) {
    (
        Model::default(),
        vec![Effect::SetBackend {
            name: config.backend.clone(),
        }],
    )
}

pub fn transition(config: &Config, model: Model, event: Event) -> (Model, Vec<Effect>) {
    let notifications = &config.notifications;

    match event {
        Event::BackendSetDone { requested, result } => match result {
            Ok(backend) => (
                Model {
                    backend: BackendStatus::Active(backend),
                    ..model
                },
                vec![Effect::Notify(Notification::info(
                    format!("{} backend set.", backend.name()),
                    notifications,
                ))],
            ),
            Err(err) => {
                let message = format!("Error setting {} backend: {}", requested, err);
                (
                    Model {
                        backend: BackendStatus::Unavailable { requested },
                        ..model
                    },
                    vec![Effect::Notify(Notification::error(message, notifications))],
                )
            }
        },

        Event::ImageChosen { path } => {
            let request = model.latest_request + 1;
            (
                Model {
                    phase: Phase::ImageSelected,
                    latest_request: request,
                    ..model
                },
                vec![Effect::DecodeImage { request, path }],
            )
        }

        Event::ImageDecodeDone { request, .. }
        | Event::ModelLoadDone { request, .. }
        | Event::ClassifyDone { request, .. }
            if !model.is_current(request) =>
        {
            (model, vec![])
        }

        Event::ImageDecodeDone { request, result } => match result {
            Ok(image) => (
                Model {
                    phase: Phase::Loading,
                    image: Some(image),
                    loading: true,
                    ..model
                },
                vec![
                    Effect::Notify(Notification::info(
                        format!("Loading {} model...", config.model.name),
                        notifications,
                    )),
                    Effect::LoadModel { request },
                ],
            ),
            Err(err) => {
                let message = format!("Error reading image: {}", err);
                let phase = if model.image.is_some() {
                    Phase::ImageSelected
                } else {
                    Phase::Idle
                };
                (
                    Model {
                        phase,
                        loading: false,
                        ..model
                    },
                    vec![Effect::Notify(Notification::error(message, notifications))],
                )
            }
        },

        Event::ModelLoadDone { request, result } => match (result, model.image.clone()) {
            (Ok(handle), Some(image)) => (
                model,
                vec![
                    Effect::Notify(Notification::info("Model loaded successfully.", notifications)),
                    Effect::Notify(Notification::info("Classifying image...", notifications)),
                    Effect::ClassifyImage {
                        request,
                        image,
                        handle,
                    },
                ],
            ),
            (Ok(_), None) => failed(config, model, "no image selected".to_string()),
            (Err(err), _) => failed(config, model, err.to_string()),
        },

        Event::ClassifyDone { result, .. } => match result {
            Ok(predictions) => (
                Model {
                    phase: Phase::ResultsReady,
                    predictions,
                    loading: false,
                    ..model
                },
                vec![],
            ),
            Err(err) => failed(config, model, err.to_string()),
        },
    }
}

// Predictions from the last success stay in place.
fn failed(config: &Config, model: Model, reason: String) -> (Model, Vec<Effect>) {
    let message = format!("Error classifying image: {}", reason);
    (
        Model {
            phase: Phase::Failed { message: message.clone() },
            loading: false,
            ..model
        },
        vec![Effect::Notify(Notification::error(
            message,
            &config.notifications,
        ))],
    )
}
