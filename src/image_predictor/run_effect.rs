use super::main::ImagePredictor;
use crate::image_predictor::core::{Effect, Event};
use crate::notifier::interface::Notification;
use crate::uploaded_image::UploadedImage;

impl ImagePredictor {
    pub(super) fn notify(&self, notification: Notification) {
        if let Err(e) = self.notifier.notify(notification) {
            let _ = self.logger.error(&format!("Failed to show notification: {}", e));
        }
    }

    pub(super) fn run_effect(&self, effect: Effect) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::Notify(notification) => self.notify(notification),
            Effect::SetBackend { name } => {
                let result = self.image_classifier.set_backend(&name);
                self.send(Event::BackendSetDone {
                    requested: name,
                    result,
                });
            }
            Effect::DecodeImage { request, path } => {
                let result = UploadedImage::decode(request, &path);
                self.send(Event::ImageDecodeDone { request, result });
            }
            Effect::LoadModel { request } => {
                let result = self.image_classifier.load();
                self.send(Event::ModelLoadDone { request, result });
            }
            Effect::ClassifyImage {
                request,
                image,
                handle,
            } => {
                let result = self.image_classifier.classify(&image, &handle);
                self.send(Event::ClassifyDone { request, result });
            }
        }
    }
}
