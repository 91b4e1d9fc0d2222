use crate::image_predictor::core::{BackendStatus, Model, Phase};
use crate::uploaded_image::UploadedImage;

/// What the window shows for a given model.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub title: &'static str,
    pub image: Option<UploadedImage>,
    pub show_loader: bool,
    pub status: String,
    pub backend: String,
    pub prediction_lines: Vec<String>,
}

pub fn view(model: &Model) -> View {
    let status = match &model.phase {
        Phase::Idle => "Choose an image to classify.".to_string(),
        Phase::ImageSelected => "Image selected.".to_string(),
        Phase::Loading => "Classifying...".to_string(),
        Phase::ResultsReady => "Done.".to_string(),
        Phase::Failed { message } => message.clone(),
    };

    let backend = match &model.backend {
        BackendStatus::Pending => "Selecting backend...".to_string(),
        BackendStatus::Active(backend) => format!("Backend: {}", backend.name()),
        BackendStatus::Unavailable { requested } => {
            format!("Backend {} unavailable, using default", requested)
        }
    };

    let prediction_lines = if model.loading {
        vec![]
    } else {
        model
            .predictions
            .iter()
            .map(|prediction| prediction.to_display_string())
            .collect()
    };

    View {
        title: "Image Predictor",
        image: model.image.clone(),
        show_loader: model.loading,
        status,
        backend,
        prediction_lines,
    }
}
