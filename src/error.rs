use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    BackendSelection { backend: String, reason: String },
    ModelLoad(String),
    Classify(String),
    ImageDecode(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendSelection { backend, reason } => {
                write!(f, "backend '{}' unavailable: {}", backend, reason)
            }
            Error::ModelLoad(message) => write!(f, "failed to load model: {}", message),
            Error::Classify(message) => write!(f, "failed to classify image: {}", message),
            Error::ImageDecode(message) => write!(f, "failed to decode image: {}", message),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::ModelLoad(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::ImageDecode(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::ModelLoad(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ModelLoad(err.to_string())
    }
}
