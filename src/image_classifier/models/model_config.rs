use std::path::{Path, PathBuf};

const MOBILENET_URL: &str =
    "https://github.com/onnx/models/raw/main/validated/vision/classification/mobilenet/model/mobilenetv2-7.onnx";
const SYNSET_URL: &str =
    "https://raw.githubusercontent.com/onnx/models/main/validated/vision/classification/synset.txt";

// ImageNet normalization constants
pub const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
pub const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    /// Human readable name used in notifications.
    pub name: String,
    pub onnx_model_path: PathBuf,
    pub labels_path: PathBuf,
    /// Fetched into `onnx_model_path` when the file is missing.
    pub model_url: Option<String>,
    pub labels_url: Option<String>,
    /// (height, width)
    pub input_shape: (u32, u32),
    pub mean: [f32; 3],
    pub std: [f32; 3],
    pub top_k: usize,
    /// Set when the network emits raw logits rather than probabilities.
    pub apply_softmax: bool,
}

impl ModelConfig {
    pub fn mobilenet(model_dir: &Path) -> Self {
        Self {
            name: "MobileNet".to_string(),
            onnx_model_path: model_dir.join("mobilenetv2-7.onnx"),
            labels_path: model_dir.join("synset.txt"),
            model_url: Some(MOBILENET_URL.to_string()),
            labels_url: Some(SYNSET_URL.to_string()),
            input_shape: (224, 224),
            mean: IMAGENET_MEAN,
            std: IMAGENET_STD,
            top_k: 3,
            apply_softmax: true,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::mobilenet(Path::new("./models"))
    }
}
