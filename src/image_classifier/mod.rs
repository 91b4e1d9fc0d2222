pub mod backend;
pub mod download;
pub mod impl_fake;
pub mod impl_tract_onnx;
pub mod interface;
pub mod labels;
pub mod model_cache;
pub mod models;
pub mod tract;
