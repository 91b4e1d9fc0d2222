use crate::error::Error;
use crate::image_classifier::models::model_config::ModelConfig;
use image::{imageops, DynamicImage};
use tract_onnx::prelude::*;

// Fraction of the resized image kept by the center crop.
const CROP_PCT: f32 = 0.875;

/// Same result as scaling the image to cover `width / CROP_PCT` x
/// `height / CROP_PCT` and cutting out the centered `width` x `height` window,
/// but crops the source first so only the window is ever resampled.
pub fn resize_and_center_crop(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    let target_w = (width as f32 / CROP_PCT).ceil();
    let target_h = (height as f32 / CROP_PCT).ceil();
    let (w, h) = (image.width().max(1), image.height().max(1));
    let scale = (target_w / w as f32).max(target_h / h as f32);

    let crop_w = ((width as f32 / scale).round() as u32).clamp(1, w);
    let crop_h = ((height as f32 / scale).round() as u32).clamp(1, h);
    let x_offset = (w - crop_w) / 2;
    let y_offset = (h - crop_h) / 2;

    image
        .crop_imm(x_offset, y_offset, crop_w, crop_h)
        .resize_exact(width, height, imageops::FilterType::Triangle)
}

fn image_to_tensor(image: &DynamicImage, mean: [f32; 3], std: [f32; 3]) -> Tensor {
    let rgb = image.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    let array = tract_ndarray::Array4::from_shape_fn((1, 3, height, width), |(_, c, y, x)| {
        let pixel = rgb.get_pixel(x as u32, y as u32);
        (pixel[c] as f32 / 255.0 - mean[c]) / std[c]
    });

    array.into()
}

/// NCHW float tensor ready for the network's first input.
pub fn preprocess(image: &DynamicImage, config: &ModelConfig) -> Result<Tensor, Error> {
    let (height, width) = config.input_shape;
    if width == 0 || height == 0 {
        return Err(Error::Classify(format!(
            "invalid model input shape {:?}",
            config.input_shape
        )));
    }

    let cropped = resize_and_center_crop(image, width, height);
    Ok(image_to_tensor(&cropped, config.mean, config.std))
}
