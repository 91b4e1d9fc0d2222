use crate::error::Error;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Tag issued for every upload; work started for an older tag is stale.
pub type RequestId = u64;

#[derive(Clone)]
pub struct UploadedImage {
    pub id: RequestId,
    pub path: PathBuf,
    image: Arc<DynamicImage>,
}

impl UploadedImage {
    pub fn new(id: RequestId, path: PathBuf, image: DynamicImage) -> Self {
        Self {
            id,
            path,
            image: Arc::new(image),
        }
    }

    /// Reads and decodes the file at `path`. Only files whose extension maps
    /// to a known image format are accepted.
    pub fn decode(id: RequestId, path: &Path) -> Result<Self, Error> {
        if !is_image_path(path) {
            return Err(Error::ImageDecode(format!(
                "{} is not an image file",
                path.display()
            )));
        }

        let image = ImageReader::open(path)
            .map_err(|e| Error::ImageDecode(format!("failed to open {}: {}", path.display(), e)))?
            .with_guessed_format()
            .map_err(|e| Error::ImageDecode(format!("failed to read {}: {}", path.display(), e)))?
            .decode()?;

        Ok(Self::new(id, path.to_path_buf(), image))
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedImage")
            .field("id", &self.id)
            .field("path", &self.path)
            .field("size", &(self.width(), self.height()))
            .finish()
    }
}

impl PartialEq for UploadedImage {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.path == other.path
    }
}

pub fn is_image_path(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok()
}
