use activity_core::{ActivityError, ActivityResult};
use activity_domain::{is_supported_image, SUPPORTED_IMAGE_EXTENSIONS};
use std::path::Path;

/// An image file ready to be attached to an activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    file_name: String,
    bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> ActivityResult<Self> {
        let file_name = file_name.into();
        if !is_supported_image(&file_name) {
            return Err(ActivityError::Validation(format!(
                "Unsupported image format: {}. Use: {}",
                file_name,
                SUPPORTED_IMAGE_EXTENSIONS
                    .iter()
                    .map(|ext| format!(".{}", ext))
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }
        Ok(Self { file_name, bytes })
    }

    pub async fn from_path(path: impl AsRef<Path>) -> ActivityResult<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                ActivityError::Validation(format!("Not a file path: {}", path.display()))
            })?
            .to_string();
        if !is_supported_image(&file_name) {
            return Self::new(file_name, Vec::new());
        }
        let bytes = tokio::fs::read(path).await?;
        Self::new(file_name, bytes)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        let ext = Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "webp" => "image/webp",
            _ => "application/octet-stream",
        }
    }
}
