use crate::activity::ActivityStatus;
use activity_core::{ActivityError, ActivityResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const TITLE_MAX_CHARS: usize = 200;

pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDraft {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub status: ActivityStatus,
}

impl ActivityDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: ActivityStatus::default(),
        }
    }

    pub fn with_status(mut self, status: ActivityStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns the draft with a trimmed title, or a validation error.
    pub fn validated(self) -> ActivityResult<Self> {
        Ok(Self {
            title: validate_title(&self.title)?,
            description: validate_description(self.description)?,
            status: self.status,
        })
    }
}

/// Body of a partial update. Absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ActivityStatus>,
}

impl ActivityUpdate {
    pub fn status_only(status: ActivityStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }

    pub fn validated(self) -> ActivityResult<Self> {
        if self.is_empty() {
            return Err(ActivityError::Validation("Nothing to update".to_string()));
        }
        Ok(Self {
            title: self.title.as_deref().map(validate_title).transpose()?,
            description: self.description.map(validate_description).transpose()?,
            status: self.status,
        })
    }
}

fn validate_title(title: &str) -> ActivityResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ActivityError::Validation("Title is required".to_string()));
    }
    if trimmed.chars().count() > TITLE_MAX_CHARS {
        return Err(ActivityError::Validation(format!(
            "Title must be at most {} characters",
            TITLE_MAX_CHARS
        )));
    }
    Ok(trimmed.to_string())
}

fn validate_description(description: String) -> ActivityResult<String> {
    if description.trim().is_empty() {
        return Err(ActivityError::Validation(
            "Description is required".to_string(),
        ));
    }
    Ok(description)
}

pub fn is_supported_image(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
}
