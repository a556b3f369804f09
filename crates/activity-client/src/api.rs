use crate::image::ImageUpload;
use activity_core::ActivityResult;
use activity_domain::{Activity, ActivityDraft, ActivityUpdate, ReorderBatch};
use async_trait::async_trait;

/// The backend's activity endpoints.
/// Implementations handle the transport; callers only see domain types.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityApi: Send + Sync {
    /// `GET /activities`
    async fn list_activities(&self) -> ActivityResult<Vec<Activity>>;

    /// `GET /activities/{id}`
    async fn get_activity(&self, id: &str) -> ActivityResult<Activity>;

    /// `POST /activities`
    async fn create_activity(&self, draft: &ActivityDraft) -> ActivityResult<Activity>;

    /// `PUT /activities/{id}`
    async fn update_activity(&self, id: &str, update: &ActivityUpdate)
        -> ActivityResult<Activity>;

    /// `DELETE /activities/{id}`
    async fn delete_activity(&self, id: &str) -> ActivityResult<()>;

    /// `PUT /activities/reorder`
    async fn reorder_activities(&self, batch: &ReorderBatch) -> ActivityResult<()>;

    /// `POST /activities/{id}/upload-image`. Returns the stored image path.
    async fn upload_image(&self, id: &str, image: ImageUpload) -> ActivityResult<String>;
}
