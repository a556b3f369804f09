use crate::cli::{CreateArgs, UpdateArgs};
use crate::context::CliContext;
use crate::output;
use activity_client::{image_url, ActivityApi, BoardSession, ImageUpload};
use activity_core::ActivityError;
use activity_domain::{ActivityDraft, ActivityStatus, ActivityUpdate};
use std::path::Path;
use std::sync::Arc;

async fn load_image(path: Option<&Path>) -> Result<Option<ImageUpload>, ActivityError> {
    match path {
        Some(path) => Ok(Some(ImageUpload::from_path(path).await?)),
        None => Ok(None),
    }
}

fn session(ctx: &CliContext) -> BoardSession {
    BoardSession::new(Arc::clone(&ctx.api))
}

pub async fn list(ctx: &CliContext, status: Option<ActivityStatus>) -> anyhow::Result<()> {
    let activities = ctx.api.list_activities().await?;
    let activities = match status {
        Some(status) => activities.into_iter().filter(|a| a.status == status).collect(),
        None => activities,
    };
    output::output_list(activities);
    Ok(())
}

pub async fn get(ctx: &CliContext, id: &str) -> anyhow::Result<()> {
    let activity = session(ctx).fetch(id).await?;
    output::output_success(&activity);
    Ok(())
}

pub async fn create(ctx: &CliContext, args: CreateArgs) -> anyhow::Result<()> {
    let mut draft = ActivityDraft::new(args.title, args.description);
    if let Some(status) = args.status {
        draft = draft.with_status(status);
    }
    // Validate before touching the file system or the network.
    let draft = draft.validated()?;
    let image = load_image(args.image.as_deref()).await?;

    let activity = session(ctx).create(draft, image).await?;
    output::output_success(&activity);
    Ok(())
}

pub async fn update(ctx: &CliContext, args: UpdateArgs) -> anyhow::Result<()> {
    let update = ActivityUpdate {
        title: args.title,
        description: args.description,
        status: args.status,
    };
    if update.is_empty() && args.image.is_none() {
        return Err(ActivityError::Validation("Nothing to update".into()).into());
    }
    let image = load_image(args.image.as_deref()).await?;

    let activity = session(ctx).update(&args.id, update, image).await?;
    output::output_success(&activity);
    Ok(())
}

pub async fn set_status(ctx: &CliContext, id: &str, status: ActivityStatus) -> anyhow::Result<()> {
    let activity = session(ctx).change_status(id, status).await?;
    output::output_success(&activity);
    Ok(())
}

pub async fn delete(ctx: &CliContext, id: &str) -> anyhow::Result<()> {
    session(ctx).delete(id).await?;
    output::output_success(serde_json::json!({ "deleted": id }));
    Ok(())
}

pub async fn upload_image(ctx: &CliContext, id: &str, file: &Path) -> anyhow::Result<()> {
    let image = ImageUpload::from_path(file).await?;
    let image_path = session(ctx).attach_image(id, image).await?;
    output::output_success(serde_json::json!({
        "id": id,
        "image_path": image_path,
        "image_url": image_url(&ctx.api_url, &image_path),
    }));
    Ok(())
}

pub async fn show_image_url(ctx: &CliContext, id: &str) -> anyhow::Result<()> {
    let activity = session(ctx).fetch(id).await?;
    let url = activity
        .image_path
        .as_deref()
        .and_then(|path| image_url(&ctx.api_url, path))
        .ok_or_else(|| ActivityError::NotFound(format!("Activity {} has no image", id)))?;
    output::output_success(serde_json::json!({ "id": id, "image_url": url }));
    Ok(())
}
