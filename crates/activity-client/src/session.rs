use crate::api::ActivityApi;
use crate::image::ImageUpload;
use crate::reconcile::{spawn_reconcile, ReconcileEvent};
use activity_core::{ActivityError, ActivityResult};
use activity_domain::{
    Activity, ActivityDraft, ActivityStatus, ActivityUpdate, Board, DragOutcome, DropTarget,
};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Owns the board and connects it to the backend.
///
/// CRUD calls are plain round trips followed by a reload. Drag gestures are
/// applied locally right away; committed ones are persisted on a background
/// task whose result is applied when the owner drains it with
/// `poll_reconciliations` or `next_reconciliation`.
///
/// There is no ordering between in-flight requests: whichever result is
/// applied last decides what the board shows.
pub struct BoardSession {
    api: Arc<dyn ActivityApi>,
    board: Board,
    reconcile_tx: mpsc::UnboundedSender<ReconcileEvent>,
    reconcile_rx: mpsc::UnboundedReceiver<ReconcileEvent>,
    in_flight: usize,
}

impl BoardSession {
    pub fn new(api: Arc<dyn ActivityApi>) -> Self {
        let (reconcile_tx, reconcile_rx) = mpsc::unbounded_channel();
        Self {
            api,
            board: Board::new(),
            reconcile_tx,
            reconcile_rx,
            in_flight: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn api(&self) -> Arc<dyn ActivityApi> {
        Arc::clone(&self.api)
    }

    /// Replaces the local list with the backend's.
    pub async fn reload(&mut self) -> ActivityResult<()> {
        let activities = self.api.list_activities().await?;
        tracing::debug!("Loaded {} activities", activities.len());
        self.board.replace_all(activities);
        Ok(())
    }

    /// Fetches one activity for the detail view.
    pub async fn fetch(&self, id: &str) -> ActivityResult<Activity> {
        match self.api.get_activity(id).await {
            Err(ActivityError::NotFound(_)) => Err(ActivityError::NotFound(format!(
                "Activity {} no longer exists",
                id
            ))),
            other => other,
        }
    }

    pub async fn create(
        &mut self,
        draft: ActivityDraft,
        image: Option<ImageUpload>,
    ) -> ActivityResult<Activity> {
        let draft = draft.validated()?;
        let mut created = self.api.create_activity(&draft).await?;
        tracing::info!("Created activity {} ({})", created.title, created.id);

        if let Some(image) = image {
            created.image_path = Some(self.api.upload_image(&created.id, image).await?);
        }
        self.refresh_after_mutation().await;
        Ok(created)
    }

    pub async fn update(
        &mut self,
        id: &str,
        update: ActivityUpdate,
        image: Option<ImageUpload>,
    ) -> ActivityResult<Activity> {
        // An image-only edit skips the field update.
        let mut updated = if update.is_empty() && image.is_some() {
            self.api.get_activity(id).await?
        } else {
            let update = update.validated()?;
            let updated = self.api.update_activity(id, &update).await?;
            tracing::info!("Updated activity {}", id);
            updated
        };

        if let Some(image) = image {
            updated.image_path = Some(self.api.upload_image(id, image).await?);
        }
        self.refresh_after_mutation().await;
        Ok(updated)
    }

    /// The status dropdown: a single-field update.
    pub async fn change_status(
        &mut self,
        id: &str,
        status: ActivityStatus,
    ) -> ActivityResult<Activity> {
        self.update(id, ActivityUpdate::status_only(status), None)
            .await
    }

    pub async fn attach_image(&mut self, id: &str, image: ImageUpload) -> ActivityResult<String> {
        let path = self.api.upload_image(id, image).await?;
        tracing::info!("Attached image {} to {}", path, id);
        self.refresh_after_mutation().await;
        Ok(path)
    }

    pub async fn delete(&mut self, id: &str) -> ActivityResult<()> {
        self.api.delete_activity(id).await?;
        tracing::info!("Deleted activity {}", id);
        self.board.remove(id);
        self.refresh_after_mutation().await;
        Ok(())
    }

    pub fn start_drag(&mut self, id: &str) -> ActivityResult<()> {
        self.board.start_drag(id)
    }

    pub fn hover(&mut self, target: DropTarget) -> bool {
        self.board.hover(target)
    }

    /// Completes the gesture locally and, when it changed anything, starts
    /// persisting it in the background. Returns without waiting.
    pub fn end_drag(&mut self, target: Option<DropTarget>) -> DragOutcome {
        let outcome = self.board.end_drag(target);
        if let DragOutcome::Committed(batch) = &outcome {
            self.in_flight += 1;
            spawn_reconcile(self.api(), batch.clone(), self.reconcile_tx.clone());
        }
        outcome
    }

    pub fn cancel_drag(&mut self) -> DragOutcome {
        self.end_drag(None)
    }

    pub fn pending_reconciliations(&self) -> usize {
        self.in_flight
    }

    /// Applies every reconciliation result that has arrived so far.
    pub fn poll_reconciliations(&mut self) -> Vec<ReconcileEvent> {
        let mut applied = Vec::new();
        while let Ok(event) = self.reconcile_rx.try_recv() {
            self.apply(&event);
            applied.push(event);
        }
        applied
    }

    /// Waits for the next reconciliation result and applies it. Returns `None`
    /// when nothing is in flight.
    pub async fn next_reconciliation(&mut self) -> Option<ReconcileEvent> {
        if self.in_flight == 0 {
            return None;
        }
        let event = self.reconcile_rx.recv().await?;
        self.apply(&event);
        Some(event)
    }

    fn apply(&mut self, event: &ReconcileEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match event {
            ReconcileEvent::Confirmed { .. } => {}
            ReconcileEvent::RolledBack(activities) => {
                tracing::info!("Reorder rolled back to backend state");
                self.board.replace_all(activities.clone());
            }
            ReconcileEvent::RollbackFailed(reason) => {
                tracing::warn!("Board may be stale until next reload: {}", reason);
            }
        }
    }

    /// A mutation already succeeded; a failed reload only leaves the list stale.
    async fn refresh_after_mutation(&mut self) {
        if let Err(e) = self.reload().await {
            tracing::warn!("Reload after mutation failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockActivityApi;

    fn activity(id: &str, status: ActivityStatus) -> Activity {
        Activity::new(id, format!("Activity {}", id), "description", status)
    }

    fn one_per_status() -> Vec<Activity> {
        vec![
            activity("p", ActivityStatus::Pending),
            activity("i", ActivityStatus::InProgress),
            activity("d", ActivityStatus::Done),
        ]
    }

    async fn loaded_session(mut api: MockActivityApi, list: Vec<Activity>) -> BoardSession {
        let first = list.clone();
        api.expect_list_activities()
            .times(1)
            .returning(move || Ok(first.clone()));
        let mut session = BoardSession::new(Arc::new(api));
        session.reload().await.unwrap();
        session
    }

    fn ids(session: &BoardSession, status: ActivityStatus) -> Vec<String> {
        session
            .board()
            .groups()
            .get(status)
            .iter()
            .map(|a| a.id.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_drag_to_empty_done_area_persists() {
        let mut api = MockActivityApi::new();
        api.expect_reorder_activities()
            .times(1)
            .withf(|batch| {
                let moved = batch.get("p").unwrap();
                moved.status == ActivityStatus::Done && moved.position == 1
            })
            .returning(|_| Ok(()));
        let mut session = loaded_session(api, one_per_status()).await;

        session.start_drag("p").unwrap();
        session.hover(DropTarget::Container(ActivityStatus::Done));
        let outcome = session.end_drag(Some(DropTarget::Container(ActivityStatus::Done)));
        assert!(outcome.is_committed());

        // Visible before the backend answers.
        assert_eq!(ids(&session, ActivityStatus::Done), vec!["d", "p"]);

        let event = session.next_reconciliation().await.unwrap();
        assert_eq!(event, ReconcileEvent::Confirmed { items: 3 });
        assert_eq!(ids(&session, ActivityStatus::Done), vec!["d", "p"]);
        assert_eq!(session.pending_reconciliations(), 0);
    }

    #[tokio::test]
    async fn test_in_place_drag_sends_nothing() {
        let mut api = MockActivityApi::new();
        api.expect_reorder_activities().times(0);
        let mut session = loaded_session(api, one_per_status()).await;

        session.start_drag("i").unwrap();
        assert_eq!(
            session.end_drag(Some(DropTarget::item("i"))),
            DragOutcome::Unchanged
        );
        assert_eq!(session.pending_reconciliations(), 0);
        assert!(session.next_reconciliation().await.is_none());
    }

    #[tokio::test]
    async fn test_failed_reorder_rolls_back_to_fresh_reload() {
        let initial = one_per_status();
        let mut api = MockActivityApi::new();
        api.expect_reorder_activities()
            .times(1)
            .returning(|_| Err(ActivityError::Connection("connection refused".into())));

        let mut seq = mockall::Sequence::new();
        let first = initial.clone();
        api.expect_list_activities()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move || Ok(first.clone()));
        let reload = initial.clone();
        api.expect_list_activities()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move || Ok(reload.clone()));

        let mut session = BoardSession::new(Arc::new(api));
        session.reload().await.unwrap();

        session.start_drag("p").unwrap();
        session.end_drag(Some(DropTarget::Container(ActivityStatus::Done)));
        assert_eq!(session.board().get("p").unwrap().status, ActivityStatus::Done);

        let event = session.next_reconciliation().await.unwrap();
        assert!(matches!(event, ReconcileEvent::RolledBack(_)));
        assert_eq!(session.board().activities(), initial.as_slice());
        assert_eq!(session.board().get("p").unwrap().status, ActivityStatus::Pending);
    }

    #[tokio::test]
    async fn test_create_network_failure_leaves_list_unchanged() {
        let initial = one_per_status();
        let mut api = MockActivityApi::new();
        api.expect_create_activity()
            .times(1)
            .returning(|_| Err(ActivityError::Connection("network unreachable".into())));

        let mut seq = mockall::Sequence::new();
        let first = initial.clone();
        api.expect_list_activities()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move || Ok(first.clone()));
        let second = initial.clone();
        api.expect_list_activities()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move || Ok(second.clone()));

        let mut session = BoardSession::new(Arc::new(api));
        session.reload().await.unwrap();

        let err = session
            .create(ActivityDraft::new("New", "Thing"), None)
            .await
            .unwrap_err();
        assert!(err.is_connection());
        assert_eq!(session.board().activities(), initial.as_slice());

        session.reload().await.unwrap();
        assert_eq!(session.board().activities(), initial.as_slice());
    }

    #[tokio::test]
    async fn test_create_validates_before_calling_backend() {
        let mut api = MockActivityApi::new();
        api.expect_create_activity().times(0);
        let mut session = BoardSession::new(Arc::new(api));

        let err = session
            .create(ActivityDraft::new("", "desc"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ActivityError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_uploads_image_then_reloads() {
        let created = activity("new", ActivityStatus::Pending);
        let mut after = one_per_status();
        after.push(created.clone());

        let mut api = MockActivityApi::new();
        let returned = created.clone();
        api.expect_create_activity()
            .times(1)
            .withf(|draft| draft.title == "New" && draft.status == ActivityStatus::Pending)
            .returning(move |_| Ok(returned.clone()));
        api.expect_upload_image()
            .times(1)
            .withf(|id, image| id == "new" && image.file_name() == "shot.png")
            .returning(|_, _| Ok("/uploads/new.png".to_string()));
        let listed = after.clone();
        api.expect_list_activities()
            .times(1)
            .returning(move || Ok(listed.clone()));

        let mut session = BoardSession::new(Arc::new(api));
        let image = ImageUpload::new("shot.png", vec![1, 2]).unwrap();
        let result = session
            .create(ActivityDraft::new(" New ", "Thing"), Some(image))
            .await
            .unwrap();

        assert_eq!(result.image_path.as_deref(), Some("/uploads/new.png"));
        assert_eq!(session.board().len(), 4);
    }

    #[tokio::test]
    async fn test_change_status_reloads() {
        let mut moved = one_per_status();
        moved[0].status = ActivityStatus::Done;

        let mut api = MockActivityApi::new();
        let updated = moved[0].clone();
        api.expect_update_activity()
            .times(1)
            .withf(|id, update| id == "p" && update.status == Some(ActivityStatus::Done))
            .returning(move |_, _| Ok(updated.clone()));

        let mut seq = mockall::Sequence::new();
        let first = one_per_status();
        api.expect_list_activities()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move || Ok(first.clone()));
        let second = moved.clone();
        api.expect_list_activities()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move || Ok(second.clone()));

        let mut session = BoardSession::new(Arc::new(api));
        session.reload().await.unwrap();
        session
            .change_status("p", ActivityStatus::Done)
            .await
            .unwrap();

        assert_eq!(ids(&session, ActivityStatus::Done), vec!["p", "d"]);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_state() {
        let mut api = MockActivityApi::new();
        api.expect_update_activity().returning(|_, _| {
            Err(ActivityError::Api {
                status: 500,
                detail: "Ops".into(),
            })
        });
        let mut session = loaded_session(api, one_per_status()).await;
        let before = session.board().activities().to_vec();

        let update = ActivityUpdate {
            title: Some("Renamed".into()),
            ..ActivityUpdate::default()
        };
        assert!(session.update("p", update, None).await.is_err());
        assert_eq!(session.board().activities(), before.as_slice());
    }

    #[tokio::test]
    async fn test_delete_removes_from_groups() {
        let mut remaining = one_per_status();
        remaining.remove(1);

        let mut api = MockActivityApi::new();
        api.expect_delete_activity()
            .times(1)
            .withf(|id| id == "i")
            .returning(|_| Ok(()));
        let mut seq = mockall::Sequence::new();
        let first = one_per_status();
        api.expect_list_activities()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move || Ok(first.clone()));
        api.expect_list_activities()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move || Ok(remaining.clone()));

        let mut session = BoardSession::new(Arc::new(api));
        session.reload().await.unwrap();
        session.delete("i").await.unwrap();

        assert!(session.board().get("i").is_none());
        assert!(ids(&session, ActivityStatus::InProgress).is_empty());
        assert_eq!(session.board().groups().total(), 2);
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_activity() {
        let mut api = MockActivityApi::new();
        api.expect_delete_activity()
            .returning(|_| Err(ActivityError::NotFound("i".into())));
        let mut session = loaded_session(api, one_per_status()).await;

        assert!(session.delete("i").await.is_err());
        assert!(session.board().get("i").is_some());
    }

    #[tokio::test]
    async fn test_detail_not_found() {
        let mut api = MockActivityApi::new();
        api.expect_get_activity()
            .returning(|_| Err(ActivityError::NotFound("Atividade não encontrada".into())));
        let session = BoardSession::new(Arc::new(api));

        let err = session.fetch("gone").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("gone"));
    }

    #[tokio::test]
    async fn test_poll_applies_arrived_results() {
        let mut api = MockActivityApi::new();
        api.expect_reorder_activities().returning(|_| Ok(()));
        let mut session = loaded_session(api, one_per_status()).await;

        session.start_drag("d").unwrap();
        session.end_drag(Some(DropTarget::item("p")));
        assert_eq!(session.pending_reconciliations(), 1);

        let mut applied = Vec::new();
        for _ in 0..100 {
            applied.extend(session.poll_reconciliations());
            if !applied.is_empty() {
                break;
            }
            tokio::task::yield_now().await;
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        assert_eq!(applied, vec![ReconcileEvent::Confirmed { items: 3 }]);
        assert_eq!(session.pending_reconciliations(), 0);
    }
}
