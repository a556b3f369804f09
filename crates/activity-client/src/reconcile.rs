use crate::api::ActivityApi;
use activity_domain::{Activity, ReorderBatch};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Result of persisting one committed drag.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileEvent {
    /// The backend accepted the new order; local state already matches.
    Confirmed { items: usize },
    /// The write failed; this is the backend's list, which replaces local state.
    RolledBack(Vec<Activity>),
    /// The write failed and so did the reload. Local state is left alone.
    RollbackFailed(String),
}

/// Sends the batch and, on any failure, reloads the authoritative list.
/// Failures here are expected and never surface as errors to the user.
pub async fn reconcile(api: &dyn ActivityApi, batch: &ReorderBatch) -> ReconcileEvent {
    match api.reorder_activities(batch).await {
        Ok(()) => {
            tracing::debug!("Reorder of {} activities confirmed", batch.len());
            ReconcileEvent::Confirmed { items: batch.len() }
        }
        Err(e) => {
            tracing::warn!("Reorder failed, reloading from backend: {}", e);
            match api.list_activities().await {
                Ok(activities) => ReconcileEvent::RolledBack(activities),
                Err(reload_err) => {
                    tracing::warn!("Reload after failed reorder also failed: {}", reload_err);
                    ReconcileEvent::RollbackFailed(reload_err.to_string())
                }
            }
        }
    }
}

/// Runs `reconcile` in the background and reports on `tx`.
pub fn spawn_reconcile(
    api: Arc<dyn ActivityApi>,
    batch: ReorderBatch,
    tx: mpsc::UnboundedSender<ReconcileEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let event = reconcile(api.as_ref(), &batch).await;
        if tx.send(event).is_err() {
            tracing::debug!("Reconcile result dropped: session closed");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockActivityApi;
    use activity_core::ActivityError;
    use activity_domain::ActivityStatus;

    fn server_list() -> Vec<Activity> {
        vec![Activity::new("a", "A", "d", ActivityStatus::Pending)]
    }

    #[tokio::test]
    async fn test_success_needs_no_reload() {
        let mut api = MockActivityApi::new();
        api.expect_reorder_activities().times(1).returning(|_| Ok(()));
        api.expect_list_activities().times(0);

        let batch = ReorderBatch::from_activities(&server_list());
        assert_eq!(
            reconcile(&api, &batch).await,
            ReconcileEvent::Confirmed { items: 1 }
        );
    }

    #[tokio::test]
    async fn test_failure_reloads() {
        let authoritative = server_list();
        let returned = authoritative.clone();
        let mut api = MockActivityApi::new();
        api.expect_reorder_activities()
            .returning(|_| Err(ActivityError::Connection("refused".into())));
        api.expect_list_activities()
            .times(1)
            .returning(move || Ok(returned.clone()));

        let batch = ReorderBatch::from_activities(&authoritative);
        assert_eq!(
            reconcile(&api, &batch).await,
            ReconcileEvent::RolledBack(authoritative)
        );
    }

    #[tokio::test]
    async fn test_failed_reload_is_reported() {
        let mut api = MockActivityApi::new();
        api.expect_reorder_activities().returning(|_| {
            Err(ActivityError::Api {
                status: 500,
                detail: "boom".into(),
            })
        });
        api.expect_list_activities()
            .returning(|| Err(ActivityError::Connection("down".into())));

        let event = reconcile(&api, &ReorderBatch::default()).await;
        assert!(matches!(event, ReconcileEvent::RollbackFailed(ref msg) if msg.contains("down")));
    }

    #[tokio::test]
    async fn test_spawned_result_arrives_on_channel() {
        let mut api = MockActivityApi::new();
        api.expect_reorder_activities().returning(|_| Ok(()));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = spawn_reconcile(Arc::new(api), ReorderBatch::default(), tx);
        handle.await.unwrap();
        assert_eq!(rx.recv().await, Some(ReconcileEvent::Confirmed { items: 0 }));
    }
}
