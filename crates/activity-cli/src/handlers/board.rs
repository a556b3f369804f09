use crate::cli::MoveArgs;
use crate::context::CliContext;
use crate::output;
use activity_client::ReconcileEvent;
use activity_core::ActivityError;
use activity_domain::{Activity, ActivityStatus, DragOutcome, DropTarget};
use serde::Serialize;

#[derive(Serialize)]
struct ColumnSummary<'a> {
    status: ActivityStatus,
    label: &'static str,
    count: usize,
    items: Vec<&'a Activity>,
}

#[derive(Serialize)]
struct BoardSummary<'a> {
    total: usize,
    columns: Vec<ColumnSummary<'a>>,
}

pub async fn show(ctx: &CliContext) -> anyhow::Result<()> {
    let session = ctx.session().await?;
    let groups = session.board().groups();
    let summary = BoardSummary {
        total: groups.total(),
        columns: groups
            .columns()
            .map(|(status, items)| ColumnSummary {
                status,
                label: status.label(),
                count: items.len(),
                items: items.to_vec(),
            })
            .collect(),
    };
    output::output_success(&summary);
    Ok(())
}

#[derive(Serialize)]
struct MoveResult {
    outcome: &'static str,
    status: ActivityStatus,
    position: usize,
}

/// Runs a whole drag gesture against the current board: grab, hover the
/// target, drop on it, then wait for the backend to accept the new order.
pub async fn move_activity(ctx: &CliContext, args: MoveArgs) -> anyhow::Result<()> {
    let mut session = ctx.session().await?;
    let target = DropTarget::parse(&args.to);
    if session.board().container_of(&target).is_none() {
        return Err(ActivityError::NotFound(format!("Drop target {} is not on the board", target)).into());
    }

    session.start_drag(&args.id)?;
    session.hover(target.clone());
    let outcome = match session.end_drag(Some(target)) {
        DragOutcome::Committed(_) => match session.next_reconciliation().await {
            Some(ReconcileEvent::Confirmed { .. }) => "moved",
            Some(ReconcileEvent::RolledBack(_)) => {
                return Err(anyhow::anyhow!(
                    "The server rejected the new order; the board was reloaded"
                ))
            }
            Some(ReconcileEvent::RollbackFailed(reason)) => {
                return Err(anyhow::anyhow!(
                    "The server rejected the new order and could not be reloaded: {}",
                    reason
                ))
            }
            None => "moved",
        },
        DragOutcome::Unchanged => "unchanged",
        DragOutcome::Cancelled => "cancelled",
    };

    let groups = session.board().groups();
    let (status, position) = groups
        .position_of(&args.id)
        .ok_or_else(|| ActivityError::NotFound(format!("Activity {}", args.id)))?;
    output::output_success(MoveResult {
        outcome,
        status,
        position,
    });
    Ok(())
}
