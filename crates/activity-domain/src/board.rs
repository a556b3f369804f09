use crate::activity::{Activity, ActivityId, ActivityStatus};
use crate::drop_target::DropTarget;
use crate::grouping::{group_by_status, StatusGroups};
use crate::reorder::ReorderBatch;
use activity_core::{ActivityError, ActivityResult};

/// An in-progress reorder gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    active_id: ActivityId,
    /// The list as it was when the gesture started.
    origin: Vec<Activity>,
    over: Option<DropTarget>,
    /// Target of the hover that last moved the item across columns. Dropping
    /// on that same target keeps the hover placement.
    placed_by: Option<DropTarget>,
}

impl DragSession {
    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    pub fn over(&self) -> Option<&DropTarget> {
        self.over.as_ref()
    }

    pub fn origin(&self) -> &[Activity] {
        &self.origin
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Released outside any target. The pre-gesture list was restored.
    Cancelled,
    /// Dropped into the arrangement it started from; nothing to persist.
    Unchanged,
    /// The arrangement changed and should be persisted.
    Committed(ReorderBatch),
}

impl DragOutcome {
    pub fn batch(&self) -> Option<&ReorderBatch> {
        match self {
            DragOutcome::Committed(batch) => Some(batch),
            _ => None,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, DragOutcome::Committed(_))
    }
}

/// Ordered activity list plus the drag state machine that mutates it.
///
/// The list is only changed through `replace_all`, `remove` and the three
/// drag transitions.
#[derive(Debug, Clone, Default)]
pub struct Board {
    activities: Vec<Activity>,
    drag: DragState,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_activities(activities: Vec<Activity>) -> Self {
        Self {
            activities,
            drag: DragState::Idle,
        }
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.activities.iter().position(|a| a.id == id)
    }

    pub fn groups(&self) -> StatusGroups<'_> {
        group_by_status(&self.activities)
    }

    /// Installs an authoritative list from the backend. A running gesture
    /// survives only if its activity is still present, and from then on
    /// compares against the new list.
    pub fn replace_all(&mut self, activities: Vec<Activity>) {
        self.activities = activities;
        let active_missing = match &mut self.drag {
            DragState::Dragging(session) => {
                session.origin = self.activities.clone();
                session.placed_by = None;
                !self.activities.iter().any(|a| a.id == session.active_id)
            }
            DragState::Idle => false,
        };
        if active_missing {
            tracing::debug!("Dropping drag session: active activity vanished on reload");
            self.drag = DragState::Idle;
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Activity> {
        let index = self.index_of(id)?;
        let removed = self.activities.remove(index);
        let was_active = match &mut self.drag {
            DragState::Dragging(session) => {
                session.origin.retain(|a| a.id != id);
                session.active_id == id
            }
            DragState::Idle => false,
        };
        if was_active {
            self.drag = DragState::Idle;
        }
        Some(removed)
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging(_))
    }

    pub fn active_id(&self) -> Option<&str> {
        match &self.drag {
            DragState::Dragging(session) => Some(session.active_id()),
            DragState::Idle => None,
        }
    }

    /// The column a target belongs to: its own status for a column surface,
    /// otherwise the status of the activity it names.
    pub fn container_of(&self, target: &DropTarget) -> Option<ActivityStatus> {
        match target {
            DropTarget::Container(status) => Some(*status),
            DropTarget::Item(id) => self.get(id).map(|a| a.status),
        }
    }

    pub fn start_drag(&mut self, id: &str) -> ActivityResult<()> {
        if let DragState::Dragging(session) = &self.drag {
            return Err(ActivityError::InvalidTransition(format!(
                "drag already in progress for {}",
                session.active_id
            )));
        }
        if self.get(id).is_none() {
            return Err(ActivityError::NotFound(format!("Activity {}", id)));
        }

        tracing::debug!("Drag started: {}", id);
        self.drag = DragState::Dragging(DragSession {
            active_id: id.to_string(),
            origin: self.activities.clone(),
            over: None,
            placed_by: None,
        });
        Ok(())
    }

    /// Applies the optimistic cross-column move for the hovered target.
    /// Returns whether the list changed.
    pub fn hover(&mut self, target: DropTarget) -> bool {
        let active_id = match &mut self.drag {
            DragState::Dragging(session) => {
                if session.over.as_ref() != Some(&target) {
                    session.placed_by = None;
                }
                session.over = Some(target.clone());
                session.active_id.clone()
            }
            DragState::Idle => return false,
        };

        let Some(over_container) = self.container_of(&target) else {
            return false;
        };
        let Some(active_index) = self.index_of(&active_id) else {
            return false;
        };
        if self.activities[active_index].status == over_container {
            return false;
        }

        let mut moved = self.activities.remove(active_index);
        moved.status = over_container;
        let insert_at = match &target {
            DropTarget::Container(status) => self.group_end_index(*status),
            DropTarget::Item(id) => self
                .index_of(id)
                .unwrap_or_else(|| self.group_end_index(over_container)),
        };
        self.activities.insert(insert_at, moved);

        if let DragState::Dragging(session) = &mut self.drag {
            session.placed_by = Some(target.clone());
        }
        tracing::debug!("Drag {} now over {} (index {})", active_id, target, insert_at);
        true
    }

    /// Finishes the gesture. `None` means released outside any target.
    pub fn end_drag(&mut self, target: Option<DropTarget>) -> DragOutcome {
        let DragState::Dragging(session) = std::mem::take(&mut self.drag) else {
            tracing::debug!("end_drag without an active session");
            return DragOutcome::Cancelled;
        };
        let DragSession {
            active_id,
            origin,
            placed_by,
            ..
        } = session;

        let Some(target) = target else {
            tracing::debug!("Drag {} released outside any target", active_id);
            self.activities = origin;
            return DragOutcome::Cancelled;
        };
        let (Some(over_container), Some(from)) =
            (self.container_of(&target), self.index_of(&active_id))
        else {
            tracing::debug!("Drag {} released on unknown {}", active_id, target);
            self.activities = origin;
            return DragOutcome::Cancelled;
        };

        let keep_hover_placement = placed_by.as_ref() == Some(&target);
        let target_index = match &target {
            DropTarget::Item(id) if *id != active_id && !keep_hover_placement => {
                self.index_of(id)
            }
            _ => None,
        };

        let mut moved = self.activities.remove(from);
        moved.status = over_container;
        let to = match (&target, target_index) {
            (_, Some(index)) => index,
            (DropTarget::Container(status), None) if !keep_hover_placement => {
                self.group_end_index(*status)
            }
            _ => from,
        };
        self.activities.insert(to.min(self.activities.len()), moved);

        if same_arrangement(&origin, &self.activities) {
            tracing::debug!("Drag {} ended where it started", active_id);
            DragOutcome::Unchanged
        } else {
            tracing::debug!("Drag {} committed to {} at index {}", active_id, over_container, to);
            DragOutcome::Committed(ReorderBatch::from_activities(&self.activities))
        }
    }

    pub fn cancel_drag(&mut self) -> DragOutcome {
        self.end_drag(None)
    }

    /// Index just past the last activity with `status`, or the end of the
    /// list when the group is empty.
    fn group_end_index(&self, status: ActivityStatus) -> usize {
        self.activities
            .iter()
            .rposition(|a| a.status == status)
            .map(|index| index + 1)
            .unwrap_or(self.activities.len())
    }
}

/// Order is only meaningful within a column, so two lists match when every
/// column holds the same ids in the same order.
fn same_arrangement(before: &[Activity], after: &[Activity]) -> bool {
    let (before, after) = (group_by_status(before), group_by_status(after));
    ActivityStatus::ALL.into_iter().all(|status| {
        let (b, a) = (before.get(status), after.get(status));
        b.len() == a.len() && b.iter().zip(a).all(|(x, y)| x.id == y.id)
    })
}
