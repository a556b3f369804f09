use crate::activity::{Activity, ActivityId, ActivityStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry of the bulk reorder request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderItem {
    pub id: ActivityId,
    pub status: ActivityStatus,
    /// Zero-based position within the activity's status group.
    pub position: usize,
}

/// Full board order after a committed gesture. Serializes as a bare JSON
/// array, which is what the reorder endpoint takes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReorderBatch {
    pub items: Vec<ReorderItem>,
}

impl ReorderBatch {
    pub fn from_activities(activities: &[Activity]) -> Self {
        let mut next_position: HashMap<ActivityStatus, usize> = HashMap::new();
        let items = activities
            .iter()
            .map(|activity| {
                let slot = next_position.entry(activity.status).or_insert(0);
                let position = *slot;
                *slot += 1;
                ReorderItem {
                    id: activity.id.clone(),
                    status: activity.status,
                    position,
                }
            })
            .collect();
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ReorderItem> {
        self.items.iter().find(|item| item.id == id)
    }
}
