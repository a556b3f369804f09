use crate::activity::{ActivityId, ActivityStatus};
use std::fmt;

/// What a drag gesture is currently over.
///
/// Raw target ids share one namespace: a column is addressed by its status
/// wire value, an item by its activity id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DropTarget {
    /// The column surface itself, not any item in it.
    Container(ActivityStatus),
    Item(ActivityId),
}

impl DropTarget {
    /// Status identifiers are checked first; anything else is taken to be an
    /// activity id and resolved later against the list.
    pub fn parse(raw: &str) -> Self {
        match ActivityStatus::from_wire(raw) {
            Some(status) => DropTarget::Container(status),
            None => DropTarget::Item(raw.to_string()),
        }
    }

    pub fn item(id: impl Into<ActivityId>) -> Self {
        DropTarget::Item(id.into())
    }

    pub fn is_container(&self) -> bool {
        matches!(self, DropTarget::Container(_))
    }
}

impl From<ActivityStatus> for DropTarget {
    fn from(status: ActivityStatus) -> Self {
        DropTarget::Container(status)
    }
}

impl fmt::Display for DropTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropTarget::Container(status) => write!(f, "column '{}'", status),
            DropTarget::Item(id) => write!(f, "activity {}", id),
        }
    }
}
