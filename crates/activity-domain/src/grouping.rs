use crate::activity::{Activity, ActivityStatus};

/// The three columns derived from the flat activity list.
///
/// Borrows the list it was built from, so a projection can never survive a
/// mutation of that list; callers rebuild it after every change.
#[derive(Debug, Default)]
pub struct StatusGroups<'a> {
    pending: Vec<&'a Activity>,
    in_progress: Vec<&'a Activity>,
    done: Vec<&'a Activity>,
}

impl<'a> StatusGroups<'a> {
    pub fn get(&self, status: ActivityStatus) -> &[&'a Activity] {
        match status {
            ActivityStatus::Pending => &self.pending,
            ActivityStatus::InProgress => &self.in_progress,
            ActivityStatus::Done => &self.done,
        }
    }

    pub fn count(&self, status: ActivityStatus) -> usize {
        self.get(status).len()
    }

    pub fn total(&self) -> usize {
        self.pending.len() + self.in_progress.len() + self.done.len()
    }

    /// Columns in board order.
    pub fn columns(&self) -> impl Iterator<Item = (ActivityStatus, &[&'a Activity])> {
        ActivityStatus::ALL
            .into_iter()
            .map(move |status| (status, self.get(status)))
    }

    /// Position of an activity inside its column.
    pub fn position_of(&self, id: &str) -> Option<(ActivityStatus, usize)> {
        self.columns().find_map(|(status, items)| {
            items
                .iter()
                .position(|a| a.id == id)
                .map(|index| (status, index))
        })
    }

    fn bucket_mut(&mut self, status: ActivityStatus) -> &mut Vec<&'a Activity> {
        match status {
            ActivityStatus::Pending => &mut self.pending,
            ActivityStatus::InProgress => &mut self.in_progress,
            ActivityStatus::Done => &mut self.done,
        }
    }
}

/// Partitions by status, preserving relative order.
pub fn group_by_status(activities: &[Activity]) -> StatusGroups<'_> {
    let mut groups = StatusGroups::default();
    for activity in activities {
        groups.bucket_mut(activity.status).push(activity);
    }
    groups
}
