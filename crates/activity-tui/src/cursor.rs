use activity_domain::{Activity, ActivityStatus, DropTarget, StatusGroups};

/// Keyboard position on the board: a column plus a row inside it.
///
/// While an activity is grabbed the row may sit one past the last item,
/// which addresses the empty area at the bottom of the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardCursor {
    column: ActivityStatus,
    row: usize,
}

impl Default for BoardCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardCursor {
    pub fn new() -> Self {
        Self {
            column: ActivityStatus::Pending,
            row: 0,
        }
    }

    pub fn column(&self) -> ActivityStatus {
        self.column
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn selected<'a>(&self, groups: &StatusGroups<'a>) -> Option<&'a Activity> {
        groups.get(self.column).get(self.row).copied()
    }

    pub fn move_up(&mut self) {
        self.row = self.row.saturating_sub(1);
    }

    pub fn move_down(&mut self, groups: &StatusGroups<'_>, allow_end: bool) {
        self.row += 1;
        self.clamp(groups, allow_end);
    }

    pub fn move_left(&mut self, groups: &StatusGroups<'_>, allow_end: bool) {
        if let Some(column) = self
            .column
            .column_index()
            .checked_sub(1)
            .and_then(ActivityStatus::from_column_index)
        {
            self.column = column;
        }
        self.clamp(groups, allow_end);
    }

    pub fn move_right(&mut self, groups: &StatusGroups<'_>, allow_end: bool) {
        if let Some(column) = ActivityStatus::from_column_index(self.column.column_index() + 1) {
            self.column = column;
        }
        self.clamp(groups, allow_end);
    }

    /// Keeps the row inside the column after the list changed.
    pub fn clamp(&mut self, groups: &StatusGroups<'_>, allow_end: bool) {
        let len = groups.count(self.column);
        let max = if allow_end { len } else { len.saturating_sub(1) };
        self.row = self.row.min(max);
    }

    /// Moves onto `id`. Returns false when it is not on the board.
    pub fn focus_on(&mut self, groups: &StatusGroups<'_>, id: &str) -> bool {
        match groups.position_of(id) {
            Some((column, row)) => {
                self.column = column;
                self.row = row;
                true
            }
            None => false,
        }
    }

    /// The item under the cursor, or the column itself past its last item.
    pub fn drop_target(&self, groups: &StatusGroups<'_>) -> DropTarget {
        match self.selected(groups) {
            Some(activity) => DropTarget::Item(activity.id.clone()),
            None => DropTarget::Container(self.column),
        }
    }
}
