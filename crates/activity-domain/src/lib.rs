pub mod activity;
pub mod board;
pub mod draft;
pub mod drop_target;
pub mod grouping;
pub mod reorder;

pub use activity::{Activity, ActivityId, ActivityStatus};
pub use board::{Board, DragOutcome, DragSession, DragState};
pub use draft::{is_supported_image, ActivityDraft, ActivityUpdate, SUPPORTED_IMAGE_EXTENSIONS};
pub use drop_target::DropTarget;
pub use grouping::{group_by_status, StatusGroups};
pub use reorder::{ReorderBatch, ReorderItem};
