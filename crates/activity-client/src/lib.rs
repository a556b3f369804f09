pub mod api;
pub mod http;
pub mod image;
pub mod reconcile;
pub mod session;

pub use api::ActivityApi;
pub use http::{image_url, HttpActivityApi};
pub use image::ImageUpload;
pub use reconcile::{reconcile, spawn_reconcile, ReconcileEvent};
pub use session::BoardSession;
