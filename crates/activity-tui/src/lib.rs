pub mod app;
pub mod components;
pub mod cursor;
pub mod dialog;
pub mod events;
pub mod form;
pub mod input;
pub mod theme;
pub mod ui;

pub use app::App;
