pub mod activity;
pub mod board;
