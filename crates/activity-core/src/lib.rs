pub mod config;
pub mod error;
pub mod logging;
pub mod result;

pub use config::AppConfig;
pub use error::ActivityError;
pub use logging::LogTarget;
pub use result::ActivityResult;
