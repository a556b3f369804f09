use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActivityError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Server error ({status}): {detail}")]
    Api { status: u16, detail: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ActivityError {
    /// True for failures where the request never produced a server answer.
    pub fn is_connection(&self) -> bool {
        matches!(self, ActivityError::Connection(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ActivityError::NotFound(_))
    }
}

impl From<serde_json::Error> for ActivityError {
    fn from(err: serde_json::Error) -> Self {
        ActivityError::Serialization(err.to_string())
    }
}
