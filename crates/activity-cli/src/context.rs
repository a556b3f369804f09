use activity_client::{ActivityApi, BoardSession, HttpActivityApi};
use activity_core::ActivityResult;
use std::sync::Arc;

/// What every subcommand needs: the API client and the URL it was built from.
pub struct CliContext {
    pub api: Arc<dyn ActivityApi>,
    pub api_url: String,
}

impl CliContext {
    pub fn connect(api_url: &str) -> ActivityResult<Self> {
        let api = HttpActivityApi::new(api_url)?;
        tracing::debug!("Using API at {}", api.base_url());
        Ok(Self {
            api: Arc::new(api),
            api_url: api_url.to_string(),
        })
    }

    /// A session with the current board loaded.
    pub async fn session(&self) -> ActivityResult<BoardSession> {
        let mut session = BoardSession::new(Arc::clone(&self.api));
        session.reload().await?;
        Ok(session)
    }
}
