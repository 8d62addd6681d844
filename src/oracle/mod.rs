//! Oracle - the hosted language model that performs the actual conversion
//!
//! The dispatcher only sees the [`Oracle`] trait: prompt in, trimmed text out.
//! Every failure comes back as an [`OracleError`] whose `Display` text is the
//! message shown to the user.

mod gemini;

pub use gemini::{DEFAULT_API_BASE, DEFAULT_MODEL, GeminiOracle};

use async_trait::async_trait;

/// Text-in/text-out language model endpoint
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Provider name for logging and the status endpoint
    fn name(&self) -> &'static str;

    /// Send one prompt and return the first candidate's text. No retries.
    async fn generate(&self, prompt: &str) -> Result<String, OracleError>;
}

#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// Upstream answered with something other than 200
    #[error("API Error {status}: {body}")]
    Http { status: u16, body: String },

    /// 200 but the candidate list was empty or missing
    #[error("No candidates in API response")]
    NoCandidates,

    /// DNS, connect, timeout or body read failure
    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Body could not be decoded or lacked the expected fields
    #[error("Error: {0}")]
    Malformed(String),

    #[error("Invalid oracle endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl OracleError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, OracleError::Transport(e) if e.is_timeout())
    }
}
