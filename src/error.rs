//! Error types for the `slide_forms` crate.

use crate::validate::ValidationError;

/// Shown when a generation fails without a server-provided message.
pub const GENERATION_FAILED: &str = "スライド生成に失敗しました。";
/// Shown when the deadline expires or the request is cancelled.
pub const TIMEOUT_MESSAGE: &str = "タイムアウトしました。時間をおいて再度お試しください。";
/// Shown when the request never reached the server.
pub const NETWORK_MESSAGE: &str = "ネットワークエラーが発生しました。";

/// All errors that can occur while submitting forms.
#[derive(Debug, thiserror::Error)]
pub enum SlideFormsError {
    /// Local validation rejected the input; nothing was sent.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The server answered with a failure.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The request deadline expired or the request was cancelled.
    #[error("Request timed out")]
    Timeout,

    /// The request failed at the transport level.
    #[error("Network error: {0}")]
    Network(String),

    /// A response could not be understood.
    #[error("{0}")]
    Unexpected(String),

    /// A draft store backend failed.
    #[error("Draft storage failed: {0}")]
    Storage(Box<dyn std::error::Error + Send + Sync>),

    /// The configuration is invalid.
    #[error("Config error: {0}")]
    Config(String),

    /// A view could not be rendered to markup.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

impl SlideFormsError {
    /// The single line of text a form shows for this error.
    ///
    /// Timeouts and network failures get fixed wording; everything else
    /// surfaces its own message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Server { message, .. } => message.clone(),
            Self::Timeout => TIMEOUT_MESSAGE.to_string(),
            Self::Network(_) => NETWORK_MESSAGE.to_string(),
            Self::Unexpected(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for SlideFormsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Unexpected(e.to_string())
    }
}

/// A type alias for `Result<T, SlideFormsError>`.
pub type Result<T> = std::result::Result<T, SlideFormsError>;
