use thiserror::Error;

use crate::config::{GEMINI_API_KEY, GOOGLE_API_KEY, SEARCH_ENGINE_ID};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required credentials: {}", .keys.join(", "))]
    MissingCredentials { keys: Vec<&'static str> },
}

/// Failure of the generative-model backend.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("model returned no candidates{}", .reason.as_deref().map(|r| format!(" (blocked: {r})")).unwrap_or_default())]
    EmptyResponse { reason: Option<String> },
}

#[derive(Debug, Error)]
#[error("Error during AI reconstruction: {source}")]
pub struct ReconstructionError {
    #[source]
    pub source: GenerationError,
}

/// Failure of the web-search backend.
#[derive(Debug, Error)]
pub enum SearchBackendError {
    #[error("{status} {reason}")]
    Http {
        status: u16,
        reason: String,
        message: String,
    },

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
}

// Request URLs carry the search key and engine id as query parameters, so
// they are stripped before a reqwest error can be displayed or logged.
impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        GenerationError::Transport(e.without_url())
    }
}

impl From<reqwest::Error> for SearchBackendError {
    fn from(e: reqwest::Error) -> Self {
        SearchBackendError::Transport(e.without_url())
    }
}

#[derive(Debug, Error)]
#[error("Error during web search: {source}")]
pub struct SearchError {
    #[source]
    pub source: SearchBackendError,
}

impl SearchError {
    pub fn status(&self) -> Option<u16> {
        match &self.source {
            SearchBackendError::Http { status, .. } => Some(*status),
            SearchBackendError::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match &self.source {
            SearchBackendError::Http { reason, .. } => Some(reason),
            SearchBackendError::Transport(_) => None,
        }
    }
}

/// Everything that can end an invocation early.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("no text fragment supplied")]
    Usage,

    #[error(transparent)]
    Reconstruction(#[from] ReconstructionError),

    #[error(transparent)]
    Search(#[from] SearchError),
}

impl RunError {
    /// The message shown to the user in place of a report.
    pub fn user_message(&self, program: &str) -> String {
        match self {
            RunError::Configuration(e) => format!(
                "🔴 Configuration Error: {}\n   Please ensure {}, {}, and {} are in your .env file.",
                e, GEMINI_API_KEY, GOOGLE_API_KEY, SEARCH_ENGINE_ID
            ),
            RunError::Usage => format!(
                "🔴 Usage Error: Please provide a text fragment as a command-line argument.\n   Example: {} \"omg lol brb g2g\"",
                program
            ),
            RunError::Reconstruction(e) => {
                format!("\n❌ An error occurred during the reconstruction process: {}", e)
            }
            RunError::Search(e) => {
                format!("\n❌ An error occurred during the reconstruction process: {}", e)
            }
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::Usage => 2,
            _ => 1,
        }
    }
}
