use std::fmt;

use crate::error::ConfigError;

pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
pub const SEARCH_ENGINE_ID: &str = "SEARCH_ENGINE_ID";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-09-2025";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// The three secrets needed before any backend can be called.
#[derive(Clone)]
pub struct Credentials {
    pub gemini_api_key: String,
    pub google_api_key: String,
    pub search_engine_id: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("gemini_api_key", &"<redacted>")
            .field("google_api_key", &"<redacted>")
            .field("search_engine_id", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub search_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key-value source. Every missing required key is
    /// reported, not just the first one.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let gemini_api_key = required(GEMINI_API_KEY);
        let google_api_key = required(GOOGLE_API_KEY);
        let search_engine_id = required(SEARCH_ENGINE_ID);

        let credentials = match (gemini_api_key, google_api_key, search_engine_id) {
            (Some(gemini_api_key), Some(google_api_key), Some(search_engine_id)) => Credentials {
                gemini_api_key,
                google_api_key,
                search_engine_id,
            },
            (gemini, google, engine) => {
                let missing = [
                    (GEMINI_API_KEY, gemini.is_none()),
                    (GOOGLE_API_KEY, google.is_none()),
                    (SEARCH_ENGINE_ID, engine.is_none()),
                ]
                .into_iter()
                .filter_map(|(key, absent)| absent.then_some(key))
                .collect();
                return Err(ConfigError::MissingCredentials { keys: missing });
            }
        };

        let optional = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.into())
        };

        Ok(Self {
            credentials,
            gemini_model: optional("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            gemini_base_url: optional("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            search_base_url: optional("SEARCH_BASE_URL", DEFAULT_SEARCH_BASE_URL),
        })
    }
}
