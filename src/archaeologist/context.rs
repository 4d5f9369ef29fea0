use tracing::{debug, info, warn};

use crate::error::{SearchBackendError, SearchError};
use crate::search::WebSearch;

pub const MAX_SOURCES: u32 = 3;

pub struct ContextSearcher {
    backend: Box<dyn WebSearch>,
}

impl ContextSearcher {
    pub fn new(backend: Box<dyn WebSearch>) -> Self {
        Self { backend }
    }

    /// Links of the top hits in backend order. An item without a link yields an
    /// empty string so numbering still matches the backend's result list.
    pub async fn find_sources(&self, query: &str) -> Result<Vec<String>, SearchError> {
        println!("🌐 Searching the archives for contextual sources...");
        info!(max_results = MAX_SOURCES, "Searching for context");

        let items = self
            .backend
            .search(query, MAX_SOURCES)
            .await
            .map_err(|source| {
                if let SearchBackendError::Http {
                    status, message, ..
                } = &source
                {
                    warn!(status, message = %message, "Search backend rejected the request");
                }
                SearchError { source }
            })?;

        let sources: Vec<String> = items
            .into_iter()
            .take(MAX_SOURCES as usize)
            .map(|item| {
                debug!(title = ?item.title, link = ?item.link, "Search hit");
                item.link.unwrap_or_default()
            })
            .collect();

        Ok(sources)
    }
}
