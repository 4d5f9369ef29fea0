pub mod google;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::SearchBackendError;

pub use google::CustomSearchClient;

/// One hit from the search backend. Any field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchItem {
    pub link: Option<String>,
    pub title: Option<String>,
}

#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Returns at most `num_results` items in relevance order.
    async fn search(
        &self,
        query: &str,
        num_results: u32,
    ) -> Result<Vec<SearchItem>, SearchBackendError>;
}
