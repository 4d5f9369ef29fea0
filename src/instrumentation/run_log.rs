use serde::Serialize;
use tracing::{info, warn};

/// Timing and token usage for one invocation. Emitted through tracing only.
#[derive(Debug, Clone, Serialize)]
pub struct RunLog {
    pub id: String,
    pub timestamp: String,
    pub model: String,
    pub fragment_chars: usize,
    pub reconstruction_latency_ms: u64,
    pub search_latency_ms: u64,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub num_sources: usize,
    pub total_latency_ms: u64,
}

impl RunLog {
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }

    pub fn summary(&self) -> String {
        format!(
            "Run {} | Model: {} | Reconstruction: {:.1}s | Search: {:.1}s | Tokens: {} | Sources: {} | Total: {:.1}s",
            self.id,
            self.model,
            self.reconstruction_latency_ms as f64 / 1000.0,
            self.search_latency_ms as f64 / 1000.0,
            self.total_tokens(),
            self.num_sources,
            self.total_latency_ms as f64 / 1000.0,
        )
    }

    pub fn emit(&self) {
        match serde_json::to_string(self) {
            Ok(json) => info!(run_log = %json, "Run complete"),
            Err(e) => warn!(error = %e, "Failed to serialize run log"),
        }
    }
}
