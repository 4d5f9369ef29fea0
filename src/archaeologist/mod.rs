pub mod context;
pub mod reconstructor;
pub mod report;

use std::time::Instant;

use tracing::info;

use crate::config::Config;
use crate::error::{ConfigError, RunError};
use crate::instrumentation::RunLog;
use crate::llm::{GeminiClient, TextGenerator};
use crate::search::{CustomSearchClient, WebSearch};

use context::ContextSearcher;
use reconstructor::Reconstructor;
use report::generate_report;

pub struct Archaeologist {
    reconstructor: Reconstructor,
    searcher: ContextSearcher,
    model: String,
}

/// Everything one successful run produced.
#[derive(Debug, Clone)]
pub struct Excavation {
    pub fragment: String,
    pub reconstruction: String,
    pub sources: Vec<String>,
    pub run_log: RunLog,
}

impl Excavation {
    pub fn report(&self) -> String {
        generate_report(&self.fragment, &self.reconstruction, &self.sources)
    }
}

impl Archaeologist {
    pub fn new(config: &Config) -> Self {
        let credentials = &config.credentials;
        let llm = GeminiClient::new(
            &credentials.gemini_api_key,
            &config.gemini_base_url,
            &config.gemini_model,
        );
        let search = CustomSearchClient::new(
            &credentials.google_api_key,
            &credentials.search_engine_id,
            &config.search_base_url,
        );

        Self::with_backends(Box::new(llm), Box::new(search))
    }

    pub fn with_backends(llm: Box<dyn TextGenerator>, search: Box<dyn WebSearch>) -> Self {
        let model = llm.model().to_string();
        Self {
            reconstructor: Reconstructor::new(llm),
            searcher: ContextSearcher::new(search),
            model,
        }
    }

    /// Reconstruction then search, in that order. Either failure aborts the run
    /// and nothing from the other call is kept.
    pub async fn excavate(&self, fragment: &str) -> Result<Excavation, RunError> {
        let run_start = Instant::now();

        let reconstruction_start = Instant::now();
        let reconstruction = self.reconstructor.reconstruct(fragment).await?;
        let reconstruction_latency = reconstruction_start.elapsed().as_millis() as u64;

        let search_start = Instant::now();
        let sources = self.searcher.find_sources(fragment).await?;
        let search_latency = search_start.elapsed().as_millis() as u64;

        let run_log = RunLog {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            model: self.model.clone(),
            fragment_chars: fragment.chars().count(),
            reconstruction_latency_ms: reconstruction_latency,
            search_latency_ms: search_latency,
            input_tokens: reconstruction.input_tokens,
            output_tokens: reconstruction.output_tokens,
            num_sources: sources.len(),
            total_latency_ms: run_start.elapsed().as_millis() as u64,
        };

        Ok(Excavation {
            fragment: fragment.to_string(),
            reconstruction: reconstruction.text,
            sources,
            run_log,
        })
    }
}

/// Full invocation: load config, check the fragment, build the backends and
/// run them. Config and usage problems surface before any backend exists.
pub async fn run<L, C>(fragment_args: &[String], load_config: L, connect: C) -> Result<Excavation, RunError>
where
    L: FnOnce() -> Result<Config, ConfigError>,
    C: FnOnce(&Config) -> Archaeologist,
{
    let config = load_config()?;

    if fragment_args.is_empty() {
        return Err(RunError::Usage);
    }
    let fragment = fragment_args.join(" ");

    let archaeologist = connect(&config);
    let excavation = archaeologist.excavate(&fragment).await?;

    excavation.run_log.emit();
    info!(sources = excavation.sources.len(), "Report ready");

    Ok(excavation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GenerationError, SearchBackendError};
    use crate::llm::LlmResponse;
    use crate::search::SearchItem;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Calls {
        generate: Arc<AtomicUsize>,
        search: Arc<AtomicUsize>,
    }

    impl Calls {
        fn counts(&self) -> (usize, usize) {
            (
                self.generate.load(Ordering::SeqCst),
                self.search.load(Ordering::SeqCst),
            )
        }
    }

    struct MockModel {
        calls: Arc<AtomicUsize>,
        reply: Result<String, u16>,
    }

    #[async_trait]
    impl TextGenerator for MockModel {
        async fn generate(&self, _prompt: &str) -> Result<LlmResponse, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(text) => Ok(LlmResponse {
                    text: text.clone(),
                    input_tokens: 12,
                    output_tokens: 34,
                }),
                Err(status) => Err(GenerationError::Api {
                    status: *status,
                    message: "backend unavailable".into(),
                }),
            }
        }

        fn model(&self) -> &str {
            "mock-model"
        }
    }

    struct MockSearch {
        calls: Arc<AtomicUsize>,
        links: Vec<Option<&'static str>>,
    }

    #[async_trait]
    impl WebSearch for MockSearch {
        async fn search(&self, _q: &str, _n: u32) -> Result<Vec<SearchItem>, SearchBackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .links
                .iter()
                .map(|l| SearchItem {
                    link: l.map(String::from),
                    title: None,
                })
                .collect())
        }
    }

    fn archaeologist(calls: &Calls, reply: Result<&str, u16>, links: Vec<Option<&'static str>>) -> Archaeologist {
        Archaeologist::with_backends(
            Box::new(MockModel {
                calls: calls.generate.clone(),
                reply: reply.map(String::from),
            }),
            Box::new(MockSearch {
                calls: calls.search.clone(),
                links,
            }),
        )
    }

    fn env(skip: Option<&str>) -> HashMap<String, String> {
        [
            ("GEMINI_API_KEY", "gem"),
            ("GOOGLE_API_KEY", "goog"),
            ("SEARCH_ENGINE_ID", "cx"),
        ]
        .into_iter()
        .filter(|(k, _)| Some(*k) != skip)
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    const RECONSTRUCTED: &str =
        "Oh my god, laughing out loud, be right back, got to go. [slang explanations...]";

    #[tokio::test]
    async fn end_to_end_report_with_two_sources() {
        let calls = Calls::default();
        let vars = env(None);

        let excavation = run(
            &args(&["omg", "lol", "brb", "g2g"]),
            || Config::from_lookup(|k| vars.get(k).cloned()),
            |_| {
                archaeologist(
                    &calls,
                    Ok(RECONSTRUCTED),
                    vec![Some("https://example.com/a"), Some("https://example.com/b")],
                )
            },
        )
        .await
        .unwrap();

        let report = excavation.report();
        assert!(report.contains("> omg lol brb g2g"));
        assert!(report.contains(RECONSTRUCTED));
        assert!(report.contains("[1] https://example.com/a\n[2] https://example.com/b\n"));
        assert!(!report.contains("[3]"));
        assert_eq!(calls.counts(), (1, 1));

        assert_eq!(excavation.run_log.model, "mock-model");
        assert_eq!(excavation.run_log.total_tokens(), 46);
        assert_eq!(excavation.run_log.num_sources, 2);
        assert_eq!(excavation.run_log.fragment_chars, "omg lol brb g2g".len());
    }

    #[tokio::test]
    async fn zero_search_items_gives_no_sources_sentence() {
        let calls = Calls::default();
        let vars = env(None);

        let excavation = run(
            &args(&["asl?"]),
            || Config::from_lookup(|k| vars.get(k).cloned()),
            |_| archaeologist(&calls, Ok("age/sex/location?"), vec![]),
        )
        .await
        .unwrap();

        let report = excavation.report();
        let sources_section = report
            .split("--- [Contextual Sources] ---\n")
            .nth(1)
            .unwrap();
        assert!(sources_section.starts_with(&format!("{}\n\n", report::NO_SOURCES)));
        assert!(!report.lines().any(|l| l.starts_with('[')));
    }

    #[tokio::test]
    async fn reconstruction_failure_skips_search_and_report() {
        let calls = Calls::default();
        let vars = env(None);

        let err = run(
            &args(&["pwned"]),
            || Config::from_lookup(|k| vars.get(k).cloned()),
            |_| archaeologist(&calls, Err(503), vec![Some("https://example.com/a")]),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, RunError::Reconstruction(_)));
        assert_eq!(
            err.user_message("ai-archaeologist"),
            "\n❌ An error occurred during the reconstruction process: Error during AI reconstruction: API error (503): backend unavailable"
        );
        // sequential: search is never reached
        assert_eq!(calls.counts(), (1, 0));
    }

    #[tokio::test]
    async fn missing_credential_makes_no_backend_calls() {
        for missing in ["GEMINI_API_KEY", "GOOGLE_API_KEY", "SEARCH_ENGINE_ID"] {
            let calls = Calls::default();
            let vars = env(Some(missing));

            let err = run(
                &args(&["lol"]),
                || Config::from_lookup(|k| vars.get(k).cloned()),
                |_| archaeologist(&calls, Ok("text"), vec![]),
            )
            .await
            .unwrap_err();

            assert!(matches!(err, RunError::Configuration(_)));
            assert!(err.to_string().contains(missing));
            assert_eq!(calls.counts(), (0, 0));
        }
    }

    #[tokio::test]
    async fn no_fragment_is_usage_error() {
        let calls = Calls::default();
        let vars = env(None);

        let err = run(
            &[],
            || Config::from_lookup(|k| vars.get(k).cloned()),
            |_| archaeologist(&calls, Ok("text"), vec![]),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, RunError::Usage));
        assert_eq!(calls.counts(), (0, 0));
    }

    #[tokio::test]
    async fn excavate_keeps_raw_reconstruction() {
        let calls = Calls::default();
        let archaeologist = archaeologist(&calls, Ok("\n  spaced out  \n"), vec![None]);

        let excavation = archaeologist.excavate("brb").await.unwrap();

        assert_eq!(excavation.reconstruction, "\n  spaced out  \n");
        assert_eq!(excavation.sources, vec![String::new()]);
        assert!(excavation.report().contains("\nspaced out\n\n"));
    }
}
