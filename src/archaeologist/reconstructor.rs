use tracing::info;

use crate::error::ReconstructionError;
use crate::llm::{LlmResponse, TextGenerator};

const PROMPT_PREAMBLE: &str = r#"You are an 'AI Archeologist' specializing in early 2000s internet culture.
Your task is to take the following fragmented text from an old forum and reconstruct
it into a complete, coherent sentence. You must also explain the meaning of any slang used."#;

/// Embeds the fragment verbatim; nothing is escaped or trimmed.
pub fn build_prompt(fragment: &str) -> String {
    format!("{}\n\nHere is the fragment: '{}'", PROMPT_PREAMBLE, fragment)
}

pub struct Reconstructor {
    llm: Box<dyn TextGenerator>,
}

impl Reconstructor {
    pub fn new(llm: Box<dyn TextGenerator>) -> Self {
        Self { llm }
    }

    pub async fn reconstruct(&self, fragment: &str) -> Result<LlmResponse, ReconstructionError> {
        println!("🤖 Calling the 'AI Archaeologist' to reconstruct the fragment...");
        info!(
            model = self.llm.model(),
            fragment_chars = fragment.chars().count(),
            "Requesting reconstruction"
        );

        let prompt = build_prompt(fragment);

        self.llm
            .generate(&prompt)
            .await
            .map_err(|source| ReconstructionError { source })
    }
}
