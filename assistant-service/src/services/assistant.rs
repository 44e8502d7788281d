//! The two assistant operations: summarising paper titles and replying to a
//! chat message. Each call builds one prompt and makes exactly one provider
//! request.

use crate::error::AssistantError;
use crate::services::providers::{GenerationParams, TextProvider};
use std::sync::Arc;

const SUMMARY_INSTRUCTION: &str = "Write a summary in 250 words about the following titles of \
research papers in English. Do not use markdown formatting: ";

const CHAT_INSTRUCTION: &str =
    "Reply formally and concisely to the following message. Do not use markdown formatting: ";

/// Titles are joined with a single space, in order.
pub fn summary_prompt(titles: &[String]) -> String {
    format!("{}{}", SUMMARY_INSTRUCTION, titles.join(" "))
}

pub fn chat_prompt(message: &str) -> String {
    format!("{}{}", CHAT_INSTRUCTION, message)
}

/// Stateless front for the generation capability.
#[derive(Clone)]
pub struct Assistant {
    provider: Arc<dyn TextProvider>,
    params: GenerationParams,
}

impl Assistant {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self {
            provider,
            params: GenerationParams::default(),
        }
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn provider(&self) -> &Arc<dyn TextProvider> {
        &self.provider
    }

    /// `None` means the field was absent; an empty slice is a valid request.
    pub async fn summarize(&self, summaries: Option<&[String]>) -> Result<String, AssistantError> {
        let titles = summaries.ok_or(AssistantError::MissingField("summaries"))?;

        tracing::info!(title_count = titles.len(), "Summarising research paper titles");

        self.complete(&summary_prompt(titles)).await
    }

    /// Absent and empty messages are both rejected.
    pub async fn chat(&self, message: Option<&str>) -> Result<String, AssistantError> {
        let message = message
            .filter(|m| !m.is_empty())
            .ok_or(AssistantError::MissingField("message"))?;

        tracing::info!(message_len = message.len(), "Generating chat reply");

        self.complete(&chat_prompt(message)).await
    }

    async fn complete(&self, prompt: &str) -> Result<String, AssistantError> {
        let response = self
            .provider
            .generate(prompt, &self.params)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Generation request failed");
                AssistantError::GenerationFailure(e)
            })?;

        tracing::debug!(
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            finish_reason = ?response.finish_reason,
            "Generation complete"
        );

        Ok(response.text)
    }
}
