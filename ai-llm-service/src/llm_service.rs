//! Provider-agnostic entry point.

use tracing::info;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::Result,
    services::{ollama_service::OllamaService, open_ai_service::OpenAiService},
};

#[derive(Debug)]
enum Backend {
    Ollama(OllamaService),
    OpenAI(OpenAiService),
}

/// One completion client, dispatching to the provider named in its config.
#[derive(Debug)]
pub struct LlmService {
    backend: Backend,
}

impl LlmService {
    /// Validates `cfg` and builds the matching provider client.
    ///
    /// # Errors
    /// Any [`crate::ConfigError`] from [`LlmModelConfig::validate`] or a
    /// provider construction failure.
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        cfg.validate()?;
        info!(provider = %cfg.provider, model = %cfg.model, "llm service ready");
        let backend = match cfg.provider {
            LlmProvider::Ollama => Backend::Ollama(OllamaService::new(cfg)?),
            LlmProvider::OpenAI => Backend::OpenAI(OpenAiService::new(cfg)?),
        };
        Ok(Self { backend })
    }

    /// Sends `prompt` (plus optional system message) and returns the raw text answer.
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String> {
        match &self.backend {
            Backend::Ollama(s) => s.generate(prompt, system).await,
            Backend::OpenAI(s) => s.generate(prompt, system).await,
        }
    }
}
