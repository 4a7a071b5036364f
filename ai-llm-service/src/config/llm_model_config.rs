use serde::{Deserialize, Serialize};

use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{
    ConfigError, Result, validate_http_endpoint, validate_range_f32,
};

/// Configuration for the model that writes function summaries.
///
/// # Fields
///
/// - `provider`: which backend to call (Ollama or OpenAI-compatible).
/// - `model`: model identifier (e.g., `"qwen2.5-coder:7b"`, `"gpt-4o-mini"`).
/// - `endpoint`: base URL of the server; API paths are appended by the client.
/// - `api_key`: bearer token, required by the OpenAI provider.
/// - `max_tokens`: upper bound for the generated answer.
/// - `temperature`: sampling temperature (`0.0..=2.0`).
/// - `top_p`: nucleus sampling cutoff (`0.0..=1.0`).
/// - `timeout_secs`: HTTP request timeout.
///
/// # Examples
///
/// ```
/// use ai_llm_service::{LlmModelConfig, LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::OpenAI,
///     model: "gpt-4o-mini".to_string(),
///     endpoint: "https://api.openai.com".to_string(),
///     api_key: Some("sk-...".to_string()),
///     max_tokens: Some(1024),
///     temperature: Some(0.2),
///     top_p: None,
///     timeout_secs: Some(60),
/// };
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmModelConfig {
    pub provider: LlmProvider,

    pub model: String,

    pub endpoint: String,

    /// Never serialized back out.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub max_tokens: Option<u32>,

    #[serde(default)]
    pub temperature: Option<f32>,

    #[serde(default)]
    pub top_p: Option<f32>,

    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    /// Checks the config before any client is built.
    ///
    /// # Errors
    /// - [`ConfigError::EmptyModel`] when `model` is blank
    /// - [`ConfigError::InvalidFormat`] when `endpoint` is not http(s)
    /// - [`ConfigError::OutOfRange`] for `temperature` / `top_p`
    /// - [`ConfigError::MissingVar`] when the OpenAI provider has no API key
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }
        validate_http_endpoint("endpoint", self.endpoint.trim())?;
        if let Some(t) = self.temperature {
            validate_range_f32("temperature", t, 0.0, 2.0)?;
        }
        if let Some(p) = self.top_p {
            validate_range_f32("top_p", p, 0.0, 1.0)?;
        }
        if self.provider == LlmProvider::OpenAI
            && self.api_key.as_deref().is_none_or(|k| k.trim().is_empty())
        {
            return Err(ConfigError::MissingVar("OPENAI_API_KEY").into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ollama() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: "llama3".into(),
            endpoint: "http://localhost:11434".into(),
            api_key: None,
            max_tokens: None,
            temperature: Some(0.7),
            top_p: Some(0.9),
            timeout_secs: None,
        }
    }

    #[test]
    fn accepts_sane_ollama_config() {
        assert!(ollama().validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let mut cfg = ollama();
        cfg.model = "  ".into();
        assert!(cfg.validate().is_err());

        let mut cfg = ollama();
        cfg.endpoint = "localhost:11434".into();
        assert!(cfg.validate().is_err());

        let mut cfg = ollama();
        cfg.top_p = Some(1.5);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn openai_requires_key() {
        let mut cfg = ollama();
        cfg.provider = LlmProvider::OpenAI;
        assert!(cfg.validate().is_err());
        cfg.api_key = Some("sk-test".into());
        assert!(cfg.validate().is_ok());
    }
}
