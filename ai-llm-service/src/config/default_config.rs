//! Default model config loaded strictly from environment variables.
//!
//! Used when the project config file has no `llm` section.
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND` = provider kind (`ollama` | `openai`, default `ollama`)
//! - `LLM_MAX_TOKENS` = optional max tokens (u32)
//!
//! Ollama-specific:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (mandatory)
//! - `OLLAMA_MODEL`                = model (mandatory)
//!
//! OpenAI-specific:
//! - `OPENAI_URL`     = endpoint (default `https://api.openai.com`)
//! - `OPENAI_MODEL`   = model (mandatory)
//! - `OPENAI_API_KEY` = bearer token (mandatory)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, ConfigError, env_opt_u32, must_env, opt_env},
};

const OPENAI_DEFAULT_URL: &str = "https://api.openai.com";

/// Resolves the Ollama endpoint strictly from environment.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
fn ollama_endpoint() -> Result<String, AiLlmError> {
    if let Some(url) = opt_env("OLLAMA_URL") {
        return Ok(url);
    }
    if let Some(port) = opt_env("OLLAMA_PORT") {
        port.trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidNumber {
                var: "OLLAMA_PORT",
                reason: "expected u16 (1..=65535)",
            })?;
        return Ok(format!("http://localhost:{}", port.trim()));
    }
    Err(AiLlmError::Config(ConfigError::MissingVar(
        "OLLAMA_URL or OLLAMA_PORT",
    )))
}

/// Builds the summarization model config for whichever provider `LLM_KIND` names.
///
/// # Defaults
/// - `temperature = Some(0.2)` (summaries should be stable, not creative)
/// - `timeout_secs = Some(120)`
pub fn config_from_env() -> Result<LlmModelConfig, AiLlmError> {
    let provider = match opt_env("LLM_KIND") {
        Some(kind) => kind.parse::<LlmProvider>()?,
        None => LlmProvider::Ollama,
    };
    match provider {
        LlmProvider::Ollama => config_ollama(),
        LlmProvider::OpenAI => config_openai(),
    }
}

/// Ollama summarizer config.
///
/// # Env
/// - `OLLAMA_URL` / `OLLAMA_PORT` (required)
/// - `OLLAMA_MODEL` (required)
/// - `LLM_MAX_TOKENS` (optional)
pub fn config_ollama() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = ollama_endpoint()?;
    let model = must_env("OLLAMA_MODEL")?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model,
        endpoint,
        api_key: None,
        max_tokens,
        temperature: Some(0.2),
        top_p: None,
        timeout_secs: Some(120),
    })
}

/// OpenAI-compatible summarizer config.
///
/// # Env
/// - `OPENAI_MODEL`, `OPENAI_API_KEY` (required)
/// - `OPENAI_URL`, `LLM_MAX_TOKENS` (optional)
pub fn config_openai() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = opt_env("OPENAI_URL").unwrap_or_else(|| OPENAI_DEFAULT_URL.to_string());
    let model = must_env("OPENAI_MODEL")?;
    let api_key = must_env("OPENAI_API_KEY")?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens,
        temperature: Some(0.2),
        top_p: None,
        timeout_secs: Some(120),
    })
}
