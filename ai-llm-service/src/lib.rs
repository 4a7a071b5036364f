//! Completion client used to summarize source functions.
//!
//! - One [`LlmService`] per process, built from a validated [`LlmModelConfig`].
//! - Providers: a local or remote Ollama server, or any OpenAI-compatible
//!   chat completions endpoint (bearer-token auth).
//! - Every failure is reported through the unified [`AiLlmError`].
//!
//! # Example
//! ```no_run
//! use ai_llm_service::{LlmModelConfig, LlmProvider, LlmService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ai_llm_service::AiLlmError> {
//!     let cfg = LlmModelConfig {
//!         provider: LlmProvider::Ollama,
//!         model: "qwen2.5-coder:7b".into(),
//!         endpoint: "http://localhost:11434".into(),
//!         api_key: None,
//!         max_tokens: Some(1024),
//!         temperature: Some(0.2),
//!         top_p: None,
//!         timeout_secs: Some(120),
//!     };
//!
//!     let svc = LlmService::new(cfg)?;
//!     let txt = svc.generate("Describe `def add(a, b)`", None).await?;
//!     println!("{txt}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error_handler;
pub mod llm_service;
pub mod services;

pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error_handler::{AiLlmError, ConfigError, ProviderError, ProviderErrorKind, Result};
pub use llm_service::LlmService;
