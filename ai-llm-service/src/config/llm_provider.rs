use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error_handler::ConfigError;

/// Backend used to summarize functions.
///
/// `Ollama` covers both on-device inference and a self-hosted server; the
/// `OpenAI` variant talks to any endpoint implementing `/v1/chat/completions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Ollama runtime (`/api/generate`).
    Ollama,
    /// OpenAI-compatible chat completions API.
    #[serde(alias = "open_ai", alias = "chatgpt")]
    OpenAI,
}

impl Display for LlmProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LlmProvider::Ollama => "ollama",
            LlmProvider::OpenAI => "openai",
        })
    }
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    /// Parses the `LLM_KIND` spelling; `local` maps to Ollama and `web` to OpenAI.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" | "local" => Ok(LlmProvider::Ollama),
            "openai" | "open_ai" | "chatgpt" | "web" => Ok(LlmProvider::OpenAI),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases_case_insensitively() {
        assert_eq!("Ollama".parse::<LlmProvider>().unwrap(), LlmProvider::Ollama);
        assert_eq!("local".parse::<LlmProvider>().unwrap(), LlmProvider::Ollama);
        assert_eq!("WEB".parse::<LlmProvider>().unwrap(), LlmProvider::OpenAI);
        assert!("bard".parse::<LlmProvider>().is_err());
    }
}
