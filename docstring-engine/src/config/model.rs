//! Strongly typed run configuration.
//!
//! The YAML file uses snake_case keys. [`DocsmithConfig::validate`] turns the
//! raw values into [`ValidatedConfig`]; nothing touches a file before that
//! succeeds.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use ai_llm_service::{LlmModelConfig, LlmProvider, config::default_config::config_from_env};
use serde::{Deserialize, Serialize};

use crate::{
    ast::FunctionFilter,
    errors::ConfigError,
    model::{Language, Style},
    orchestrator::RunOptions,
    registry::formatter_for,
    summary::DEFAULT_TIMEOUT,
};

/// Contents of `.docsmith.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocsmithConfig {
    /// Root for file selection; relative paths resolve against the config file.
    pub project_dir: Option<PathBuf>,
    pub files: Vec<String>,
    pub functions: Vec<String>,
    pub ignore_files: Vec<String>,
    pub ignore_functions: Vec<String>,
    pub language: Option<String>,
    pub style: Option<String>,
    pub force_all: bool,
    pub no_summary: bool,
    pub check: bool,
    pub skip_existing: bool,
    /// Per-summary timeout.
    pub timeout_secs: Option<u64>,
    pub llm: Option<LlmSection>,
}

impl Default for DocsmithConfig {
    fn default() -> Self {
        Self {
            project_dir: None,
            files: vec!["**/*".to_string()],
            functions: vec!["*".to_string()],
            ignore_files: Vec::new(),
            ignore_functions: Vec::new(),
            language: None,
            style: None,
            force_all: false,
            no_summary: false,
            check: false,
            skip_existing: false,
            timeout_secs: None,
            llm: None,
        }
    }
}

/// `llm:` section. The API key itself never lives in the file; `api_key_env`
/// names the variable holding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmSection {
    pub provider: LlmProvider,
    pub model: String,
    pub endpoint: String,
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub top_p: Option<f32>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl LlmSection {
    fn to_model_config(&self) -> LlmModelConfig {
        let key_var = self.api_key_env.clone().or_else(|| {
            (self.provider == LlmProvider::OpenAI).then(|| "OPENAI_API_KEY".to_string())
        });
        let api_key = key_var
            .and_then(|v| std::env::var(v).ok())
            .filter(|k| !k.trim().is_empty());

        LlmModelConfig {
            provider: self.provider,
            model: self.model.clone(),
            endpoint: self.endpoint.clone(),
            api_key,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
            timeout_secs: self.timeout_secs,
        }
    }
}

/// Everything a run needs, checked.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub project_dir: PathBuf,
    pub language: Language,
    pub style: Style,
    pub files: Vec<String>,
    pub ignore_files: Vec<String>,
    pub functions: FunctionFilter,
    pub options: RunOptions,
    pub timeout: Duration,
    /// `None` when `no_summary` or `check` makes the service unnecessary.
    pub llm: Option<LlmModelConfig>,
}

impl DocsmithConfig {
    /// Resolves names, checks the (language, style) pair and the model config.
    ///
    /// `base_dir` anchors a relative `project_dir` and is the default root.
    pub fn validate(&self, base_dir: &Path) -> Result<ValidatedConfig, ConfigError> {
        let language: Language = match &self.language {
            Some(l) => l.parse()?,
            None => Language::Python,
        };
        let style: Style = match &self.style {
            Some(s) => s.parse()?,
            None => language.default_style(),
        };
        formatter_for(language, style)?;

        let functions = FunctionFilter::new(&self.functions, &self.ignore_functions)?;

        let project_dir = match &self.project_dir {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => base_dir.join(p),
            None => base_dir.to_path_buf(),
        };

        let needs_service = !(self.no_summary || self.check);
        let llm = if needs_service {
            let cfg = match &self.llm {
                Some(section) => section.to_model_config(),
                None => config_from_env()?,
            };
            cfg.validate()?;
            Some(cfg)
        } else {
            None
        };

        Ok(ValidatedConfig {
            project_dir,
            language,
            style,
            files: self.files.clone(),
            ignore_files: self.ignore_files.clone(),
            functions,
            options: RunOptions {
                force_all: self.force_all,
                check: self.check,
                skip_existing: self.skip_existing,
            },
            timeout: self
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
            llm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline() -> DocsmithConfig {
        DocsmithConfig {
            no_summary: true,
            ..DocsmithConfig::default()
        }
    }

    #[test]
    fn defaults_pick_python_pep() {
        let v = offline().validate(Path::new("/repo")).unwrap();
        assert_eq!(v.language, Language::Python);
        assert_eq!(v.style, Style::Pep);
        assert_eq!(v.project_dir, PathBuf::from("/repo"));
        assert_eq!(v.timeout, DEFAULT_TIMEOUT);
        assert!(v.llm.is_none());
    }

    #[test]
    fn csharp_defaults_to_xml_and_rejects_pep() {
        let mut c = offline();
        c.language = Some("CSharp".into());
        assert_eq!(c.validate(Path::new(".")).unwrap().style, Style::Xml);

        c.style = Some("pep".into());
        assert!(matches!(
            c.validate(Path::new(".")),
            Err(ConfigError::Unsupported(_))
        ));
    }

    #[test]
    fn unknown_names_and_bad_patterns_are_fatal() {
        let mut c = offline();
        c.style = Some("javadoc".into());
        assert!(matches!(
            c.validate(Path::new(".")),
            Err(ConfigError::UnknownStyle { .. })
        ));

        let mut c = offline();
        c.functions = vec!["[".into()];
        assert!(matches!(
            c.validate(Path::new(".")),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn llm_section_is_validated_when_needed() {
        let mut c = DocsmithConfig::default();
        c.llm = Some(LlmSection {
            provider: LlmProvider::Ollama,
            model: "qwen2.5-coder:7b".into(),
            endpoint: "localhost:11434".into(),
            api_key_env: None,
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: None,
        });
        assert!(matches!(c.validate(Path::new(".")), Err(ConfigError::Llm(_))));

        if let Some(llm) = c.llm.as_mut() {
            llm.endpoint = "http://localhost:11434".into();
        }
        let v = c.validate(Path::new(".")).unwrap();
        assert_eq!(v.llm.map(|l| l.model), Some("qwen2.5-coder:7b".to_string()));
    }

    #[test]
    fn yaml_keys_are_snake_case() {
        let yaml = "\
language: csharp
style: doxygen
files: [\"src/**\"]
skip_existing: true
project_dir: sub
llm:
  provider: openai
  model: gpt-4o-mini
  endpoint: https://api.openai.com
  api_key_env: MY_KEY
";
        let c: DocsmithConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(c.style.as_deref(), Some("doxygen"));
        assert!(c.skip_existing);
        assert_eq!(c.functions, vec!["*"]);
        assert_eq!(c.llm.unwrap().provider, LlmProvider::OpenAI);

        let bad: Result<DocsmithConfig, _> = serde_yml::from_str("langauge: python\n");
        assert!(bad.is_err());
    }
}
