//! Function descriptor → [`SummaryResult`].
//!
//! [`Summarizer`] asks a [`CompletionBackend`] for a JSON answer and parses
//! it; [`default_summary`] builds the placeholder used when no service is
//! involved.

pub mod json_extract;
pub mod prompt;

use std::{future::Future, sync::Arc, time::Duration, time::Instant};

use ai_llm_service::{AiLlmError, LlmService};
use tracing::{debug, instrument, warn};

use crate::{
    errors::GenerationError,
    model::{FunctionDescriptor, Language, ParamDoc, SummaryResult},
    progress::{NoopProgress, Progress},
};

use self::{
    json_extract::extract_json_object,
    prompt::{SYSTEM_PROMPT, build_prompt},
};

pub const PLACEHOLDER_SUMMARY: &str = "_summary_";
pub const PLACEHOLDER_DESCRIPTION: &str = "_description_";
pub const PLACEHOLDER_RETURNS: &str = "_returns_";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Anything that can turn a prompt into raw text.
pub trait CompletionBackend: Send + Sync + 'static {
    fn complete(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> impl Future<Output = Result<String, AiLlmError>> + Send;
}

impl CompletionBackend for LlmService {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        self.generate(prompt, system).await
    }
}

/// Summarizes one function at a time.
pub struct Summarizer<B> {
    backend: Arc<B>,
    language: Language,
    timeout: Duration,
    progress: Arc<dyn Progress>,
}

impl<B: CompletionBackend> Summarizer<B> {
    pub fn new(backend: Arc<B>, language: Language) -> Self {
        Self {
            backend,
            language,
            timeout: DEFAULT_TIMEOUT,
            progress: Arc::new(NoopProgress),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn Progress>) -> Self {
        self.progress = progress;
        self
    }

    /// Runs one completion as its own task and parses the answer.
    ///
    /// The call is awaited in full (or until the timeout) before the next one
    /// starts; a spinner is shown meanwhile.
    #[instrument(skip_all, fields(function = %d.qualified_name))]
    pub async fn summarize(&self, d: &FunctionDescriptor) -> Result<SummaryResult, GenerationError> {
        let prompt = build_prompt(d, self.language);
        let backend = Arc::clone(&self.backend);
        let started = Instant::now();

        self.progress
            .begin(&format!("Generating documentation for {}", d.qualified_name));
        let handle =
            tokio::spawn(async move { backend.complete(&prompt, Some(SYSTEM_PROMPT)).await });
        let abort = handle.abort_handle();
        let joined = tokio::time::timeout(self.timeout, handle).await;
        self.progress.end();

        let raw = match joined {
            Err(_) => {
                abort.abort();
                warn!(timeout_secs = self.timeout.as_secs(), "summarization timed out");
                return Err(GenerationError::Timeout(self.timeout));
            }
            Ok(Err(join)) => return Err(GenerationError::TaskFailed(join.to_string())),
            Ok(Ok(Err(e))) => return Err(GenerationError::Transport(e)),
            Ok(Ok(Ok(text))) => text,
        };

        debug!(
            latency_ms = started.elapsed().as_millis(),
            response_len = raw.len(),
            "summary received"
        );
        parse_summary(&raw, d)
    }
}

/// Extracts, decodes and normalizes a raw service answer.
pub fn parse_summary(raw: &str, d: &FunctionDescriptor) -> Result<SummaryResult, GenerationError> {
    let json = extract_json_object(raw)?;
    let parsed: SummaryResult =
        serde_json::from_str(json).map_err(|e| GenerationError::MalformedJson(e.to_string()))?;
    Ok(normalize(parsed, d))
}

/// Deterministic placeholder; the same descriptor always gives the same result.
pub fn default_summary(d: &FunctionDescriptor) -> SummaryResult {
    SummaryResult {
        summary: PLACEHOLDER_SUMMARY.to_string(),
        parameters: d
            .parameters
            .iter()
            .map(|p| ParamDoc {
                name: p.name.clone(),
                type_name: Some(
                    p.type_hint
                        .clone()
                        .unwrap_or_else(|| crate::model::summary::ANY_TYPE.to_string()),
                ),
                desc: PLACEHOLDER_DESCRIPTION.to_string(),
            })
            .collect(),
        return_description: Some(PLACEHOLDER_RETURNS.to_string()),
        exceptions: Vec::new(),
        remarks: None,
    }
}

/// Aligns the service answer with the declaration.
///
/// Parameters follow declaration order; ones the service skipped get the
/// placeholder description and ones it invented are dropped. Missing types
/// come from annotations. Blank optional text becomes `None`.
fn normalize(mut s: SummaryResult, d: &FunctionDescriptor) -> SummaryResult {
    let mut given = std::mem::take(&mut s.parameters);
    s.parameters = d
        .parameters
        .iter()
        .map(|decl| {
            let bare = decl.name.trim_start_matches('*');
            let found = given
                .iter()
                .position(|p| p.name.trim_start_matches('*') == bare)
                .map(|i| given.remove(i));
            let (type_name, desc) = match found {
                Some(p) => (p.type_name, p.desc),
                None => (None, PLACEHOLDER_DESCRIPTION.to_string()),
            };
            ParamDoc {
                name: decl.name.clone(),
                type_name: type_name
                    .filter(|t| !t.trim().is_empty())
                    .or_else(|| decl.type_hint.clone()),
                desc: desc.trim().to_string(),
            }
        })
        .collect();

    s.summary = s.summary.trim().to_string();
    s.return_description = non_blank(s.return_description);
    s.remarks = non_blank(s.remarks);
    s.exceptions.retain(|e| !e.type_name.trim().is_empty());
    s
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
