//! Error types, one enum per pipeline stage.
//!
//! Per-file and per-function errors ([`ParseError`], [`GenerationError`],
//! [`FormatError`], [`CommitError`]) are recorded in the run report and never
//! stop sibling work. [`ConfigError`] is fatal and raised before any file is
//! touched.

use std::{io, path::PathBuf, time::Duration};

use ai_llm_service::AiLlmError;
use thiserror::Error;

use crate::model::{language::Language, style::Style};

/// File unreadable or not valid source for its language.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: syntax error", path.display())]
    Syntax { path: PathBuf, line: usize },

    #[error("{language} grammar could not be loaded: {reason}")]
    Grammar { language: Language, reason: String },

    #[error("{}: parser returned no tree", path.display())]
    NoTree { path: PathBuf },
}

/// Summarization failed for one function.
///
/// `Transport` and `Timeout` mean the service never produced an answer;
/// `NoJsonObject` and `MalformedJson` mean it answered with something unusable.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("summarization service failed: {0}")]
    Transport(#[from] AiLlmError),

    #[error("summarization timed out after {0:?}")]
    Timeout(Duration),

    #[error("response contains no balanced JSON object")]
    NoJsonObject,

    #[error("response JSON is malformed: {0}")]
    MalformedJson(String),

    #[error("summarization task failed: {0}")]
    TaskFailed(String),
}

/// A documentation block could not be produced.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("{}:{line}: declaration line not found, indentation unknown", path.display())]
    IndentNotFound { path: PathBuf, line: usize },

    #[error("{}:{line}: body shares the line with the header; no room for a docstring", path.display())]
    InlineBody { path: PathBuf, line: usize },

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no formatter registered for language `{language}` with style `{style}`")]
    Unsupported { language: Language, style: Style },
}

/// Writing accepted blocks back to a file failed; the file is left untouched.
#[derive(Debug, Error)]
pub enum CommitError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: insertion line {target_line} is past the end of the file ({line_count} lines)", path.display())]
    TargetOutOfRange {
        path: PathBuf,
        target_line: usize,
        line_count: usize,
    },
}

/// Invalid configuration; the run never starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown language `{given}` (expected one of: {expected})")]
    UnknownLanguage { given: String, expected: String },

    #[error("unknown style `{given}` (expected one of: {expected})")]
    UnknownStyle { given: String, expected: String },

    #[error(transparent)]
    Unsupported(#[from] FormatError),

    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("invalid glob pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("project directory does not exist: {}", .0.display())]
    MissingProjectDir(PathBuf),

    #[error(transparent)]
    Llm(#[from] AiLlmError),
}
