//! Docstring pipeline for Python and C# sources.
//!
//! - [`ast`] parses files into function descriptors (tree-sitter)
//! - [`summary`] asks a completion service for a structured summary
//! - [`format`] renders a positioned documentation block per style
//! - [`commit`] writes accepted blocks back, one atomic rewrite per file
//! - [`orchestrator`] drives the whole run and collects a report
//!
//! # Example
//! ```no_run
//! use docstring_engine::{
//!     ast::FunctionFilter,
//!     model::{Language, Style},
//!     orchestrator::{AcceptAll, Engine, RunOptions},
//!     registry::Toolchain,
//!     summary::Summarizer,
//! };
//! use ai_llm_service::LlmService;
//!
//! # async fn demo(files: Vec<std::path::PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
//! let toolchain = Toolchain::resolve(Language::Python, Style::Pep)?;
//! let opts = RunOptions { force_all: true, ..RunOptions::default() };
//! // No summarizer: placeholder docstrings only.
//! let mut engine = Engine::<LlmService, _>::new(toolchain, None::<Summarizer<LlmService>>, AcceptAll, opts);
//! let report = engine.run(&files, &FunctionFilter::match_all()).await;
//! assert!(report.is_success());
//! # Ok(()) }
//! ```

pub mod ast;
pub mod commit;
pub mod config;
pub mod errors;
pub mod format;
pub mod model;
pub mod orchestrator;
pub mod progress;
pub mod registry;
pub mod select;
pub mod summary;
