use std::path::PathBuf;

use clap::Parser;
use docstring_engine::config::DocsmithConfig;

/// Generate and insert docstrings for Python and C# functions.
#[derive(Debug, Parser)]
#[command(name = "docsmith", version, about)]
pub struct Cli {
    /// Config file (default: nearest `.docsmith.yaml` above the current directory).
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Root directory for file selection.
    #[arg(long, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// File globs relative to the project directory.
    #[arg(short, long = "files", value_name = "GLOB", num_args = 1..)]
    pub files: Vec<String>,

    /// Function name globs (bare or qualified).
    #[arg(short = 'n', long = "functions", value_name = "GLOB", num_args = 1..)]
    pub functions: Vec<String>,

    #[arg(long = "ignore-files", value_name = "GLOB", num_args = 1..)]
    pub ignore_files: Vec<String>,

    #[arg(long = "ignore-functions", value_name = "GLOB", num_args = 1..)]
    pub ignore_functions: Vec<String>,

    /// Source language (python, csharp).
    #[arg(short, long)]
    pub language: Option<String>,

    /// Documentation style (PEP, xml, doxygen).
    #[arg(short, long)]
    pub style: Option<String>,

    /// Accept every generated block without asking.
    #[arg(long)]
    pub force_all: bool,

    /// Insert placeholder docstrings without calling the model.
    #[arg(long)]
    pub no_summary: bool,

    /// Report undocumented functions and exit; nothing is written.
    #[arg(long)]
    pub check: bool,

    /// Leave functions that already have documentation alone.
    #[arg(long)]
    pub skip_existing: bool,

    /// Seconds to wait for each summary.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Debug logging for docsmith crates.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Applies flags on top of file values. Booleans can only switch on.
    pub fn merge_into(&self, cfg: &mut DocsmithConfig) {
        if let Some(dir) = &self.project_dir {
            cfg.project_dir = Some(dir.clone());
        }
        replace_if_given(&mut cfg.files, &self.files);
        replace_if_given(&mut cfg.functions, &self.functions);
        replace_if_given(&mut cfg.ignore_files, &self.ignore_files);
        replace_if_given(&mut cfg.ignore_functions, &self.ignore_functions);
        if self.language.is_some() {
            cfg.language = self.language.clone();
        }
        if self.style.is_some() {
            cfg.style = self.style.clone();
        }
        cfg.force_all |= self.force_all;
        cfg.no_summary |= self.no_summary;
        cfg.check |= self.check;
        cfg.skip_existing |= self.skip_existing;
        if self.timeout.is_some() {
            cfg.timeout_secs = self.timeout;
        }
    }
}

fn replace_if_given(target: &mut Vec<String>, given: &[String]) {
    if !given.is_empty() {
        *target = given.to_vec();
    }
}
