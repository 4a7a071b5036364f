mod cli;
mod presenter;
mod telemetry;

use std::{process::ExitCode, sync::Arc};

use ai_llm_service::LlmService;
use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use docstring_engine::{
    config::{ValidatedConfig, load_config},
    orchestrator::{Engine, RunReport},
    progress::IndicatifProgress,
    registry::Toolchain,
    select::select_files,
    summary::Summarizer,
};
use tracing::{error, info};

use crate::{
    cli::Cli,
    presenter::{TerminalOracle, print_report},
};

/// Configuration, selection or service setup failed before any file was touched.
const EXIT_FATAL: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine; the environment may already be set.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    match run(cli).await {
        Ok(report) => ExitCode::from(report.exit_code() as u8),
        Err(e) => {
            error!(error = %format!("{e:#}"), "run aborted");
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::from(EXIT_FATAL)
        }
    }
}

async fn run(cli: Cli) -> Result<RunReport> {
    let cwd = std::env::current_dir().context("reading current directory")?;
    let mut loaded = load_config(cli.config.as_deref(), &cwd)?;
    cli.merge_into(&mut loaded.config);
    let cfg = loaded.config.validate(&loaded.base_dir)?;

    let files = select_files(&cfg.project_dir, &cfg.files, &cfg.ignore_files, cfg.language)?;
    info!(
        project_dir = %cfg.project_dir.display(),
        files = files.len(),
        language = %cfg.language,
        style = %cfg.style,
        "files selected"
    );

    let toolchain = Toolchain::resolve(cfg.language, cfg.style)?;
    let summarizer = build_summarizer(&cfg)?;
    let check = cfg.options.check;

    let mut engine = Engine::new(toolchain, summarizer, TerminalOracle::stdin(), cfg.options);
    let report = engine.run(&files, &cfg.functions).await;

    print_report(&report, check);
    Ok(report)
}

/// `None` when placeholders are enough (no-summary or check runs).
fn build_summarizer(cfg: &ValidatedConfig) -> Result<Option<Summarizer<LlmService>>> {
    let Some(llm) = cfg.llm.clone() else {
        return Ok(None);
    };
    let service = LlmService::new(llm).context("configuring the summarization service")?;
    Ok(Some(
        Summarizer::new(Arc::new(service), cfg.language)
            .with_timeout(cfg.timeout)
            .with_progress(Arc::new(IndicatifProgress::spinner())),
    ))
}
