//! Drives parse → generate → format → approve → commit over a list of files.
//!
//! Files are handled one at a time and functions in discovery order. Failures
//! are recorded in the [`RunReport`] and never stop sibling work; only a
//! [`Decision::Quit`] ends the run early.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    ast::{FunctionFilter, parse_file},
    commit::commit,
    model::{DocumentationBlock, FunctionDescriptor},
    orchestrator::{
        approval::{ApprovalOracle, Decision},
        report::{RunReport, Stage, Undocumented},
    },
    registry::Toolchain,
    summary::{CompletionBackend, Summarizer, default_summary},
};

/// Switches that change what a run does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Commit every block without asking the oracle.
    pub force_all: bool,
    /// Only report undocumented functions; never generate or write.
    pub check: bool,
    /// Leave functions that already have documentation alone.
    pub skip_existing: bool,
}

enum Flow {
    Continue,
    Quit,
}

pub struct Engine<B, O> {
    toolchain: Toolchain,
    /// `None` means placeholder summaries.
    summarizer: Option<Summarizer<B>>,
    oracle: O,
    options: RunOptions,
}

impl<B: CompletionBackend, O: ApprovalOracle> Engine<B, O> {
    pub fn new(
        toolchain: Toolchain,
        summarizer: Option<Summarizer<B>>,
        oracle: O,
        options: RunOptions,
    ) -> Self {
        Self {
            toolchain,
            summarizer,
            oracle,
            options,
        }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Processes `files` in order, keeping the functions `functions` selects.
    #[instrument(skip_all, fields(files = files.len(), language = %self.toolchain.language, style = %self.toolchain.style))]
    pub async fn run(&mut self, files: &[PathBuf], functions: &FunctionFilter) -> RunReport {
        let mut report = RunReport::default();

        for path in files {
            report.files_scanned += 1;
            if let Flow::Quit = self.process_file(path, functions, &mut report).await {
                report.quit = true;
                info!(path = %path.display(), "run stopped by user");
                break;
            }
        }

        info!(
            files = report.files_scanned,
            functions = report.functions_found,
            committed = report.blocks_committed,
            skipped = report.blocks_skipped,
            failures = report.failures.len(),
            "run finished"
        );
        report
    }

    async fn process_file(
        &mut self,
        path: &Path,
        functions: &FunctionFilter,
        report: &mut RunReport,
    ) -> Flow {
        let descriptors = match parse_file(self.toolchain.parser.as_ref(), path, functions) {
            Ok(d) => d,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "parse failed");
                report.fail(path, None, Stage::Parse, e);
                return Flow::Continue;
            }
        };
        if descriptors.is_empty() {
            debug!(path = %path.display(), "no functions selected");
            return Flow::Continue;
        }
        report.functions_found += descriptors.len();

        if self.options.check {
            report.undocumented.extend(
                descriptors
                    .iter()
                    .filter(|d| !d.is_documented())
                    .map(|d| Undocumented {
                        path: path.to_path_buf(),
                        line: d.start_line,
                        qualified_name: d.qualified_name.clone(),
                    }),
            );
            return Flow::Continue;
        }

        let blocks = self.build_blocks(path, &descriptors, report).await;

        let mut accepted = Vec::with_capacity(blocks.len());
        for mut block in blocks {
            if self.options.force_all {
                accepted.push(block);
                continue;
            }
            loop {
                match self.oracle.review(&block) {
                    Decision::Accept => {
                        accepted.push(block);
                        break;
                    }
                    Decision::Skip => {
                        report.blocks_skipped += 1;
                        break;
                    }
                    Decision::Edit(lines) => block.replace_lines(lines),
                    Decision::Quit => return Flow::Quit,
                }
            }
        }

        if accepted.is_empty() {
            return Flow::Continue;
        }
        match commit(path, &accepted) {
            Ok(added) => {
                report.files_modified += 1;
                report.blocks_committed += accepted.len();
                info!(path = %path.display(), blocks = accepted.len(), added, "committed");
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "commit failed");
                report.fail(path, None, Stage::Commit, e);
            }
        }
        Flow::Continue
    }

    async fn build_blocks(
        &self,
        path: &Path,
        descriptors: &[FunctionDescriptor],
        report: &mut RunReport,
    ) -> Vec<DocumentationBlock> {
        let mut blocks = Vec::with_capacity(descriptors.len());

        for d in descriptors {
            if self.options.skip_existing && d.is_documented() {
                debug!(function = %d.qualified_name, "already documented");
                continue;
            }

            let summary = match &self.summarizer {
                Some(s) => match s.summarize(d).await {
                    Ok(s) => s,
                    Err(e) => {
                        warn!(function = %d.qualified_name, error = %e, "generation failed");
                        report.fail(path, Some(&d.qualified_name), Stage::Generate, e);
                        continue;
                    }
                },
                None => default_summary(d),
            };

            match self.toolchain.formatter.format(d, &summary, path) {
                Ok(b) => blocks.push(b),
                Err(e) => {
                    warn!(function = %d.qualified_name, error = %e, "format failed");
                    report.fail(path, Some(&d.qualified_name), Stage::Format, e);
                }
            }
        }
        blocks
    }
}
