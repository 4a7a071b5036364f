//! Terminal side of a run: the approval prompt and the final report.

use std::{
    env, fs,
    io::{self, BufRead, Write},
    process::Command,
};

use anyhow::{Context, Result, bail};
use colored::*;
use docstring_engine::{
    model::DocumentationBlock,
    orchestrator::{ApprovalOracle, Decision, RunReport},
};
use tracing::warn;

const PROMPT: &str = "Accept (a), Edit (e), Skip (s), Quit (q): ";

/// Asks on stdin for every block.
pub struct TerminalOracle<R> {
    input: R,
}

impl TerminalOracle<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl<R: BufRead> TerminalOracle<R> {
    #[cfg(test)]
    fn with_input(input: R) -> Self {
        Self { input }
    }

    fn read_choice(&mut self) -> io::Result<Option<char>> {
        print!("{}", PROMPT.bold());
        io::stdout().flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(line.trim().chars().next().map(|c| c.to_ascii_lowercase()))
    }
}

impl<R: BufRead> ApprovalOracle for TerminalOracle<R> {
    fn review(&mut self, block: &DocumentationBlock) -> Decision {
        show_block(block);
        loop {
            match self.read_choice() {
                Ok(Some('a')) => return Decision::Accept,
                Ok(Some('s')) => return Decision::Skip,
                Ok(Some('q')) | Ok(None) => return Decision::Quit,
                Ok(Some('e')) => match edit_in_editor(&block.lines) {
                    Ok(lines) => return Decision::Edit(lines),
                    Err(e) => {
                        warn!(error = %e, "editing failed");
                        println!("{} {e:#}", "edit failed:".red());
                    }
                },
                Ok(_) => println!("{}", "please answer a, e, s or q".yellow()),
                Err(e) => {
                    warn!(error = %e, "reading the answer failed");
                    return Decision::Quit;
                }
            }
        }
    }
}

fn show_block(block: &DocumentationBlock) {
    println!();
    println!(
        "{} {}:{}",
        "▶".cyan(),
        block.path.display().to_string().bold(),
        block.declaration_line
    );
    println!("  {}", block.signature.bold());
    if let Some(existing) = &block.existing_doc {
        println!("  {}", "existing documentation:".dimmed());
        for line in existing.lines() {
            println!("  {}", line.dimmed());
        }
    }
    println!("  {}", "proposed:".green());
    for line in block.indented_lines() {
        print!("  {}", line.green());
    }
}

fn editor_command() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .ok()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

/// Opens the block in the user's editor and returns the saved text.
fn edit_in_editor(lines: &[String]) -> Result<Vec<String>> {
    let mut tmp = tempfile::Builder::new()
        .prefix("docsmith-")
        .suffix(".txt")
        .tempfile()
        .context("creating temp file")?;
    for line in lines {
        tmp.write_all(line.as_bytes())?;
    }
    tmp.flush()?;

    let editor = editor_command();
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or("nano");
    let status = Command::new(program)
        .args(parts)
        .arg(tmp.path())
        .status()
        .with_context(|| format!("launching `{editor}`"))?;
    if !status.success() {
        bail!("`{editor}` exited with {status}");
    }

    let text = fs::read_to_string(tmp.path()).context("reading edited block")?;
    Ok(text.lines().map(|l| format!("{l}\n")).collect())
}

/// Prints failures, counts and undocumented functions.
pub fn print_report(report: &RunReport, check: bool) {
    println!();
    for f in &report.failures {
        println!("{} {f}", "✗".red());
    }
    for u in &report.undocumented {
        println!("{} {u}", "undocumented".yellow());
    }

    let counts = if check {
        format!(
            "{} files scanned, {} functions, {} undocumented",
            report.files_scanned,
            report.functions_found,
            report.undocumented.len()
        )
    } else {
        format!(
            "{} files scanned, {} functions, {} blocks committed to {} files, {} skipped",
            report.files_scanned,
            report.functions_found,
            report.blocks_committed,
            report.files_modified,
            report.blocks_skipped
        )
    };

    if report.is_success() {
        println!("{} {counts}", "✓".green());
    } else {
        println!(
            "{} {counts}, {} failures",
            "✗".red(),
            report.failures.len()
        );
    }
    if report.quit {
        println!("{}", "stopped by user".yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn block() -> DocumentationBlock {
        DocumentationBlock {
            path: PathBuf::from("m.py"),
            qualified_name: "m.f".into(),
            signature: "def f(x)".into(),
            declaration_line: 1,
            target_line: 1,
            indent_spaces: 4,
            lines: vec!["\"\"\"Doc.\"\"\"\n".into()],
            existing_doc: None,
        }
    }

    #[test]
    fn unknown_answers_re_prompt() {
        let mut oracle = TerminalOracle::with_input(&b"x\n\nS\n"[..]);
        assert_eq!(oracle.review(&block()), Decision::Skip);
    }

    #[test]
    fn end_of_input_quits() {
        let mut oracle = TerminalOracle::with_input(&b""[..]);
        assert_eq!(oracle.review(&block()), Decision::Quit);

        let mut oracle = TerminalOracle::with_input(&b"a\n"[..]);
        assert_eq!(oracle.review(&block()), Decision::Accept);
    }
}
