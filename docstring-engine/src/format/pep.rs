//! PEP 257 docstrings with `Args:` / `Returns:` / `Raises:` sections,
//! placed as the first statement of the body.

use std::path::Path;

use crate::{
    errors::FormatError,
    format::{DocFormatter, indent::indentation_at, one_line},
    model::{DocumentationBlock, FunctionDescriptor, Style, SummaryResult},
};

const INDENT_SPACES: usize = 4;
const QUOTES: &str = "\"\"\"";

#[derive(Debug, Default, Clone, Copy)]
pub struct PepFormatter;

impl DocFormatter for PepFormatter {
    fn style(&self) -> Style {
        Style::Pep
    }

    fn format(
        &self,
        d: &FunctionDescriptor,
        s: &SummaryResult,
        path: &Path,
    ) -> Result<DocumentationBlock, FormatError> {
        // `def f(): return 1` has no line to put a docstring on.
        if d.body_start_line <= d.header_end_line {
            return Err(FormatError::InlineBody {
                path: path.to_path_buf(),
                line: d.start_line,
            });
        }
        let indent = indentation_at(path, d.start_line)? + INDENT_SPACES;

        Ok(DocumentationBlock {
            path: path.to_path_buf(),
            qualified_name: d.qualified_name.clone(),
            signature: d.signature.clone(),
            declaration_line: d.start_line,
            // 0-based index of the line right after the header.
            target_line: d.header_end_line,
            indent_spaces: indent,
            lines: render(s),
            existing_doc: d.docstring.clone(),
        })
    }
}

fn render(s: &SummaryResult) -> Vec<String> {
    let mut sections: Vec<Vec<String>> = Vec::new();

    if let Some(remarks) = &s.remarks {
        sections.push(remarks.lines().map(str::to_string).collect());
    }
    if !s.parameters.is_empty() {
        let mut sec = vec!["Args:".to_string()];
        sec.extend(s.parameters.iter().map(|p| {
            format!("    {} ({}): {}", p.name, p.type_or_any(), one_line(&p.desc))
        }));
        sections.push(sec);
    }
    if let Some(ret) = &s.return_description {
        sections.push(vec!["Returns:".to_string(), format!("    {}", one_line(ret))]);
    }
    if !s.exceptions.is_empty() {
        let mut sec = vec!["Raises:".to_string()];
        sec.extend(
            s.exceptions
                .iter()
                .map(|e| format!("    {}: {}", e.type_name.trim(), one_line(&e.desc))),
        );
        sections.push(sec);
    }

    let mut lines = vec![QUOTES.to_string()];
    lines.extend(s.summary.trim().lines().map(str::to_string));
    for sec in sections {
        lines.push(String::new());
        lines.extend(sec);
    }
    lines.push(QUOTES.to_string());

    lines.into_iter().map(|l| l + "\n").collect()
}
