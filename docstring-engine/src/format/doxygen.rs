//! Doxygen `///` tags for C#, placed above the declaration.

use std::path::Path;

use crate::{
    errors::FormatError,
    format::{DocFormatter, above_declaration, one_line},
    model::{DocumentationBlock, FunctionDescriptor, Style, SummaryResult},
};

#[derive(Debug, Default, Clone, Copy)]
pub struct DoxygenFormatter;

impl DocFormatter for DoxygenFormatter {
    fn style(&self) -> Style {
        Style::Doxygen
    }

    fn format(
        &self,
        d: &FunctionDescriptor,
        s: &SummaryResult,
        path: &Path,
    ) -> Result<DocumentationBlock, FormatError> {
        above_declaration(d, path, render(s))
    }
}

fn render(s: &SummaryResult) -> Vec<String> {
    let mut lines = vec![format!("@brief {}", one_line(&s.summary))];
    lines.extend(
        s.parameters
            .iter()
            .map(|p| format!("@param {} {}", p.name, one_line(&p.desc))),
    );
    if let Some(ret) = &s.return_description {
        lines.push(format!("@return {}", one_line(ret)));
    }
    lines.extend(
        s.exceptions
            .iter()
            .map(|e| format!("@throws {} {}", e.type_name.trim(), one_line(&e.desc))),
    );
    if let Some(r) = &s.remarks {
        lines.push(format!("@remark {}", one_line(r)));
    }
    lines.into_iter().map(|l| format!("/// {l}\n")).collect()
}
