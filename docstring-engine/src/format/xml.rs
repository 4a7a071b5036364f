//! C# XML documentation comments, placed above the declaration.

use std::path::Path;

use crate::{
    errors::FormatError,
    format::{DocFormatter, above_declaration, one_line},
    model::{DocumentationBlock, FunctionDescriptor, Style, SummaryResult},
};

const COMMENT_START: &str = "/// ";

#[derive(Debug, Default, Clone, Copy)]
pub struct XmlFormatter;

impl DocFormatter for XmlFormatter {
    fn style(&self) -> Style {
        Style::Xml
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
    let mut lines = vec!["<summary>".to_string()];
    lines.extend(s.summary.trim().lines().map(|l| escape(l.trim())));
    lines.push("</summary>".to_string());

    for p in &s.parameters {
        lines.push(format!(
            "<param name=\"{}\">{}</param>",
            p.name,
            escape(&one_line(&p.desc))
        ));
    }
    if let Some(ret) = &s.return_description {
        lines.push(format!("<returns>{}</returns>", escape(&one_line(ret))));
    }
    for e in &s.exceptions {
        lines.push(format!(
            "<exception cref=\"{}\">{}</exception>",
            e.type_name.trim(),
            escape(&one_line(&e.desc))
        ));
    }
    if let Some(r) = &s.remarks {
        lines.push(format!("<remarks>{}</remarks>", escape(&one_line(r))));
    }

    lines
        .into_iter()
        .map(|l| format!("{COMMENT_START}{l}\n"))
        .collect()
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
