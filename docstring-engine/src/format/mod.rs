//! Descriptor + summary → positioned [`DocumentationBlock`].
//!
//! Placement differs per style and is kept that way:
//! - PEP docstrings go *below* the header, one indent level deeper
//! - `///` comment styles go *above* the declaration at its own indent

pub mod doxygen;
pub mod indent;
pub mod pep;
pub mod xml;

use std::path::Path;

use crate::{
    errors::FormatError,
    model::{DocumentationBlock, FunctionDescriptor, Style, SummaryResult},
};

pub trait DocFormatter: Send + Sync {
    fn style(&self) -> Style;

    /// `path` is read to measure the declaration's indentation.
    fn format(
        &self,
        d: &FunctionDescriptor,
        s: &SummaryResult,
        path: &Path,
    ) -> Result<DocumentationBlock, FormatError>;
}

/// Block inserted directly above `d`, at the declaration's own indent.
pub(crate) fn above_declaration(
    d: &FunctionDescriptor,
    path: &Path,
    lines: Vec<String>,
) -> Result<DocumentationBlock, FormatError> {
    let indent = indent::indentation_at(path, d.start_line)?;
    Ok(DocumentationBlock {
        path: path.to_path_buf(),
        qualified_name: d.qualified_name.clone(),
        signature: d.signature.clone(),
        declaration_line: d.start_line,
        // start_line is 1-based, so this is the 0-based index of the declaration.
        target_line: d.start_line.saturating_sub(1),
        indent_spaces: indent,
        lines,
        existing_doc: d.docstring.clone(),
    })
}

/// Folds multi-line text onto one line.
pub(crate) fn one_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
