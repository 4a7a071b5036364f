//! Source parsers: syntax tree → ordered [`FunctionDescriptor`]s.
//!
//! One parser per language behind [`SourceParser`]. Traversal is depth-first
//! over an explicit stack of `(node, scope)` pairs so qualified names come out
//! in discovery order without recursion.

pub mod comments;
pub mod csharp;
pub mod filter;
pub mod python;

use std::{fs, path::Path};

use tracing::{debug, instrument};
use tree_sitter::Node;

use crate::{
    errors::ParseError,
    model::{FunctionDescriptor, Language},
};

pub use filter::FunctionFilter;

/// Produces function descriptors from source text.
pub trait SourceParser: Send + Sync {
    fn language(&self) -> Language;

    /// Parses `source`; `module` roots every qualified name, `path` is only
    /// used in error messages.
    fn parse_source(
        &self,
        source: &str,
        module: &str,
        path: &Path,
    ) -> Result<Vec<FunctionDescriptor>, ParseError>;
}

/// Parser for `language`.
pub fn parser_for(language: Language) -> Box<dyn SourceParser> {
    match language {
        Language::Python => Box::new(python::PythonParser),
        Language::CSharp => Box::new(csharp::CSharpParser),
    }
}

/// Reads and parses one file, keeping the functions `filter` selects.
///
/// A syntax error or unreadable file is an `Err`; a valid file with no
/// (selected) functions is `Ok(vec![])`.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn parse_file(
    parser: &dyn SourceParser,
    path: &Path,
    filter: &FunctionFilter,
) -> Result<Vec<FunctionDescriptor>, ParseError> {
    let source = fs::read_to_string(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let module = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut found = parser.parse_source(&source, &module, path)?;
    let total = found.len();
    found.retain(|d| filter.matches(d));
    debug!(total, selected = found.len(), "parsed");
    Ok(found)
}

/* --------------------------- shared helpers --------------------------- */

pub(crate) fn text<'a>(code: &'a str, node: Node) -> &'a str {
    &code[node.byte_range()]
}

/// 1-based line of the first ERROR or MISSING node.
pub(crate) fn first_error_line(root: Node) -> usize {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return node.start_position().row + 1;
        }
        if node.has_error() {
            let mut w = node.walk();
            let kids: Vec<Node> = node.children(&mut w).collect();
            stack.extend(kids.into_iter().rev());
        }
    }
    root.start_position().row + 1
}

pub(crate) fn qualify(scope: &[String], name: &str) -> String {
    if scope.is_empty() || scope.iter().all(|s| s.is_empty()) {
        name.to_string()
    } else {
        format!("{}.{}", scope.join("."), name)
    }
}

/// Collapses whitespace runs (newlines included) into single spaces.
pub(crate) fn squash_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualify_joins_scope() {
        let scope = vec!["mod".to_string(), "Cls".to_string()];
        assert_eq!(qualify(&scope, "run"), "mod.Cls.run");
        assert_eq!(qualify(&[], "run"), "run");
    }

    #[test]
    fn parse_file_distinguishes_errors_from_empty() {
        let dir = tempfile::tempdir().unwrap();
        let parser = parser_for(Language::Python);
        let all = FunctionFilter::match_all();

        let empty = dir.path().join("consts.py");
        std::fs::write(&empty, "X = 1\n").unwrap();
        assert!(parse_file(parser.as_ref(), &empty, &all).unwrap().is_empty());

        let broken = dir.path().join("broken.py");
        std::fs::write(&broken, "x = 1\ndef f(:\n").unwrap();
        match parse_file(parser.as_ref(), &broken, &all) {
            Err(ParseError::Syntax { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected syntax error, got {other:?}"),
        }

        let missing = dir.path().join("missing.py");
        assert!(matches!(
            parse_file(parser.as_ref(), &missing, &all),
            Err(ParseError::Read { .. })
        ));
    }
}
