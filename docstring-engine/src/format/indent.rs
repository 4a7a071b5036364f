use std::{fs, path::Path};

use crate::errors::FormatError;

/// Leading space count of 1-based `line` in `source`, or `None` when the
/// line does not exist.
pub fn leading_spaces(source: &str, line: usize) -> Option<usize> {
    let text = source.lines().nth(line.checked_sub(1)?)?;
    Some(text.chars().take_while(|c| *c == ' ').count())
}

/// Reads `path` and measures the indentation of 1-based `line`.
///
/// A missing line is an error: inserting at an unknown indentation would
/// corrupt the file.
pub fn indentation_at(path: &Path, line: usize) -> Result<usize, FormatError> {
    let source = fs::read_to_string(path).map_err(|source| FormatError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    leading_spaces(&source, line).ok_or_else(|| FormatError::IndentNotFound {
        path: path.to_path_buf(),
        line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_spaces_only() {
        let src = "def a():\n    def b():\n\tpass\n";
        assert_eq!(leading_spaces(src, 1), Some(0));
        assert_eq!(leading_spaces(src, 2), Some(4));
        assert_eq!(leading_spaces(src, 3), Some(0));
        assert_eq!(leading_spaces(src, 0), None);
        assert_eq!(leading_spaces(src, 4), None);
    }

    #[test]
    fn missing_line_names_file_and_line() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("m.py");
        std::fs::write(&p, "x = 1\n").unwrap();
        let err = indentation_at(&p, 9).unwrap_err();
        assert!(err.to_string().contains("m.py:9"));
    }
}
