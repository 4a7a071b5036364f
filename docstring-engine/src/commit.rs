//! Applies documentation blocks to a file in one read and one write.
//!
//! Blocks are applied in ascending `target_line` order; each insertion shifts
//! the later ones by the number of lines it added. The new content goes to a
//! temporary file in the same directory which then replaces the original, so
//! a failure leaves the original untouched.

use std::{fs, io::Write, path::Path};

use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use crate::{errors::CommitError, model::DocumentationBlock};

/// Inserts `blocks` into the file at `path`. Returns the number of lines added.
#[instrument(skip_all, fields(path = %path.display(), blocks = blocks.len()))]
pub fn commit(path: &Path, blocks: &[DocumentationBlock]) -> Result<usize, CommitError> {
    if blocks.is_empty() {
        return Ok(0);
    }

    let original = fs::read_to_string(path).map_err(|source| CommitError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let (updated, added) = apply_blocks(path, &original, blocks)?;
    write_atomic(path, &updated)?;

    debug!(added, "file rewritten");
    Ok(added)
}

/// In-memory part of [`commit`]: returns the new content and lines added.
pub fn apply_blocks(
    path: &Path,
    content: &str,
    blocks: &[DocumentationBlock],
) -> Result<(String, usize), CommitError> {
    let eol = if content.contains("\r\n") { "\r\n" } else { "\n" };
    let mut lines: Vec<String> = content.split_inclusive('\n').map(str::to_string).collect();
    let line_count = lines.len();

    let mut ordered: Vec<&DocumentationBlock> = blocks.iter().collect();
    ordered.sort_by_key(|b| b.target_line);

    if let Some(last) = ordered.last() {
        if last.target_line > line_count {
            return Err(CommitError::TargetOutOfRange {
                path: path.to_path_buf(),
                target_line: last.target_line,
                line_count,
            });
        }
    }

    let mut offset = 0usize;
    for block in ordered {
        let at = block.target_line + offset;

        if at == lines.len() {
            if let Some(tail) = lines.last_mut() {
                if !tail.ends_with('\n') {
                    tail.push_str(eol);
                }
            }
        }

        let inserted: Vec<String> = block
            .indented_lines()
            .map(|l| {
                let body = l.strip_suffix('\n').unwrap_or(&l);
                let body = body.strip_suffix('\r').unwrap_or(body);
                format!("{body}{eol}")
            })
            .collect();
        let n = inserted.len();
        lines.splice(at..at, inserted);
        offset += n;
    }

    Ok((lines.concat(), offset))
}

fn write_atomic(path: &Path, content: &str) -> Result<(), CommitError> {
    let write_err = |source| CommitError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let perms = fs::metadata(path).map_err(write_err)?.permissions();

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    fs::set_permissions(tmp.path(), perms).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn block(target_line: usize, indent: usize, lines: &[&str]) -> DocumentationBlock {
        DocumentationBlock {
            path: PathBuf::from("t.py"),
            qualified_name: "t.f".into(),
            signature: "def f()".into(),
            declaration_line: target_line,
            target_line,
            indent_spaces: indent,
            lines: lines.iter().map(|l| format!("{l}\n")).collect(),
            existing_doc: None,
        }
    }

    #[test]
    fn offsets_accumulate_regardless_of_input_order() {
        let src = "a\nb\nc\nd\n";
        let blocks = vec![block(3, 2, &["Y1", "Y2"]), block(1, 0, &["X"])];
        let (out, added) = apply_blocks(Path::new("t"), src, &blocks).unwrap();
        assert_eq!(added, 3);
        assert_eq!(out, "a\nX\nb\nc\n  Y1\n  Y2\nd\n");
    }

    #[test]
    fn original_lines_keep_relative_order() {
        let src: String = (0..20).map(|i| format!("line{i}\n")).collect();
        let blocks = vec![block(0, 0, &["h"]), block(7, 4, &["m1", "m2"]), block(20, 0, &["t"])];
        let (out, added) = apply_blocks(Path::new("t"), &src, &blocks).unwrap();
        let out_lines: Vec<&str> = out.lines().collect();
        assert_eq!(out_lines.len(), 20 + added);
        let kept: Vec<&str> = out_lines.into_iter().filter(|l| l.starts_with("line")).collect();
        let expected: Vec<String> = (0..20).map(|i| format!("line{i}")).collect();
        assert_eq!(kept, expected);
    }

    #[test]
    fn blank_block_lines_get_no_trailing_whitespace() {
        let (out, added) =
            apply_blocks(Path::new("t"), "def f():\n    pass\n", &[block(1, 4, &["a", "", "b"])]).unwrap();
        assert_eq!(added, 3);
        assert_eq!(out, "def f():\n    a\n\n    b\n    pass\n");
    }

    #[test]
    fn crlf_and_missing_final_newline() {
        let (out, _) = apply_blocks(Path::new("t"), "a\r\nb", &[block(2, 0, &["z"])]).unwrap();
        assert_eq!(out, "a\r\nb\r\nz\r\n");
    }

    #[test]
    fn target_past_end_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("t.py");
        fs::write(&p, "a\n").unwrap();
        let err = commit(&p, &[block(5, 0, &["x"])]).unwrap_err();
        assert!(matches!(err, CommitError::TargetOutOfRange { line_count: 1, .. }));
        assert_eq!(fs::read_to_string(&p).unwrap(), "a\n");
    }

    #[test]
    fn commit_rewrites_file_and_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("t.py");
        fs::write(&p, "def f():\n    pass\n").unwrap();
        let added = commit(&p, &[block(1, 4, &["\"\"\"Doc.\"\"\""])]).unwrap();
        assert_eq!(added, 1);
        assert_eq!(
            fs::read_to_string(&p).unwrap(),
            "def f():\n    \"\"\"Doc.\"\"\"\n    pass\n"
        );

        let gone = dir.path().join("gone.py");
        assert!(matches!(
            commit(&gone, &[block(0, 0, &["x"])]),
            Err(CommitError::Read { .. })
        ));
    }
}
