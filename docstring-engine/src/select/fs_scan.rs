//! Source file enumeration under the project directory.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::{
    errors::ConfigError,
    model::Language,
    select::globs::{build_globset, to_unix_sep},
};

/// Directories never worth descending into.
const HEAVY_DIRS: &[&str] = &[
    ".git",
    "target",
    "node_modules",
    "bin",
    "obj",
    ".venv",
    "venv",
    "__pycache__",
];

/// Lists source files of `language` under `root`, sorted.
///
/// A file is kept when its `/`-separated path relative to `root` matches one
/// of `include`, none of `ignore`, and carries one of the language's
/// extensions.
pub fn select_files(
    root: &Path,
    include: &[String],
    ignore: &[String],
    language: Language,
) -> Result<Vec<PathBuf>, ConfigError> {
    if !root.is_dir() {
        return Err(ConfigError::MissingProjectDir(root.to_path_buf()));
    }

    let include_set = build_globset(include)?;
    let ignore_set = build_globset(ignore)?;

    let mut skipped_ignored = 0usize;
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || keep_entry(e));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!("fs_scan: walk error: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();

        let has_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| language.matches_extension(e));
        if !has_ext {
            continue;
        }

        let rel = to_unix_sep(path.strip_prefix(root).unwrap_or(path).to_string_lossy());

        if include_set.as_ref().is_some_and(|gs| !gs.is_match(&rel)) {
            continue;
        }
        if ignore_set.as_ref().is_some_and(|gs| gs.is_match(&rel)) {
            skipped_ignored += 1;
            debug!("fs_scan: ignore (glob) {rel}");
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    info!(
        root = %root.display(),
        total = files.len(),
        ignored = skipped_ignored,
        "fs_scan: done"
    );
    Ok(files)
}

fn keep_entry(e: &DirEntry) -> bool {
    if !e.file_type().is_dir() {
        return true;
    }
    let name = e.file_name().to_string_lossy();
    !HEAVY_DIRS.contains(&name.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let p = root.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, "x = 1\n").unwrap();
    }

    #[test]
    fn filters_by_glob_extension_and_heavy_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "pkg/b.py");
        touch(root, "pkg/a.py");
        touch(root, "pkg/tests/test_a.py");
        touch(root, "pkg/readme.md");
        touch(root, ".venv/lib/site.py");
        touch(root, "Program.cs");

        let files = select_files(
            root,
            &["**/*".to_string()],
            &["**/tests/**".to_string()],
            Language::Python,
        )
        .unwrap();

        let rel: Vec<String> = files
            .iter()
            .map(|p| to_unix_sep(p.strip_prefix(root).unwrap().to_string_lossy()))
            .collect();
        assert_eq!(rel, vec!["pkg/a.py", "pkg/b.py"]);
    }

    #[test]
    fn missing_root_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = select_files(&dir.path().join("nope"), &[], &[], Language::CSharp).unwrap_err();
        assert!(matches!(err, ConfigError::MissingProjectDir(_)));
    }
}
