//! Glob helpers shared by file and function selection.

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::errors::ConfigError;

/// Builds a [`GlobSet`] from patterns, skipping blank ones.
///
/// Returns `Ok(None)` when no usable pattern remains. An invalid pattern is a
/// configuration error rather than being dropped silently.
///
/// # Example
/// ```
/// use docstring_engine::select::globs::build_globset;
///
/// let gs = build_globset(&["**/*_test.py".to_string()]).unwrap().unwrap();
/// assert!(gs.is_match("pkg/util_test.py"));
/// ```
pub fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    let mut added = 0usize;
    for pat in patterns {
        let pat = pat.trim();
        if pat.is_empty() {
            continue;
        }
        let glob = Glob::new(pat).map_err(|e| ConfigError::InvalidPattern {
            pattern: pat.to_string(),
            reason: e.kind().to_string(),
        })?;
        builder.add(glob);
        added += 1;
    }
    if added == 0 {
        return Ok(None);
    }
    builder
        .build()
        .map(Some)
        .map_err(|e| ConfigError::InvalidPattern {
            pattern: patterns.join(", "),
            reason: e.to_string(),
        })
}

/// Replaces OS-specific separators with `/`.
pub fn to_unix_sep<S: AsRef<str>>(s: S) -> String {
    s.as_ref().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_patterns_give_none() {
        assert!(build_globset(&[" ".to_string()]).unwrap().is_none());
        assert!(build_globset(&[]).unwrap().is_none());
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let err = build_globset(&["src/[".to_string()]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }
}
