use std::{
    fmt::{Display, Formatter},
    path::PathBuf,
};

/// Pipeline stage a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parse,
    Generate,
    Format,
    Commit,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Stage::Parse => "parse",
            Stage::Generate => "generate",
            Stage::Format => "format",
            Stage::Commit => "commit",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub path: PathBuf,
    /// `None` for file-level failures.
    pub qualified_name: Option<String>,
    pub stage: Stage,
    pub message: String,
}

impl Display for Failure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.stage, self.path.display())?;
        if let Some(name) = &self.qualified_name {
            write!(f, " ({name})")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// A function without documentation found in check mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Undocumented {
    pub path: PathBuf,
    pub line: usize,
    pub qualified_name: String,
}

impl Display for Undocumented {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} {}", self.path.display(), self.line, self.qualified_name)
    }
}

/// Outcome of one run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub failures: Vec<Failure>,
    pub undocumented: Vec<Undocumented>,
    pub files_scanned: usize,
    pub files_modified: usize,
    pub functions_found: usize,
    pub blocks_committed: usize,
    pub blocks_skipped: usize,
    /// The user quit during approval.
    pub quit: bool,
}

impl RunReport {
    pub(crate) fn fail(
        &mut self,
        path: impl Into<PathBuf>,
        qualified_name: Option<&str>,
        stage: Stage,
        err: impl Display,
    ) {
        self.failures.push(Failure {
            path: path.into(),
            qualified_name: qualified_name.map(str::to_string),
            stage,
            message: err.to_string(),
        });
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.undocumented.is_empty()
    }

    /// 0 on success, 1 when anything was recorded.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }
}
