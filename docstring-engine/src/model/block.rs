use std::path::PathBuf;

/// A rendered documentation block waiting to be inserted.
///
/// `target_line` is a 0-based index into the lines of the *original* file:
/// the block is inserted before the line currently at that index. Shifts
/// caused by other blocks in the same file are handled by the commit engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentationBlock {
    pub path: PathBuf,
    pub qualified_name: String,
    pub signature: String,
    /// 1-based line of the declaration, for display.
    pub declaration_line: usize,
    pub target_line: usize,
    pub indent_spaces: usize,
    /// Newline-terminated, not yet indented.
    pub lines: Vec<String>,
    pub existing_doc: Option<String>,
}

impl DocumentationBlock {
    /// Lines as they will appear in the file. Blank lines stay empty.
    pub fn indented_lines(&self) -> impl Iterator<Item = String> + '_ {
        let pad = " ".repeat(self.indent_spaces);
        self.lines.iter().map(move |l| {
            if l.trim().is_empty() {
                l.clone()
            } else {
                format!("{pad}{l}")
            }
        })
    }

    /// Replaces the block text, terminating every line with `\n`.
    pub fn replace_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = lines
            .into_iter()
            .map(|l| {
                let mut l: String = l.into();
                if !l.ends_with('\n') {
                    l.push('\n');
                }
                l
            })
            .collect();
    }
}
