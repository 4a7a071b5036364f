/// One declared parameter, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    /// Annotation as written in source (`int`, `List[str]`, `string`).
    pub type_hint: Option<String>,
}

/// Metadata for one function found by a parser.
///
/// Line numbers are 1-based and refer to the file as it was read.
/// `start_line..=end_line` covers the whole definition; `header_end_line`
/// is the line on which the declaration header (up to the body) ends and
/// `body_start_line` the line the body starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDescriptor {
    /// `module.Class.method`, rooted at the file stem.
    pub qualified_name: String,
    pub name: String,
    pub signature: String,
    pub body: String,
    pub leading_comments: Vec<String>,
    pub start_line: usize,
    pub end_line: usize,
    pub header_end_line: usize,
    pub body_start_line: usize,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<String>,
    /// Documentation already attached to the function, if any.
    pub docstring: Option<String>,
}

impl FunctionDescriptor {
    pub fn is_documented(&self) -> bool {
        self.docstring
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }
}
