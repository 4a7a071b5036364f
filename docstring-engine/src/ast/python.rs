//! Python parser.
//!
//! - `function_definition` (sync and `async`) → descriptor; its body is walked
//!   again under the function's scope so nested functions are found
//! - `class_definition` → scope only
//! - decorated definitions scan leading comments above the first decorator
//! - `self` / `cls` are not reported as parameters

use std::path::Path;

use tree_sitter::{Node, Parser};

use crate::{
    ast::{SourceParser, comments::leading_comments, first_error_line, qualify, text},
    errors::ParseError,
    model::{FunctionDescriptor, Language, Parameter},
};

#[derive(Debug, Default, Clone, Copy)]
pub struct PythonParser;

impl SourceParser for PythonParser {
    fn language(&self) -> Language {
        Language::Python
    }

    fn parse_source(
        &self,
        code: &str,
        module: &str,
        path: &Path,
    ) -> Result<Vec<FunctionDescriptor>, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| ParseError::Grammar {
                language: Language::Python,
                reason: e.to_string(),
            })?;
        let tree = parser.parse(code, None).ok_or_else(|| ParseError::NoTree {
            path: path.to_path_buf(),
        })?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(ParseError::Syntax {
                path: path.to_path_buf(),
                line: first_error_line(root),
            });
        }

        let lines: Vec<&str> = code.lines().collect();
        let mut out = Vec::new();

        let mut stack: Vec<(Node, Vec<String>)> = vec![(root, vec![module.to_string()])];
        while let Some((node, scope)) = stack.pop() {
            match node.kind() {
                "function_definition" => {
                    if let Some(d) = describe(node, &scope, code, &lines) {
                        if let Some(body) = node.child_by_field_name("body") {
                            let mut inner = scope.clone();
                            inner.push(d.name.clone());
                            stack.push((body, inner));
                        }
                        out.push(d);
                        continue;
                    }
                }
                "class_definition" => {
                    if let (Some(name), Some(body)) = (
                        node.child_by_field_name("name"),
                        node.child_by_field_name("body"),
                    ) {
                        let mut inner = scope.clone();
                        inner.push(text(code, name).to_string());
                        stack.push((body, inner));
                        continue;
                    }
                }
                _ => {}
            }

            let mut w = node.walk();
            let kids: Vec<Node> = node.children(&mut w).collect();
            for c in kids.into_iter().rev() {
                stack.push((c, scope.clone()));
            }
        }

        Ok(out)
    }
}

fn describe(node: Node, scope: &[String], code: &str, lines: &[&str]) -> Option<FunctionDescriptor> {
    let name = text(code, node.child_by_field_name("name")?).to_string();
    let params = node.child_by_field_name("parameters")?;
    let return_type = node
        .child_by_field_name("return_type")
        .map(|n| text(code, n).to_string());

    let is_async = node.child(0).is_some_and(|c| c.kind() == "async");
    let signature = format!(
        "{}def {}{}{}",
        if is_async { "async " } else { "" },
        name,
        text(code, params),
        return_type
            .as_deref()
            .map(|r| format!(" -> {r}"))
            .unwrap_or_default()
    );

    let body_node = node.child_by_field_name("body");
    let body = body_node.map(|b| text(code, b).to_string()).unwrap_or_default();

    // Comments sit above the decorators, not between them and `def`.
    let scan_from = match node.parent() {
        Some(p) if p.kind() == "decorated_definition" => p.start_position().row,
        _ => node.start_position().row,
    };

    let header_end = header_end_line(node, params);

    Some(FunctionDescriptor {
        qualified_name: qualify(scope, &name),
        name,
        signature,
        body,
        leading_comments: leading_comments(lines, scan_from, "#"),
        start_line: node.start_position().row + 1,
        end_line: node.end_position().row + 1,
        header_end_line: header_end,
        body_start_line: body_node.map_or(header_end + 1, |b| b.start_position().row + 1),
        parameters: parameters(params, code),
        return_type,
        docstring: body_node.and_then(|b| existing_docstring(b, code)),
    })
}

/// 1-based line holding the `:` that closes the header.
fn header_end_line(node: Node, params: Node) -> usize {
    let mut w = node.walk();
    let colon = node.children(&mut w).find(|c| c.kind() == ":");
    colon.unwrap_or(params).end_position().row + 1
}

fn parameters(params: Node, code: &str) -> Vec<Parameter> {
    let mut w = params.walk();
    let kids: Vec<Node> = params.named_children(&mut w).collect();
    kids.into_iter()
        .filter_map(|p| {
            let (name, type_hint) = match p.kind() {
                "identifier" | "list_splat_pattern" | "dictionary_splat_pattern" => {
                    (text(code, p).to_string(), None)
                }
                "default_parameter" => (text(code, p.child_by_field_name("name")?).to_string(), None),
                "typed_parameter" => (
                    text(code, p.named_child(0)?).to_string(),
                    p.child_by_field_name("type").map(|t| text(code, t).to_string()),
                ),
                "typed_default_parameter" => (
                    text(code, p.child_by_field_name("name")?).to_string(),
                    p.child_by_field_name("type").map(|t| text(code, t).to_string()),
                ),
                _ => return None,
            };
            if name == "self" || name == "cls" {
                return None;
            }
            Some(Parameter { name, type_hint })
        })
        .collect()
}

/// First statement of the body when it is a bare string literal.
fn existing_docstring(body: Node, code: &str) -> Option<String> {
    let mut w = body.walk();
    let first = body.named_children(&mut w).find(|c| c.kind() != "comment")?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let expr = first.named_child(0)?;
    (expr.kind() == "string").then(|| text(code, expr).to_string())
}
