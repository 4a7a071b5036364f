//! C# parser.
//!
//! Functions: methods, constructors and local functions. Scopes: namespaces
//! (block and file-scoped), classes, structs, interfaces and records.
//! Existing documentation is the `///` part of the leading comments.

use std::path::Path;

use tree_sitter::{Node, Parser};
use tree_sitter_c_sharp as ts_c_sharp;

use crate::{
    ast::{SourceParser, comments::leading_comments, first_error_line, qualify, squash_ws, text},
    errors::ParseError,
    model::{FunctionDescriptor, Language, Parameter},
};

const FUNCTION_KINDS: &[&str] = &[
    "method_declaration",
    "constructor_declaration",
    "local_function_statement",
];

const SCOPE_KINDS: &[&str] = &[
    "namespace_declaration",
    "file_scoped_namespace_declaration",
    "class_declaration",
    "struct_declaration",
    "interface_declaration",
    "record_declaration",
];

#[derive(Debug, Default, Clone, Copy)]
pub struct CSharpParser;

impl SourceParser for CSharpParser {
    fn language(&self) -> Language {
        Language::CSharp
    }

    fn parse_source(
        &self,
        code: &str,
        module: &str,
        path: &Path,
    ) -> Result<Vec<FunctionDescriptor>, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&ts_c_sharp::LANGUAGE.into())
            .map_err(|e| ParseError::Grammar {
                language: Language::CSharp,
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
            let kind = node.kind();
            let mut child_scope = scope.clone();

            if FUNCTION_KINDS.contains(&kind) {
                if let Some(d) = describe(node, &scope, code, &lines) {
                    child_scope.push(d.name.clone());
                    out.push(d);
                }
            } else if SCOPE_KINDS.contains(&kind) {
                if let Some(name) = node.child_by_field_name("name") {
                    child_scope.push(text(code, name).to_string());
                }
            }

            push_children(&mut stack, node, child_scope, code);
        }

        Ok(out)
    }
}

/// Pushes children so they pop in source order.
///
/// Older grammars leave the members of a file-scoped namespace as siblings
/// that follow it, so those siblings inherit the namespace scope.
fn push_children<'t>(
    stack: &mut Vec<(Node<'t>, Vec<String>)>,
    node: Node<'t>,
    scope: Vec<String>,
    code: &str,
) {
    let mut w = node.walk();
    let kids: Vec<Node> = node.children(&mut w).collect();

    let mut current = scope;
    let mut ordered = Vec::with_capacity(kids.len());
    for c in kids {
        ordered.push((c, current.clone()));
        if c.kind() == "file_scoped_namespace_declaration" {
            if let Some(name) = c.child_by_field_name("name") {
                current.push(text(code, name).to_string());
            }
        }
    }
    stack.extend(ordered.into_iter().rev());
}

fn describe(node: Node, scope: &[String], code: &str, lines: &[&str]) -> Option<FunctionDescriptor> {
    let name = text(code, node.child_by_field_name("name")?).to_string();
    let params = node.child_by_field_name("parameters")?;

    let return_type = node
        .child_by_field_name("returns")
        .or_else(|| node.child_by_field_name("type"))
        .map(|n| text(code, n).to_string());

    // Signature starts after any attributes and runs to the closing `)`.
    let mut w = node.walk();
    let head = node
        .children(&mut w)
        .find(|c| c.kind() != "attribute_list" && c.kind() != "comment")?;
    let signature = squash_ws(&code[head.start_byte()..params.end_byte()]);

    let body_node = node.child_by_field_name("body").or_else(|| {
        let mut w = node.walk();
        node.children(&mut w)
            .find(|c| c.kind() == "arrow_expression_clause")
    });
    let body = body_node
        .map(|b| text(code, b).to_string())
        .unwrap_or_default();
    let header_end = params.end_position().row + 1;

    let leading = leading_comments(lines, node.start_position().row, "//");
    let doc_lines: Vec<&str> = leading
        .iter()
        .filter(|l| l.starts_with("///"))
        .map(String::as_str)
        .collect();
    let docstring = (!doc_lines.is_empty()).then(|| doc_lines.join("\n"));

    Some(FunctionDescriptor {
        qualified_name: qualify(scope, &name),
        name,
        signature,
        body,
        leading_comments: leading,
        start_line: node.start_position().row + 1,
        end_line: node.end_position().row + 1,
        header_end_line: header_end,
        body_start_line: body_node.map_or(header_end + 1, |b| b.start_position().row + 1),
        parameters: parameters(params, code),
        return_type,
        docstring,
    })
}

fn parameters(params: Node, code: &str) -> Vec<Parameter> {
    let mut w = params.walk();
    let kids: Vec<Node> = params.named_children(&mut w).collect();
    kids.into_iter()
        .filter(|p| p.kind() == "parameter")
        .filter_map(|p| {
            Some(Parameter {
                name: text(code, p.child_by_field_name("name")?).to_string(),
                type_hint: p
                    .child_by_field_name("type")
                    .map(|t| squash_ws(text(code, t))),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"using System;

namespace Shop.Billing
{
    public class Invoice
    {
        // computes the total
        /// <summary>Total.</summary>
        [Obsolete]
        public decimal Total(int count, decimal price)
        {
            int Twice(int x) => x * 2;
            return Twice(count) * price;
        }

        public Invoice(string id)
        {
        }
    }
}
"#;

    fn parse(code: &str) -> Vec<FunctionDescriptor> {
        CSharpParser
            .parse_source(code, "Invoice", Path::new("Invoice.cs"))
            .unwrap()
    }

    #[test]
    fn walks_namespaces_classes_and_local_functions() {
        let out = parse(SOURCE);
        let names: Vec<&str> = out.iter().map(|d| d.qualified_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Invoice.Shop.Billing.Invoice.Total",
                "Invoice.Shop.Billing.Invoice.Total.Twice",
                "Invoice.Shop.Billing.Invoice.Invoice",
            ]
        );
    }

    #[test]
    fn method_details() {
        let out = parse(SOURCE);
        let total = &out[0];
        assert_eq!(total.signature, "public decimal Total(int count, decimal price)");
        assert_eq!(total.start_line, 9);
        assert_eq!(total.return_type.as_deref(), Some("decimal"));
        assert_eq!(
            total.leading_comments,
            vec!["// computes the total", "/// <summary>Total.</summary>"]
        );
        assert_eq!(total.docstring.as_deref(), Some("/// <summary>Total.</summary>"));
        let params: Vec<(&str, Option<&str>)> = total
            .parameters
            .iter()
            .map(|p| (p.name.as_str(), p.type_hint.as_deref()))
            .collect();
        assert_eq!(params, vec![("count", Some("int")), ("price", Some("decimal"))]);

        let ctor = &out[2];
        assert!(ctor.docstring.is_none());
        assert_eq!(ctor.signature, "public Invoice(string id)");
    }

    #[test]
    fn file_scoped_namespace_prefixes_members() {
        let code = "namespace App.Core;\n\npublic static class Util\n{\n    public static int Id(int v) => v;\n}\n";
        let out = parse(code);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].qualified_name, "Invoice.App.Core.Util.Id");
        assert_eq!(out[0].body, "=> v");
    }

    #[test]
    fn broken_source_is_a_syntax_error() {
        let err = CSharpParser
            .parse_source("class A {\n  void F( {\n}\n", "A", Path::new("A.cs"))
            .unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }
}
