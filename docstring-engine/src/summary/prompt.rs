//! Prompt text sent to the summarization service.

use crate::model::{ExceptionDoc, FunctionDescriptor, Language, ParamDoc, SummaryResult};

pub const SYSTEM_PROMPT: &str =
    "You are a source code documentation generator that responds only in JSON format.";

/// Builds the user prompt for one function.
pub fn build_prompt(d: &FunctionDescriptor, language: Language) -> String {
    let mut p = String::with_capacity(d.body.len() + 1024);

    p.push_str(&format!("Language: {language}\n"));
    p.push_str(&format!("Function Signature: {}\n", d.signature));
    p.push_str(&format!("Preceding Comments: {}\n", d.leading_comments.join("\n")));
    p.push_str(&format!("Qualified Name: {}\n\n", d.qualified_name));
    p.push_str("Function Body:\n---\n");
    p.push_str(&d.body);
    p.push_str("\n---\n\n");

    p.push_str("Your task:\n");
    p.push_str(
        "- Summarize what the function does. Add remarks or raised exceptions only if they help developers calling it.\n",
    );
    p.push_str(
        "- Describe each parameter in the context of the function, in declaration order. Leave `parameters` empty if there are none.\n",
    );
    p.push_str(
        "- Omit details the code does not support. Do not rely too heavily on function or variable names since they may be misleading.\n",
    );
    p.push_str("- Describe the return value if it has one; otherwise leave `return_description` empty.\n");
    p.push_str(
        "- Do not write an introduction. Respond with only valid JSON that follows this format:\n",
    );
    p.push_str(&expected_json_format());
    p.push('\n');
    p
}

fn expected_json_format() -> String {
    let example = SummaryResult {
        summary: "A summary of what the function does based on its definition.".into(),
        parameters: vec![ParamDoc {
            name: "parameter".into(),
            type_name: Some("type".into()),
            desc: "description of parameter".into(),
        }],
        return_description: Some("A description of the return value if there is one".into()),
        exceptions: vec![ExceptionDoc {
            type_name: "ExceptionType".into(),
            desc: "when it is raised".into(),
        }],
        remarks: Some("Optional notes for callers".into()),
    };
    serde_json::to_string_pretty(&example).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_descriptor_and_schema() {
        let d = FunctionDescriptor {
            qualified_name: "mod.add".into(),
            name: "add".into(),
            signature: "def add(a, b)".into(),
            body: "return a + b".into(),
            leading_comments: vec!["# sums".into()],
            start_line: 2,
            end_line: 3,
            header_end_line: 2,
            body_start_line: 3,
            parameters: vec![],
            return_type: None,
            docstring: None,
        };
        let p = build_prompt(&d, Language::Python);
        assert!(p.contains("Function Signature: def add(a, b)"));
        assert!(p.contains("Preceding Comments: # sums"));
        assert!(p.contains("Qualified Name: mod.add"));
        assert!(p.contains("---\nreturn a + b\n---"));
        assert!(p.contains("\"return_description\""));
        assert!(p.contains("\"type\": \"type\""));
    }
}
