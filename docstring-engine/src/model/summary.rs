use serde::{Deserialize, Deserializer, Serialize};

/// Type rendered when neither the service nor the declaration names one.
pub const ANY_TYPE: &str = "any";

/// Structured description of one function, as returned by the service.
///
/// The JSON shape is
/// `{summary, parameters: [{name, type?, desc}], return_description?, exceptions?: [{type, desc}], remarks?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub parameters: Vec<ParamDoc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_description: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub exceptions: Vec<ExceptionDoc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDoc {
    pub name: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    #[serde(alias = "description", default)]
    pub desc: String,
}

impl ParamDoc {
    /// Type to print, falling back to [`ANY_TYPE`].
    pub fn type_or_any(&self) -> &str {
        self.type_name
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(ANY_TYPE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionDoc {
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(alias = "description", default)]
    pub desc: String,
}

fn null_as_empty<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(de)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_minimal_and_null_fields() {
        let raw = r#"{"summary":"Adds.","parameters":null,"exceptions":null}"#;
        let s: SummaryResult = serde_json::from_str(raw).unwrap();
        assert_eq!(s.summary, "Adds.");
        assert!(s.parameters.is_empty());
        assert!(s.exceptions.is_empty());
        assert_eq!(s.return_description, None);
    }

    #[test]
    fn param_type_falls_back_to_any() {
        let p: ParamDoc = serde_json::from_str(r#"{"name":"a","description":"x"}"#).unwrap();
        assert_eq!(p.type_or_any(), ANY_TYPE);
        assert_eq!(p.desc, "x");
    }
}
