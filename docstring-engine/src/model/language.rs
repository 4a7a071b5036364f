//! Supported source languages.
//!
//! The table is immutable and built at compile time; name lists are derived
//! from it on demand.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::errors::ConfigError;
use crate::model::style::Style;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    CSharp,
}

/// Static facts about one language.
#[derive(Debug)]
pub struct LanguageInfo {
    pub language: Language,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub extensions: &'static [&'static str],
    pub default_style: Style,
}

pub static LANGUAGES: &[LanguageInfo] = &[
    LanguageInfo {
        language: Language::Python,
        name: "python",
        aliases: &["py"],
        extensions: &["py", "pyi"],
        default_style: Style::Pep,
    },
    LanguageInfo {
        language: Language::CSharp,
        name: "csharp",
        aliases: &["c#", "cs"],
        extensions: &["cs"],
        default_style: Style::Xml,
    },
];

impl Language {
    pub fn info(self) -> &'static LanguageInfo {
        // The table has one row per variant.
        match self {
            Language::Python => &LANGUAGES[0],
            Language::CSharp => &LANGUAGES[1],
        }
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn extensions(self) -> &'static [&'static str] {
        self.info().extensions
    }

    /// Style used when the configuration does not name one.
    pub fn default_style(self) -> Style {
        self.info().default_style
    }

    /// Case-insensitive extension check (`"PY"` counts as Python).
    pub fn matches_extension(self, ext: &str) -> bool {
        self.extensions().iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// Canonical names, in table order.
pub fn language_names() -> Vec<&'static str> {
    LANGUAGES.iter().map(|l| l.name).collect()
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        LANGUAGES
            .iter()
            .find(|l| l.name == wanted || l.aliases.contains(&wanted.as_str()))
            .map(|l| l.language)
            .ok_or_else(|| ConfigError::UnknownLanguage {
                given: s.to_string(),
                expected: language_names().join(", "),
            })
    }
}
