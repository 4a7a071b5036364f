//! Documentation styles.
//!
//! Not every style has a formatter for every language; see
//! [`crate::registry`] for the registered pairs.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::errors::ConfigError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Style {
    Pep,
    Doxygen,
    Numpy,
    Basic,
    Custom,
    Xml,
}

#[derive(Debug)]
pub struct StyleInfo {
    pub style: Style,
    pub name: &'static str,
    pub description: &'static str,
}

pub static STYLES: &[StyleInfo] = &[
    StyleInfo {
        style: Style::Pep,
        name: "PEP",
        description: "PEP 257 docstring with Google-style Args/Returns sections",
    },
    StyleInfo {
        style: Style::Doxygen,
        name: "doxygen",
        description: "Doxygen tags (@brief, @param, @return)",
    },
    StyleInfo {
        style: Style::Numpy,
        name: "numpy",
        description: "NumPy docstring with underlined sections",
    },
    StyleInfo {
        style: Style::Basic,
        name: "basic",
        description: "Plain summary text without tags",
    },
    StyleInfo {
        style: Style::Custom,
        name: "custom",
        description: "User supplied template",
    },
    StyleInfo {
        style: Style::Xml,
        name: "xml",
        description: "C# XML documentation comments (/// <summary>)",
    },
];

impl Style {
    pub fn info(self) -> &'static StyleInfo {
        STYLES
            .iter()
            .find(|s| s.style == self)
            .unwrap_or(&STYLES[0])
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }
}

/// Canonical names as written in the table (`PEP`, `doxygen`, ...).
pub fn canonical_names() -> Vec<&'static str> {
    STYLES.iter().map(|s| s.name).collect()
}

/// Lowercased names, used for case-insensitive lookup.
pub fn lowercase_names() -> Vec<String> {
    STYLES.iter().map(|s| s.name.to_ascii_lowercase()).collect()
}

impl Display for Style {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Style {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        STYLES
            .iter()
            .find(|info| info.name.eq_ignore_ascii_case(wanted))
            .map(|info| info.style)
            .ok_or_else(|| ConfigError::UnknownStyle {
                given: s.to_string(),
                expected: canonical_names().join(", "),
            })
    }
}
