//! (language, style) → parser + formatter.
//!
//! Resolved once at startup; an unregistered pair never reaches a file.

use crate::{
    ast::{SourceParser, parser_for},
    errors::FormatError,
    format::{DocFormatter, doxygen::DoxygenFormatter, pep::PepFormatter, xml::XmlFormatter},
    model::{Language, Style},
};

/// Every pair with a formatter.
pub static SUPPORTED: &[(Language, Style)] = &[
    (Language::Python, Style::Pep),
    (Language::CSharp, Style::Xml),
    (Language::CSharp, Style::Doxygen),
];

pub fn formatter_for(language: Language, style: Style) -> Result<Box<dyn DocFormatter>, FormatError> {
    match (language, style) {
        (Language::Python, Style::Pep) => Ok(Box::new(PepFormatter)),
        (Language::CSharp, Style::Xml) => Ok(Box::new(XmlFormatter)),
        (Language::CSharp, Style::Doxygen) => Ok(Box::new(DoxygenFormatter)),
        _ => Err(FormatError::Unsupported { language, style }),
    }
}

/// Parser and formatter for one run.
pub struct Toolchain {
    pub language: Language,
    pub style: Style,
    pub parser: Box<dyn SourceParser>,
    pub formatter: Box<dyn DocFormatter>,
}

impl Toolchain {
    pub fn resolve(language: Language, style: Style) -> Result<Self, FormatError> {
        Ok(Self {
            language,
            style,
            formatter: formatter_for(language, style)?,
            parser: parser_for(language),
        })
    }
}

impl std::fmt::Debug for Toolchain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toolchain")
            .field("language", &self.language)
            .field("style", &self.style)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::style::STYLES;

    #[test]
    fn registered_pairs_resolve_and_others_fail() {
        for &(lang, style) in SUPPORTED {
            let tc = Toolchain::resolve(lang, style).unwrap();
            assert_eq!(tc.formatter.style(), style);
            assert_eq!(tc.parser.language(), lang);
        }
        for lang in [Language::Python, Language::CSharp] {
            for info in STYLES {
                let ok = SUPPORTED.contains(&(lang, info.style));
                assert_eq!(Toolchain::resolve(lang, info.style).is_ok(), ok);
            }
        }
    }

    #[test]
    fn default_styles_are_registered() {
        for lang in [Language::Python, Language::CSharp] {
            assert!(SUPPORTED.contains(&(lang, lang.default_style())));
        }
    }
}
