use globset::GlobSet;

use crate::{errors::ConfigError, model::FunctionDescriptor, select::globs::build_globset};

/// Function name selection.
///
/// A descriptor is selected when its bare or qualified name matches an
/// include pattern and neither matches an exclude pattern. No include
/// patterns means "everything".
#[derive(Debug, Clone, Default)]
pub struct FunctionFilter {
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl FunctionFilter {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, ConfigError> {
        Ok(Self {
            include: build_globset(include)?,
            exclude: build_globset(exclude)?,
        })
    }

    pub fn match_all() -> Self {
        Self::default()
    }

    pub fn matches(&self, d: &FunctionDescriptor) -> bool {
        let hit = |gs: &GlobSet| gs.is_match(&d.name) || gs.is_match(&d.qualified_name);
        self.include.as_ref().is_none_or(hit) && !self.exclude.as_ref().is_some_and(hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(qualified: &str) -> FunctionDescriptor {
        let name = qualified.rsplit('.').next().unwrap_or(qualified).to_string();
        FunctionDescriptor {
            qualified_name: qualified.to_string(),
            name,
            signature: String::new(),
            body: String::new(),
            leading_comments: vec![],
            start_line: 1,
            end_line: 1,
            header_end_line: 1,
            body_start_line: 2,
            parameters: vec![],
            return_type: None,
            docstring: None,
        }
    }

    #[test]
    fn matches_bare_or_qualified_and_honours_excludes() {
        let f = FunctionFilter::new(
            &["get_*".to_string(), "mod.Repo.*".to_string()],
            &["*_internal".to_string()],
        )
        .unwrap();
        assert!(f.matches(&desc("mod.get_user")));
        assert!(f.matches(&desc("mod.Repo.save")));
        assert!(!f.matches(&desc("mod.get_internal")));
        assert!(!f.matches(&desc("mod.delete")));
    }

    #[test]
    fn default_selects_everything() {
        assert!(FunctionFilter::match_all().matches(&desc("a.b.c")));
        let star = FunctionFilter::new(&["*".to_string()], &[]).unwrap();
        assert!(star.matches(&desc("a.b.c")));
    }
}
