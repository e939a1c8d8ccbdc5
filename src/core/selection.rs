use crate::domain::model::Family;
use crate::domain::ports::{ConfigProvider, LitmusTest};
use crate::utils::error::Result;
use crate::utils::validation::{validate_families, validate_patterns};
use regex::Regex;

/// Which catalog entries a run covers.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
    families: Vec<Family>,
}

impl Selection {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Ok(Self {
            include: validate_patterns("include", config.include())?,
            exclude: validate_patterns("exclude", config.exclude())?,
            families: validate_families("families", config.families())?,
        })
    }

    pub fn matches(&self, test: &dyn LitmusTest) -> bool {
        let name = test.name();
        let included = self.include.is_empty() || self.include.iter().any(|re| re.is_match(name));
        let excluded = self.exclude.iter().any(|re| re.is_match(name));
        let family_ok = self.families.is_empty() || self.families.contains(&test.family());

        included && !excluded && family_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    struct Filters {
        include: Vec<String>,
        exclude: Vec<String>,
        families: Vec<String>,
        formats: Vec<String>,
    }

    impl Filters {
        fn new(include: &[&str], exclude: &[&str], families: &[&str]) -> Self {
            let owned = |v: &[&str]| v.iter().map(|s| s.to_string()).collect();
            Self {
                include: owned(include),
                exclude: owned(exclude),
                families: owned(families),
                formats: vec!["json".to_string()],
            }
        }
    }

    impl ConfigProvider for Filters {
        fn iterations(&self) -> u64 {
            1
        }

        fn concurrency(&self) -> usize {
            1
        }

        fn include(&self) -> &[String] {
            &self.include
        }

        fn exclude(&self) -> &[String] {
            &self.exclude
        }

        fn families(&self) -> &[String] {
            &self.families
        }

        fn output_path(&self) -> &str {
            "unused"
        }

        fn formats(&self) -> &[String] {
            &self.formats
        }

        fn strict_lkmm(&self) -> bool {
            false
        }
    }

    fn selected(filters: &Filters) -> Vec<String> {
        let selection = Selection::from_config(filters).unwrap();
        catalog::all()
            .iter()
            .filter(|t| selection.matches(t.as_ref()))
            .map(|t| t.name().to_string())
            .collect()
    }

    #[test]
    fn test_empty_selection_matches_everything() {
        let names = selected(&Filters::new(&[], &[], &[]));
        assert_eq!(names.len(), catalog::all().len());
    }

    #[test]
    fn test_include_and_exclude_patterns() {
        let names = selected(&Filters::new(&[r"^MP\+"], &["locks", "addr"], &[]));
        assert_eq!(
            names,
            vec![
                "MP+poonceonces",
                "MP+pooncerelease+poacquireonce",
                "MP+fencewmbonceonce+fencermbonceonce",
                "MP+onceassign+derefonce",
            ]
        );
    }

    #[test]
    fn test_family_filter() {
        let names = selected(&Filters::new(&[], &[], &["load-buffering"]));
        assert_eq!(names.len(), 3);
        assert!(names.iter().all(|n| n.starts_with("LB+")));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let filters = Filters::new(&["SB+("], &[], &[]);
        assert!(Selection::from_config(&filters).is_err());
    }
}
