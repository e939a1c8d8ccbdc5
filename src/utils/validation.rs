use crate::domain::model::Family;
use crate::utils::error::{LitmusError, Result};
use regex::Regex;

pub const REPORT_FORMATS: [&str; 3] = ["json", "csv", "text"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LitmusError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(LitmusError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(LitmusError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_formats(field_name: &str, formats: &[String]) -> Result<()> {
    if formats.is_empty() {
        return Err(LitmusError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    for format in formats {
        if !REPORT_FORMATS.contains(&format.as_str()) {
            return Err(LitmusError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    REPORT_FORMATS.join(", ")
                ),
            });
        }
    }

    Ok(())
}

pub fn validate_patterns(field_name: &str, patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|e| LitmusError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: pattern.clone(),
                reason: e.to_string(),
            })
        })
        .collect()
}

pub fn validate_families(field_name: &str, names: &[String]) -> Result<Vec<Family>> {
    names
        .iter()
        .map(|name| {
            name.parse::<Family>()
                .map_err(|_| LitmusError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: name.clone(),
                    reason: format!(
                        "Unknown family. Known families: {}",
                        Family::ALL
                            .iter()
                            .map(|f| f.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                })
        })
        .collect()
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LitmusError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range() {
        assert!(validate_range("iterations", 10u64, 1, 100).is_ok());
        assert!(validate_range("iterations", 0u64, 1, 100).is_err());
        assert!(validate_range("concurrency", 65usize, 1, 64).is_err());
    }

    #[test]
    fn test_validate_formats() {
        let formats = vec!["json".to_string(), "text".to_string()];
        assert!(validate_formats("formats", &formats).is_ok());

        let invalid = vec!["xml".to_string()];
        assert!(validate_formats("formats", &invalid).is_err());
        assert!(matches!(
            validate_formats("formats", &[]),
            Err(LitmusError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_patterns() {
        let ok = vec![r"^MP\+".to_string(), "fencemb".to_string()];
        assert_eq!(validate_patterns("include", &ok).unwrap().len(), 2);

        let bad = vec!["MP+(".to_string()];
        assert!(validate_patterns("include", &bad).is_err());
    }

    #[test]
    fn test_validate_families() {
        let names = vec!["coherence".to_string(), "message-passing".to_string()];
        let families = validate_families("families", &names).unwrap();
        assert_eq!(families, vec![Family::Coherence, Family::MessagePassing]);

        assert!(validate_families("families", &["seqlock".to_string()]).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output_path", "./out").is_ok());
        assert!(validate_path("output_path", "").is_err());
        assert!(validate_path("output_path", "a\0b").is_err());
    }
}
