use crate::config::{validate_provider, DEFAULT_ITERATIONS};
use crate::core::ConfigProvider;
use crate::utils::error::{LitmusError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub suite: SuiteConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    pub report: ReportConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    pub iterations: Option<u64>,
    pub concurrency: Option<usize>,
    pub strict_lkmm: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub families: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub output_path: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
}

fn default_formats() -> Vec<String> {
    vec!["json".to_string(), "text".to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| LitmusError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("suite.name", &self.suite.name)?;
        validate_provider(self)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn iterations(&self) -> u64 {
        self.run.iterations.unwrap_or(DEFAULT_ITERATIONS)
    }

    fn concurrency(&self) -> usize {
        self.run.concurrency.unwrap_or(1)
    }

    fn include(&self) -> &[String] {
        &self.selection.include
    }

    fn exclude(&self) -> &[String] {
        &self.selection.exclude
    }

    fn families(&self) -> &[String] {
        &self.selection.families
    }

    fn output_path(&self) -> &str {
        &self.report.output_path
    }

    fn formats(&self) -> &[String] {
        &self.report.formats
    }

    fn strict_lkmm(&self) -> bool {
        self.run.strict_lkmm.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[suite]
name = "mp-only"
description = "Message passing shapes"

[run]
iterations = 500
concurrency = 2

[selection]
include = ['^MP\+']
families = ["message-passing"]

[report]
output_path = "./mp-output"
formats = ["json", "csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.suite.name, "mp-only");
        assert_eq!(config.iterations(), 500);
        assert_eq!(config.concurrency(), 2);
        assert_eq!(config.include(), [r"^MP\+".to_string()]);
        assert_eq!(config.output_path(), "./mp-output");
        assert!(!config.strict_lkmm());
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_for_optional_sections() {
        let toml_content = r#"
[suite]
name = "everything"

[report]
output_path = "./out"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.iterations(), DEFAULT_ITERATIONS);
        assert_eq!(config.concurrency(), 1);
        assert!(config.include().is_empty());
        assert_eq!(config.formats(), ["json".to_string(), "text".to_string()]);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LITMUS_TEST_OUTPUT_DIR", "/tmp/litmus-env");

        let toml_content = r#"
[suite]
name = "env"

[report]
output_path = "${LITMUS_TEST_OUTPUT_DIR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.report.output_path, "/tmp/litmus-env");

        std::env::remove_var("LITMUS_TEST_OUTPUT_DIR");
    }

    #[test]
    fn test_unset_env_var_is_left_verbatim() {
        let toml_content = r#"
[suite]
name = "${LITMUS_TEST_SURELY_UNSET}"

[report]
output_path = "./out"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.suite.name, "${LITMUS_TEST_SURELY_UNSET}");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[suite]
name = "bad"

[run]
iterations = 0

[report]
output_path = "./out"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let blank_name = TomlConfig::from_toml_str(
            r#"
[suite]
name = "  "

[report]
output_path = "./out"
"#,
        )
        .unwrap();
        assert!(blank_name.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[suite\nname = 1").unwrap_err();
        assert!(matches!(err, LitmusError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[suite]
name = "file"

[monitoring]
enabled = true

[report]
output_path = "./out"
formats = ["text"]
"#
        )
        .unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.suite.name, "file");
        assert!(config.monitoring_enabled());
        assert_eq!(config.formats(), ["text".to_string()]);
    }
}
