pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_families, validate_formats, validate_path, validate_patterns, validate_range,
};
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_ITERATIONS: u64 = 10_000;
pub const MAX_ITERATIONS: u64 = 10_000_000;
pub const MAX_CONCURRENCY: usize = 64;

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_range("iterations", config.iterations(), 1, MAX_ITERATIONS)?;
    validate_range("concurrency", config.concurrency(), 1, MAX_CONCURRENCY)?;
    validate_path("output_path", config.output_path())?;
    validate_formats("formats", config.formats())?;
    validate_patterns("include", config.include())?;
    validate_patterns("exclude", config.exclude())?;
    validate_families("families", config.families())?;
    Ok(())
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "litmus")]
#[command(about = "Run Linux-kernel memory-model litmus tests against Rust atomics")]
pub struct CliConfig {
    /// Executions per test
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: u64,

    /// Regular expressions; a test runs if its name matches any of them
    #[arg(long, value_delimiter = ',')]
    pub include: Vec<String>,

    /// Regular expressions; matching tests are skipped
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Test families to run (coherence, message-passing, ...)
    #[arg(long, value_delimiter = ',')]
    pub families: Vec<String>,

    /// Tests running at the same time
    #[arg(long, default_value = "1")]
    pub concurrency: usize,

    #[arg(long, default_value = "./litmus-output")]
    pub output_path: String,

    /// Report formats: json, csv, text
    #[arg(long, value_delimiter = ',', default_value = "json,text")]
    pub formats: Vec<String>,

    /// Treat outcomes the LKMM forbids but Rust allows as failures
    #[arg(long)]
    pub strict_lkmm: bool,

    /// List the selected tests and exit
    #[arg(long)]
    pub list: bool,

    /// Print the LKMM to Rust primitive mapping and exit
    #[arg(long)]
    pub show_mapping: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Log process CPU and memory between phases
    #[arg(long)]
    pub monitor: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn iterations(&self) -> u64 {
        self.iterations
    }

    fn concurrency(&self) -> usize {
        self.concurrency
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
        &self.output_path
    }

    fn formats(&self) -> &[String] {
        &self.formats
    }

    fn strict_lkmm(&self) -> bool {
        self.strict_lkmm
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
