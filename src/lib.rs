pub mod catalog;
pub mod config;
pub mod core;
pub mod domain;
pub mod lkmm;
pub mod utils;

pub use crate::config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::core::{engine::LitmusEngine, pipeline::SuitePipeline};
pub use crate::domain::model::{Expectation, Family, Outcome, SuiteReport, TestReport, Verdict};
pub use crate::domain::ports::LitmusTest;
pub use crate::utils::error::{LitmusError, Result};
