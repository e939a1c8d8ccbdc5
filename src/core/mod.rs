pub mod engine;
pub mod harness;
pub mod pipeline;
pub mod render;
pub mod runner;
pub mod selection;

pub use crate::domain::model::{Outcome, SuiteReport, TestReport, Verdict};
pub use crate::domain::ports::{ConfigProvider, LitmusTest, Pipeline, Storage};
pub use crate::utils::error::Result;
