use crate::domain::model::{
    Condition, Dependency, Expectation, Family, Outcome, SuiteReport, TestReport,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// One litmus test: a small concurrent program plus the question asked
/// about its final state.
pub trait LitmusTest: Send + Sync {
    fn name(&self) -> &str;
    fn family(&self) -> Family;
    fn dependency(&self) -> Option<Dependency> {
        None
    }
    fn description(&self) -> &str;
    /// Verdict of the Linux Kernel Memory Model.
    fn lkmm(&self) -> Expectation;
    /// Verdict of the Rust model for the mapped program.
    fn rust(&self) -> Expectation;
    fn condition(&self) -> Condition;
    /// Runs every thread once, concurrently, and returns the final state.
    fn run_once(&self) -> Result<Outcome>;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn iterations(&self) -> u64;
    fn concurrency(&self) -> usize;
    fn include(&self) -> &[String];
    fn exclude(&self) -> &[String];
    fn families(&self) -> &[String];
    fn output_path(&self) -> &str;
    fn formats(&self) -> &[String];
    fn strict_lkmm(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn select(&self) -> Result<Vec<Arc<dyn LitmusTest>>>;
    async fn execute(&self, tests: Vec<Arc<dyn LitmusTest>>) -> Result<Vec<TestReport>>;
    async fn publish(&self, report: &SuiteReport) -> Result<Vec<String>>;
}
