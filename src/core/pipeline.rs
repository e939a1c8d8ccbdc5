use crate::catalog;
use crate::core::render::render_suite;
use crate::core::runner::run_litmus;
use crate::core::selection::Selection;
use crate::core::{ConfigProvider, LitmusTest, Pipeline, Storage, SuiteReport, TestReport};
use crate::utils::error::{LitmusError, Result};
use std::sync::Arc;
use tokio::sync::Semaphore;

pub const JSON_REPORT: &str = "suite-report.json";
pub const CSV_SUMMARY: &str = "summary.csv";
pub const TEXT_LOG: &str = "litmus.log";

pub struct SuitePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    tests: Vec<Arc<dyn LitmusTest>>,
}

impl<S: Storage, C: ConfigProvider> SuitePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self::with_tests(storage, config, catalog::all())
    }

    /// Runs `tests` instead of the built-in catalog.
    pub fn with_tests(storage: S, config: C, tests: Vec<Arc<dyn LitmusTest>>) -> Self {
        Self {
            storage,
            config,
            tests,
        }
    }

    fn summary_csv(report: &SuiteReport) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "name",
            "family",
            "dependency",
            "lkmm",
            "rust",
            "verdict",
            "iterations",
            "positives",
            "negatives",
            "states",
            "elapsed_ms",
        ])?;

        for r in &report.reports {
            writer.write_record([
                r.name.clone(),
                r.family.to_string(),
                r.dependency.map(|d| d.to_string()).unwrap_or_default(),
                r.lkmm.to_string(),
                r.rust.to_string(),
                r.verdict.to_string(),
                r.iterations.to_string(),
                r.positives.to_string(),
                r.negatives.to_string(),
                r.histogram.len().to_string(),
                format!("{:.3}", r.elapsed_ms),
            ])?;
        }

        writer.into_inner().map_err(|e| LitmusError::IoError(e.into_error()))
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SuitePipeline<S, C> {
    async fn select(&self) -> Result<Vec<Arc<dyn LitmusTest>>> {
        let selection = Selection::from_config(&self.config)?;
        let selected: Vec<Arc<dyn LitmusTest>> = self
            .tests
            .iter()
            .filter(|test| selection.matches(test.as_ref()))
            .cloned()
            .collect();

        if selected.is_empty() {
            return Err(LitmusError::EmptySelection);
        }

        tracing::debug!(
            "Selected {} of {} tests",
            selected.len(),
            self.tests.len()
        );
        Ok(selected)
    }

    async fn execute(&self, tests: Vec<Arc<dyn LitmusTest>>) -> Result<Vec<TestReport>> {
        let iterations = self.config.iterations();
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency().max(1)));
        let mut handles = Vec::with_capacity(tests.len());

        for test in tests {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| LitmusError::ExecutionError {
                    message: e.to_string(),
                })?;

            tracing::debug!("Running {} ({} iterations)", test.name(), iterations);
            let name = test.name().to_string();
            let handle = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                run_litmus(test.as_ref(), iterations)
            });
            handles.push((name, handle));
        }

        // Blocking runs cannot be cancelled; every one is joined before returning.
        let mut reports = Vec::with_capacity(handles.len());
        let mut first_error = None;
        for (name, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(LitmusError::TestFailed {
                    test: name.clone(),
                    message: e.to_string(),
                }),
            };

            match result {
                Ok(report) => reports.push(report),
                Err(e) if first_error.is_none() => {
                    tracing::warn!("{} failed, waiting for the remaining runs: {}", name, e);
                    first_error = Some(e);
                }
                Err(e) => tracing::warn!("{} failed: {}", name, e),
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(reports),
        }
    }

    async fn publish(&self, report: &SuiteReport) -> Result<Vec<String>> {
        let mut artifacts = Vec::new();

        for format in self.config.formats() {
            let written = match format.as_str() {
                "json" => {
                    let data = serde_json::to_vec_pretty(report)?;
                    self.storage.write_file(JSON_REPORT, &data).await?
                }
                "csv" => {
                    let data = Self::summary_csv(report)?;
                    self.storage.write_file(CSV_SUMMARY, &data).await?
                }
                "text" => {
                    let data = render_suite(report);
                    self.storage.write_file(TEXT_LOG, data.as_bytes()).await?
                }
                other => {
                    return Err(LitmusError::InvalidConfigValueError {
                        field: "formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported format".to_string(),
                    })
                }
            };
            tracing::debug!("Wrote {}", written);
            artifacts.push(written);
        }

        Ok(artifacts)
    }
}
