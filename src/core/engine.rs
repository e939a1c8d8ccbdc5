use crate::core::{Pipeline, SuiteReport};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use chrono::Utc;

pub struct LitmusEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> LitmusEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<SuiteReport> {
        let started_at = Utc::now();
        tracing::info!("🧪 Starting litmus run");

        let tests = self.pipeline.select().await?;
        tracing::info!("Selected {} litmus tests", tests.len());
        self.monitor.log_stats("select");

        let reports = self.pipeline.execute(tests).await?;
        self.monitor.log_stats("execute");

        let mut suite = SuiteReport::new(started_at, reports);
        suite.artifacts = self.pipeline.publish(&suite).await?;
        self.monitor.log_stats("publish");

        let s = suite.summary;
        tracing::info!(
            never = s.never,
            sometimes = s.sometimes,
            divergent = s.divergent,
            violation = s.violation,
            "Finished {} tests in {}ms",
            suite.reports.len(),
            (suite.finished_at - suite.started_at).num_milliseconds()
        );
        for artifact in &suite.artifacts {
            tracing::info!("📁 Report written to {}", artifact);
        }
        self.monitor.log_final_stats();

        Ok(suite)
    }
}
