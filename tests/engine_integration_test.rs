use clap::Parser;
use litmus_tests::core::pipeline::{CSV_SUMMARY, JSON_REPORT, TEXT_LOG};
use litmus_tests::{CliConfig, LitmusEngine, LitmusError, LocalStorage, SuitePipeline, Verdict};
use std::path::Path;
use tempfile::TempDir;

fn cli(output: &str, extra: &[&str]) -> CliConfig {
    let mut argv = vec!["litmus", "--output-path", output];
    argv.extend_from_slice(extra);
    CliConfig::parse_from(argv)
}

#[tokio::test]
async fn test_end_to_end_writes_all_reports() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let config = cli(
        &output_path,
        &[
            "--iterations",
            "200",
            "--families",
            "coherence,store-buffering",
            "--formats",
            "json,csv,text",
            "--concurrency",
            "3",
        ],
    );

    let storage = LocalStorage::new(output_path.clone());
    let pipeline = SuitePipeline::new(storage, config);
    let engine = LitmusEngine::new(pipeline);

    let suite = engine.run().await.unwrap();

    assert_eq!(suite.reports.len(), 7);
    assert!(suite.violations().is_empty());
    assert_eq!(suite.artifacts.len(), 3);
    for name in [JSON_REPORT, CSV_SUMMARY, TEXT_LOG] {
        assert!(Path::new(&output_path).join(name).exists(), "{} missing", name);
    }

    let json: serde_json::Value =
        serde_json::from_slice(&std::fs::read(Path::new(&output_path).join(JSON_REPORT)).unwrap())
            .unwrap();
    assert_eq!(json["reports"].as_array().unwrap().len(), 7);
    assert_eq!(json["reports"][0]["name"], "CoRR+poonceonce+Once");
    assert_eq!(json["reports"][0]["family"], "coherence");
    assert_eq!(json["reports"][0]["iterations"], 200);

    let csv = std::fs::read_to_string(Path::new(&output_path).join(CSV_SUMMARY)).unwrap();
    assert_eq!(csv.lines().count(), 8);

    let log = std::fs::read_to_string(Path::new(&output_path).join(TEXT_LOG)).unwrap();
    assert!(log.contains("Test SB+fencembonceonces Required"));
    assert!(log.contains("Condition exists (0:r0=0 /\\ 1:r0=0)"));
    assert!(log.contains("Summary: 7 tests"));
}

#[tokio::test]
async fn test_end_to_end_with_monitoring() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let config = cli(
        &output_path,
        &["--iterations", "50", "--include", r"^LB\+", "--formats", "text"],
    );

    let pipeline = SuitePipeline::new(LocalStorage::new(output_path.clone()), config);
    let engine = LitmusEngine::new_with_monitoring(pipeline, true);

    let suite = engine.run().await.unwrap();
    assert_eq!(suite.reports.len(), 3);
    assert!(suite
        .reports
        .iter()
        .all(|r| r.verdict != Verdict::Violation));
    assert!(!suite.failures(false).contains(&"LB+fencembonceonce+ctrlonceonce".to_string()));
}

#[tokio::test]
async fn test_empty_selection_fails_before_running() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let config = cli(&output_path, &["--include", "^RCU\\+"]);
    let pipeline = SuitePipeline::new(LocalStorage::new(output_path.clone()), config);
    let engine = LitmusEngine::new(pipeline);

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, LitmusError::EmptySelection));
    assert!(!Path::new(&output_path).join(JSON_REPORT).exists());
}

#[test]
fn test_engine_runs_on_a_plain_runtime() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();
    let config = cli(
        &output_path,
        &["--iterations", "20", "--include", "^CoWW", "--formats", "json"],
    );
    let engine = LitmusEngine::new(SuitePipeline::new(
        LocalStorage::new(output_path.clone()),
        config,
    ));

    let suite = tokio_test::block_on(engine.run()).unwrap();
    assert_eq!(suite.reports[0].name, "CoWW+poonceonce");
    assert_eq!(suite.reports[0].histogram.len(), 1);
    assert_eq!(suite.reports[0].histogram[0].outcome.to_string(), "x=2;");
}
