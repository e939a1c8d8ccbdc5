use clap::Parser;
use litmus_tests::core::selection::Selection;
use litmus_tests::utils::error::ErrorSeverity;
use litmus_tests::utils::{logger, validation::Validate};
use litmus_tests::{catalog, lkmm};
use litmus_tests::{CliConfig, LitmusEngine, LitmusError, LocalStorage, SuitePipeline};

fn exit_code(e: &LitmusError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: LitmusError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e));
}

fn list_tests(config: &CliConfig) -> Result<(), LitmusError> {
    let selection = Selection::from_config(config)?;
    for test in catalog::all()
        .iter()
        .filter(|t| selection.matches(t.as_ref()))
    {
        println!(
            "{:<52} {:<16} LKMM {:<9} Rust {}",
            test.name(),
            test.family(),
            test.lkmm(),
            test.rust()
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    if config.show_mapping {
        print!("{}", lkmm::render_mapping());
        return Ok(());
    }

    if let Err(e) = config.validate() {
        fail(e);
    }
    tracing::debug!("CLI config: {:?}", config);

    if config.list {
        if let Err(e) = list_tests(&config) {
            fail(e);
        }
        return Ok(());
    }

    let strict = config.strict_lkmm;
    let monitor_enabled = config.monitor;
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = SuitePipeline::new(storage, config);
    let engine = LitmusEngine::new_with_monitoring(pipeline, monitor_enabled);

    let suite = match engine.run().await {
        Ok(suite) => suite,
        Err(e) => fail(e),
    };

    let s = suite.summary;
    println!(
        "✅ {} tests: {} never, {} sometimes, {} divergent, {} violation",
        suite.reports.len(),
        s.never,
        s.sometimes,
        s.divergent,
        s.violation
    );
    for artifact in &suite.artifacts {
        println!("📁 {}", artifact);
    }

    let divergences = suite.divergences();
    if !strict && !divergences.is_empty() {
        println!(
            "⚠️  Allowed by Rust, forbidden by the LKMM: {}",
            divergences.join(", ")
        );
    }

    let failures = suite.failures(strict);
    if !failures.is_empty() {
        fail(LitmusError::ForbiddenOutcome { tests: failures });
    }

    Ok(())
}
