use anyhow::Context;
use clap::Parser;
use litmus_tests::catalog;
use litmus_tests::config::toml_config::TomlConfig;
use litmus_tests::core::selection::Selection;
use litmus_tests::core::ConfigProvider;
use litmus_tests::domain::model::describe_condition;
use litmus_tests::utils::error::ErrorSeverity;
use litmus_tests::utils::{logger, validation::Validate};
use litmus_tests::{LitmusEngine, LitmusError, LocalStorage, SuitePipeline};

#[derive(Parser)]
#[command(name = "toml-litmus")]
#[command(about = "Run a litmus suite described by a TOML file")]
struct Args {
    /// Path to TOML suite file
    #[arg(short, long, default_value = "litmus.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the iteration count from config
    #[arg(long)]
    iterations: Option<u64>,

    /// Show which tests would run without running them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("📁 Loading suite from: {}", args.config);

    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load suite file '{}'", args.config))?;

    if let Some(iterations) = args.iterations {
        config.run.iterations = Some(iterations);
        tracing::info!("🔧 Iterations overridden to: {}", iterations);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no test will be executed");
        perform_dry_run(&config)?;
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let strict = config.strict_lkmm();

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = SuitePipeline::new(storage, config);
    let engine = LitmusEngine::new_with_monitoring(pipeline, monitor_enabled);

    let outcome = engine.run().await.and_then(|suite| {
        let failures = suite.failures(strict);
        if failures.is_empty() {
            Ok(suite)
        } else {
            Err(LitmusError::ForbiddenOutcome { tests: failures })
        }
    });

    match outcome {
        Ok(suite) => {
            println!(
                "✅ Suite passed: {} tests ({} divergent)",
                suite.reports.len(),
                suite.summary.divergent
            );
            for artifact in &suite.artifacts {
                println!("📁 {}", artifact);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Suite failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Suite Summary:");
    println!("  Suite: {}", config.suite.name);
    if let Some(description) = &config.suite.description {
        println!("  Description: {}", description);
    }
    println!("  Iterations: {}", config.iterations());
    println!("  Concurrency: {}", config.concurrency());
    println!("  Strict LKMM: {}", config.strict_lkmm());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.formats().join(", "));

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let selection = Selection::from_config(config).context("invalid selection")?;
    let selected: Vec<_> = catalog::all()
        .into_iter()
        .filter(|t| selection.matches(t.as_ref()))
        .collect();

    println!("🔍 {} tests selected:", selected.len());
    for test in &selected {
        println!();
        println!("  {} [{}]", test.name(), test.family());
        println!("    {}", test.description());
        println!("    {}", describe_condition(test.condition()));
        println!("    LKMM: {}  Rust: {}", test.lkmm(), test.rust());
        if let Some(dependency) = test.dependency() {
            println!("    Relies on a {} dependency", dependency);
        }
    }

    let executions = selected.len() as u64 * config.iterations();
    println!();
    println!("✅ Dry run complete: {} executions would run.", executions);

    Ok(())
}
