use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::{error, info};
use tractlens::config::{load_config, AppConfig};
use tractlens::pipeline::{progress, run_validation, CommandRunner, PipelineDriver, RunReport};

#[derive(Parser, Debug)]
#[command(
    name = "tractlens",
    about = "Tract-level health and economic indicator pipeline",
    version
)]
struct Cli {
    /// Skip the data extraction steps
    #[arg(long)]
    skip_download: bool,

    /// Only run validation checks
    #[arg(long)]
    validate_only: bool,

    /// Path to the pipeline config file
    #[arg(long, default_value = "pipeline.json")]
    config: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config = if Path::new(&cli.config).exists() {
        match load_config(&cli.config) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("Config load error: {}", e);
                return ExitCode::from(1);
            }
        }
    } else {
        info!("No config at {}, using built-in pipeline", cli.config);
        AppConfig::default()
    };

    progress::section("Tract Indicator Pipeline: Health + Economic Integration");

    let start = Instant::now();

    if !check_prerequisites(&config) {
        progress::warn("Some prerequisites are missing, but continuing...");
    }

    let success = if cli.validate_only {
        progress::section("Data Validation");
        run_validation(&config).all_passed()
    } else {
        run_pipeline(&config, cli.skip_download).await
    };

    print_summary(&config, success, start.elapsed());

    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

async fn run_pipeline(config: &AppConfig, skip_download: bool) -> bool {
    let steps = config.steps_to_run(skip_download);
    let driver = PipelineDriver::new(
        CommandRunner,
        Duration::from_secs(config.step_timeout_seconds),
    );

    progress::section("Pipeline Steps");
    let report = driver.run(&steps).await;
    log_failure(&report);

    if report.success() {
        // Validation is informational after a full run; a warning here
        // does not flip the exit status.
        progress::section("Data Validation");
        run_validation(config);
        true
    } else {
        false
    }
}

fn log_failure(report: &RunReport) {
    if let Some(failure) = report.first_failure() {
        error!("{}", failure);
    }
}

/// Verifies the env file and every step script exist before running.
/// Failures are reported but never abort the run.
fn check_prerequisites(config: &AppConfig) -> bool {
    progress::section("Checking Prerequisites");

    let mut all_good = true;

    if config.env_file.exists() {
        progress::ok(format!("{} file found", config.env_file.display()));
    } else {
        progress::warn(format!("{} file not found", config.env_file.display()));
        progress::warn("API keys may not be configured");
        all_good = false;
    }

    for step in &config.steps {
        let script = step.script();
        if Path::new(script).exists() {
            progress::ok(format!("Found: {script}"));
        } else {
            progress::error(format!("Missing: {script}"));
            all_good = false;
        }
    }

    all_good
}

fn print_summary(config: &AppConfig, success: bool, elapsed: Duration) {
    progress::section("Pipeline Summary");

    if success {
        progress::ok("Pipeline completed successfully!");
        progress::ok(format!("Total time: {:.1} seconds", elapsed.as_secs_f64()));
        println!("\nGenerated files:");
        for file in &config.validation_files {
            println!("  - {}", file.display());
        }
    } else {
        progress::error("Pipeline failed!");
        progress::error(format!(
            "Time elapsed: {:.1} seconds",
            elapsed.as_secs_f64()
        ));
        println!("\nTroubleshooting:");
        println!("  1. Check API keys in {}", config.env_file.display());
        println!("  2. Review error messages above");
        println!("  3. Run individual steps manually for debugging");
    }
}
