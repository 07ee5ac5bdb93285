//! Smallfile Plugin - Main Entry Point
//! Reads one workload request, runs smallfile, prints the tagged outcome.

mod logging;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

use smallfile_core::application::{WorkloadConfig, WorkloadService};
use smallfile_core::domain::{WorkloadOutcome, WorkloadParams};
use smallfile_core::VERSION;
use smallfile_infra_system::SubprocessRunner;

const DEFAULT_SMALLFILE_DIR: &str =
    smallfile_core::application::workload::constants::DEFAULT_SMALLFILE_DIR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "smallfile-plugin")]
#[command(about = "Run the smallfile benchmark for one workload request", long_about = None)]
#[command(version)]
struct Cli {
    /// Request file (YAML or JSON); `-` reads stdin
    #[arg(short, long, default_value = "-")]
    input: String,

    /// smallfile installation directory
    #[arg(long, env = "SMALLFILE_DIR", default_value = DEFAULT_SMALLFILE_DIR)]
    smallfile_dir: PathBuf,

    /// Directory for temporary configuration and result files
    #[arg(long, env = "SMALLFILE_SCRATCH_DIR")]
    scratch_dir: Option<PathBuf>,

    /// Output format of the outcome document
    #[arg(short, long, env = "SMALLFILE_OUTPUT_FORMAT", value_enum, default_value = "yaml")]
    format: OutputFormat,
}

impl Cli {
    fn workload_config(&self) -> WorkloadConfig {
        WorkloadConfig {
            scratch_dir: self.scratch_dir.clone(),
            ..WorkloadConfig::with_smallfile_dir(&self.smallfile_dir)
        }
    }
}

fn read_request(input: &str) -> Result<WorkloadParams> {
    let text = if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read request from stdin")?;
        text
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read request file {}", input))?
    };

    WorkloadParams::from_yaml_str(&text).context("Invalid workload request")
}

fn render(outcome: &WorkloadOutcome, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Yaml => serde_yaml::to_string(outcome)?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(outcome)?;
            json.push('\n');
            json
        }
    };
    Ok(rendered)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // 1. Initialize logging
    logging::init_logging()?;

    let cli = Cli::parse();
    info!("Smallfile plugin v{} starting...", VERSION);

    // 2. Load request
    let params = read_request(&cli.input)?;

    // 3. Setup dependencies (DI wiring)
    let config = cli.workload_config();
    info!(
        smallfile_dir = %config.smallfile_dir.display(),
        scratch_dir = ?config.scratch_dir,
        "Configuration loaded"
    );
    let service = WorkloadService::new(Arc::new(SubprocessRunner::new()), config);

    // 4. Run and report
    let outcome = service.run(&params).await;
    print!("{}", render(&outcome, cli.format)?);

    info!(output_id = outcome.output_id(), "Done");

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
