// Workload Service - run smallfile for one request and shape its results

pub mod adapter;
pub mod constants;
pub mod normalizer;
pub mod scratch;
pub mod supervisor;

#[cfg(test)]
pub(crate) mod fixtures;

pub use adapter::RunConfiguration;
pub use supervisor::Step;

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::domain::{Operation, WorkloadOutcome, WorkloadParams, WorkloadResults};
use crate::error::{AppError, Result};
use crate::port::{Invocation, ProcessRunner};
use constants::{CLI_PROGRAM, DEFAULT_SMALLFILE_DIR, RSPTIMES_PROGRAM};
use scratch::{ScratchDir, ScratchSpace};
use supervisor::run_step;

/// Where smallfile lives and where scratch files go
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    /// smallfile checkout; also the working directory of every launch
    pub smallfile_dir: PathBuf,
    pub cli_program: String,
    pub rsptimes_program: String,
    /// Parent for temp files; system temp dir when `None`
    pub scratch_dir: Option<PathBuf>,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            smallfile_dir: PathBuf::from(DEFAULT_SMALLFILE_DIR),
            cli_program: CLI_PROGRAM.to_string(),
            rsptimes_program: RSPTIMES_PROGRAM.to_string(),
            scratch_dir: None,
        }
    }
}

impl WorkloadConfig {
    pub fn with_smallfile_dir(smallfile_dir: impl Into<PathBuf>) -> Self {
        Self {
            smallfile_dir: smallfile_dir.into(),
            ..Default::default()
        }
    }

    fn cli_path(&self) -> PathBuf {
        self.smallfile_dir.join(&self.cli_program)
    }

    fn rsptimes_path(&self) -> PathBuf {
        self.smallfile_dir.join(&self.rsptimes_program)
    }

    fn check(&self) -> Result<()> {
        if !self.smallfile_dir.is_dir() {
            return Err(AppError::Config(format!(
                "smallfile directory {} does not exist",
                self.smallfile_dir.display()
            )));
        }
        Ok(())
    }
}

/// Workload Service
///
/// Launch order per request: benchmark, response-time post-processing,
/// then cleanup when enabled. The first failure ends the request.
pub struct WorkloadService {
    runner: Arc<dyn ProcessRunner>,
    config: WorkloadConfig,
}

impl WorkloadService {
    pub fn new(runner: Arc<dyn ProcessRunner>, config: WorkloadConfig) -> Self {
        Self { runner, config }
    }

    pub fn config(&self) -> &WorkloadConfig {
        &self.config
    }

    /// Run the workload; failures come back as `WorkloadOutcome::Error`
    pub async fn run(&self, params: &WorkloadParams) -> WorkloadOutcome {
        match self.execute(params).await {
            Ok(results) => {
                info!(
                    operation = %params.smallfile_params.operation,
                    rsptime_rows = results.sf_rsptimes.len(),
                    "Workload run complete"
                );
                WorkloadOutcome::Success(results)
            }
            Err(e) => {
                error!(error = %e, "Workload failed");
                WorkloadOutcome::Error(e.into())
            }
        }
    }

    async fn execute(&self, params: &WorkloadParams) -> Result<WorkloadResults> {
        params.validate()?;
        self.config.check()?;

        let runner = self.runner.as_ref();
        let scratch = ScratchSpace::new(self.config.scratch_dir.clone());

        info!(
            top = %params.smallfile_params.top,
            operation = %params.smallfile_params.operation,
            samples = params.samples,
            cleanup = params.cleanup,
            "Importing workload parameters"
        );
        if params.samples > 1 {
            warn!(
                samples = params.samples,
                "Each request runs a single sample; repeat the request for more"
            );
        }
        let run_config = RunConfiguration::from_params(&params.smallfile_params)?;
        let config_file = scratch.write_config(&run_config)?;
        let output_file = scratch.output_file()?;

        // smallfile leaves per-thread response times here; gone after the request
        let rsptime_guard = ScratchDir::new(normalizer::rsptime_dir(&params.smallfile_params.top));
        let rsptime_dir = rsptime_guard.path();

        let benchmark = Invocation::new(self.config.cli_path(), &self.config.smallfile_dir)
            .arg("--yaml-input-file")
            .path_arg(&config_file)
            .arg("--output-json")
            .path_arg(&output_file)
            .arg("--response-times")
            .arg("y");
        run_step(runner, Step::Benchmark, &benchmark).await?;

        let document = normalizer::read_result_document(&output_file)?;

        if document.params.top != params.smallfile_params.top {
            debug!(
                requested = %params.smallfile_params.top,
                echoed = %document.params.top,
                "smallfile reported top differently"
            );
        }
        let interval = normalizer::time_interval_secs(document.results.elapsed);
        let start_time = normalizer::start_time_secs(document.results.start_time);

        info!(
            dir = %rsptime_dir.display(),
            interval_secs = interval,
            start_time = start_time,
            "Collecting response times"
        );
        let rsptimes = Invocation::new(self.config.rsptimes_path(), &self.config.smallfile_dir)
            .arg("--time-interval")
            .arg(interval.to_string())
            .arg("--start-time")
            .arg(start_time.to_string())
            .path_arg(rsptime_dir);
        run_step(runner, Step::ResponseTimes, &rsptimes).await?;

        let samples = normalizer::read_rsptimes(rsptime_dir)?;

        if params.cleanup {
            info!("Cleaning up operation files");
            let cleanup_config = run_config.with_operation(Operation::Cleanup);
            let cleanup_file = scratch.write_config(&cleanup_config)?;

            let cleanup = Invocation::new(self.config.cli_path(), &self.config.smallfile_dir)
                .arg("--yaml-input-file")
                .path_arg(&cleanup_file);
            run_step(runner, Step::Cleanup, &cleanup).await?;
        }

        drop(rsptime_guard);

        Ok(WorkloadResults {
            sf_params: document.params,
            sf_results: document.results,
            sf_rsptimes: samples,
        })
    }
}
