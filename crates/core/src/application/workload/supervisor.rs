// Process Supervisor - run one smallfile program and classify its exit

use tracing::{debug, info, warn};

use crate::error::{AppError, Result};
use crate::port::{Invocation, ProcessRunner};

/// The three launches of a workload, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Benchmark,
    ResponseTimes,
    Cleanup,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Benchmark => write!(f, "benchmark"),
            Step::ResponseTimes => write!(f, "rsptimes"),
            Step::Cleanup => write!(f, "cleanup"),
        }
    }
}

/// Run `invocation` to completion
///
/// Returns the combined output on exit code 0. Any other exit becomes
/// `AppError::StepFailed` carrying the program, code and output.
pub async fn run_step(
    runner: &dyn ProcessRunner,
    step: Step,
    invocation: &Invocation,
) -> Result<String> {
    info!(
        step = %step,
        program = %invocation.program_name(),
        args = ?invocation.args,
        "Running smallfile step"
    );

    let result = runner.run(invocation).await?;

    debug!(step = %step, output = %result.output, "Captured step output");

    if !result.success() {
        warn!(
            step = %step,
            exit_code = result.exit_code,
            duration_ms = result.duration_ms,
            "Smallfile step failed"
        );
        return Err(AppError::StepFailed {
            program: invocation.program_name(),
            code: result.exit_code,
            output: result.output,
        });
    }

    info!(
        step = %step,
        duration_ms = result.duration_ms,
        "Smallfile step completed"
    );
    Ok(result.output)
}
