// Subprocess runner implementation
// reason: async-trait, tokio for async process management (ADR-001)
use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, info};

use smallfile_core::port::{ExecutionError, Invocation, ProcessOutput, ProcessRunner};

/// Exit code reported when the platform gives neither a code nor a signal
const UNKNOWN_EXIT_CODE: i32 = -1;

/// Subprocess runner
///
/// Spawns the program with the invocation's working directory, waits for it
/// and captures stdout followed by stderr. The child is killed if the
/// returned future is dropped.
#[derive(Debug, Default, Clone)]
pub struct SubprocessRunner;

impl SubprocessRunner {
    pub fn new() -> Self {
        Self
    }

    /// Map an exit status to a single code; signals become negative
    fn exit_code(status: ExitStatus) -> i32 {
        if let Some(code) = status.code() {
            return code;
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return -signal;
            }
        }

        UNKNOWN_EXIT_CODE
    }

    /// All of stdout, then all of stderr
    fn combine(stdout: &[u8], stderr: &[u8]) -> String {
        let mut output = String::from_utf8_lossy(stdout).into_owned();
        output.push_str(&String::from_utf8_lossy(stderr));
        output
    }
}

#[async_trait]
impl ProcessRunner for SubprocessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, ExecutionError> {
        let started = Instant::now();

        debug!(
            program = %invocation.program_name(),
            args = ?invocation.args,
            working_dir = %invocation.working_dir.display(),
            "Starting subprocess"
        );

        let child = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ExecutionError::SpawnFailed(format!("{}: {}", invocation.program_name(), e))
            })?;

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| ExecutionError::IoError(e.to_string()))?;

        let duration_ms = started.elapsed().as_millis() as i64;
        let exit_code = Self::exit_code(output.status);

        info!(
            program = %invocation.program_name(),
            duration_ms = %duration_ms,
            exit_code = exit_code,
            "Subprocess completed"
        );

        Ok(ProcessOutput {
            exit_code,
            output: Self::combine(&output.stdout, &output.stderr),
            duration_ms,
        })
    }
}
