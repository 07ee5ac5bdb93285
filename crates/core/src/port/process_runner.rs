// Process Runner Port (ADR-002)
// Abstraction for launching the smallfile programs

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A single program launch: executable, arguments and working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: working_dir.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy().into_owned())
    }

    /// Program as it appears in error messages
    pub fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    /// Value following `flag` in the argument list
    pub fn arg_after(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Exit code; a negative value is the signal that terminated the process
    pub exit_code: i32,
    /// stdout followed by stderr; the two streams are not interleaved
    pub output: String,
    pub duration_ms: i64,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Process Runner trait
///
/// Implementations:
/// - SubprocessRunner (infra-system): tokio child process
/// - MockProcessRunner: scripted outcomes for tests
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run the program to completion and capture its output
    ///
    /// A non-zero exit is NOT an error here; classification belongs to the
    /// caller.
    ///
    /// # Errors
    /// - ExecutionError::SpawnFailed if the program cannot be started
    /// - ExecutionError::IoError if waiting on the process fails
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, ExecutionError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// File the mock creates while "running", mimicking smallfile's outputs
    #[derive(Debug, Clone)]
    pub enum MockWrite {
        /// Write to the path given after `flag` (e.g. `--output-json`)
        FlagPath { flag: String, contents: String },
        /// Write `file_name` inside the directory given as last argument
        IntoLastArg { file_name: String, contents: String },
    }

    /// Scripted outcome of one launch
    #[derive(Debug, Clone)]
    pub struct MockStep {
        pub exit_code: i32,
        pub output: String,
        pub writes: Vec<MockWrite>,
    }

    impl MockStep {
        pub fn ok(output: impl Into<String>) -> Self {
            Self {
                exit_code: 0,
                output: output.into(),
                writes: Vec::new(),
            }
        }

        pub fn fail(exit_code: i32, output: impl Into<String>) -> Self {
            Self {
                exit_code,
                output: output.into(),
                writes: Vec::new(),
            }
        }

        pub fn writing_flag_path(mut self, flag: &str, contents: impl Into<String>) -> Self {
            self.writes.push(MockWrite::FlagPath {
                flag: flag.to_string(),
                contents: contents.into(),
            });
            self
        }

        pub fn writing_into_last_arg(
            mut self,
            file_name: &str,
            contents: impl Into<String>,
        ) -> Self {
            self.writes.push(MockWrite::IntoLastArg {
                file_name: file_name.to_string(),
                contents: contents.into(),
            });
            self
        }
    }

    /// Mock Process Runner for testing
    ///
    /// Plays back `steps` in order and records every invocation along with
    /// the contents of its `--yaml-input-file`. Running past the script
    /// fails with `SpawnFailed`.
    pub struct MockProcessRunner {
        steps: Mutex<VecDeque<MockStep>>,
        calls: Mutex<Vec<Invocation>>,
        yaml_inputs: Mutex<Vec<String>>,
    }

    impl MockProcessRunner {
        pub fn new(steps: Vec<MockStep>) -> Self {
            Self {
                steps: Mutex::new(steps.into()),
                calls: Mutex::new(Vec::new()),
                yaml_inputs: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<Invocation> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        /// YAML configurations seen so far, in launch order
        pub fn yaml_inputs(&self) -> Vec<String> {
            self.yaml_inputs.lock().unwrap().clone()
        }

        fn apply(write: &MockWrite, invocation: &Invocation) -> Result<(), ExecutionError> {
            let (path, contents) = match write {
                MockWrite::FlagPath { flag, contents } => {
                    let path = invocation.arg_after(flag).ok_or_else(|| {
                        ExecutionError::IoError(format!("mock: no {} argument", flag))
                    })?;
                    (PathBuf::from(path), contents)
                }
                MockWrite::IntoLastArg {
                    file_name,
                    contents,
                } => {
                    let dir = invocation.args.last().ok_or_else(|| {
                        ExecutionError::IoError("mock: no arguments".to_string())
                    })?;
                    (Path::new(dir).join(file_name), contents)
                }
            };

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ExecutionError::IoError(e.to_string()))?;
            }
            std::fs::write(&path, contents).map_err(|e| ExecutionError::IoError(e.to_string()))
        }
    }

    #[async_trait]
    impl ProcessRunner for MockProcessRunner {
        async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, ExecutionError> {
            self.calls.lock().unwrap().push(invocation.clone());

            if let Some(path) = invocation.arg_after("--yaml-input-file") {
                let yaml = std::fs::read_to_string(path)
                    .map_err(|e| ExecutionError::IoError(format!("mock: {}: {}", path, e)))?;
                self.yaml_inputs.lock().unwrap().push(yaml);
            }

            let step = self.steps.lock().unwrap().pop_front().ok_or_else(|| {
                ExecutionError::SpawnFailed(format!(
                    "mock: unexpected launch of {}",
                    invocation.program_name()
                ))
            })?;

            for write in &step.writes {
                Self::apply(write, invocation)?;
            }

            Ok(ProcessOutput {
                exit_code: step.exit_code,
                output: step.output,
                duration_ms: 1,
            })
        }
    }
}
