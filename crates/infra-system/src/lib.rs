// Smallfile Infrastructure - System Adapters
// Implements: ProcessRunner (ADR-002)

pub mod subprocess_runner;

pub use subprocess_runner::SubprocessRunner;
