// Application Layer - Use Cases and Business Logic

pub mod workload;

// Re-exports
pub use workload::{WorkloadConfig, WorkloadService};
