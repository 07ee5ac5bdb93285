// Domain Layer - Request, output and alias tables

pub mod aliases;
pub mod error;
pub(crate) mod lenient;
pub mod operation;
pub mod output;
pub mod params;

// Re-exports
pub use error::DomainError;
pub use operation::Operation;
pub use output::{
    ResponseTimeSample, SmallfileOutputParams, SmallfileOutputResults, SmallfileOutputThread,
    WorkloadError, WorkloadOutcome, WorkloadResults,
};
pub use params::{SmallfileParams, WorkloadParams};
