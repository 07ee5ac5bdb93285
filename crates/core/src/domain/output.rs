// Workload Output Domain Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::lenient;

/// Run parameters as smallfile actually executed them (`params` section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmallfileOutputParams {
    #[serde(deserialize_with = "lenient::text")]
    pub host_set: String,
    #[serde(deserialize_with = "lenient::boolean")]
    pub launch_by_daemon: bool,
    #[serde(deserialize_with = "lenient::text")]
    pub version: String,
    pub top: String,
    pub operation: String,
    #[serde(deserialize_with = "lenient::int")]
    pub files_per_thread: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub threads: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub file_size: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub file_size_distr: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub files_per_dir: i64,
    #[serde(deserialize_with = "lenient::text")]
    pub share_dir: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub fname_prefix: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub fname_suffix: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub hash_to_dir: String,
    #[serde(deserialize_with = "lenient::text")]
    pub fsync_after_modify: String,
    #[serde(deserialize_with = "lenient::float")]
    pub pause_between_files: f64,
    #[serde(deserialize_with = "lenient::boolean")]
    pub auto_pause: bool,
    #[serde(deserialize_with = "lenient::int")]
    pub cleanup_delay_usec_per_file: i64,
    #[serde(deserialize_with = "lenient::text")]
    pub finish_all_requests: String,
    #[serde(deserialize_with = "lenient::text")]
    pub stonewall: String,
    #[serde(deserialize_with = "lenient::text")]
    pub verify_read: String,
    #[serde(deserialize_with = "lenient::int")]
    pub xattr_size: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub xattr_count: i64,
    #[serde(deserialize_with = "lenient::text")]
    pub permute_host_dirs: String,
    pub network_sync_dir: String,
    #[serde(deserialize_with = "lenient::int")]
    pub min_directories_per_sec: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub total_hosts: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub startup_timeout: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub host_timeout: i64,
}

/// Metrics of a single worker thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmallfileOutputThread {
    #[serde(deserialize_with = "lenient::float")]
    pub elapsed: f64,
    #[serde(deserialize_with = "lenient::int")]
    pub files: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub records: i64,
    #[serde(rename = "filesPerSec", deserialize_with = "lenient::float")]
    pub files_per_sec: f64,
    #[serde(rename = "IOPS", deserialize_with = "lenient::float")]
    pub iops: f64,
    #[serde(rename = "MiBps", deserialize_with = "lenient::float")]
    pub mib_per_sec: f64,
}

/// Aggregate metrics (`results` section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmallfileOutputResults {
    #[serde(deserialize_with = "lenient::float")]
    pub elapsed: f64,
    #[serde(deserialize_with = "lenient::int")]
    pub files: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub records: i64,
    #[serde(rename = "filesPerSec", deserialize_with = "lenient::float")]
    pub files_per_sec: f64,
    #[serde(rename = "IOPS", deserialize_with = "lenient::float")]
    pub iops: f64,
    #[serde(rename = "MiBps", deserialize_with = "lenient::float")]
    pub mib_per_sec: f64,
    // smallfile's own spelling
    #[serde(rename = "totalhreads", deserialize_with = "lenient::int")]
    pub total_threads: i64,
    #[serde(rename = "totalDataGB", deserialize_with = "lenient::float")]
    pub total_data_gb: f64,
    #[serde(rename = "pctFilesDone", deserialize_with = "lenient::float")]
    pub pct_files_done: f64,
    #[serde(rename = "startTime", deserialize_with = "lenient::float")]
    pub start_time: f64,
    pub status: String,
    pub date: String,
    /// Keyed by thread index as smallfile writes it ("0", "1", ...)
    pub thread: BTreeMap<String, SmallfileOutputThread>,
}

impl SmallfileOutputResults {
    pub fn thread(&self, index: &str) -> Option<&SmallfileOutputThread> {
        self.thread.get(index)
    }
}

/// One host:thread row of stats-rsptimes.csv
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseTimeSample {
    pub host_thread: String,
    pub samples: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub pctdev: f64,
    pub pctile50: f64,
    pub pctile90: f64,
    pub pctile95: f64,
    pub pctile99: f64,
}

/// Success output of the `workload` step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadResults {
    pub sf_params: SmallfileOutputParams,
    pub sf_results: SmallfileOutputResults,
    pub sf_rsptimes: Vec<ResponseTimeSample>,
}

/// Error output of the `workload` step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadError {
    pub error: String,
}

impl WorkloadError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Tagged result handed back to the workflow engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "output_id", content = "output_data", rename_all = "snake_case")]
pub enum WorkloadOutcome {
    Success(WorkloadResults),
    Error(WorkloadError),
}

impl WorkloadOutcome {
    pub fn output_id(&self) -> &'static str {
        match self {
            WorkloadOutcome::Success(_) => "success",
            WorkloadOutcome::Error(_) => "error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, WorkloadOutcome::Success(_))
    }
}
