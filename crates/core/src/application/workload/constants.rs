// Workload constants (ADR: No magic values)

/// Default smallfile install location inside the plugin container
pub const DEFAULT_SMALLFILE_DIR: &str = "/plugin/smallfile";

/// Main benchmark program
pub const CLI_PROGRAM: &str = "smallfile_cli.py";

/// Response-time post-processing program
pub const RSPTIMES_PROGRAM: &str = "smallfile_rsptimes_stats.py";

/// Subdirectory of `top` where smallfile leaves per-thread response times
pub const RSPTIME_SUBDIR: &str = "network_shared";

/// Statistics file written by the post-processing program
pub const RSPTIME_CSV: &str = "stats-rsptimes.csv";

/// Identity prefixes of summary rows in stats-rsptimes.csv
pub const AGGREGATE_ROW_PREFIXES: [&str; 3] = ["per-", "cluster-", "time-"];

/// Number of time buckets the run is split into for response-time stats
pub const RSPTIME_BUCKETS: f64 = 120.0;

/// Scratch file name prefix
pub const SCRATCH_PREFIX: &str = "smallfile-";
