//! Fake smallfile installation for end-to-end tests
//!
//! The two smallfile programs are replaced by shell scripts that behave like
//! the real ones: the CLI writes its --output-json document and drops files
//! under `<top>/network_shared`, the post-processor writes
//! stats-rsptimes.csv into the directory it is given.

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use smallfile_core::application::{WorkloadConfig, WorkloadService};
use smallfile_core::domain::{Operation, SmallfileParams, WorkloadParams};
use smallfile_infra_system::SubprocessRunner;
use tempfile::TempDir;
use tokio::sync::{Mutex, MutexGuard};

/// Writing a script while another test forks can leave it busy (ETXTBSY);
/// tests in one binary take turns.
static SERIAL: OnceLock<Mutex<()>> = OnceLock::new();

pub async fn serial() -> MutexGuard<'static, ()> {
    SERIAL.get_or_init(|| Mutex::new(())).lock().await
}

pub const RSPTIMES_CSV: &str = "\
host:thread, samples, min, max, mean, %dev, 50%ile, 90%ile, 95%ile, 99%ile,
cluster-all, 200, 0.000090, 0.001250, 0.000313, 53.044480, 0.000258, 0.000526, 0.000593, 0.000913,
per-host-fakehost, 200, 0.000090, 0.001250, 0.000313, 53.044480, 0.000258, 0.000526, 0.000593, 0.000913,
fakehost:00, 100, 0.000093, 0.001235, 0.000316, 56.168823, 0.000286, 0.000519, 0.000576, 0.000996,
fakehost:01, 100, 0.000095, 0.001100, 0.000300, 50.000000, 0.000250, 0.000500, 0.000550, 0.000900,

time-since-start(sec), samples, min, max
time-000000, 200, 0.000090, 0.001250
";

/// How the fake programs behave
#[derive(Debug, Clone, Default)]
pub struct Behavior {
    /// Exit code and message of the benchmark run
    pub benchmark_fails: Option<(i32, &'static str)>,
    pub rsptimes_fails: Option<(i32, &'static str)>,
    pub cleanup_fails: Option<(i32, &'static str)>,
}

pub struct FakeSmallfile {
    pub install: TempDir,
    pub scratch: TempDir,
    pub top: TempDir,
}

impl FakeSmallfile {
    pub fn new(behavior: Behavior) -> Self {
        let fake = Self {
            install: tempfile::tempdir().unwrap(),
            scratch: tempfile::tempdir().unwrap(),
            top: tempfile::tempdir().unwrap(),
        };
        fake.write_script("smallfile_cli.py", &fake.cli_script(&behavior));
        fake.write_script("smallfile_rsptimes_stats.py", &rsptimes_script(&behavior));
        fake
    }

    pub fn top_str(&self) -> String {
        self.top.path().to_string_lossy().into_owned()
    }

    pub fn rsptime_dir(&self) -> PathBuf {
        self.top.path().join("network_shared")
    }

    pub fn service(&self) -> WorkloadService {
        let config = WorkloadConfig {
            scratch_dir: Some(self.scratch.path().to_path_buf()),
            ..WorkloadConfig::with_smallfile_dir(self.install.path())
        };
        WorkloadService::new(Arc::new(SubprocessRunner::new()), config)
    }

    pub fn params(&self, cleanup: bool) -> WorkloadParams {
        let mut sf = SmallfileParams::new(self.top_str(), Operation::Create);
        sf.threads = Some(2);
        sf.files = Some(50);
        sf.file_size = Some(64);
        WorkloadParams {
            samples: 1,
            smallfile_params: sf,
            cleanup,
        }
    }

    /// YAML configurations the fake CLI was started with, in order
    pub fn configs(&self) -> Vec<serde_yaml::Value> {
        let log = self.install.path().join("configs.log");
        let Ok(text) = std::fs::read_to_string(log) else {
            return Vec::new();
        };
        text.split("---\n")
            .filter(|doc| !doc.trim().is_empty())
            .map(|doc| serde_yaml::from_str(doc).unwrap())
            .collect()
    }

    /// Arguments the fake post-processor was started with
    pub fn rsptimes_args(&self) -> Option<Vec<String>> {
        let text = std::fs::read_to_string(self.install.path().join("rsptimes-args.log")).ok()?;
        Some(text.split_whitespace().map(str::to_string).collect())
    }

    pub fn scratch_is_empty(&self) -> bool {
        std::fs::read_dir(self.scratch.path()).unwrap().next().is_none()
    }

    fn write_script(&self, name: &str, body: &str) {
        let path = self.install.path().join(name);
        std::fs::write(&path, body).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn cli_script(&self, behavior: &Behavior) -> String {
        let top = self.top_str();
        let result = result_json(&top);
        format!(
            r#"#!/bin/sh
cfg=""
out=""
while [ $# -gt 0 ]; do
  case "$1" in
    --yaml-input-file) cfg="$2"; shift 2 ;;
    --output-json) out="$2"; shift 2 ;;
    *) shift ;;
  esac
done
cat "$cfg" >> configs.log
echo "---" >> configs.log
if grep -q '^operation: cleanup' "$cfg"; then
  {cleanup}
  echo "cleaned up {top}"
  exit 0
fi
{benchmark}
mkdir -p "{top}/network_shared"
echo "0.001" > "{top}/network_shared/rsptimes_00_fakehost_create.csv"
cat > "$out" <<'JSON'
{result}
JSON
echo "total threads = 2"
"#,
            cleanup = failure_snippet(behavior.cleanup_fails),
            benchmark = failure_snippet(behavior.benchmark_fails),
            top = top,
            result = result,
        )
    }
}

fn rsptimes_script(behavior: &Behavior) -> String {
    format!(
        r#"#!/bin/sh
echo "$@" > rsptimes-args.log
{failure}
for last; do :; done
cat > "$last/stats-rsptimes.csv" <<'CSV'
{csv}CSV
"#,
        failure = failure_snippet(behavior.rsptimes_fails),
        csv = RSPTIMES_CSV,
    )
}

fn failure_snippet(failure: Option<(i32, &str)>) -> String {
    match failure {
        Some((code, message)) => format!("echo \"{}\" >&2; exit {}", message, code),
        None => ":".to_string(),
    }
}

/// --output-json document for a 2-thread create run rooted at `top`
pub fn result_json(top: &str) -> String {
    serde_json::json!({
        "params": {
            "host_set": "localhost",
            "launch_by_daemon": false,
            "version": "3.2",
            "top": top,
            "operation": "create",
            "files_per_thread": 50,
            "threads": 2,
            "file_size": 64,
            "file_size_distr": -1,
            "files_per_dir": 100,
            "share_dir": "N",
            "fname_prefix": "",
            "fname_suffix": "",
            "hash_to_dir": "N",
            "fsync_after_modify": "N",
            "pause_between_files": "0.0",
            "auto_pause": "False",
            "cleanup_delay_usec_per_file": "0",
            "finish_all_requests": "Y",
            "stonewall": "Y",
            "verify_read": "Y",
            "xattr_size": "0",
            "xattr_count": "0",
            "permute_host_dirs": "N",
            "network_sync_dir": format!("{}/network_shared", top),
            "min_directories_per_sec": 50,
            "total_hosts": 1,
            "startup_timeout": 3,
            "host_timeout": 3
        },
        "results": {
            "elapsed": 250.5,
            "files": 100,
            "records": 100,
            "filesPerSec": 0.3992015968063872,
            "IOPS": 0.3992015968063872,
            "MiBps": 0.02495009980039920,
            "totalhreads": 2,
            "totalDataGB": 0.006103515625,
            "pctFilesDone": 100.0,
            "startTime": 1700000000.75,
            "status": "Success",
            "date": "2023-11-14T22:13:20.000Z",
            "thread": {
                "0": {
                    "elapsed": 250.5,
                    "files": 50,
                    "records": 50,
                    "filesPerSec": 0.1996007984031936,
                    "IOPS": 0.1996007984031936,
                    "MiBps": 0.0124750499001996
                },
                "1": {
                    "elapsed": 250.25,
                    "files": 50,
                    "records": 50,
                    "filesPerSec": 0.1998001998001998,
                    "IOPS": 0.1998001998001998,
                    "MiBps": 0.012487512487512488
                }
            }
        }
    })
    .to_string()
}
