// Test fixtures: smallfile output as written by smallfile 3.2

/// `--output-json` document of a 5-thread create run rooted at `top`
pub fn result_json(top: &str) -> String {
    serde_json::json!({
        "params": {
            "host_set": "localhost",
            "launch_by_daemon": false,
            "version": "3.2",
            "top": top,
            "operation": "create",
            "files_per_thread": 100,
            "threads": 5,
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
            "elapsed": 0.04768657684326172,
            "files": 492,
            "records": 492,
            "filesPerSec": 10865.623614104166,
            "IOPS": 10865.623614104166,
            "MiBps": 679.1014758815104,
            "totalhreads": 5,
            "totalDataGB": 0.030029296875,
            "pctFilesDone": 98.4,
            "startTime": 1660215714.4111445,
            "status": "Success",
            "date": "2022-08-11T11:01:54.000Z",
            "thread": {
                "0": {
                    "elapsed": 0.04768657684326172,
                    "files": 98,
                    "records": 98,
                    "filesPerSec": 2055.0856548607085,
                    "IOPS": 2055.0856548607085,
                    "MiBps": 128.44285342879428
                }
            }
        }
    })
    .to_string()
}

/// stats-rsptimes.csv with two host:thread rows between summary rows
pub const RSPTIMES_CSV: &str = "\
host:thread, samples, min, max, mean, %dev, 50%ile, 90%ile, 95%ile, 99%ile,
cluster-all, 500, 0.000090, 0.001250, 0.000313, 53.044480, 0.000258, 0.000526, 0.000593, 0.000913,
per-host-d1bb2508b4ca, 500, 0.000090, 0.001250, 0.000313, 53.044480, 0.000258, 0.000526, 0.000593, 0.000913,
d1bb2508b4ca:00, 100, 0.000093, 0.001235, 0.000316, 56.168823, 0.000286, 0.000519, 0.000576, 0.000996,
d1bb2508b4ca:01, 100, 0.000095, 0.001100, 0.000300, 50.000000, 0.000250, 0.000500, 0.000550, 0.000900,

time-since-start(sec), samples, min, max
time-000000, 500, 0.000090, 0.001250
";
