//! End-to-end workload tests
//!
//! WorkloadService + SubprocessRunner against fake smallfile programs.

mod support;

use serde_yaml::Value;
use smallfile_core::domain::WorkloadOutcome;
use support::{serial, Behavior, FakeSmallfile};

/// Full run: benchmark, post-processing, cleanup
#[tokio::test]
async fn test_workload_success_with_cleanup() {
    let _serial = serial().await;
    let fake = FakeSmallfile::new(Behavior::default());

    let outcome = fake.service().run(&fake.params(true)).await;

    let results = match outcome {
        WorkloadOutcome::Success(results) => results,
        WorkloadOutcome::Error(e) => panic!("workload failed: {}", e.error),
    };

    // echoed parameters and exact aggregate values
    assert_eq!(results.sf_params.top, fake.top_str());
    assert_eq!(results.sf_params.threads, 2);
    assert_eq!(results.sf_results.elapsed, 250.5);
    assert_eq!(results.sf_results.files, 100);
    assert_eq!(results.sf_results.total_threads, 2);
    assert_eq!(results.sf_results.start_time, 1700000000.75);
    assert_eq!(results.sf_results.thread("1").unwrap().elapsed, 250.25);

    // aggregate rows are gone
    let hosts: Vec<_> = results
        .sf_rsptimes
        .iter()
        .map(|s| s.host_thread.as_str())
        .collect();
    assert_eq!(hosts, vec!["fakehost:00", "fakehost:01"]);
    assert_eq!(results.sf_rsptimes[1].pctile90, 0.0005);

    // post-processor got interval and truncated start time
    let args = fake.rsptimes_args().unwrap();
    assert_eq!(
        args,
        vec![
            "--time-interval".to_string(),
            "2".to_string(),
            "--start-time".to_string(),
            "1700000000".to_string(),
            fake.rsptime_dir().to_string_lossy().into_owned(),
        ]
    );

    // cleanup saw the same configuration with only the operation swapped
    let configs = fake.configs();
    assert_eq!(configs.len(), 2);
    assert_eq!(configs[0]["operation"], Value::from("create"));
    assert_eq!(configs[1]["operation"], Value::from("cleanup"));
    for key in ["top", "threads", "files", "file-size"] {
        assert_eq!(configs[0][key], configs[1][key], "key {}", key);
    }

    assert!(fake.scratch_is_empty());
    assert!(!fake.rsptime_dir().exists());
}

#[tokio::test]
async fn test_workload_without_cleanup() {
    let _serial = serial().await;
    let fake = FakeSmallfile::new(Behavior::default());

    let outcome = fake.service().run(&fake.params(false)).await;

    assert!(outcome.is_success());
    assert_eq!(fake.configs().len(), 1);
    assert!(fake.scratch_is_empty());
}

/// Main run exits 1 with "disk full": no post-processing, no cleanup
#[tokio::test]
async fn test_benchmark_failure() {
    let _serial = serial().await;
    let fake = FakeSmallfile::new(Behavior {
        benchmark_fails: Some((1, "disk full")),
        ..Default::default()
    });

    let outcome = fake.service().run(&fake.params(true)).await;

    let error = match outcome {
        WorkloadOutcome::Error(e) => e.error,
        WorkloadOutcome::Success(_) => panic!("benchmark failure must be reported"),
    };
    let program = fake.install.path().join("smallfile_cli.py");
    assert_eq!(
        error,
        format!("{} failed with return code 1:\ndisk full\n", program.display())
    );

    assert_eq!(fake.configs().len(), 1);
    assert!(fake.rsptimes_args().is_none());
    assert!(fake.scratch_is_empty());
}

#[tokio::test]
async fn test_rsptimes_failure() {
    let _serial = serial().await;
    let fake = FakeSmallfile::new(Behavior {
        rsptimes_fails: Some((2, "no response time files")),
        ..Default::default()
    });

    let outcome = fake.service().run(&fake.params(true)).await;

    match outcome {
        WorkloadOutcome::Error(e) => {
            assert!(e.error.contains("smallfile_rsptimes_stats.py"));
            assert!(e.error.contains("return code 2"));
            assert!(e.error.contains("no response time files"));
        }
        WorkloadOutcome::Success(_) => panic!("post-processing failure must be reported"),
    }

    // cleanup never ran; scratch state is still released
    assert_eq!(fake.configs().len(), 1);
    assert!(fake.scratch_is_empty());
    assert!(!fake.rsptime_dir().exists());
}

#[tokio::test]
async fn test_cleanup_failure() {
    let _serial = serial().await;
    let fake = FakeSmallfile::new(Behavior {
        cleanup_fails: Some((4, "cannot remove")),
        ..Default::default()
    });

    let outcome = fake.service().run(&fake.params(true)).await;

    match outcome {
        WorkloadOutcome::Error(e) => {
            assert!(e.error.contains("smallfile_cli.py failed with return code 4"));
            assert!(e.error.contains("cannot remove"));
        }
        WorkloadOutcome::Success(_) => panic!("cleanup failure must be reported"),
    }
    assert_eq!(fake.configs().len(), 2);
    assert!(fake.scratch_is_empty());
}

#[tokio::test]
async fn test_missing_program_is_execution_error() {
    let _serial = serial().await;
    let fake = FakeSmallfile::new(Behavior::default());
    std::fs::remove_file(fake.install.path().join("smallfile_rsptimes_stats.py")).unwrap();

    let outcome = fake.service().run(&fake.params(true)).await;

    match outcome {
        WorkloadOutcome::Error(e) => assert!(e.error.starts_with("Execution error")),
        WorkloadOutcome::Success(_) => panic!("spawn failure must be reported"),
    }
    assert!(fake.scratch_is_empty());
    assert!(!fake.rsptime_dir().exists());
}

#[tokio::test]
async fn test_outcome_document_shape() {
    let _serial = serial().await;
    let fake = FakeSmallfile::new(Behavior::default());

    let outcome = fake.service().run(&fake.params(false)).await;
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["output_id"], "success");
    let data = &json["output_data"];
    assert_eq!(data["sf_results"]["totalhreads"], 2);
    assert_eq!(data["sf_results"]["thread"]["0"]["files"], 50);
    assert_eq!(data["sf_rsptimes"][0]["host_thread"], "fakehost:00");
    assert_eq!(data["sf_params"]["top"], fake.top_str().as_str());
}
