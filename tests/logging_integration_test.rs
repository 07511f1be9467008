//! Integration tests for logging functionality
//!
//! A global subscriber can be installed once per process, so everything that
//! needs one lives in a single test.

use filmo_batch::adapters::memory::InMemoryStore;
use filmo_batch::config::LoggingConfig;
use filmo_batch::core::export::CancelHandle;
use filmo_batch::core::job::{JobRunner, RunnerConfig};
use filmo_batch::domain::Film;
use filmo_batch::logging::init_logging;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "./logs");
    assert_eq!(config.local_rotation, "daily");
    assert!(!config.json);
}

#[tokio::test]
async fn test_file_logging_records_run_events() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
        json: false,
    };

    let guard = init_logging("info", &config).unwrap();
    assert!(log_path.is_dir());

    // only one global subscriber per process
    assert!(init_logging("info", &config).is_err());

    let store = Arc::new(InMemoryStore::with_films(vec![Film::new(7, "Matrix", 1999)]));
    let outcome = JobRunner::new(
        store.clone(),
        store,
        RunnerConfig {
            chunk_size: 3,
            export_file: temp_dir.path().join("films.csv"),
            fsync: false,
            dry_run: false,
            run_timeout: None,
        },
    )
    .run(CancelHandle::none())
    .await
    .unwrap();
    assert!(outcome.is_completed());

    drop(guard);

    let contents = std::fs::read_to_string(log_path.join("filmo-batch.log")).unwrap();
    assert!(contents.contains("Starting export run"));
    assert!(contents.contains(&outcome.job.job_id.to_string()));
}
