//! Integration tests for dry-run mode
//!
//! These tests verify that `dry_run` reads and formats the eligible films
//! but writes no export lines and no markers, so a later real run still
//! exports everything.

mod common;

use common::{export_lines, runner_config, seeded_store};
use filmo_batch::cli::commands::export::ExportArgs;
use filmo_batch::config::parse_config;
use filmo_batch::core::export::{CancelHandle, RunState};
use filmo_batch::core::job::{JobRunner, RunnerConfig};

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = seeded_store(5);
    let mut config = runner_config(dir.path(), 2);
    config.dry_run = true;

    let outcome = JobRunner::new(store.clone(), store.clone(), config.clone())
        .run(CancelHandle::none())
        .await
        .unwrap();

    assert_eq!(outcome.state, RunState::Completed);
    assert!(outcome.summary.dry_run);
    assert_eq!(outcome.summary.chunks_processed(), 3);
    assert_eq!(outcome.summary.records_exported, 5);
    assert!(store.markers().is_empty());
    assert!(!config.export_file.exists());
    assert!(!config.export_file.parent().unwrap().exists());
}

#[tokio::test]
async fn test_real_run_after_dry_run_exports_everything() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = seeded_store(4);
    let mut config = runner_config(dir.path(), 3);

    config.dry_run = true;
    JobRunner::new(store.clone(), store.clone(), config.clone())
        .run(CancelHandle::none())
        .await
        .unwrap();

    config.dry_run = false;
    let outcome = JobRunner::new(store.clone(), store.clone(), config.clone())
        .run(CancelHandle::none())
        .await
        .unwrap();

    assert_eq!(outcome.summary.eligible_records, 4);
    assert_eq!(store.markers().len(), 4);
    assert_eq!(export_lines(&config.export_file).len(), 4);
}

#[test]
fn test_dry_run_flag_reaches_runner_config() {
    let mut config = parse_config(
        r#"
[export]
base_path = "/tmp/filmo-dry-run"

[postgresql]
connection_string = "postgresql://filmo:pw@localhost:5432/filmo"
"#,
    )
    .unwrap();
    assert!(!config.application.dry_run);

    let args = ExportArgs {
        dry_run: true,
        ..ExportArgs::default()
    };
    args.apply_overrides(&mut config);

    let runner_config =
        RunnerConfig::from_export_config(&config.export, config.application.dry_run);
    assert!(runner_config.dry_run);
}
