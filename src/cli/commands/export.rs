//! Export command implementation
//!
//! This module implements the `export` command: one job run that appends
//! every unexported film to the export file and marks it exported.

use crate::adapters::database::create_storage;
use crate::cli::{exit_code_for_error, exit_code_for_state};
use crate::config::{load_config, FilmoConfig};
use crate::core::export::{CancelHandle, FailureCause, RunState};
use crate::core::job::{JobRunner, RunOutcome, RunnerConfig};
use clap::Args;
use std::path::PathBuf;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Dry run mode - read and format, but write no lines and no markers.
    /// Missing tables are still created so the eligibility query can run.
    #[arg(long)]
    pub dry_run: bool,

    /// Override the number of films per chunk
    #[arg(long, value_name = "N")]
    pub chunk_size: Option<usize>,

    /// Override the export directory
    #[arg(long, value_name = "DIR")]
    pub base_path: Option<PathBuf>,

    /// Override the run deadline in seconds (0 = none)
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl ExportArgs {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut FilmoConfig) {
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        if let Some(chunk_size) = self.chunk_size {
            tracing::info!(chunk_size, "Overriding chunk size from CLI");
            config.export.chunk_size = chunk_size;
        }

        if let Some(base_path) = &self.base_path {
            tracing::info!(base_path = %base_path.display(), "Overriding export directory from CLI");
            config.export.base_path = base_path.clone();
        }

        if let Some(timeout_secs) = self.timeout_secs {
            tracing::info!(timeout_secs, "Overriding run deadline from CLI");
            config.export.run_timeout_secs = timeout_secs;
        }
    }

    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let dry_run = config.application.dry_run;
        if dry_run {
            tracing::info!("Dry run mode enabled - no data will be written");
            println!("🔍 DRY RUN MODE - No lines or markers will be written");
            println!();
        }

        let storage = match create_storage(&config).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Failed to connect to PostgreSQL");
                eprintln!("Failed to initialize export: {e}");
                return Ok(4);
            }
        };

        // idempotent DDL; a dry run against a fresh database needs film_export
        if let Err(e) = storage.markers.ensure_schema().await {
            tracing::error!(error = %e, "Failed to ensure schema");
            eprintln!("Failed to initialize export: {e}");
            return Ok(4);
        }

        let runner = JobRunner::from_storage(
            &storage,
            RunnerConfig::from_export_config(&config.export, dry_run),
        );

        println!("🚀 Starting export...");
        println!("  Export file: {}", runner.config().export_file.display());
        println!("  Chunk size: {}", runner.config().chunk_size);
        println!();

        let outcome = match runner.run(CancelHandle::from_shutdown(shutdown_signal)).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(exit_code_for_error(&e));
            }
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&outcome.summary)?);
        } else {
            print_outcome(&outcome);
        }

        Ok(exit_code_for_state(&outcome.state))
    }
}

fn print_outcome(outcome: &RunOutcome) {
    let summary = &outcome.summary;

    println!("📊 Export Summary:");
    println!("  Job ID: {}", outcome.job.job_id);
    println!("  Films in catalog: {}", summary.total_records);
    println!("  Eligible: {}", summary.eligible_records);
    println!("  Exported: {}", summary.records_exported);
    println!("  Chunks: {}", summary.chunks_processed());
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    if let Some(failure) = &summary.failure {
        println!("⚠️  Chunk failure:");
        println!("  {failure}");
        if failure.lines_without_marker() > 0 {
            println!(
                "  {} export line(s) were written without a marker; the next run will export them again",
                failure.lines_without_marker()
            );
        }
        println!();
    }

    match outcome.state {
        RunState::Completed => println!("✅ Export completed successfully!"),
        RunState::Failed(FailureCause::Interrupted) => {
            println!("⚠️  Export interrupted at a chunk boundary.");
            println!("   Run the same command again to export the remaining films.");
        }
        RunState::Failed(FailureCause::DeadlineExceeded) => {
            println!("⚠️  Export stopped: run deadline exceeded.");
        }
        _ => println!("❌ Export failed"),
    }
}
