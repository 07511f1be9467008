//! Core export pipeline for filmo-batch.
//!
//! # Modules
//!
//! - [`export`] - Snapshot reader, chunk orchestration, fan-out and reporting
//! - [`sink`] - File and marker sinks
//! - [`job`] - Job id allocation and the run entry point
//!
//! # Export Workflow
//!
//! 1. **Allocate**: take a time-derived job id
//! 2. **Lock**: take the run-level lock in the marker store
//! 3. **Prepare**: create the export directory
//! 4. **Snapshot**: read every film without an export marker, ordered by id
//! 5. **Chunk**: split the snapshot into fixed-size chunks
//! 6. **Fan out**: append each film's line, then insert its marker
//! 7. **Commit**: flush the export file at each chunk boundary
//! 8. **Report**: log the run summary
//!
//! # Example
//!
//! ```rust,no_run
//! use filmo_batch::adapters::database::create_storage;
//! use filmo_batch::config::load_config;
//! use filmo_batch::core::export::CancelHandle;
//! use filmo_batch::core::job::{JobRunner, RunnerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("filmo.toml")?;
//! let storage = create_storage(&config).await?;
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let runner = JobRunner::from_storage(
//!     &storage,
//!     RunnerConfig::from_export_config(&config.export, false),
//! );
//!
//! let outcome = runner.run(CancelHandle::from_shutdown(shutdown_rx)).await?;
//! println!("State: {}", outcome.state);
//! println!("Exported: {}", outcome.summary.records_exported);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod job;
pub mod sink;
