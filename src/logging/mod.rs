//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable or JSON console output
//! - Configurable log levels, overridable with `RUST_LOG`
//! - Local JSON log files with rotation
//!
//! Pipeline events carry `job_id`, `chunk_index`, `chunk_size`, `film_id`
//! and `sink` fields.
//!
//! # Example
//!
//! ```no_run
//! use filmo_batch::logging::init_logging;
//! use filmo_batch::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export run
///
/// # Example
///
/// ```no_run
/// use filmo_batch::log_run_start;
/// use filmo_batch::domain::JobId;
///
/// log_run_start!(JobId::new(1_700_000_000_000), 3, false);
/// ```
#[macro_export]
macro_rules! log_run_start {
    ($job_id:expr, $chunk_size:expr, $dry_run:expr) => {
        tracing::info!(
            job_id = %$job_id,
            chunk_size = $chunk_size,
            dry_run = $dry_run,
            "Starting export run"
        );
    };
}

/// Log a committed chunk
///
/// # Example
///
/// ```no_run
/// use filmo_batch::log_chunk_committed;
/// use filmo_batch::domain::{FilmId, JobId};
///
/// log_chunk_committed!(JobId::new(1), 0, 3, FilmId::new(1), FilmId::new(3));
/// ```
#[macro_export]
macro_rules! log_chunk_committed {
    ($job_id:expr, $chunk_index:expr, $chunk_size:expr, $first_id:expr, $last_id:expr) => {
        tracing::info!(
            job_id = %$job_id,
            chunk_index = $chunk_index,
            chunk_size = $chunk_size,
            first_id = %$first_id,
            last_id = %$last_id,
            "Chunk committed"
        );
    };
}

/// Log the end of an export run
///
/// # Example
///
/// ```no_run
/// use filmo_batch::log_run_complete;
/// use filmo_batch::domain::JobId;
/// use std::time::Duration;
///
/// log_run_complete!(JobId::new(1), "completed", 42, Duration::from_secs(10));
/// ```
#[macro_export]
macro_rules! log_run_complete {
    ($job_id:expr, $state:expr, $count:expr, $duration:expr) => {
        tracing::info!(
            job_id = %$job_id,
            state = %$state,
            exported = $count,
            duration_ms = $duration.as_millis() as u64,
            "Export run finished"
        );
    };
}
