// filmo-batch - Incremental film catalog exporter
// Copyright (c) 2025 Filmo Contributors
// Licensed under the MIT License

//! # filmo-batch - Incremental film catalog exporter
//!
//! filmo-batch appends every film that has not been exported yet to a flat
//! text file and records an export marker per film in PostgreSQL, so the
//! next run picks up only what is new.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Reading** the eligible films (no export marker) as an id-ordered snapshot
//! - **Chunking** the snapshot into fixed-size groups
//! - **Fanning out** each film to the export file and the marker table
//! - **Reporting** partial failures with exactly which sinks were applied
//!
//! ## Architecture
//!
//! filmo-batch follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export pipeline (reader, orchestrator, fan-out, sinks, job runner)
//! - [`adapters`] - Storage integrations (PostgreSQL, in-memory)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use filmo_batch::adapters::memory::InMemoryStore;
//! use filmo_batch::core::export::{CancelHandle, RunState};
//! use filmo_batch::core::job::{JobRunner, RunnerConfig};
//! use filmo_batch::domain::Film;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(InMemoryStore::with_films(vec![
//!         Film::new(1, "Alien", 1979),
//!         Film::new(2, "Brazil", 1985),
//!     ]));
//!
//!     let runner = JobRunner::new(
//!         store.clone(),
//!         store.clone(),
//!         RunnerConfig {
//!             chunk_size: 3,
//!             export_file: "./data/films.csv".into(),
//!             fsync: false,
//!             dry_run: false,
//!             run_timeout: None,
//!         },
//!     );
//!
//!     let outcome = runner.run(CancelHandle::none()).await?;
//!     assert_eq!(outcome.state, RunState::Completed);
//!     println!("Exported {} films", outcome.summary.records_exported);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Errors that stop a run before its first chunk are [`domain::FilmoError`].
//! A sink failure inside a chunk is not an error: the run ends in
//! [`core::export::RunState::Failed`] and the summary carries a
//! [`core::export::ChunkFailure`] describing the partial write.
//!
//! ## Logging
//!
//! filmo-batch uses structured logging with the `tracing` crate; pipeline
//! events carry `job_id`, `chunk_index` and `film_id` fields.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
