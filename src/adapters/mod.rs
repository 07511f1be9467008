//! Storage integrations for filmo-batch.
//!
//! - [`database`] - Storage traits and the backend factory
//! - [`postgresql`] - PostgreSQL catalog reader and marker store
//! - [`memory`] - In-process store for embedding and tests
//!
//! # Design Pattern
//!
//! Adapters isolate the database behind [`database::FilmSource`] and
//! [`database::MarkerStore`], so the export core never sees SQL.
//!
//! ```rust,no_run
//! use filmo_batch::adapters::database::create_storage;
//! use filmo_batch::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("filmo.toml")?;
//! let storage = create_storage(&config).await?;
//! let pending = storage.source.list_unexported_records().await?;
//! println!("{} films waiting for export", pending.len());
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod memory;
pub mod postgresql;
