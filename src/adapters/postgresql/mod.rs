//! PostgreSQL database integration
//!
//! Reads the film catalog and stores export markers in PostgreSQL.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::{PostgreSQLAdapter, RUN_LOCK_KEY};
pub use client::PostgreSQLClient;
pub use models::{FilmExportRow, FilmRow};
