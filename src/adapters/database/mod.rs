//! Storage abstraction layer
//!
//! This module provides the traits the export pipeline reads and writes
//! through, and the factory that builds the configured backend.

pub mod factory;
pub mod traits;

pub use factory::{create_storage, Storage};
pub use traits::{FilmSource, MarkerStore, RunLock};
