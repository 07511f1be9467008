//! Domain models and types for filmo-batch.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`FilmId`], [`JobId`])
//! - **Domain models** ([`Film`], [`ExportLine`], [`ExportMarker`], [`JobRun`])
//! - **Error types** ([`FilmoError`], [`SinkError`])
//! - **Result type alias** ([`Result`])
//!
//! # Example
//!
//! ```rust
//! use filmo_batch::domain::{ExportLine, Film, FilmId};
//!
//! let film = Film::new(7, "Matrix", 1999);
//! assert_eq!(film.id, FilmId::new(7));
//! assert_eq!(ExportLine::render(&film).as_str(), "7,Matrix,1999\n");
//! ```

pub mod errors;
pub mod film;
pub mod ids;
pub mod job;
pub mod marker;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{FilmoError, SinkError};
pub use film::{ExportLine, Film};
pub use ids::{FilmId, JobId};
pub use job::JobRun;
pub use marker::{ExportMarker, JobMarkerStats, NewExportMarker};
pub use result::Result;
