//! Storage abstraction traits
//!
//! This module defines the traits that storage adapters must implement
//! to work with the export pipeline: a read-only film source and a marker
//! store.

use crate::domain::{ExportMarker, Film, JobId, JobMarkerStats, NewExportMarker, Result};
use async_trait::async_trait;
use std::any::Any;
use std::fmt;

/// Read-only query over the film catalog
///
/// The catalog is owned by the surrounding storage layer; the pipeline never
/// writes through this trait.
#[async_trait]
pub trait FilmSource: Send + Sync {
    /// List every film in the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be queried.
    async fn list_all_records(&self) -> Result<Vec<Film>>;

    /// Count every film in the catalog without loading it
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be queried.
    async fn count_all_records(&self) -> Result<u64>;

    /// List films that have no export marker, in ascending id order
    ///
    /// This is the eligibility filter that makes reruns idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be queried.
    async fn list_unexported_records(&self) -> Result<Vec<Film>>;
}

/// Persistence for export markers
///
/// Inserts are not checked for duplicates: the source's eligibility filter is
/// the only guard against marking a film twice.
#[async_trait]
pub trait MarkerStore: Send + Sync {
    /// Ensure the marker table exists
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    async fn ensure_schema(&self) -> Result<()>;

    /// Insert one marker and return it with its storage id
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails. The failure mode for a
    /// duplicate `film_id` is defined by the store.
    async fn insert_marker(&self, marker: NewExportMarker) -> Result<ExportMarker>;

    /// Total number of markers
    async fn count_markers(&self) -> Result<u64>;

    /// Marker totals grouped by job, most recent job first
    async fn markers_by_job(&self) -> Result<Vec<JobMarkerStats>>;

    /// Try to take the run-level lock
    ///
    /// Returns `Ok(None)` when another run holds it. The lock is released
    /// when the returned [`RunLock`] is dropped.
    async fn try_acquire_run_lock(&self, job_id: JobId) -> Result<Option<RunLock>>;
}

/// Guard for the run-level lock
///
/// Holds whatever the backend needs to keep the lock alive (a dedicated
/// session, a flag reset on drop). Dropping the guard releases the lock.
pub struct RunLock {
    job_id: JobId,
    _holder: Box<dyn Any + Send + Sync>,
}

impl RunLock {
    /// Wrap a backend-specific lock holder
    pub fn new(job_id: JobId, holder: impl Any + Send + Sync) -> Self {
        Self {
            job_id,
            _holder: Box::new(holder),
        }
    }

    /// The job that holds the lock
    pub fn job_id(&self) -> JobId {
        self.job_id
    }
}

impl fmt::Debug for RunLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunLock")
            .field("job_id", &self.job_id)
            .finish_non_exhaustive()
    }
}
