//! Export marker sink

use crate::adapters::database::MarkerStore;
use crate::domain::{FilmId, JobId, NewExportMarker, SinkError};
use std::sync::Arc;

/// Inserts one export marker per film
///
/// There is no duplicate check here: the eligibility query upstream is what
/// keeps a film from being marked twice.
pub struct MarkerSink {
    store: Arc<dyn MarkerStore>,
    dry_run: bool,
    markers_inserted: u64,
}

impl MarkerSink {
    /// Create a sink over a marker store
    pub fn new(store: Arc<dyn MarkerStore>) -> Self {
        Self {
            store,
            dry_run: false,
            markers_inserted: 0,
        }
    }

    /// Log instead of inserting
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Markers inserted during this run
    pub fn markers_inserted(&self) -> u64 {
        self.markers_inserted
    }

    /// Record that `film_id` was exported by `job_id`
    pub async fn mark_exported(
        &mut self,
        film_id: FilmId,
        job_id: JobId,
    ) -> Result<(), SinkError> {
        if self.dry_run {
            tracing::info!(film_id = %film_id, job_id = %job_id, "DRY RUN: Would insert export marker");
            return Ok(());
        }

        let marker = self
            .store
            .insert_marker(NewExportMarker::create(film_id, job_id))
            .await
            .map_err(|e| SinkError::MarkerInsert {
                film_id: film_id.get(),
                message: e.to_string(),
            })?;

        self.markers_inserted += 1;
        tracing::trace!(film_id = %film_id, marker_id = marker.id, "Inserted export marker");
        Ok(())
    }
}

impl std::fmt::Debug for MarkerSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkerSink")
            .field("dry_run", &self.dry_run)
            .field("markers_inserted", &self.markers_inserted)
            .finish_non_exhaustive()
    }
}
