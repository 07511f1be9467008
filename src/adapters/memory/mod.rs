//! In-process catalog and marker store
//!
//! Implements both [`FilmSource`] and [`MarkerStore`] over plain vectors.
//! Used when embedding the pipeline without a database and by the test
//! suite. Nothing survives the process.

use crate::adapters::database::traits::{FilmSource, MarkerStore, RunLock};
use crate::domain::{
    ExportMarker, Film, FilmId, JobId, JobMarkerStats, NewExportMarker, Result,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Tables {
    films: Vec<Film>,
    markers: Vec<ExportMarker>,
    next_marker_id: i64,
}

/// In-memory implementation of the storage traits
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    run_lock: Arc<AtomicBool>,
}

/// Resets the lock flag when dropped
struct MemoryLockHolder(Arc<AtomicBool>);

impl Drop for MemoryLockHolder {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl InMemoryStore {
    /// Create a store seeded with catalog films
    pub fn with_films(films: impl IntoIterator<Item = Film>) -> Self {
        let store = Self::default();
        store.tables().films.extend(films);
        store
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        // A poisoned lock only means a test thread panicked mid-update
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a film to the catalog
    pub fn add_film(&self, film: Film) {
        self.tables().films.push(film);
    }

    /// Snapshot of all markers in insertion order
    pub fn markers(&self) -> Vec<ExportMarker> {
        self.tables().markers.clone()
    }

    /// Delete every marker for a film, making it eligible again
    ///
    /// This mirrors the out-of-band administrative action; the pipeline
    /// itself never deletes markers.
    pub fn delete_markers_for(&self, film_id: FilmId) -> usize {
        let mut tables = self.tables();
        let before = tables.markers.len();
        tables.markers.retain(|m| m.film_id != film_id);
        before - tables.markers.len()
    }

    /// Whether the run-level lock is currently held
    pub fn is_run_locked(&self) -> bool {
        self.run_lock.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FilmSource for InMemoryStore {
    async fn list_all_records(&self) -> Result<Vec<Film>> {
        let mut films = self.tables().films.clone();
        films.sort_by_key(|f| f.id);
        Ok(films)
    }

    async fn count_all_records(&self) -> Result<u64> {
        Ok(self.tables().films.len() as u64)
    }

    async fn list_unexported_records(&self) -> Result<Vec<Film>> {
        let tables = self.tables();
        let exported: HashSet<FilmId> = tables.markers.iter().map(|m| m.film_id).collect();
        let mut films: Vec<Film> = tables
            .films
            .iter()
            .filter(|f| !exported.contains(&f.id))
            .cloned()
            .collect();
        films.sort_by_key(|f| f.id);
        Ok(films)
    }
}

#[async_trait]
impl MarkerStore for InMemoryStore {
    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn insert_marker(&self, marker: NewExportMarker) -> Result<ExportMarker> {
        let mut tables = self.tables();
        tables.next_marker_id += 1;
        let persisted = marker.persisted(tables.next_marker_id);
        tables.markers.push(persisted.clone());
        Ok(persisted)
    }

    async fn count_markers(&self) -> Result<u64> {
        Ok(self.tables().markers.len() as u64)
    }

    async fn markers_by_job(&self) -> Result<Vec<JobMarkerStats>> {
        let tables = self.tables();
        let mut by_job: BTreeMap<JobId, JobMarkerStats> = BTreeMap::new();

        for marker in &tables.markers {
            by_job
                .entry(marker.job_id)
                .and_modify(|stats| {
                    stats.markers += 1;
                    stats.first_exported_at = stats.first_exported_at.min(marker.exported_at);
                    stats.last_exported_at = stats.last_exported_at.max(marker.exported_at);
                })
                .or_insert(JobMarkerStats {
                    job_id: marker.job_id,
                    markers: 1,
                    first_exported_at: marker.exported_at,
                    last_exported_at: marker.exported_at,
                });
        }

        Ok(by_job.into_values().rev().collect())
    }

    async fn try_acquire_run_lock(&self, job_id: JobId) -> Result<Option<RunLock>> {
        if self
            .run_lock
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(None);
        }

        Ok(Some(RunLock::new(
            job_id,
            MemoryLockHolder(self.run_lock.clone()),
        )))
    }
}
