//! Shared fixtures for the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use fake::faker::lorem::en::Words;
use fake::Fake;
use filmo_batch::adapters::database::{FilmSource, MarkerStore, RunLock};
use filmo_batch::adapters::memory::InMemoryStore;
use filmo_batch::core::job::RunnerConfig;
use filmo_batch::domain::{
    ExportMarker, Film, FilmoError, JobId, JobMarkerStats, NewExportMarker, Result,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// `n` films with ids `1..=n`, random titles and years
pub fn fake_catalog(n: i64) -> Vec<Film> {
    (1..=n)
        .map(|id| {
            let title: Vec<String> = Words(1..4).fake();
            Film::new(id, title.join(" "), (1920..2025).fake::<i32>())
        })
        .collect()
}

/// In-memory store seeded with [`fake_catalog`]
pub fn seeded_store(n: i64) -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::with_films(fake_catalog(n)))
}

/// Runner settings writing to `dir/out/films.csv`
pub fn runner_config(dir: &Path, chunk_size: usize) -> RunnerConfig {
    RunnerConfig {
        chunk_size,
        export_file: dir.join("out").join("films.csv"),
        fsync: false,
        dry_run: false,
        run_timeout: None,
    }
}

/// Export file lines, empty if the file was never created
pub fn export_lines(path: &PathBuf) -> Vec<String> {
    std::fs::read_to_string(path)
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Marker store that fails one insert and delegates everything else
///
/// `fail_on` is 1-based: `fail_on = 4` lets three inserts through and rejects
/// the fourth. Later inserts succeed again.
pub struct FaultyMarkerStore {
    inner: Arc<InMemoryStore>,
    fail_on: usize,
    attempts: AtomicUsize,
}

impl FaultyMarkerStore {
    pub fn new(inner: Arc<InMemoryStore>, fail_on: usize) -> Self {
        Self {
            inner,
            fail_on,
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarkerStore for FaultyMarkerStore {
    async fn ensure_schema(&self) -> Result<()> {
        self.inner.ensure_schema().await
    }

    async fn insert_marker(&self, marker: NewExportMarker) -> Result<ExportMarker> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt == self.fail_on {
            return Err(FilmoError::Database(format!(
                "connection reset while marking film {}",
                marker.film_id
            )));
        }
        self.inner.insert_marker(marker).await
    }

    async fn count_markers(&self) -> Result<u64> {
        self.inner.count_markers().await
    }

    async fn markers_by_job(&self) -> Result<Vec<JobMarkerStats>> {
        self.inner.markers_by_job().await
    }

    async fn try_acquire_run_lock(&self, job_id: JobId) -> Result<Option<RunLock>> {
        self.inner.try_acquire_run_lock(job_id).await
    }
}

/// Film source that cannot be read
pub struct BrokenSource;

#[async_trait]
impl FilmSource for BrokenSource {
    async fn list_all_records(&self) -> Result<Vec<Film>> {
        Err(FilmoError::SourceRead("catalog unavailable".to_string()))
    }

    async fn count_all_records(&self) -> Result<u64> {
        Err(FilmoError::SourceRead("catalog unavailable".to_string()))
    }

    async fn list_unexported_records(&self) -> Result<Vec<Film>> {
        Err(FilmoError::SourceRead("catalog unavailable".to_string()))
    }
}
