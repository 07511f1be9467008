//! Snapshot cursor over the eligible films

use crate::adapters::database::FilmSource;
use crate::domain::{Film, FilmoError, Result};
use std::iter::FusedIterator;

/// Pull-based cursor over a snapshot of eligible films
///
/// The snapshot is materialised once when the reader is built and drained in
/// order. Catalog changes made during the run are not observed. Once drained,
/// the reader keeps returning `None`.
#[derive(Debug, Clone)]
pub struct ChunkReader {
    records: Vec<Film>,
    cursor: usize,
}

impl ChunkReader {
    /// Wrap an already-materialised snapshot
    pub fn from_snapshot(records: Vec<Film>) -> Self {
        Self { records, cursor: 0 }
    }

    /// Query the unexported films once and take them as the snapshot
    ///
    /// # Errors
    ///
    /// Returns [`FilmoError::SourceRead`] if the query fails.
    pub async fn open(source: &dyn FilmSource) -> Result<Self> {
        let records = source.list_unexported_records().await.map_err(|e| match e {
            FilmoError::SourceRead(_) => e,
            other => FilmoError::SourceRead(other.to_string()),
        })?;

        tracing::debug!(records = records.len(), "Opened export snapshot");
        Ok(Self::from_snapshot(records))
    }

    /// Pull up to `n` records
    ///
    /// Returns an empty vector once the snapshot is drained.
    pub fn next_chunk(&mut self, n: usize) -> Vec<Film> {
        self.by_ref().take(n).collect()
    }

    /// Records not yet pulled
    pub fn remaining(&self) -> usize {
        self.records.len() - self.cursor
    }

    /// Size of the snapshot
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot was empty to begin with
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Iterator for ChunkReader {
    type Item = Film;

    fn next(&mut self) -> Option<Film> {
        let film = self.records.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(film)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl ExactSizeIterator for ChunkReader {}

impl FusedIterator for ChunkReader {}
