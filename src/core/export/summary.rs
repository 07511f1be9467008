//! Run summary and chunk failure reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::core::sink::SinkKind;
use crate::domain::{FilmId, JobId};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// One chunk that was written to every sink and committed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkReport {
    /// Zero-based chunk position in the run
    pub index: usize,

    /// Number of records in the chunk
    pub size: usize,

    /// First film id in the chunk
    pub first_id: FilmId,

    /// Last film id in the chunk
    pub last_id: FilmId,
}

/// A chunk that failed, with what it left behind
///
/// Nothing is rolled back. Records before `failed_film_id` in the chunk were
/// written to every sink; the failed record was written to `applied_sinks`.
/// A chunk-boundary failure has no failed record: every line of the chunk
/// was already written and marked, only its sync failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkFailure {
    /// Run that failed
    pub job_id: JobId,

    /// Zero-based position of the failed chunk
    pub chunk_index: usize,

    /// First film id in the chunk
    pub first_id: FilmId,

    /// Last film id in the chunk
    pub last_id: FilmId,

    /// Record being written when the failure happened (`None` for a
    /// chunk-boundary flush failure)
    pub failed_film_id: Option<FilmId>,

    /// Sink that failed
    pub sink: SinkKind,

    /// Sinks that had already applied the failed record
    pub applied_sinks: Vec<SinkKind>,

    /// Records of the chunk fully written before the failure
    pub written_before_failure: usize,

    /// Error message
    pub message: String,
}

impl ChunkFailure {
    /// Export lines in this chunk that have no marker
    ///
    /// With the default `[File, Marker]` order this is 1 when the marker
    /// insert failed after the line was appended, 0 otherwise.
    pub fn lines_without_marker(&self) -> usize {
        usize::from(self.sink == SinkKind::Marker && self.applied_sinks.contains(&SinkKind::File))
    }

    /// Markers in this chunk that have no export line
    pub fn markers_without_line(&self) -> usize {
        usize::from(self.sink == SinkKind::File && self.applied_sinks.contains(&SinkKind::Marker))
    }
}

impl fmt::Display for ChunkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "job {} chunk {} (films {}..={}) failed in {} sink",
            self.job_id, self.chunk_index, self.first_id, self.last_id, self.sink
        )?;
        if let Some(film_id) = self.failed_film_id {
            write!(f, " at film {}", film_id)?;
        }
        write!(
            f,
            " after {} record(s): {}",
            self.written_before_failure, self.message
        )
    }
}

/// Summary of one export run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Run identifier
    pub job_id: JobId,

    /// Films in the catalog at run start (0 when not counted)
    pub total_records: usize,

    /// Films in the eligible snapshot
    pub eligible_records: usize,

    /// Films written to every sink
    pub records_exported: usize,

    /// Committed chunks, in order
    pub chunks: Vec<ChunkReport>,

    /// The chunk that stopped the run, if any
    pub failure: Option<ChunkFailure>,

    /// Whether sinks ran in dry-run mode
    pub dry_run: bool,

    /// Duration of the run
    #[serde(skip)]
    pub duration: Duration,
}

impl RunSummary {
    /// Create a new empty run summary
    pub fn new(job_id: JobId) -> Self {
        Self {
            job_id,
            total_records: 0,
            eligible_records: 0,
            records_exported: 0,
            chunks: Vec::new(),
            failure: None,
            dry_run: false,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a committed chunk
    pub fn add_chunk(&mut self, report: ChunkReport) {
        self.records_exported += report.size;
        self.chunks.push(report);
    }

    /// Number of committed chunks
    pub fn chunks_processed(&self) -> usize {
        self.chunks.len()
    }

    /// Eligible films the run did not reach
    pub fn records_pending(&self) -> usize {
        self.eligible_records.saturating_sub(self.records_exported)
    }

    /// Check if the run exported every eligible film
    pub fn is_successful(&self) -> bool {
        self.failure.is_none() && self.records_pending() == 0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            job_id = %self.job_id,
            total = self.total_records,
            eligible = self.eligible_records,
            exported = self.records_exported,
            chunks = self.chunks_processed(),
            pending = self.records_pending(),
            dry_run = self.dry_run,
            duration_ms = self.duration.as_millis() as u64,
            "Export run summary"
        );

        if let Some(failure) = &self.failure {
            tracing::error!(
                job_id = %failure.job_id,
                chunk_index = failure.chunk_index,
                sink = %failure.sink,
                lines_without_marker = failure.lines_without_marker(),
                markers_without_line = failure.markers_without_line(),
                "{}",
                failure
            );
        }
    }
}
