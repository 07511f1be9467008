//! Chunk orchestration
//!
//! Groups the snapshot into fixed-size chunks and pushes each chunk through
//! the fan-out writer. A chunk is the unit of failure: the first failing sink
//! stops the run, chunks already committed stay committed, and nothing is
//! retried.

use crate::core::export::cancel::{CancelHandle, CancelReason};
use crate::core::export::fanout::FanoutWriter;
use crate::core::export::reader::ChunkReader;
use crate::core::export::summary::{ChunkFailure, ChunkReport, RunSummary};
use crate::domain::{Film, FilmoError, JobId, Result};
use std::fmt;
use std::time::Instant;

/// Why a run ended in [`RunState::Failed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    /// A sink failed while writing or committing this chunk
    ChunkFailed { chunk_index: usize },
    /// Shutdown was requested
    Interrupted,
    /// The run deadline passed
    DeadlineExceeded,
}

impl From<CancelReason> for FailureCause {
    fn from(reason: CancelReason) -> Self {
        match reason {
            CancelReason::Interrupted => FailureCause::Interrupted,
            CancelReason::DeadlineExceeded => FailureCause::DeadlineExceeded,
        }
    }
}

/// Orchestrator lifecycle
///
/// `Idle -> Running -> Completed | Failed`. There is no resume: a failed run
/// is restarted from the top and the eligibility filter skips what earlier
/// chunks already marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Failed(FailureCause),
}

impl RunState {
    /// Whether the run has ended
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Completed | RunState::Failed(_))
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "idle"),
            RunState::Running => write!(f, "running"),
            RunState::Completed => write!(f, "completed"),
            RunState::Failed(FailureCause::ChunkFailed { chunk_index }) => {
                write!(f, "failed at chunk {}", chunk_index)
            }
            RunState::Failed(FailureCause::Interrupted) => write!(f, "interrupted"),
            RunState::Failed(FailureCause::DeadlineExceeded) => write!(f, "deadline exceeded"),
        }
    }
}

/// Drives one run over a snapshot, chunk by chunk
#[derive(Debug)]
pub struct ChunkOrchestrator {
    chunk_size: usize,
    state: RunState,
}

impl ChunkOrchestrator {
    /// Create an orchestrator with chunk size `chunk_size`
    ///
    /// # Errors
    ///
    /// Returns [`FilmoError::Validation`] if `chunk_size` is zero.
    pub fn new(chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(FilmoError::Validation(
                "chunk size must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            chunk_size,
            state: RunState::Idle,
        })
    }

    /// Configured chunk size
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Current state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Process the whole snapshot once
    ///
    /// Cancellation is checked before each chunk. Sink failures do not
    /// surface as `Err`: they end the run in [`RunState::Failed`] and are
    /// described in [`RunSummary::failure`].
    ///
    /// # Errors
    ///
    /// Returns [`FilmoError::Validation`] if this orchestrator already ran.
    pub async fn run(
        &mut self,
        reader: &mut ChunkReader,
        writer: &mut FanoutWriter,
        job_id: JobId,
        cancel: &CancelHandle,
    ) -> Result<RunSummary> {
        if self.state != RunState::Idle {
            return Err(FilmoError::Validation(format!(
                "orchestrator already {}",
                self.state
            )));
        }

        let started = Instant::now();
        let mut summary = RunSummary::new(job_id);
        summary.eligible_records = reader.remaining();
        self.state = RunState::Running;

        tracing::info!(
            job_id = %job_id,
            chunk_size = self.chunk_size,
            eligible = summary.eligible_records,
            "Starting chunk processing"
        );

        let mut chunk_index = 0;
        self.state = loop {
            if let Some(reason) = cancel.check() {
                tracing::warn!(
                    job_id = %job_id,
                    chunk_index,
                    reason = ?reason,
                    "Run cancelled at chunk boundary"
                );
                break RunState::Failed(reason.into());
            }

            let chunk = reader.next_chunk(self.chunk_size);
            let (Some(first), Some(last)) = (chunk.first(), chunk.last()) else {
                break RunState::Completed;
            };
            let (first_id, last_id) = (first.id, last.id);

            match self.process_chunk(writer, &chunk, job_id, chunk_index).await {
                Ok(()) => {
                    crate::log_chunk_committed!(job_id, chunk_index, chunk.len(), first_id, last_id);
                    summary.add_chunk(ChunkReport {
                        index: chunk_index,
                        size: chunk.len(),
                        first_id,
                        last_id,
                    });
                    chunk_index += 1;
                }
                Err(failure) => {
                    summary.failure = Some(failure);
                    break RunState::Failed(FailureCause::ChunkFailed { chunk_index });
                }
            }
        };

        writer.finish().await;

        tracing::info!(
            job_id = %job_id,
            state = %self.state,
            chunks = summary.chunks_processed(),
            "Chunk processing finished"
        );

        Ok(summary.with_duration(started.elapsed()))
    }

    async fn process_chunk(
        &self,
        writer: &mut FanoutWriter,
        chunk: &[Film],
        job_id: JobId,
        chunk_index: usize,
    ) -> std::result::Result<(), ChunkFailure> {
        let first_id = chunk[0].id;
        let last_id = chunk[chunk.len() - 1].id;

        if let Err(failure) = writer.write(chunk, job_id).await {
            return Err(ChunkFailure {
                job_id,
                chunk_index,
                first_id,
                last_id,
                failed_film_id: Some(failure.film_id),
                sink: failure.sink,
                applied_sinks: failure.applied_sinks,
                written_before_failure: failure.written_before_failure,
                message: failure.error.to_string(),
            });
        }

        writer
            .commit_chunk()
            .await
            .map_err(|(sink, error)| ChunkFailure {
                job_id,
                chunk_index,
                first_id,
                last_id,
                failed_film_id: None,
                sink,
                applied_sinks: Vec::new(),
                written_before_failure: chunk.len(),
                message: error.to_string(),
            })
    }
}
