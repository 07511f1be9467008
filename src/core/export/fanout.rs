//! Per-record fan-out to every registered sink
//!
//! Sinks are invoked in registration order, one record at a time. The sinks
//! are not transactionally coupled: when a later sink fails for a record, the
//! earlier sinks' effects for that record (and for every earlier record in
//! the chunk) stay applied. [`RecordFailure`] says exactly what was applied
//! so the mismatch can be reported.

use crate::core::sink::{Sink, SinkKind};
use crate::domain::{Film, FilmId, JobId, Result, SinkError};

/// A sink rejected a record partway through a chunk
#[derive(Debug)]
pub struct RecordFailure {
    /// The record that failed
    pub film_id: FilmId,

    /// The sink that rejected it
    pub sink: SinkKind,

    /// Sinks that had already applied this record
    pub applied_sinks: Vec<SinkKind>,

    /// Records of the chunk written to every sink before this one
    pub written_before_failure: usize,

    /// Underlying sink error
    pub error: SinkError,
}

/// Writes each record of a chunk to every sink, in order
#[derive(Debug)]
pub struct FanoutWriter {
    sinks: Vec<Sink>,
}

impl FanoutWriter {
    /// Create a writer; registration order is fan-out order
    pub fn new(sinks: Vec<Sink>) -> Self {
        Self { sinks }
    }

    /// Registered sink kinds, in fan-out order
    pub fn sink_kinds(&self) -> Vec<SinkKind> {
        self.sinks.iter().map(Sink::kind).collect()
    }

    /// Run every sink's pre-run step
    ///
    /// # Errors
    ///
    /// Fails on the first sink that cannot be prepared; the run must not
    /// start.
    pub async fn prepare(&mut self) -> Result<()> {
        for sink in self.sinks.iter_mut() {
            sink.prepare().await?;
        }
        Ok(())
    }

    /// Write a chunk, record by record, sink by sink
    ///
    /// Stops at the first failure. Returns the number of records written.
    pub async fn write(
        &mut self,
        chunk: &[Film],
        job_id: JobId,
    ) -> std::result::Result<usize, RecordFailure> {
        let kinds = self.sink_kinds();

        for (position, film) in chunk.iter().enumerate() {
            for (sink_index, sink) in self.sinks.iter_mut().enumerate() {
                if let Err(error) = sink.write(film, job_id).await {
                    return Err(RecordFailure {
                        film_id: film.id,
                        sink: kinds[sink_index],
                        applied_sinks: kinds[..sink_index].to_vec(),
                        written_before_failure: position,
                        error,
                    });
                }
            }
        }

        Ok(chunk.len())
    }

    /// Run every sink's chunk-boundary hook
    pub async fn commit_chunk(&mut self) -> std::result::Result<(), (SinkKind, SinkError)> {
        for sink in self.sinks.iter_mut() {
            let kind = sink.kind();
            sink.commit_chunk().await.map_err(|e| (kind, e))?;
        }
        Ok(())
    }

    /// Run every sink's end-of-run hook
    ///
    /// All sinks are finished even if one fails; failures are logged.
    pub async fn finish(&mut self) {
        for sink in self.sinks.iter_mut() {
            let kind = sink.kind();
            if let Err(e) = sink.finish().await {
                tracing::warn!(sink = %kind, error = %e, "Failed to finish sink");
            }
        }
    }
}
