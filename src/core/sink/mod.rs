//! Export sinks
//!
//! A sink durably records one exported film. The set of sinks is closed:
//! adding a destination means adding a [`Sink`] variant.
//!
//! - [`FileSink`] - appends `id,title,year` lines to the export file
//! - [`MarkerSink`] - inserts an export marker tagged with the job id

pub mod file;
pub mod marker;

pub use file::FileSink;
pub use marker::MarkerSink;

use crate::domain::{Film, JobId, Result, SinkError};
use serde::Serialize;
use std::fmt;

/// Which sink a record was written to (or failed in)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    File,
    Marker,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkKind::File => write!(f, "file"),
            SinkKind::Marker => write!(f, "marker"),
        }
    }
}

/// A registered export destination
#[derive(Debug)]
pub enum Sink {
    File(FileSink),
    Marker(MarkerSink),
}

impl Sink {
    /// Kind of this sink
    pub fn kind(&self) -> SinkKind {
        match self {
            Sink::File(_) => SinkKind::File,
            Sink::Marker(_) => SinkKind::Marker,
        }
    }

    /// Pre-run step, executed once before any record is read
    pub async fn prepare(&mut self) -> Result<()> {
        match self {
            Sink::File(sink) => sink.prepare().await,
            Sink::Marker(_) => Ok(()),
        }
    }

    /// Write one record
    pub async fn write(&mut self, film: &Film, job_id: JobId) -> std::result::Result<(), SinkError> {
        match self {
            Sink::File(sink) => sink.append(film).await,
            Sink::Marker(sink) => sink.mark_exported(film.id, job_id).await,
        }
    }

    /// Chunk-boundary hook
    ///
    /// Markers are committed per insert, so only the file has work to do.
    pub async fn commit_chunk(&mut self) -> std::result::Result<(), SinkError> {
        match self {
            Sink::File(sink) => sink.flush().await,
            Sink::Marker(_) => Ok(()),
        }
    }

    /// End-of-run hook, called whether the run completed or failed
    pub async fn finish(&mut self) -> std::result::Result<(), SinkError> {
        match self {
            Sink::File(sink) => sink.close().await,
            Sink::Marker(_) => Ok(()),
        }
    }
}

impl From<FileSink> for Sink {
    fn from(sink: FileSink) -> Self {
        Sink::File(sink)
    }
}

impl From<MarkerSink> for Sink {
    fn from(sink: MarkerSink) -> Self {
        Sink::Marker(sink)
    }
}
