//! Export pipeline
//!
//! - [`reader`] - snapshot cursor over the eligible films
//! - [`orchestrator`] - chunking, run state machine, cancellation
//! - [`fanout`] - per-record fan-out to the sinks
//! - [`summary`] - run and chunk-failure reporting

pub mod cancel;
pub mod fanout;
pub mod orchestrator;
pub mod reader;
pub mod summary;

pub use cancel::{CancelHandle, CancelReason};
pub use fanout::{FanoutWriter, RecordFailure};
pub use orchestrator::{ChunkOrchestrator, FailureCause, RunState};
pub use reader::ChunkReader;
pub use summary::{ChunkFailure, ChunkReport, RunSummary};
