//! Job execution
//!
//! - [`id`] - job identifier allocation
//! - [`runner`] - one export run from lock to summary

pub mod id;
pub mod runner;

pub use id::JobIdAllocator;
pub use runner::{JobRunner, RunOutcome, RunnerConfig};
