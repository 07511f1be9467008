//! Job run model
//!
//! A [`JobRun`] exists only for the duration of one pipeline execution. It is
//! not persisted on its own; its id is stamped onto every marker it creates.

use crate::domain::ids::JobId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One pipeline execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRun {
    /// Identifier allocated at run start
    pub job_id: JobId,

    /// When the run started
    pub started_at: DateTime<Utc>,
}

impl JobRun {
    /// Start a run with the given identifier
    pub fn start(job_id: JobId) -> Self {
        Self {
            job_id,
            started_at: Utc::now(),
        }
    }

    /// Elapsed wall-clock time since the run started
    pub fn elapsed(&self) -> chrono::Duration {
        Utc::now() - self.started_at
    }
}
