//! Export marker model
//!
//! A marker is the persisted fact that a film has been exported. The source
//! query treats any film with a marker as no longer eligible, which is what
//! makes reruns idempotent.

use crate::domain::ids::{FilmId, JobId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted export marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportMarker {
    /// Storage-assigned identifier
    pub id: i64,

    /// Exported film
    pub film_id: FilmId,

    /// Run that produced this marker
    pub job_id: JobId,

    /// When the marker was created
    pub exported_at: DateTime<Utc>,
}

/// A marker about to be inserted (no storage id yet)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExportMarker {
    /// Exported film
    pub film_id: FilmId,

    /// Run that produced this marker
    pub job_id: JobId,

    /// When the marker was created
    pub exported_at: DateTime<Utc>,
}

impl NewExportMarker {
    /// Create a marker stamped with the current time
    pub fn create(film_id: FilmId, job_id: JobId) -> Self {
        Self {
            film_id,
            job_id,
            exported_at: Utc::now(),
        }
    }

    /// Attach the storage-assigned id
    pub fn persisted(self, id: i64) -> ExportMarker {
        ExportMarker {
            id,
            film_id: self.film_id,
            job_id: self.job_id,
            exported_at: self.exported_at,
        }
    }
}

/// Marker totals for one job, as reported by the `status` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMarkerStats {
    /// Job identifier
    pub job_id: JobId,

    /// Number of markers this job created
    pub markers: u64,

    /// Earliest marker timestamp
    pub first_exported_at: DateTime<Utc>,

    /// Latest marker timestamp
    pub last_exported_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_marker_stamps_time() {
        let before = Utc::now();
        let marker = NewExportMarker::create(FilmId::new(3), JobId::new(10));
        assert!(marker.exported_at >= before);
        assert_eq!(marker.film_id, FilmId::new(3));
        assert_eq!(marker.job_id, JobId::new(10));
    }

    #[test]
    fn test_persisted_keeps_fields() {
        let new_marker = NewExportMarker::create(FilmId::new(3), JobId::new(10));
        let exported_at = new_marker.exported_at;
        let marker = new_marker.persisted(1);
        assert_eq!(marker.id, 1);
        assert_eq!(marker.exported_at, exported_at);
    }
}
