//! PostgreSQL row models
//!
//! Mapping between `films` / `film_export` rows and domain types.

use crate::domain::{
    ExportMarker, Film, FilmId, FilmoError, JobId, JobMarkerStats, Result,
};
use chrono::{DateTime, Utc};
use tokio_postgres::Row;

/// Row of the `films` table
#[derive(Debug, Clone)]
pub struct FilmRow {
    pub id: i64,
    pub title: String,
    pub release_year: i32,
}

impl FilmRow {
    /// Read a row selected as `id, title, release_year`
    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: get(row, "id")?,
            title: get(row, "title")?,
            release_year: get(row, "release_year")?,
        })
    }

    /// Convert to the domain view
    pub fn into_domain(self) -> Film {
        Film::new(self.id, self.title, self.release_year)
    }
}

/// Row of the `film_export` table
#[derive(Debug, Clone)]
pub struct FilmExportRow {
    pub id: i64,
    pub film_id: i64,
    pub job_id: i64,
    pub exported_at: DateTime<Utc>,
}

impl FilmExportRow {
    /// Read a row selected as `id, film_id, job_id, exported_at`
    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: get(row, "id")?,
            film_id: get(row, "film_id")?,
            job_id: get(row, "job_id")?,
            exported_at: get(row, "exported_at")?,
        })
    }

    /// Convert to the domain marker
    pub fn into_domain(self) -> ExportMarker {
        ExportMarker {
            id: self.id,
            film_id: FilmId::new(self.film_id),
            job_id: JobId::new(self.job_id),
            exported_at: self.exported_at,
        }
    }
}

/// Read one `markers_by_job` aggregate row
pub fn job_stats_from_row(row: &Row) -> Result<JobMarkerStats> {
    let markers: i64 = get(row, "markers")?;
    Ok(JobMarkerStats {
        job_id: JobId::new(get(row, "job_id")?),
        markers: markers.max(0) as u64,
        first_exported_at: get(row, "first_exported_at")?,
        last_exported_at: get(row, "last_exported_at")?,
    })
}

fn get<'a, T>(row: &'a Row, column: &str) -> Result<T>
where
    T: tokio_postgres::types::FromSql<'a>,
{
    row.try_get(column)
        .map_err(|e| FilmoError::Database(format!("Failed to read column '{}': {}", column, e)))
}
