//! PostgreSQL adapter implementing storage traits
//!
//! This module provides the implementation of [`FilmSource`] and
//! [`MarkerStore`] over the `films` and `film_export` tables.

use crate::adapters::database::traits::{FilmSource, MarkerStore, RunLock};
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::postgresql::models::{job_stats_from_row, FilmExportRow, FilmRow};
use crate::domain::{
    ExportMarker, Film, FilmoError, JobId, JobMarkerStats, NewExportMarker, Result,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Advisory lock key shared by every filmo-batch run ("FILM")
pub const RUN_LOCK_KEY: i64 = 0x4649_4C4D;

const LIST_ALL_SQL: &str = "SELECT id, title, release_year FROM films ORDER BY id";

const COUNT_ALL_SQL: &str = "SELECT COUNT(*) AS total FROM films";

const LIST_UNEXPORTED_SQL: &str = r#"
    SELECT f.id, f.title, f.release_year
    FROM films f
    WHERE NOT EXISTS (
        SELECT 1 FROM film_export fe WHERE fe.film_id = f.id
    )
    ORDER BY f.id
"#;

const INSERT_MARKER_SQL: &str = r#"
    INSERT INTO film_export (film_id, job_id, exported_at)
    VALUES ($1, $2, $3)
    RETURNING id, film_id, job_id, exported_at
"#;

const COUNT_MARKERS_SQL: &str = "SELECT COUNT(*) AS total FROM film_export";

const MARKERS_BY_JOB_SQL: &str = r#"
    SELECT job_id,
           COUNT(*) AS markers,
           MIN(exported_at) AS first_exported_at,
           MAX(exported_at) AS last_exported_at
    FROM film_export
    GROUP BY job_id
    ORDER BY job_id DESC
"#;

/// PostgreSQL implementation of the storage traits
pub struct PostgreSQLAdapter {
    client: Arc<PostgreSQLClient>,
}

/// Keeps the session that owns the advisory lock alive
struct PgLockHolder {
    _session: deadpool_postgres::ClientWrapper,
}

impl PostgreSQLAdapter {
    /// Create an adapter over a shared client
    pub fn new(client: Arc<PostgreSQLClient>) -> Self {
        Self { client }
    }

    async fn list_films(&self, sql: &str) -> Result<Vec<Film>> {
        let rows = self
            .client
            .query(sql, &[])
            .await
            .map_err(|e| FilmoError::SourceRead(e.to_string()))?;

        rows.iter()
            .map(|row| FilmRow::from_row(row).map(FilmRow::into_domain))
            .collect()
    }
}

#[async_trait]
impl FilmSource for PostgreSQLAdapter {
    async fn list_all_records(&self) -> Result<Vec<Film>> {
        self.list_films(LIST_ALL_SQL).await
    }

    async fn count_all_records(&self) -> Result<u64> {
        let row = self
            .client
            .query_one(COUNT_ALL_SQL, &[])
            .await
            .map_err(|e| FilmoError::SourceRead(e.to_string()))?;
        let total: i64 = row
            .try_get("total")
            .map_err(|e| FilmoError::SourceRead(format!("Failed to read film count: {}", e)))?;
        Ok(total.max(0) as u64)
    }

    async fn list_unexported_records(&self) -> Result<Vec<Film>> {
        let films = self.list_films(LIST_UNEXPORTED_SQL).await?;
        tracing::debug!(count = films.len(), "Loaded unexported films");
        Ok(films)
    }
}

#[async_trait]
impl MarkerStore for PostgreSQLAdapter {
    async fn ensure_schema(&self) -> Result<()> {
        self.client.ensure_schema().await
    }

    async fn insert_marker(&self, marker: NewExportMarker) -> Result<ExportMarker> {
        let film_id = marker.film_id.get();
        let job_id = marker.job_id.get();

        let row = self
            .client
            .query_one(INSERT_MARKER_SQL, &[&film_id, &job_id, &marker.exported_at])
            .await?;

        Ok(FilmExportRow::from_row(&row)?.into_domain())
    }

    async fn count_markers(&self) -> Result<u64> {
        let row = self.client.query_one(COUNT_MARKERS_SQL, &[]).await?;
        let total: i64 = row
            .try_get("total")
            .map_err(|e| FilmoError::Database(format!("Failed to read marker count: {}", e)))?;
        Ok(total.max(0) as u64)
    }

    async fn markers_by_job(&self) -> Result<Vec<JobMarkerStats>> {
        let rows = self.client.query(MARKERS_BY_JOB_SQL, &[]).await?;
        rows.iter().map(job_stats_from_row).collect()
    }

    async fn try_acquire_run_lock(&self, job_id: JobId) -> Result<Option<RunLock>> {
        let session = self.client.detach_connection().await?;

        let acquired: bool = session
            .query_one("SELECT pg_try_advisory_lock($1)", &[&RUN_LOCK_KEY])
            .await
            .and_then(|row| row.try_get(0))
            .map_err(|e| FilmoError::Database(format!("Failed to query run lock: {}", e)))?;

        if !acquired {
            tracing::warn!(job_id = %job_id, "Run lock is held by another session");
            return Ok(None);
        }

        tracing::debug!(job_id = %job_id, key = RUN_LOCK_KEY, "Acquired run lock");
        Ok(Some(RunLock::new(job_id, PgLockHolder { _session: session })))
    }
}
