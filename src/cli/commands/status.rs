//! Status command implementation
//!
//! This module implements the `status` command: catalog and marker counts,
//! and marker totals per job.

use crate::adapters::database::{create_storage, Storage};
use crate::config::load_config;
use crate::domain::{JobMarkerStats, Result};
use clap::Args;
use serde::Serialize;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Number of most recent jobs to list
    #[arg(long, default_value_t = 10)]
    pub jobs: usize,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Export progress as seen from the database
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub total_films: usize,
    pub unexported_films: usize,
    pub markers: u64,
    pub jobs: Vec<JobMarkerStats>,
}

impl StatusReport {
    /// Collect the report from storage
    pub async fn collect(storage: &Storage, job_limit: usize) -> Result<Self> {
        let total_films = storage.source.count_all_records().await? as usize;
        let unexported_films = storage.source.list_unexported_records().await?.len();
        let markers = storage.markers.count_markers().await?;
        let mut jobs = storage.markers.markers_by_job().await?;
        jobs.truncate(job_limit);

        Ok(Self {
            total_films,
            unexported_films,
            markers,
            jobs,
        })
    }

    /// Markers beyond one per exported film
    ///
    /// Non-zero only if a film was marked twice, which the eligibility
    /// filter normally prevents.
    pub fn duplicate_markers(&self) -> u64 {
        let exported = self.total_films.saturating_sub(self.unexported_films) as u64;
        self.markers.saturating_sub(exported)
    }
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking export status");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {}", e);
                return Ok(2);
            }
        };

        let storage = match create_storage(&config).await {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to connect to database");
                println!("   Error: {}", e);
                return Ok(4);
            }
        };

        let report = match StatusReport::collect(&storage, self.jobs).await {
            Ok(r) => r,
            Err(e) => {
                println!("❌ Failed to read export status");
                println!("   Error: {}", e);
                return Ok(5);
            }
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(0);
        }

        println!("📊 Export Status");
        println!();
        println!("  Films in catalog: {}", report.total_films);
        println!("  Not yet exported: {}", report.unexported_films);
        println!("  Export markers: {}", report.markers);
        if report.duplicate_markers() > 0 {
            println!(
                "  ⚠️  Duplicate markers: {}",
                report.duplicate_markers()
            );
        }
        println!();

        if report.jobs.is_empty() {
            println!("No export history found.");
            println!("Run 'filmo-batch export' to start exporting films.");
            return Ok(0);
        }

        println!(
            "{:<16} {:<10} {:<22} {:<22}",
            "Job ID", "Markers", "First Export", "Last Export"
        );
        println!("{}", "-".repeat(72));
        for job in &report.jobs {
            println!(
                "{:<16} {:<10} {:<22} {:<22}",
                job.job_id,
                job.markers,
                job.first_exported_at.format("%Y-%m-%d %H:%M:%S"),
                job.last_exported_at.format("%Y-%m-%d %H:%M:%S")
            );
        }
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::database::MarkerStore;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::{Film, FilmId, JobId, NewExportMarker};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_collect_report() {
        let store = Arc::new(InMemoryStore::with_films(vec![
            Film::new(1, "Alien", 1979),
            Film::new(2, "Brazil", 1985),
            Film::new(3, "Heat", 1995),
        ]));
        for (film, job) in [(1, 100), (2, 200)] {
            store
                .insert_marker(NewExportMarker::create(FilmId::new(film), JobId::new(job)))
                .await
                .unwrap();
        }

        let report = StatusReport::collect(&Storage::from_adapter(store), 1)
            .await
            .unwrap();

        assert_eq!(report.total_films, 3);
        assert_eq!(report.unexported_films, 1);
        assert_eq!(report.markers, 2);
        assert_eq!(report.jobs.len(), 1);
        assert_eq!(report.jobs[0].job_id, JobId::new(200));
        assert_eq!(report.duplicate_markers(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_markers_detected() {
        let store = Arc::new(InMemoryStore::with_films(vec![Film::new(1, "Alien", 1979)]));
        for job in [1, 2] {
            store
                .insert_marker(NewExportMarker::create(FilmId::new(1), JobId::new(job)))
                .await
                .unwrap();
        }

        let report = StatusReport::collect(&Storage::from_adapter(store), 10)
            .await
            .unwrap();
        assert_eq!(report.duplicate_markers(), 1);
    }
}
