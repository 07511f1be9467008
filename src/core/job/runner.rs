//! Job runner - entry point for one export run
//!
//! Allocates the job id, takes the run-level lock, counts what is pending,
//! prepares the sinks, snapshots the eligible films and drives the
//! orchestrator once. Nothing is retried.

use crate::adapters::database::{FilmSource, MarkerStore, Storage};
use crate::config::ExportConfig;
use crate::core::export::{
    CancelHandle, ChunkOrchestrator, ChunkReader, FanoutWriter, RunState, RunSummary,
};
use crate::core::job::id::JobIdAllocator;
use crate::core::sink::{FileSink, MarkerSink, Sink};
use crate::domain::{FilmoError, JobRun, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Settings for one run
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Films per chunk
    pub chunk_size: usize,

    /// Export file path
    pub export_file: PathBuf,

    /// Sync the export file at each chunk boundary
    pub fsync: bool,

    /// Format and log only
    pub dry_run: bool,

    /// Run deadline, checked between chunks
    pub run_timeout: Option<Duration>,
}

impl RunnerConfig {
    /// Build from the `[export]` section
    pub fn from_export_config(export: &ExportConfig, dry_run: bool) -> Self {
        Self {
            chunk_size: export.chunk_size,
            export_file: export.export_file_path(),
            fsync: export.fsync,
            dry_run,
            run_timeout: (export.run_timeout_secs > 0)
                .then(|| Duration::from_secs(export.run_timeout_secs)),
        }
    }
}

/// Terminal result of one run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The run
    pub job: JobRun,

    /// Final orchestrator state
    pub state: RunState,

    /// What the run did
    pub summary: RunSummary,
}

impl RunOutcome {
    /// Whether the run completed
    pub fn is_completed(&self) -> bool {
        self.state == RunState::Completed
    }
}

/// Runs the export pipeline once per call
pub struct JobRunner {
    source: Arc<dyn FilmSource>,
    store: Arc<dyn MarkerStore>,
    config: RunnerConfig,
    allocator: &'static JobIdAllocator,
}

impl JobRunner {
    /// Create a runner over a catalog reader and a marker store
    pub fn new(
        source: Arc<dyn FilmSource>,
        store: Arc<dyn MarkerStore>,
        config: RunnerConfig,
    ) -> Self {
        Self {
            source,
            store,
            config,
            allocator: JobIdAllocator::process(),
        }
    }

    /// Create a runner from a [`Storage`] pair
    pub fn from_storage(storage: &Storage, config: RunnerConfig) -> Self {
        Self::new(storage.source.clone(), storage.markers.clone(), config)
    }

    /// Runner settings
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Execute one run
    ///
    /// Sink failures and cancellation end the run in [`RunState::Failed`]
    /// and are returned as a normal outcome.
    ///
    /// # Errors
    ///
    /// - [`FilmoError::RunLocked`] if another run holds the lock
    /// - [`FilmoError::SourceRead`] if the catalog cannot be read
    /// - [`FilmoError::DirectoryCreation`] if the export directory cannot be
    ///   created
    /// - [`FilmoError::Validation`] if the chunk size is zero
    pub async fn run(&self, cancel: CancelHandle) -> Result<RunOutcome> {
        let mut orchestrator = ChunkOrchestrator::new(self.config.chunk_size)?;
        let job = JobRun::start(self.allocator.allocate());
        let job_id = job.job_id;

        crate::log_run_start!(job_id, self.config.chunk_size, self.config.dry_run);

        let Some(lock) = self.store.try_acquire_run_lock(job_id).await? else {
            return Err(FilmoError::RunLocked(format!(
                "job {} could not take the run lock",
                job_id
            )));
        };

        let total_records = self.count_total().await?;

        let mut writer = self.build_writer();
        writer.prepare().await?;

        let mut reader = ChunkReader::open(self.source.as_ref()).await?;
        tracing::info!(
            job_id = %job_id,
            total = total_records,
            unexported = reader.len(),
            "Films pending export"
        );

        let cancel = match self.config.run_timeout {
            Some(timeout) => cancel.with_timeout(timeout),
            None => cancel,
        };

        let mut summary = orchestrator
            .run(&mut reader, &mut writer, job_id, &cancel)
            .await?;
        drop(lock);

        summary.total_records = total_records;
        summary.dry_run = self.config.dry_run;
        summary.log_summary();

        let state = orchestrator.state();
        crate::log_run_complete!(job_id, state, summary.records_exported, summary.duration);

        Ok(RunOutcome {
            job,
            state,
            summary,
        })
    }

    async fn count_total(&self) -> Result<usize> {
        self.source
            .count_all_records()
            .await
            .map(|total| total as usize)
            .map_err(|e| match e {
                FilmoError::SourceRead(_) => e,
                other => FilmoError::SourceRead(other.to_string()),
            })
    }

    fn build_writer(&self) -> FanoutWriter {
        let file = FileSink::new(&self.config.export_file)
            .with_fsync(self.config.fsync)
            .with_dry_run(self.config.dry_run);
        let marker = MarkerSink::new(self.store.clone()).with_dry_run(self.config.dry_run);

        FanoutWriter::new(vec![Sink::File(file), Sink::Marker(marker)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::core::export::FailureCause;
    use crate::domain::{Film, FilmId, JobId, NewExportMarker};
    use tempfile::TempDir;

    fn runner_config(dir: &TempDir) -> RunnerConfig {
        RunnerConfig {
            chunk_size: 3,
            export_file: dir.path().join("export").join("films.csv"),
            fsync: false,
            dry_run: false,
            run_timeout: None,
        }
    }

    fn store_with(n: i64) -> Arc<InMemoryStore> {
        Arc::new(InMemoryStore::with_films(
            (1..=n).map(|i| Film::new(i, format!("Film {i}"), 2001)),
        ))
    }

    #[test]
    fn test_runner_config_from_export_config() {
        let export = ExportConfig {
            run_timeout_secs: 30,
            ..ExportConfig::default()
        };
        let config = RunnerConfig::from_export_config(&export, true);
        assert_eq!(config.chunk_size, 3);
        assert!(config.dry_run);
        assert_eq!(config.run_timeout, Some(Duration::from_secs(30)));
        assert!(config.export_file.ends_with("films.csv"));

        let config = RunnerConfig::from_export_config(&ExportConfig::default(), false);
        assert_eq!(config.run_timeout, None);
    }

    #[tokio::test]
    async fn test_run_exports_everything() {
        let dir = TempDir::new().unwrap();
        let store = store_with(4);
        let runner = JobRunner::from_storage(
            &Storage::from_adapter(store.clone()),
            runner_config(&dir),
        );

        let outcome = runner.run(CancelHandle::none()).await.unwrap();

        assert!(outcome.is_completed());
        assert_eq!(outcome.summary.total_records, 4);
        assert_eq!(outcome.summary.records_exported, 4);
        assert_eq!(outcome.summary.chunks_processed(), 2);
        assert!(store
            .markers()
            .iter()
            .all(|m| m.job_id == outcome.job.job_id));
        assert!(!store.is_run_locked());
    }

    #[tokio::test]
    async fn test_total_counts_whole_catalog() {
        let dir = TempDir::new().unwrap();
        let store = store_with(4);
        store
            .insert_marker(NewExportMarker::create(FilmId::new(1), JobId::new(1)))
            .await
            .unwrap();
        let runner = JobRunner::from_storage(
            &Storage::from_adapter(store.clone()),
            runner_config(&dir),
        );

        let outcome = runner.run(CancelHandle::none()).await.unwrap();

        assert_eq!(outcome.summary.total_records, 4);
        assert_eq!(outcome.summary.records_exported, 3);
    }

    #[tokio::test]
    async fn test_held_lock_rejects_run() {
        let dir = TempDir::new().unwrap();
        let store = store_with(2);
        let _held = store
            .try_acquire_run_lock(JobId::new(1))
            .await
            .unwrap()
            .unwrap();
        let runner = JobRunner::from_storage(
            &Storage::from_adapter(store.clone()),
            runner_config(&dir),
        );

        let err = runner.run(CancelHandle::none()).await.unwrap_err();
        assert!(matches!(err, FilmoError::RunLocked(_)));
        assert!(store.markers().is_empty());
        assert!(!dir.path().join("export").exists());
    }

    #[tokio::test]
    async fn test_deadline_fails_run() {
        let dir = TempDir::new().unwrap();
        let store = store_with(2);
        let mut config = runner_config(&dir);
        config.run_timeout = Some(Duration::ZERO);
        let runner = JobRunner::from_storage(&Storage::from_adapter(store.clone()), config);

        let outcome = runner.run(CancelHandle::none()).await.unwrap();
        assert_eq!(outcome.state, RunState::Failed(FailureCause::DeadlineExceeded));
        assert!(store.markers().is_empty());
    }

    #[tokio::test]
    async fn test_consecutive_runs_get_distinct_ids() {
        let dir = TempDir::new().unwrap();
        let store = store_with(1);
        let runner = JobRunner::from_storage(
            &Storage::from_adapter(store.clone()),
            runner_config(&dir),
        );

        let first = runner.run(CancelHandle::none()).await.unwrap();
        let second = runner.run(CancelHandle::none()).await.unwrap();
        assert!(second.job.job_id > first.job.job_id);
        assert_eq!(second.summary.eligible_records, 0);
    }
}
