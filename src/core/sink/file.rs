//! Append-only export file sink

use crate::domain::{ExportLine, Film, FilmoError, Result, SinkError};
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Appends one formatted line per film to the shared export file
///
/// The file is opened lazily on the first append, in append+create mode, and
/// the handle is kept for the rest of the run. Existing content is never
/// truncated.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    fsync: bool,
    dry_run: bool,
    file: Option<File>,
    lines_written: u64,
}

impl FileSink {
    /// Create a sink writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            fsync: false,
            dry_run: false,
            file: None,
            lines_written: 0,
        }
    }

    /// Call `sync_data` after every line and at every chunk boundary
    pub fn with_fsync(mut self, fsync: bool) -> Self {
        self.fsync = fsync;
        self
    }

    /// Format and log lines without touching the filesystem
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Target file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lines appended during this run
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Ensure the parent directory exists
    ///
    /// Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// Returns [`FilmoError::DirectoryCreation`] if the directory cannot be
    /// created.
    pub async fn prepare(&mut self) -> Result<()> {
        let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };

        if self.dry_run {
            tracing::info!(dir = %parent.display(), "DRY RUN: Would ensure export directory");
            return Ok(());
        }

        fs::create_dir_all(parent)
            .await
            .map_err(|e| FilmoError::DirectoryCreation {
                path: parent.display().to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(dir = %parent.display(), "Export directory ready");
        Ok(())
    }

    /// Append the export line for one film
    pub async fn append(&mut self, film: &Film) -> std::result::Result<(), SinkError> {
        let line = ExportLine::render(film);

        if self.dry_run {
            tracing::info!(film_id = %film.id, line = %line, "DRY RUN: Would append line");
            return Ok(());
        }

        let append_error = |e: std::io::Error| SinkError::Append {
            film_id: film.id.get(),
            message: e.to_string(),
        };

        let file = match self.file.take() {
            Some(file) => file,
            None => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)
                    .await
                    .map_err(append_error)?;
                tracing::debug!(path = %self.path.display(), "Opened export file");
                file
            }
        };
        let file = self.file.insert(file);

        file.write_all(line.as_bytes()).await.map_err(append_error)?;
        // write_all only queues the bytes; flush waits for the write and
        // reports its error before any marker is recorded
        file.flush().await.map_err(append_error)?;
        if self.fsync {
            file.sync_data().await.map_err(append_error)?;
        }
        self.lines_written += 1;
        Ok(())
    }

    /// Flush pending writes, and sync them to disk when `fsync` is set
    pub async fn flush(&mut self) -> std::result::Result<(), SinkError> {
        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };

        file.flush()
            .await
            .map_err(|e| SinkError::Flush(e.to_string()))?;

        if self.fsync {
            file.sync_data()
                .await
                .map_err(|e| SinkError::Flush(format!("sync_data failed: {}", e)))?;
        }

        Ok(())
    }

    /// Flush and release the file handle
    pub async fn close(&mut self) -> std::result::Result<(), SinkError> {
        let result = self.flush().await;
        self.file = None;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_prepare_creates_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a").join("b").join("films.csv");
        let mut sink = FileSink::new(&path);

        sink.prepare().await.unwrap();
        sink.prepare().await.unwrap();
        assert!(path.parent().unwrap().is_dir());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_prepare_fails_when_parent_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let mut sink = FileSink::new(blocker.join("films.csv"));
        let err = sink.prepare().await.unwrap_err();
        assert!(matches!(err, FilmoError::DirectoryCreation { .. }));
    }

    #[tokio::test]
    async fn test_append_writes_lines_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("films.csv");
        let mut sink = FileSink::new(&path);

        sink.append(&Film::new(7, "Matrix", 1999)).await.unwrap();
        sink.append(&Film::new(8, "Heat", 1995)).await.unwrap();
        sink.close().await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "7,Matrix,1999\n8,Heat,1995\n");
        assert_eq!(sink.lines_written(), 2);
    }

    #[tokio::test]
    async fn test_append_never_truncates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("films.csv");
        std::fs::write(&path, "1,Alien,1979\n").unwrap();

        let mut sink = FileSink::new(&path).with_fsync(true);
        sink.append(&Film::new(2, "Brazil", 1985)).await.unwrap();
        sink.flush().await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "1,Alien,1979\n2,Brazil,1985\n");
    }

    #[tokio::test]
    async fn test_append_line_is_written_before_returning() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("films.csv");
        let mut sink = FileSink::new(&path);

        sink.append(&Film::new(3, "Fargo", 1996)).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "3,Fargo,1996\n");
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_append_reports_write_error_for_its_own_film() {
        let mut sink = FileSink::new("/dev/full");

        let err = sink.append(&Film::new(4, "Alien", 1979)).await.unwrap_err();
        match err {
            SinkError::Append { film_id, .. } => assert_eq!(film_id, 4),
            other => panic!("expected append error, got {other:?}"),
        }
        assert_eq!(sink.lines_written(), 0);
    }

    #[tokio::test]
    async fn test_dry_run_touches_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("films.csv");
        let mut sink = FileSink::new(&path).with_dry_run(true);

        sink.prepare().await.unwrap();
        sink.append(&Film::new(1, "Alien", 1979)).await.unwrap();
        sink.close().await.unwrap();

        assert!(!path.parent().unwrap().exists());
        assert_eq!(sink.lines_written(), 0);
    }
}
