//! Output sinks accumulating export units.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::time::sleep;

use crate::api::MediaFetcher;
use crate::error::Result;
use crate::export::transform::Unit;
use crate::fs::naming::sanitize_filename;
use crate::output::ProgressReporter;

/// What happened to a single unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitOutcome {
    Written,
    Failed,
}

/// Destination for export units.
///
/// `accept` returns `Ok(UnitOutcome::Failed)` for failures limited to one
/// unit; an `Err` aborts the run.
#[async_trait]
pub trait Sink: Send {
    async fn accept(&mut self, unit: Unit) -> Result<UnitOutcome>;

    /// Flush and close. Returns the artifacts left on disk.
    async fn finish(&mut self) -> Result<Vec<PathBuf>>;
}

/// Line-delimited text file of links, flushed after every line.
pub struct LinkFileSink {
    path: PathBuf,
    file: Option<File>,
    lines: u64,
    remove_if_empty: bool,
}

impl LinkFileSink {
    /// Create (or truncate) the file at `path`.
    pub async fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).await?;
        tracing::debug!("Writing links to {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            file: Some(file),
            lines: 0,
            remove_if_empty: false,
        })
    }

    /// Delete the file on finish if no line was written.
    pub fn remove_if_empty(mut self) -> Self {
        self.remove_if_empty = true;
        self
    }

}

#[async_trait]
impl Sink for LinkFileSink {
    async fn accept(&mut self, unit: Unit) -> Result<UnitOutcome> {
        let link = match unit {
            Unit::Link(link) => link,
            Unit::Media { url, .. } => url,
        };

        let Some(file) = self.file.as_mut() else {
            return Ok(UnitOutcome::Failed);
        };

        file.write_all(link.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;
        self.lines += 1;

        Ok(UnitOutcome::Written)
    }

    async fn finish(&mut self) -> Result<Vec<PathBuf>> {
        let Some(mut file) = self.file.take() else {
            return Ok(Vec::new());
        };
        file.flush().await?;
        drop(file);

        if self.remove_if_empty && self.lines == 0 {
            tokio::fs::remove_file(&self.path).await?;
            tracing::debug!("Removed empty link file {}", self.path.display());
            return Ok(Vec::new());
        }

        Ok(vec![self.path.clone()])
    }
}

/// Fetches each media unit and saves it into a directory.
pub struct DownloadSink<'f, F: MediaFetcher + ?Sized> {
    fetcher: &'f F,
    dir: PathBuf,
    delay_ms: (u64, u64),
    show_downloads: bool,
    progress: Option<ProgressReporter>,
    attempts: u64,
    written: Vec<PathBuf>,
}

impl<'f, F: MediaFetcher + ?Sized> DownloadSink<'f, F> {
    /// Create the sink, creating `dir` if it does not exist yet.
    pub async fn create(fetcher: &'f F, dir: &Path) -> Result<Self> {
        tokio::fs::create_dir_all(dir).await?;
        Ok(Self {
            fetcher,
            dir: dir.to_path_buf(),
            delay_ms: (0, 0),
            show_downloads: true,
            progress: None,
            attempts: 0,
            written: Vec::new(),
        })
    }

    /// Random pause (milliseconds, inclusive range) between downloads.
    pub fn with_delay(mut self, delay_ms: (u64, u64)) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_show_downloads(mut self, show: bool) -> Self {
        self.show_downloads = show;
        self
    }

    /// Bar to clear while log lines are printed.
    pub fn with_progress(mut self, progress: ProgressReporter) -> Self {
        self.progress = Some(progress);
        self
    }

    fn log<L: FnOnce()>(&self, line: L) {
        match &self.progress {
            Some(progress) => progress.suspend(line),
            None => line(),
        }
    }

    async fn pause(&self) {
        let (low, high) = self.delay_ms;
        if high == 0 || self.attempts == 0 {
            return;
        }
        let delay = rand::thread_rng().gen_range(low.min(high)..=high);
        sleep(Duration::from_millis(delay)).await;
    }
}

#[async_trait]
impl<'f, F: MediaFetcher + ?Sized> Sink for DownloadSink<'f, F> {
    async fn accept(&mut self, unit: Unit) -> Result<UnitOutcome> {
        let (url, file_name) = match unit {
            Unit::Media { url, file_name } => (url, file_name),
            Unit::Link(link) => {
                tracing::warn!("No destination for link unit: {}", link);
                return Ok(UnitOutcome::Failed);
            }
        };

        let output_path = self.dir.join(sanitize_filename(&file_name)?);

        self.pause().await;
        self.attempts += 1;

        let response = self.fetcher.get(&url).await?;
        if !response.is_success() {
            self.log(|| {
                tracing::warn!(
                    "Failed to download content from: {} (HTTP {})",
                    url,
                    response.status
                )
            });
            return Ok(UnitOutcome::Failed);
        }

        save_atomically(&output_path, &response.bytes).await?;

        if self.show_downloads {
            self.log(|| tracing::info!("Download complete: {}", output_path.display()));
        }
        self.written.push(output_path);

        Ok(UnitOutcome::Written)
    }

    async fn finish(&mut self) -> Result<Vec<PathBuf>> {
        Ok(std::mem::take(&mut self.written))
    }
}

/// Write `bytes` to `<path>.part` and rename it into place, so a failed
/// write never leaves a truncated file under the final name.
async fn save_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut partial = path.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);

    let result = write_and_rename(&partial, path, bytes).await;
    if result.is_err() {
        if let Err(e) = tokio::fs::remove_file(&partial).await {
            tracing::debug!("Could not remove {}: {}", partial.display(), e);
        }
    }
    result
}

async fn write_and_rename(partial: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(partial).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    drop(file);
    tokio::fs::rename(partial, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FetchResponse;
    use crate::output::BarOptions;

    struct StatusFetcher(u16);

    #[async_trait]
    impl MediaFetcher for StatusFetcher {
        async fn get(&self, url: &str) -> Result<FetchResponse> {
            Ok(FetchResponse {
                status: self.0,
                bytes: url.as_bytes().to_vec(),
            })
        }
    }

    #[test]
    fn test_link_sink_writes_lines() {
        tokio_test::block_on(async {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("links.txt");

            let mut sink = LinkFileSink::create(&path).await.unwrap();
            sink.accept(Unit::Link("https://a".into())).await.unwrap();
            sink.accept(Unit::Link("https://b".into())).await.unwrap();
            let artifacts = sink.finish().await.unwrap();

            assert_eq!(artifacts, vec![path.clone()]);
            assert_eq!(
                std::fs::read_to_string(&path).unwrap(),
                "https://a\nhttps://b\n"
            );
        });
    }

    #[test]
    fn test_link_sink_truncates_existing_file() {
        tokio_test::block_on(async {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("links.txt");
            std::fs::write(&path, "stale\n").unwrap();

            let mut sink = LinkFileSink::create(&path).await.unwrap();
            sink.accept(Unit::Link("fresh".into())).await.unwrap();
            sink.finish().await.unwrap();

            assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh\n");
        });
    }

    #[test]
    fn test_link_sink_removes_empty_file() {
        tokio_test::block_on(async {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("tagged.txt");

            let mut sink = LinkFileSink::create(&path).await.unwrap().remove_if_empty();
            assert!(path.exists());
            let artifacts = sink.finish().await.unwrap();

            assert!(artifacts.is_empty());
            assert!(!path.exists());
        });
    }

    #[test]
    fn test_download_sink_reports_failed_status() {
        tokio_test::block_on(async {
            let dir = tempfile::tempdir().unwrap();
            let fetcher = StatusFetcher(404);
            let mut sink = DownloadSink::create(&fetcher, dir.path()).await.unwrap();

            let outcome = sink
                .accept(Unit::Media {
                    url: "https://cdn/missing.jpg".into(),
                    file_name: "post_number_1.png".into(),
                })
                .await
                .unwrap();

            assert_eq!(outcome, UnitOutcome::Failed);
            assert!(!dir.path().join("post_number_1.png").exists());
        });
    }

    #[test]
    fn test_download_sink_writes_bytes() {
        tokio_test::block_on(async {
            let dir = tempfile::tempdir().unwrap();
            let target = dir.path().join("nested");
            let fetcher = StatusFetcher(200);
            let mut sink = DownloadSink::create(&fetcher, &target)
                .await
                .unwrap()
                .with_show_downloads(false);

            sink.accept(Unit::Media {
                url: "bytes".into(),
                file_name: "post_number_1.png".into(),
            })
            .await
            .unwrap();

            let written = target.join("post_number_1.png");
            assert_eq!(sink.finish().await.unwrap(), vec![written.clone()]);
            assert_eq!(std::fs::read(&written).unwrap(), b"bytes");
        });
    }

    #[test]
    fn test_download_sink_leaves_no_partial_file_on_write_error() {
        tokio_test::block_on(async {
            let dir = tempfile::tempdir().unwrap();
            // A non-empty directory under the target name makes the final rename fail
            std::fs::create_dir_all(dir.path().join("post_number_1.png/occupied")).unwrap();
            let fetcher = StatusFetcher(200);
            let mut sink = DownloadSink::create(&fetcher, dir.path())
                .await
                .unwrap()
                .with_show_downloads(false);

            let result = sink
                .accept(Unit::Media {
                    url: "bytes".into(),
                    file_name: "post_number_1.png".into(),
                })
                .await;

            assert!(result.is_err());
            assert!(!dir.path().join("post_number_1.png.part").exists());
            assert!(dir.path().join("post_number_1.png").is_dir());
            assert!(sink.finish().await.unwrap().is_empty());
        });
    }

    #[test]
    fn test_download_sink_logs_through_progress_bar() {
        tokio_test::block_on(async {
            let dir = tempfile::tempdir().unwrap();
            let fetcher = StatusFetcher(200);
            let progress = ProgressReporter::new(Some(1), &BarOptions::default().hidden());
            let mut sink = DownloadSink::create(&fetcher, dir.path())
                .await
                .unwrap()
                .with_progress(progress.clone());

            let outcome = sink
                .accept(Unit::Media {
                    url: "bytes".into(),
                    file_name: "post_number_1.png".into(),
                })
                .await
                .unwrap();

            assert_eq!(outcome, UnitOutcome::Written);
            assert_eq!(progress.position(), 0);
            assert!(!dir.path().join("post_number_1.png.part").exists());
            assert_eq!(
                std::fs::read(dir.path().join("post_number_1.png")).unwrap(),
                b"bytes"
            );
        });
    }

    #[test]
    fn test_download_sink_rejects_traversal() {
        tokio_test::block_on(async {
            let dir = tempfile::tempdir().unwrap();
            let fetcher = StatusFetcher(200);
            let mut sink = DownloadSink::create(&fetcher, dir.path()).await.unwrap();

            let result = sink
                .accept(Unit::Media {
                    url: "x".into(),
                    file_name: "../escape.png".into(),
                })
                .await;
            assert!(result.is_err());
        });
    }
}
