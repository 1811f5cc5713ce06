//! Menu-level export operations.
//!
//! Every operation checks profile visibility before touching the
//! filesystem, so a private profile never leaves files or directories
//! behind. Concurrent runs against the same output directory are not
//! coordinated and may overwrite each other's files.

use std::path::PathBuf;

use crate::api::{MediaFetcher, ProfileSource};
use crate::error::Result;
use crate::export::pipeline::run;
use crate::export::selection::{validate_count, Selection};
use crate::export::sink::{DownloadSink, LinkFileSink};
use crate::export::summary::ExportSummary;
use crate::export::transform::{ImageTransform, LinkTransform, MostLikedTransform};
use crate::fs::paths::{links_file_path, profile_folder, tagged_links_file_path};
use crate::media::Profile;
use crate::output::{BarOptions, ProgressReporter};

/// Settings shared by all export operations.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Base directory receiving link files and per-profile folders.
    pub output_dir: PathBuf,
    /// Progress bar appearance.
    pub bar: BarOptions,
    /// Random pause between downloads, in milliseconds.
    pub download_delay_ms: (u64, u64),
    /// Log every saved file.
    pub show_downloads: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            bar: BarOptions::default(),
            download_delay_ms: (0, 0),
            show_downloads: true,
        }
    }
}

impl ExportOptions {
    fn progress(&self, total: Option<u64>, prefix: &str, suffix: &str) -> ProgressReporter {
        let options = self.bar.clone().with_prefix(prefix).with_suffix(suffix);
        ProgressReporter::new(total, &options)
    }
}

/// Store links to every post in `<handle>LinksToPosts.txt`.
pub async fn export_links<P>(
    source: &P,
    profile: &Profile,
    options: &ExportOptions,
) -> Result<ExportSummary>
where
    P: ProfileSource + ?Sized,
{
    profile.ensure_public()?;

    let path = links_file_path(&options.output_dir, &profile.handle)?;
    let mut sink = LinkFileSink::create(&path).await?;
    let progress = options.progress(Some(profile.post_count), "Link to post", "written to file");

    run(
        source.posts(profile),
        Selection::All,
        &mut LinkTransform::Expanded,
        &mut sink,
        &progress,
    )
    .await
}

/// Download the images of the latest `count` image posts into `<handle>/`.
pub async fn download_posts<P, F>(
    source: &P,
    fetcher: &F,
    profile: &Profile,
    count: usize,
    options: &ExportOptions,
) -> Result<ExportSummary>
where
    P: ProfileSource + ?Sized,
    F: MediaFetcher + ?Sized,
{
    profile.ensure_public()?;
    let count = validate_count(count as i64, profile.post_count)?;

    let dir = profile_folder(&options.output_dir, &profile.handle)?;
    let progress = options.progress(Some(count as u64), "Downloading posts", "");
    let mut sink = DownloadSink::create(fetcher, &dir)
        .await?
        .with_delay(options.download_delay_ms)
        .with_show_downloads(options.show_downloads)
        .with_progress(progress.clone());

    run(
        source.posts(profile),
        Selection::First(count),
        &mut ImageTransform::default(),
        &mut sink,
        &progress,
    )
    .await
}

/// Scan every post and download the one with the most likes to
/// `<handle>/mostLikedPost.png`.
pub async fn download_most_liked<P, F>(
    source: &P,
    fetcher: &F,
    profile: &Profile,
    options: &ExportOptions,
) -> Result<ExportSummary>
where
    P: ProfileSource + ?Sized,
    F: MediaFetcher + ?Sized,
{
    profile.ensure_public()?;

    let dir = profile_folder(&options.output_dir, &profile.handle)?;
    let progress = options.progress(Some(profile.post_count), "Scanning posts", "");
    let mut sink = DownloadSink::create(fetcher, &dir)
        .await?
        .with_show_downloads(options.show_downloads)
        .with_progress(progress.clone());

    run(
        source.posts(profile),
        Selection::MostLiked,
        &mut MostLikedTransform,
        &mut sink,
        &progress,
    )
    .await
}

/// Store links to posts the profile is tagged in. The file is removed again
/// when there are none.
pub async fn export_tagged_links<P>(
    source: &P,
    profile: &Profile,
    options: &ExportOptions,
) -> Result<ExportSummary>
where
    P: ProfileSource + ?Sized,
{
    profile.ensure_public()?;

    let path = tagged_links_file_path(&options.output_dir, &profile.handle)?;
    let mut sink = LinkFileSink::create(&path).await?.remove_if_empty();
    let progress = options.progress(None, "Tagged posts", "");

    run(
        source.tagged_posts(profile),
        Selection::All,
        &mut LinkTransform::PostUrl,
        &mut sink,
        &progress,
    )
    .await
}
