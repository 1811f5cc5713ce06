//! Export pipeline: drives a post stream through a transform into a sink.

use futures::StreamExt;

use crate::api::PostStream;
use crate::error::{Error, Result};
use crate::export::selection::{MostLikedTracker, Selection};
use crate::export::sink::{Sink, UnitOutcome};
use crate::export::summary::ExportSummary;
use crate::export::transform::{Transform, Transformed};
use crate::output::ProgressReporter;

/// Run one export.
///
/// Posts are pulled one at a time and the next post is only requested once
/// the current one has been fully written. An error from the stream or the
/// sink aborts the run with [`Error::PartialExport`]; the sink is still
/// finished so everything written so far stays on disk.
pub async fn run<T, S>(
    mut posts: PostStream<'_>,
    selection: Selection,
    transform: &mut T,
    sink: &mut S,
    progress: &ProgressReporter,
) -> Result<ExportSummary>
where
    T: Transform + ?Sized,
    S: Sink + ?Sized,
{
    let mut summary = ExportSummary::default();

    let outcome = match selection {
        Selection::MostLiked => {
            drive_most_liked(&mut posts, transform, sink, progress, &mut summary).await
        }
        Selection::All | Selection::First(_) => {
            drive(&mut posts, selection, transform, sink, progress, &mut summary).await
        }
    };
    progress.finish();

    match outcome {
        Ok(()) => {
            summary.artifacts = sink.finish().await?;
            tracing::debug!(
                "Export finished: {} written, {} failed, {} skipped",
                summary.units,
                summary.failures,
                summary.skipped
            );
            Ok(summary)
        }
        Err(e) => {
            if let Err(close_err) = sink.finish().await {
                tracing::warn!("Failed to close export output: {}", close_err);
            }
            Err(Error::partial(summary.units, e))
        }
    }
}

async fn drive<T, S>(
    posts: &mut PostStream<'_>,
    selection: Selection,
    transform: &mut T,
    sink: &mut S,
    progress: &ProgressReporter,
    summary: &mut ExportSummary,
) -> Result<()>
where
    T: Transform + ?Sized,
    S: Sink + ?Sized,
{
    let mut producing_posts = 0usize;

    // Check before pulling so nothing past the limit is fetched
    while !selection.is_satisfied(producing_posts) {
        let Some(post) = posts.next().await else {
            break;
        };
        let post = post?;
        progress.inc();
        summary.posts_seen += 1;

        let transformed = transform.apply(&post);
        if transformed.units.is_empty() {
            summary.skipped += transformed.skipped;
            progress.suspend(|| {
                tracing::info!(
                    "Cannot download post {} because it is not an image",
                    post.shortcode
                )
            });
            continue;
        }

        producing_posts += 1;
        emit(transformed, sink, summary).await?;
    }

    Ok(())
}

async fn drive_most_liked<T, S>(
    posts: &mut PostStream<'_>,
    transform: &mut T,
    sink: &mut S,
    progress: &ProgressReporter,
    summary: &mut ExportSummary,
) -> Result<()>
where
    T: Transform + ?Sized,
    S: Sink + ?Sized,
{
    let mut tracker = MostLikedTracker::default();

    while let Some(post) = posts.next().await {
        let post = post?;
        progress.inc();
        summary.posts_seen += 1;
        tracker.offer(post);
    }

    let Some((index, post)) = tracker.into_winner() else {
        tracing::info!("No posts with a like count found");
        return Ok(());
    };

    tracing::info!(
        "Most liked post: {} ({} likes, #{} in feed)",
        post.shortcode,
        post.likes,
        index + 1
    );
    emit(transform.apply(&post), sink, summary).await
}

async fn emit<S: Sink + ?Sized>(
    transformed: Transformed,
    sink: &mut S,
    summary: &mut ExportSummary,
) -> Result<()> {
    summary.skipped += transformed.skipped;
    for unit in transformed.units {
        match sink.accept(unit).await? {
            UnitOutcome::Written => summary.record_written(),
            UnitOutcome::Failed => summary.record_failure(),
        }
    }
    Ok(())
}
