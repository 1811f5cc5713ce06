//! Selection policy: how many and which posts an export processes.

use thiserror::Error;

use crate::media::Post;

/// Initial like count meaning "no maximum found yet".
pub const NO_LIKES: i64 = -1;

/// Which part of a post collection to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Every post in the collection.
    All,
    /// The first N posts that produce output.
    First(usize),
    /// Only the post with the greatest like count.
    MostLiked,
}

impl Selection {
    /// Validated `First(n)` selection.
    pub fn first(requested: i64, total: u64) -> Result<Self, SelectionError> {
        validate_count(requested, total).map(Selection::First)
    }

    /// Whether `produced` output-producing posts already satisfy the selection.
    pub fn is_satisfied(&self, produced: usize) -> bool {
        matches!(self, Selection::First(limit) if produced >= *limit)
    }
}

/// Rejected user-supplied post count.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("{requested} is out of range (expected 1 to {total})")]
    OutOfRange { requested: i64, total: u64 },
}

/// Check a requested count against the number of available posts.
pub fn validate_count(requested: i64, total: u64) -> Result<usize, SelectionError> {
    if requested <= 0 || requested as u64 > total {
        return Err(SelectionError::OutOfRange { requested, total });
    }
    Ok(requested as usize)
}

/// Parse and validate a raw count typed by the user.
pub fn parse_count(raw: &str, total: u64) -> Result<usize, SelectionError> {
    let raw = raw.trim();
    let requested = raw
        .parse::<i64>()
        .map_err(|_| SelectionError::NotANumber(raw.to_string()))?;
    validate_count(requested, total)
}

/// Running maximum over a single pass of posts.
///
/// Only a strictly greater like count replaces the current best, so ties go
/// to the first post encountered.
#[derive(Debug)]
pub struct MostLikedTracker {
    best_likes: i64,
    best: Option<(usize, Post)>,
    seen: usize,
}

impl Default for MostLikedTracker {
    fn default() -> Self {
        Self {
            best_likes: NO_LIKES,
            best: None,
            seen: 0,
        }
    }
}

impl MostLikedTracker {
    pub fn offer(&mut self, post: Post) {
        let index = self.seen;
        self.seen += 1;
        if post.likes > self.best_likes {
            self.best_likes = post.likes;
            self.best = Some((index, post));
        }
    }

    /// Zero-based index and post of the winner, if any post beat the sentinel.
    pub fn into_winner(self) -> Option<(usize, Post)> {
        self.best
    }
}
