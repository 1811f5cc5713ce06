//! Per-post transforms producing output units.

use crate::fs::naming::{carousel_file_name, post_file_name, MOST_LIKED_FILE_NAME};
use crate::media::Post;

/// One unit of export output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unit {
    /// A link written as one line of a text file.
    Link(String),
    /// A media item fetched and saved under `file_name`.
    Media { url: String, file_name: String },
}

/// Result of transforming one post.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Transformed {
    pub units: Vec<Unit>,
    /// Video entries filtered out of this post.
    pub skipped: u64,
}

/// Maps one post to zero or more ordered units.
pub trait Transform {
    fn apply(&mut self, post: &Post) -> Transformed;
}

/// Link extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTransform {
    /// One link per carousel entry, or the primary URL for single posts.
    Expanded,
    /// Always the primary URL.
    PostUrl,
}

impl Transform for LinkTransform {
    fn apply(&mut self, post: &Post) -> Transformed {
        let units = match self {
            LinkTransform::Expanded if post.is_carousel() => post
                .sub_items
                .iter()
                .map(|item| Unit::Link(item.url.clone()))
                .collect(),
            _ => vec![Unit::Link(post.url.clone())],
        };
        Transformed { units, skipped: 0 }
    }
}

/// Image-only download naming.
///
/// Post ordinals start at 1 and advance only for posts that produce at
/// least one file.
#[derive(Debug)]
pub struct ImageTransform {
    next_ordinal: u64,
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self { next_ordinal: 1 }
    }
}

impl Transform for ImageTransform {
    fn apply(&mut self, post: &Post) -> Transformed {
        if post.is_video {
            return Transformed {
                units: Vec::new(),
                skipped: 1,
            };
        }

        let ordinal = self.next_ordinal;
        let mut out = Transformed::default();

        if post.is_carousel() {
            let mut sub_ordinal = 1;
            for item in &post.sub_items {
                if item.is_video {
                    out.skipped += 1;
                    continue;
                }
                out.units.push(Unit::Media {
                    url: item.url.clone(),
                    file_name: carousel_file_name(ordinal, sub_ordinal),
                });
                sub_ordinal += 1;
            }
        } else {
            out.units.push(Unit::Media {
                url: post.url.clone(),
                file_name: post_file_name(ordinal),
            });
        }

        if !out.units.is_empty() {
            self.next_ordinal += 1;
        }
        out
    }
}

/// The primary media of the most-liked post.
#[derive(Debug, Default)]
pub struct MostLikedTransform;

impl Transform for MostLikedTransform {
    fn apply(&mut self, post: &Post) -> Transformed {
        Transformed {
            units: vec![Unit::Media {
                url: post.url.clone(),
                file_name: MOST_LIKED_FILE_NAME.to_string(),
            }],
            skipped: 0,
        }
    }
}
