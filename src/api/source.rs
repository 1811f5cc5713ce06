//! Capability traits for the remote data source and byte fetching.
//!
//! The export pipeline only talks to these traits, so any concrete source
//! (the Instagram web client, an in-memory test double) can drive it.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::Result;
use crate::media::{Post, Profile};

/// Lazy, single-pass sequence of posts. Each item may fail independently
/// (a page fetch error mid-pagination).
pub type PostStream<'a> = BoxStream<'a, Result<Post>>;

/// Source of profile metadata and post collections.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Look up a profile by handle. Returns `Error::NotFound` if it does not exist.
    async fn fetch_profile(&self, handle: &str) -> Result<Profile>;

    /// Posts owned by the profile, newest first.
    fn posts<'a>(&'a self, profile: &'a Profile) -> PostStream<'a>;

    /// Posts in which the profile is tagged.
    fn tagged_posts<'a>(&'a self, profile: &'a Profile) -> PostStream<'a>;
}

/// Outcome of a single byte fetch.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub bytes: Vec<u8>,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking-style GET of a media URL.
///
/// Non-success statuses are returned as data; only transport failures are errors.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchResponse>;
}
