//! Remote data access.
//!
//! This module provides:
//! - Capability traits for profile/post sources and media fetching
//! - An Instagram web API client implementing them
//! - A plain HTTP media fetcher
//! - API response types

pub mod client;
pub mod fetcher;
pub mod source;
pub mod types;

pub use client::{ApiSettings, InstagramApi, PAGE_SIZE};
pub use fetcher::HttpFetcher;
pub use source::{FetchResponse, MediaFetcher, PostStream, ProfileSource};
