//! Insta Scraper - interactive Instagram profile exporter
//!
//! This library provides the export pipeline behind the `insta-scraper` CLI.
//!
//! # Features
//!
//! - Print profile information
//! - Store links to every post in a text file
//! - Download the images of the latest N posts
//! - Download the most liked post
//! - Store links to posts a profile is tagged in
//! - Console progress bars with elapsed time
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use insta_scraper::{export_links, Config, InstagramApi, ProfileSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("config.toml"))?;
//!     let api = InstagramApi::new(config.api_settings())?;
//!
//!     let profile = api.fetch_profile("nasa").await?;
//!     let summary = export_links(&api, &profile, &config.export_options()).await?;
//!     println!("{} links written", summary.units);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod fs;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::{FetchResponse, HttpFetcher, InstagramApi, MediaFetcher, PostStream, ProfileSource};
pub use config::Config;
pub use error::{Error, Result};
pub use export::{
    download_most_liked, download_posts, export_links, export_tagged_links, ExportOptions,
    ExportSummary, Selection, SelectionError,
};
pub use media::{MediaRef, Post, Profile};
