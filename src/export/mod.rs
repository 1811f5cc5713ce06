//! Export module.
//!
//! This module provides:
//! - Selection policy and count validation
//! - Per-post transforms (links, images, most-liked)
//! - Output sinks (link files, downloaded media)
//! - The export pipeline and the menu-level operations built on it

pub mod operations;
pub mod pipeline;
pub mod selection;
pub mod sink;
pub mod summary;
pub mod transform;

pub use operations::{
    download_most_liked, download_posts, export_links, export_tagged_links, ExportOptions,
};
pub use pipeline::run;
pub use selection::{parse_count, validate_count, Selection, SelectionError};
pub use sink::{DownloadSink, LinkFileSink, Sink, UnitOutcome};
pub use summary::ExportSummary;
pub use transform::{ImageTransform, LinkTransform, MostLikedTransform, Transform, Unit};
