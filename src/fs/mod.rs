//! Filesystem module.
//!
//! Provides:
//! - Output path management
//! - Artifact file naming and sanitizing

pub mod naming;
pub mod paths;

pub use naming::{
    carousel_file_name, links_file_name, post_file_name, sanitize_filename,
    tagged_links_file_name, MOST_LIKED_FILE_NAME,
};
pub use paths::{ensure_dir, links_file_path, profile_folder, tagged_links_file_path};
