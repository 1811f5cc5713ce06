//! Output path management.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs::naming::{links_file_name, sanitize_path_component, tagged_links_file_name};

/// Per-profile download folder: `<base>/<handle>`.
pub fn profile_folder(base: &Path, handle: &str) -> Result<PathBuf> {
    Ok(base.join(sanitize_path_component(handle)?))
}

/// `<base>/<handle>LinksToPosts.txt`.
pub fn links_file_path(base: &Path, handle: &str) -> Result<PathBuf> {
    let handle = sanitize_path_component(handle)?;
    Ok(base.join(links_file_name(&handle)))
}

/// `<base>/<handle>TaggedPostLinks.txt`.
pub fn tagged_links_file_path(base: &Path, handle: &str) -> Result<PathBuf> {
    let handle = sanitize_path_component(handle)?;
    Ok(base.join(tagged_links_file_name(&handle)))
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
