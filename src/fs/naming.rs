//! Filename generation and validation.

use crate::error::{Error, Result};

/// File receiving the single most-liked post.
pub const MOST_LIKED_FILE_NAME: &str = "mostLikedPost.png";

/// Link export file name for a handle.
pub fn links_file_name(handle: &str) -> String {
    format!("{}LinksToPosts.txt", handle)
}

/// Tagged-post link export file name for a handle.
pub fn tagged_links_file_name(handle: &str) -> String {
    format!("{}TaggedPostLinks.txt", handle)
}

/// File name for a single-image post with 1-based ordinal `post`.
pub fn post_file_name(post: u64) -> String {
    format!("post_number_{}.png", post)
}

/// File name for carousel entry `item` (1-based) of post `post`.
///
/// The two ordinals are concatenated without a separator, so post 1 item 12
/// and post 11 item 2 share a name.
pub fn carousel_file_name(post: u64, item: u64) -> String {
    format!("post_number_{}{}.png", post, item)
}

/// Validate and sanitize a filename by removing or replacing invalid characters.
///
/// Returns an error if the filename contains path traversal patterns.
pub fn sanitize_filename(name: &str) -> Result<String> {
    // Reject path traversal attempts
    if name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in filename: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed in filename: '{}'",
            name
        )));
    }

    let sanitized = replace_reserved(name, &[':', '*', '?', '"', '<', '>', '|']);

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Filename cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}

/// Sanitize a handle used as a directory or file-name prefix.
///
/// Separators are replaced rather than rejected; traversal is still an error.
pub fn sanitize_path_component(name: &str) -> Result<String> {
    if name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed: '{}'",
            name
        )));
    }

    let sanitized = replace_reserved(name, &['/', '\\', ':', '*', '?', '"', '<', '>', '|']);

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Path component cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}

fn replace_reserved(name: &str, reserved: &[char]) -> String {
    name.chars()
        .map(|c| {
            if reserved.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect()
}
