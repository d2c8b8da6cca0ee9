// src/db/paths.rs
//! Centralized path derivation for porter directories

use std::path::{Path, PathBuf};

/// Get the directory containing the database
pub fn db_dir(db_path: &str) -> PathBuf {
    Path::new(db_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf()
}

/// Get the media directory for downloaded image files
pub fn media_dir(db_path: &str) -> PathBuf {
    std::env::var("PORTER_MEDIA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| db_dir(db_path).join("media"))
}
