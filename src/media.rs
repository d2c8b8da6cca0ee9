// src/media.rs

//! Image library backed by a media directory
//!
//! Downloads happen at most once per filename: an `images` row with the
//! same title short-circuits the fetch, so re-running an import does not
//! re-download anything.

use crate::db::models::Image;
use crate::error::{Error, Result};
use crate::text;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Downloads and stores images referenced by source records
pub struct MediaStore {
    dir: PathBuf,
    client: reqwest::blocking::Client,
}

impl MediaStore {
    /// Create a media store rooted at `dir`, creating the directory if
    /// needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { dir, client })
    }

    /// Directory holding the image files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Look for an existing image with the same filename, otherwise
    /// download and store it.
    ///
    /// A URL with no derivable filename and a non-success HTTP status
    /// are both logged and yield `None` so the record imports without
    /// its image. A payload that is not a valid image is an error.
    pub fn get_or_fetch(&self, conn: &Connection, url: &str) -> Result<Option<Image>> {
        let Some(filename) = text::filename_from_url(url) else {
            warn!("No filename in image URL: {}", url);
            return Ok(None);
        };

        // See if an image with the same name exists
        if let Some(existing) = Image::find_by_title(conn, &filename)? {
            return Ok(Some(existing));
        }

        // Otherwise download
        info!("Downloading {}", url);
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            warn!("Error {} downloading: {}", response.status(), url);
            return Ok(None);
        }

        let bytes = response.bytes()?;

        // Check it's a valid image before keeping it
        image::load_from_memory(&bytes).map_err(|e| Error::Image {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        std::fs::write(self.dir.join(&filename), &bytes)?;

        let mut stored = Image::new(filename.clone(), filename);
        stored.insert(conn)?;
        Ok(Some(stored))
    }
}
