// src/db/models/image.rs

//! Image model: the image library
//!
//! One row per downloaded media file. The title is the filename taken
//! from the source URL and doubles as the dedup key: an import that sees
//! the same filename twice downloads it once.

use crate::db::constraint_to_validation;
use crate::error::Result;
use rusqlite::{Connection, OptionalExtension, Row, params};

/// A stored image
#[derive(Debug, Clone)]
pub struct Image {
    pub id: Option<i64>,
    /// Filename from the source URL; unique across the library
    pub title: String,
    /// File location relative to the media directory
    pub file: String,
    pub created_at: Option<String>,
}

impl Image {
    pub fn new(title: String, file: String) -> Self {
        Self {
            id: None,
            title,
            file,
            created_at: None,
        }
    }

    /// Insert this image into the database
    pub fn insert(&mut self, conn: &Connection) -> Result<i64> {
        conn.execute(
            "INSERT INTO images (title, file) VALUES (?1, ?2)",
            params![&self.title, &self.file],
        )
        .map_err(|e| constraint_to_validation(e, "image insert"))?;
        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    /// Look up an existing image by title
    pub fn find_by_title(conn: &Connection, title: &str) -> Result<Option<Image>> {
        let image = conn
            .query_row(
                "SELECT id, title, file, created_at FROM images WHERE title = ?1",
                params![title],
                Self::from_row,
            )
            .optional()?;
        Ok(image)
    }

    /// All images, oldest first
    pub fn list_all(conn: &Connection) -> Result<Vec<Image>> {
        let mut stmt =
            conn.prepare("SELECT id, title, file, created_at FROM images ORDER BY id")?;
        let images = stmt
            .query_map([], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(images)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Image> {
        Ok(Image {
            id: row.get(0)?,
            title: row.get(1)?,
            file: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}
