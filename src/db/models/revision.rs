// src/db/models/revision.rs

//! Revision model: content snapshots for pages
//!
//! Every imported page gets a revision holding a JSON snapshot of its
//! fields. Publishing a revision stamps `published_at` and marks the
//! page live.

use crate::db::models::Page;
use crate::error::Result;
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde_json::json;

/// A content snapshot for one page
#[derive(Debug, Clone)]
pub struct Revision {
    pub id: Option<i64>,
    pub page_id: i64,
    /// JSON snapshot of the page fields at revision time
    pub content: String,
    pub created_at: Option<String>,
    pub published_at: Option<String>,
}

impl Revision {
    pub fn new(page_id: i64, content: String) -> Self {
        Self {
            id: None,
            page_id,
            content,
            created_at: None,
            published_at: None,
        }
    }

    /// Snapshot a page's current fields into a new (unsaved) revision
    pub fn for_page(page: &Page) -> Result<Self> {
        let page_id = page.id.ok_or_else(|| {
            crate::error::Error::Validation("cannot snapshot an unsaved page".to_string())
        })?;
        let extra: serde_json::Value = match &page.extra {
            Some(raw) => serde_json::from_str(raw)?,
            None => serde_json::Value::Null,
        };
        let content = serde_json::to_string(&json!({
            "content_type": page.content_type,
            "title": page.title,
            "slug": page.slug,
            "body": page.body,
            "legacy_id": page.legacy_id,
            "legacy_url": page.legacy_url,
            "image_id": page.image_id,
            "first_published_at": page.first_published_at,
            "extra": extra,
        }))?;
        Ok(Revision::new(page_id, content))
    }

    /// Insert this revision into the database
    pub fn insert(&mut self, conn: &Connection) -> Result<i64> {
        conn.execute(
            "INSERT INTO revisions (page_id, content) VALUES (?1, ?2)",
            params![self.page_id, &self.content],
        )?;
        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    /// Publish this revision: stamp it and flip the page live
    pub fn publish(&mut self, conn: &Connection) -> Result<()> {
        conn.execute(
            "UPDATE revisions SET published_at = CURRENT_TIMESTAMP WHERE id = ?1",
            params![self.id],
        )?;
        conn.execute(
            "UPDATE pages SET live = 1 WHERE id = ?1",
            params![self.page_id],
        )?;
        self.published_at = conn
            .query_row(
                "SELECT published_at FROM revisions WHERE id = ?1",
                params![self.id],
                |row| row.get(0),
            )
            .optional()?
            .flatten();
        Ok(())
    }

    /// All revisions for a page, oldest first
    pub fn list_for_page(conn: &Connection, page_id: i64) -> Result<Vec<Revision>> {
        let mut stmt = conn.prepare(
            "SELECT id, page_id, content, created_at, published_at
             FROM revisions WHERE page_id = ?1 ORDER BY id",
        )?;
        let revisions = stmt
            .query_map(params![page_id], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(revisions)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Revision> {
        Ok(Revision {
            id: row.get(0)?,
            page_id: row.get(1)?,
            content: row.get(2)?,
            created_at: row.get(3)?,
            published_at: row.get(4)?,
        })
    }
}
