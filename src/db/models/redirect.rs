// src/db/models/redirect.rs

//! Redirect model: legacy URLs pointing at imported pages
//!
//! Each imported page that carried a URL in the legacy system gets a
//! redirect, so old links keep resolving after the migration.

use crate::error::Result;
use rusqlite::{Connection, OptionalExtension, Row, params};

/// A redirect from a legacy URL to a page in the store
#[derive(Debug, Clone)]
pub struct Redirect {
    pub id: Option<i64>,
    /// The legacy URL being redirected from
    pub old_path: String,
    /// The page being redirected to
    pub page_id: i64,
    pub created_at: Option<String>,
}

impl Redirect {
    pub fn new(old_path: String, page_id: i64) -> Self {
        Self {
            id: None,
            old_path,
            page_id,
            created_at: None,
        }
    }

    /// Insert this redirect into the database
    pub fn insert(&mut self, conn: &Connection) -> Result<i64> {
        conn.execute(
            "INSERT INTO redirects (old_path, page_id) VALUES (?1, ?2)",
            params![&self.old_path, self.page_id],
        )?;
        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    /// Find a redirect by its legacy URL
    pub fn find_by_old_path(conn: &Connection, old_path: &str) -> Result<Option<Redirect>> {
        let redirect = conn
            .query_row(
                "SELECT id, old_path, page_id, created_at FROM redirects WHERE old_path = ?1",
                params![old_path],
                Self::from_row,
            )
            .optional()?;
        Ok(redirect)
    }

    /// All redirects, oldest first
    pub fn list_all(conn: &Connection) -> Result<Vec<Redirect>> {
        let mut stmt = conn
            .prepare("SELECT id, old_path, page_id, created_at FROM redirects ORDER BY id")?;
        let redirects = stmt
            .query_map([], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(redirects)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Redirect> {
        Ok(Redirect {
            id: row.get(0)?,
            old_path: row.get(1)?,
            page_id: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}
