// src/db/models/page.rs

//! Page model: nodes in the content tree
//!
//! The tree uses materialized paths: each level contributes a fixed-width,
//! zero-padded base-36 step to `path`, so a page's ancestry is a string
//! prefix and ordering by `path` walks the tree depth-first. Digits sort
//! before lowercase letters in ASCII, so base-36 steps keep `path` order
//! equal to allocation order. The root page sits at depth 1 with path
//! "0001"; children of a node extend its path by one step.

use crate::db::constraint_to_validation;
use crate::error::{Error, Result};
use rusqlite::{Connection, OptionalExtension, Row, params};

/// Width of one materialized-path step (base-36 digits per tree level)
pub const STEP_LEN: usize = 4;

/// Largest step a fixed-width level can hold (36^4 - 1)
const MAX_STEP: u32 = 36u32.pow(STEP_LEN as u32) - 1;

const STEP_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Path of the seeded root page
pub const ROOT_PATH: &str = "0001";

/// Encode a step as `STEP_LEN` base-36 characters
fn format_step(mut step: u32) -> String {
    let mut out = [b'0'; STEP_LEN];
    for slot in out.iter_mut().rev() {
        *slot = STEP_ALPHABET[(step % 36) as usize];
        step /= 36;
    }
    String::from_utf8_lossy(&out).into_owned()
}

const PAGE_COLUMNS: &str = "id, content_type, path, depth, slug, title, body, legacy_id, \
     legacy_url, image_id, first_published_at, extra, live, created_at";

/// A page in the content tree
#[derive(Debug, Clone)]
pub struct Page {
    pub id: Option<i64>,
    pub content_type: String,
    pub path: String,
    pub depth: i64,
    pub slug: String,
    pub title: String,
    pub body: String,
    /// Identifier the record carried in the legacy system, used to make
    /// imports idempotent.
    pub legacy_id: Option<String>,
    /// Original URL, kept for reference and for creating redirects.
    pub legacy_url: Option<String>,
    pub image_id: Option<i64>,
    /// RFC 3339 timestamp carried over from the source data.
    pub first_published_at: Option<String>,
    /// Content-type-specific fields, serialized as a JSON object.
    pub extra: Option<String>,
    pub live: bool,
    pub created_at: Option<String>,
}

impl Page {
    /// Create a new page with the core fields; tree position is assigned
    /// by `add_child`.
    pub fn new(content_type: &str, title: String, slug: String) -> Self {
        Self {
            id: None,
            content_type: content_type.to_string(),
            path: String::new(),
            depth: 0,
            slug,
            title,
            body: String::new(),
            legacy_id: None,
            legacy_url: None,
            image_id: None,
            first_published_at: None,
            extra: None,
            live: false,
            created_at: None,
        }
    }

    /// The seeded tree root
    pub fn root() -> Self {
        let mut page = Page::new("root", "Root".to_string(), "root".to_string());
        page.path = ROOT_PATH.to_string();
        page.depth = 1;
        page.live = true;
        page
    }

    /// Insert this page into the database
    ///
    /// The path and depth must already be set; imported pages go through
    /// `add_child`, which assigns them.
    pub fn insert(&mut self, conn: &Connection) -> Result<i64> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("page title is empty".to_string()));
        }
        if self.slug.is_empty() {
            return Err(Error::Validation("page slug is empty".to_string()));
        }

        conn.execute(
            "INSERT INTO pages (content_type, path, depth, slug, title, body, legacy_id, \
             legacy_url, image_id, first_published_at, extra, live)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                &self.content_type,
                &self.path,
                self.depth,
                &self.slug,
                &self.title,
                &self.body,
                &self.legacy_id,
                &self.legacy_url,
                &self.image_id,
                &self.first_published_at,
                &self.extra,
                self.live,
            ],
        )
        .map_err(|e| constraint_to_validation(e, "page insert"))?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    /// Attach `child` under this page, allocating the next free sibling
    /// step, and insert it.
    pub fn add_child(&self, conn: &Connection, mut child: Page) -> Result<Page> {
        let step = self.next_child_step(conn)?;
        child.path = format!("{}{}", self.path, format_step(step));
        child.depth = self.depth + 1;
        child.insert(conn)?;
        Ok(child)
    }

    /// Highest allocated child step plus one
    fn next_child_step(&self, conn: &Connection) -> Result<u32> {
        let last: Option<String> = conn
            .query_row(
                "SELECT path FROM pages WHERE depth = ?1 AND path LIKE ?2
                 ORDER BY path DESC LIMIT 1",
                params![self.depth + 1, format!("{}%", self.path)],
                |row| row.get(0),
            )
            .optional()?;

        match last {
            Some(path) => {
                let step = &path[path.len() - STEP_LEN..];
                let n = u32::from_str_radix(step, 36)
                    .map_err(|_| Error::Validation(format!("corrupt page path: {}", path)))?;
                if n >= MAX_STEP {
                    return Err(Error::Validation(format!(
                        "page {} has no room for more children",
                        self.path
                    )));
                }
                Ok(n + 1)
            }
            None => Ok(1),
        }
    }

    /// Find a page by ID
    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Page>> {
        let page = conn
            .query_row(
                &format!("SELECT {} FROM pages WHERE id = ?1", PAGE_COLUMNS),
                params![id],
                Self::from_row,
            )
            .optional()?;
        Ok(page)
    }

    /// Find an imported page by its legacy identifier
    pub fn find_by_legacy_id(
        conn: &Connection,
        content_type: &str,
        legacy_id: &str,
    ) -> Result<Option<Page>> {
        let page = conn
            .query_row(
                &format!(
                    "SELECT {} FROM pages WHERE content_type = ?1 AND legacy_id = ?2",
                    PAGE_COLUMNS
                ),
                params![content_type, legacy_id],
                Self::from_row,
            )
            .optional()?;
        Ok(page)
    }

    /// The seeded root page, if the store has been initialized
    pub fn find_root(conn: &Connection) -> Result<Option<Page>> {
        let page = conn
            .query_row(
                &format!("SELECT {} FROM pages WHERE path = ?1", PAGE_COLUMNS),
                params![ROOT_PATH],
                Self::from_row,
            )
            .optional()?;
        Ok(page)
    }

    /// Direct children of this page, in tree order
    pub fn children(&self, conn: &Connection) -> Result<Vec<Page>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM pages WHERE depth = ?1 AND path LIKE ?2 ORDER BY path",
            PAGE_COLUMNS
        ))?;
        let pages = stmt
            .query_map(
                params![self.depth + 1, format!("{}%", self.path)],
                Self::from_row,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(pages)
    }

    /// Slugs of this page's children that start with `prefix`
    ///
    /// Feeds the sibling slug allocator: one query up front instead of a
    /// probe per candidate.
    pub fn child_slugs_with_prefix(&self, conn: &Connection, prefix: &str) -> Result<Vec<String>> {
        let mut stmt = conn.prepare(
            "SELECT slug FROM pages WHERE depth = ?1 AND path LIKE ?2 AND slug LIKE ?3",
        )?;
        let slugs = stmt
            .query_map(
                params![
                    self.depth + 1,
                    format!("{}%", self.path),
                    format!("{}%", prefix)
                ],
                |row| row.get(0),
            )?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(slugs)
    }

    /// All pages in tree order
    pub fn list_all(conn: &Connection) -> Result<Vec<Page>> {
        let mut stmt = conn.prepare(&format!("SELECT {} FROM pages ORDER BY path", PAGE_COLUMNS))?;
        let pages = stmt
            .query_map([], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(pages)
    }

    /// Mark this page as published
    pub fn set_live(&mut self, conn: &Connection) -> Result<()> {
        conn.execute(
            "UPDATE pages SET live = 1 WHERE id = ?1",
            params![self.id],
        )?;
        self.live = true;
        Ok(())
    }

    fn from_row(row: &Row) -> rusqlite::Result<Page> {
        Ok(Page {
            id: row.get(0)?,
            content_type: row.get(1)?,
            path: row.get(2)?,
            depth: row.get(3)?,
            slug: row.get(4)?,
            title: row.get(5)?,
            body: row.get(6)?,
            legacy_id: row.get(7)?,
            legacy_url: row.get(8)?,
            image_id: row.get(9)?,
            first_published_at: row.get(10)?,
            extra: row.get(11)?,
            live: row.get(12)?,
            created_at: row.get(13)?,
        })
    }
}
