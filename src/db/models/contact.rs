// src/db/models/contact.rs

//! Contact model: non-page content records
//!
//! Contacts live outside the page tree: no parent, no revisions, no
//! redirects. Their slug is unique across the whole table rather than
//! among siblings.

use crate::db::constraint_to_validation;
use crate::error::{Error, Result};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::fmt;

/// A contact record
#[derive(Debug, Clone)]
pub struct Contact {
    pub id: Option<i64>,
    /// Identifier the record carried in the legacy system
    pub legacy_id: Option<String>,
    pub name: String,
    pub slug: String,
    pub email: Option<String>,
    pub biography: Option<String>,
    pub created_at: Option<String>,
}

impl Contact {
    pub fn new(name: String, slug: String) -> Self {
        Self {
            id: None,
            legacy_id: None,
            name,
            slug,
            email: None,
            biography: None,
            created_at: None,
        }
    }

    /// Insert this contact into the database
    pub fn insert(&mut self, conn: &Connection) -> Result<i64> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("contact name is empty".to_string()));
        }

        conn.execute(
            "INSERT INTO contacts (legacy_id, name, slug, email, biography)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                &self.legacy_id,
                &self.name,
                &self.slug,
                &self.email,
                &self.biography,
            ],
        )
        .map_err(|e| constraint_to_validation(e, "contact insert"))?;
        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    /// Find a contact by its legacy identifier
    pub fn find_by_legacy_id(conn: &Connection, legacy_id: &str) -> Result<Option<Contact>> {
        let contact = conn
            .query_row(
                "SELECT id, legacy_id, name, slug, email, biography, created_at
                 FROM contacts WHERE legacy_id = ?1",
                params![legacy_id],
                Self::from_row,
            )
            .optional()?;
        Ok(contact)
    }

    /// Whether a slug is already taken
    pub fn slug_exists(conn: &Connection, slug: &str) -> Result<bool> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM contacts WHERE slug = ?1",
            params![slug],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// All contacts, ordered by name
    pub fn list_all(conn: &Connection) -> Result<Vec<Contact>> {
        let mut stmt = conn.prepare(
            "SELECT id, legacy_id, name, slug, email, biography, created_at
             FROM contacts ORDER BY name",
        )?;
        let contacts = stmt
            .query_map([], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(contacts)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Contact> {
        Ok(Contact {
            id: row.get(0)?,
            legacy_id: row.get(1)?,
            name: row.get(2)?,
            slug: row.get(3)?,
            email: row.get(4)?,
            biography: row.get(5)?,
            created_at: row.get(6)?,
        })
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
