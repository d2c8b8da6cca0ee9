// src/db/mod.rs

//! SQLite-backed content store
//!
//! All persistent state lives in a single database file: the page tree,
//! revisions, redirects, the image library, and non-page content. The
//! only other on-disk artifact is the media directory for image files.

pub mod models;
pub mod paths;
pub mod schema;

use crate::error::{Error, Result};
use rusqlite::{Connection, OpenFlags, Transaction};
use std::path::Path;
use tracing::info;

use models::Page;

/// Create the database file, apply migrations, and seed the root page.
///
/// Safe to call on an existing database; migrations and the root seed are
/// both idempotent.
pub fn init(db_path: &str) -> Result<Connection> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open(db_path)?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;
    schema::migrate(&conn)?;

    // Seed the tree root; every imported page descends from it.
    if Page::find_root(&conn)?.is_none() {
        let mut root = Page::root();
        root.insert(&conn)?;
        info!("Seeded root page");
    }

    Ok(conn)
}

/// Open an existing database with foreign keys enabled.
///
/// Unlike `init`, this refuses to create a new file: pointing an import at
/// a missing database is always a mistake.
pub fn open(db_path: &str) -> Result<Connection> {
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;
    schema::migrate(&conn)?;
    Ok(conn)
}

/// Run `f` inside a transaction, committing on success.
pub fn transaction<T, F>(conn: &mut Connection, f: F) -> Result<T>
where
    F: FnOnce(&Transaction) -> Result<T>,
{
    let tx = conn.transaction()?;
    let result = f(&tx)?;
    tx.commit()?;
    Ok(result)
}

/// Map a SQLite constraint violation onto a skippable validation error.
///
/// Used by create paths where a uniqueness conflict means "this record is
/// bad", not "the store is broken".
pub(crate) fn constraint_to_validation(err: rusqlite::Error, what: &str) -> Error {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Error::Validation(format!("{}: {}", what, err))
        }
        _ => Error::Db(err),
    }
}
