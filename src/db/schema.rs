// src/db/schema.rs

//! Database schema definitions and migrations for porter
//!
//! This module defines the SQLite schema for the content store and provides
//! a migration system to evolve the schema over time.

use crate::error::Result;
use rusqlite::Connection;
use tracing::{debug, info};

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the schema version tracking table
fn init_schema_version(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;
    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    init_schema_version(conn)?;

    let version = conn
        .query_row(
            "SELECT version FROM schema_version ORDER BY version DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    Ok(version)
}

/// Set the schema version
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Apply all pending migrations to bring the database up to date
pub fn migrate(conn: &Connection) -> Result<()> {
    let current_version = get_schema_version(conn)?;
    debug!("Current schema version: {}", current_version);

    if current_version >= SCHEMA_VERSION {
        debug!("Schema is up to date");
        return Ok(());
    }

    // Apply migrations in order
    for version in (current_version + 1)..=SCHEMA_VERSION {
        info!("Applying migration to version {}", version);
        apply_migration(conn, version)?;
        set_schema_version(conn, version)?;
    }

    info!(
        "Schema migration complete. Now at version {}",
        SCHEMA_VERSION
    );
    Ok(())
}

/// Apply a specific migration version
fn apply_migration(conn: &Connection, version: i32) -> Result<()> {
    match version {
        1 => migrate_v1(conn),
        _ => panic!("Unknown migration version: {}", version),
    }
}

/// Initial schema - Version 1
///
/// Creates all core tables for the content store:
/// - pages: the page tree (materialized path), core fields plus a JSON
///   column for content-type-specific fields
/// - revisions: per-page content snapshots with a publish timestamp
/// - redirects: legacy-URL redirects pointing at imported pages
/// - images: the image library backing downloaded media files
/// - contacts: non-page content records
fn migrate_v1(conn: &Connection) -> Result<()> {
    debug!("Creating schema version 1");

    conn.execute_batch(
        "
        -- Pages: one row per node in the content tree. The tree shape is
        -- encoded in 'path' as fixed-width steps (four base-36 chars per
        -- level, digits then lowercase letters),
        -- so ordering by path walks the tree depth-first.
        CREATE TABLE pages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            content_type TEXT NOT NULL,
            path TEXT NOT NULL UNIQUE,
            depth INTEGER NOT NULL,
            slug TEXT NOT NULL,
            title TEXT NOT NULL,
            body TEXT NOT NULL DEFAULT '',
            legacy_id TEXT,
            legacy_url TEXT,
            image_id INTEGER,
            first_published_at TEXT,
            extra TEXT,
            live INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (image_id) REFERENCES images(id)
        );

        CREATE INDEX idx_pages_slug ON pages(slug);
        CREATE INDEX idx_pages_legacy_id ON pages(content_type, legacy_id);

        -- Revisions: JSON snapshots of page content. Publishing a revision
        -- stamps published_at and flips the page live.
        CREATE TABLE revisions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            page_id INTEGER NOT NULL,
            content TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            published_at TEXT,
            FOREIGN KEY (page_id) REFERENCES pages(id)
        );

        CREATE INDEX idx_revisions_page ON revisions(page_id);

        -- Redirects: map a legacy URL to the page that replaced it.
        CREATE TABLE redirects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            old_path TEXT NOT NULL,
            page_id INTEGER NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (page_id) REFERENCES pages(id)
        );

        CREATE INDEX idx_redirects_old_path ON redirects(old_path);

        -- Images: downloaded media. 'file' is relative to the media dir;
        -- 'title' is the filename and doubles as the dedup key.
        CREATE TABLE images (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL UNIQUE,
            file TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        -- Contacts: non-page content records.
        CREATE TABLE contacts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            legacy_id TEXT,
            name TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE,
            email TEXT,
            biography TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX idx_contacts_legacy_id ON contacts(legacy_id);
        ",
    )?;

    Ok(())
}
