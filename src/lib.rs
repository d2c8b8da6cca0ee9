// src/lib.rs

//! Porter content importer
//!
//! Reads structured records from JSON source files and creates content
//! entries (pages and non-page records) in a hierarchical content
//! store, under a specified parent entry.
//!
//! # Architecture
//!
//! - Database-first: all state in SQLite plus a media directory
//! - Page tree: materialized paths, one fixed-width step per level
//! - Importers: a field-formatting hook plus a persistence call,
//!   specialized per content type
//! - Idempotent runs: records are matched on their legacy identifier
//!   and never imported twice

pub mod db;
mod error;
pub mod importer;
pub mod media;
pub mod richtext;
pub mod source;
pub mod text;

pub use error::{Error, Result};
pub use importer::{
    ContactImporter, ContentImporter, ImportContext, ImportReport, NewsImporter, PageData,
    PageImporter, base_page_data, run_content_import, run_import,
};
pub use media::MediaStore;
pub use source::Record;
