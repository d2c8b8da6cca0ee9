// src/commands/import.rs
//! Import commands: one per content type
//!
//! Each command loads the source file, opens the store, and drives the
//! matching importer over all records. Per-record validation failures
//! are reported and skipped; anything else aborts with a nonzero exit.

use anyhow::{Context, Result};
use porter::db::paths;
use porter::importer::{ContactImporter, NewsImporter, run_content_import, run_import};
use porter::{MediaStore, db, source};
use std::path::PathBuf;
use tracing::info;

/// Import news pages from a source file under a news index page
pub fn cmd_import_news(
    parent_page_id: i64,
    source_path: &str,
    db_path: &str,
    media_dir: Option<&str>,
) -> Result<()> {
    info!("Importing news from {}", source_path);

    let records = source::load(source_path)
        .with_context(|| format!("Failed to load source data from {}", source_path))?;
    let mut conn = db::open(db_path).context("Failed to open the content store")?;
    let media = MediaStore::new(resolve_media_dir(db_path, media_dir))
        .context("Failed to prepare the media directory")?;

    let report = run_import(&NewsImporter, &mut conn, &media, parent_page_id, &records)?;
    println!(
        "Imported {} news page(s), {} already present, {} failed validation",
        report.created, report.skipped, report.failed
    );
    Ok(())
}

/// Import contact records from a source file
pub fn cmd_import_contacts(source_path: &str, db_path: &str) -> Result<()> {
    info!("Importing contacts from {}", source_path);

    let records = source::load(source_path)
        .with_context(|| format!("Failed to load source data from {}", source_path))?;
    let mut conn = db::open(db_path).context("Failed to open the content store")?;
    // Contacts carry no images; the media store goes unused but keeps
    // the import context uniform.
    let media = MediaStore::new(resolve_media_dir(db_path, None))
        .context("Failed to prepare the media directory")?;

    let report = run_content_import(&ContactImporter, &mut conn, &media, &records)?;
    println!(
        "Imported {} contact(s), {} already present, {} failed validation",
        report.created, report.skipped, report.failed
    );
    Ok(())
}

fn resolve_media_dir(db_path: &str, media_dir: Option<&str>) -> PathBuf {
    media_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| paths::media_dir(db_path))
}
