// src/importer/mod.rs

//! Base importer abstraction
//!
//! An importer pairs a source-record field mapping with a persistence
//! call for one content type. Implementations mainly provide
//! `format_data` to map the required fields from the source file onto
//! the destination content fields, usually starting from
//! `base_page_data` and extending the result. To customise persistence,
//! override `create_content_item`.
//!
//! The driver (`run_import` / `run_content_import`) walks the records
//! sequentially. Records already present in the store (matched on their
//! legacy identifier) are skipped, as are records that fail validation;
//! any other error aborts the run. Each created record is wrapped in its
//! own transaction so a rejected record leaves no partial rows behind.

mod contacts;
mod news;

pub use contacts::ContactImporter;
pub use news::NewsImporter;

use crate::db::models::{Page, Redirect, Revision};
use crate::error::{Error, Result};
use crate::media::MediaStore;
use crate::source::Record;
use crate::text;
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::Connection;
use serde_json::{Map, Value};
use tracing::{info, warn};

/// Format of datetimes in source files
const SOURCE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Shared state handed to importer hooks
pub struct ImportContext<'c> {
    pub conn: &'c Connection,
    pub media: &'c MediaStore,
}

impl<'c> ImportContext<'c> {
    pub fn new(conn: &'c Connection, media: &'c MediaStore) -> Self {
        Self { conn, media }
    }
}

/// Target fields for one page, produced by `format_data`
#[derive(Debug, Clone)]
pub struct PageData {
    pub legacy_id: String,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub legacy_url: Option<String>,
    pub first_published_at: Option<DateTime<Utc>>,
    pub image_id: Option<i64>,
    /// Content-type-specific fields; stored on the page as JSON
    pub extra: Map<String, Value>,
}

/// Outcome counts for one import run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// An importer that creates pages under a parent in the content tree
pub trait PageImporter {
    /// Content type of the pages this importer creates
    fn content_type(&self) -> &'static str;

    /// Required content type of the parent page
    fn parent_content_type(&self) -> &'static str;

    /// The source record's identifier, used for the already-imported
    /// check. Override if the source keys it differently.
    fn legacy_id(&self, record: &Record) -> Result<String> {
        record.id_field("nid")
    }

    /// Map one source record onto the destination page fields
    fn format_data(
        &self,
        ctx: &mut ImportContext<'_>,
        parent: &Page,
        record: &Record,
    ) -> Result<PageData>;

    /// Create the page: attach it under the parent, save and publish a
    /// revision, and create a redirect from the legacy URL.
    fn create_content_item(
        &self,
        ctx: &mut ImportContext<'_>,
        parent: &Page,
        data: PageData,
    ) -> Result<Page> {
        let mut page = Page::new(self.content_type(), data.title, data.slug);
        page.body = data.body;
        page.legacy_id = Some(data.legacy_id);
        page.legacy_url = data.legacy_url;
        page.image_id = data.image_id;
        page.first_published_at = data.first_published_at.map(|ts| ts.to_rfc3339());
        if !data.extra.is_empty() {
            page.extra = Some(serde_json::to_string(&Value::Object(data.extra))?);
        }

        let page = parent.add_child(ctx.conn, page)?;

        let mut revision = Revision::for_page(&page)?;
        revision.insert(ctx.conn)?;
        revision.publish(ctx.conn)?;

        if let (Some(page_id), Some(url)) = (page.id, page.legacy_url.clone()) {
            Redirect::new(url, page_id).insert(ctx.conn)?;
        }

        Ok(page)
    }
}

/// Run a page import against all records
pub fn run_import<I>(
    importer: &I,
    conn: &mut Connection,
    media: &MediaStore,
    parent_id: i64,
    records: &[Record],
) -> Result<ImportReport>
where
    I: PageImporter + ?Sized,
{
    let parent =
        Page::find_by_id(conn, parent_id)?.ok_or(Error::PageNotFound(parent_id))?;
    if parent.content_type != importer.parent_content_type() {
        return Err(Error::ParentType {
            id: parent_id,
            expected: importer.parent_content_type().to_string(),
            found: parent.content_type,
        });
    }

    let mut report = ImportReport::default();
    for record in records {
        let legacy_id = importer.legacy_id(record)?;

        if Page::find_by_legacy_id(conn, importer.content_type(), &legacy_id)?.is_some() {
            info!("{} already exists", legacy_id);
            report.skipped += 1;
            continue;
        }

        let tx = conn.transaction()?;
        let created = {
            let mut ctx = ImportContext::new(&tx, media);
            importer
                .format_data(&mut ctx, &parent, record)
                .and_then(|data| importer.create_content_item(&mut ctx, &parent, data))
        };
        match created {
            Ok(page) => {
                tx.commit()?;
                info!("Created {}", page.title);
                report.created += 1;
            }
            Err(Error::Validation(msg)) => {
                // Dropping the transaction rolls the record back.
                warn!("Could not create record {}: {}", legacy_id, msg);
                report.failed += 1;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(report)
}

/// An importer for content that lives outside the page tree
pub trait ContentImporter {
    type Item: std::fmt::Display;

    /// Content type name, used in logs
    fn content_type(&self) -> &'static str;

    /// The source record's identifier; same default as pages.
    fn legacy_id(&self, record: &Record) -> Result<String> {
        record.id_field("nid")
    }

    /// Whether a record with this legacy identifier was already imported
    fn exists(&self, conn: &Connection, legacy_id: &str) -> Result<bool>;

    /// Map one source record onto a destination item
    fn format_data(&self, ctx: &mut ImportContext<'_>, record: &Record) -> Result<Self::Item>;

    /// Persist the item
    fn create_content_item(
        &self,
        ctx: &mut ImportContext<'_>,
        item: Self::Item,
    ) -> Result<Self::Item>;
}

/// Run a non-page content import against all records
pub fn run_content_import<I>(
    importer: &I,
    conn: &mut Connection,
    media: &MediaStore,
    records: &[Record],
) -> Result<ImportReport>
where
    I: ContentImporter + ?Sized,
{
    let mut report = ImportReport::default();
    for record in records {
        let legacy_id = importer.legacy_id(record)?;

        if importer.exists(conn, &legacy_id)? {
            info!("{} already exists", legacy_id);
            report.skipped += 1;
            continue;
        }

        let tx = conn.transaction()?;
        let created = {
            let mut ctx = ImportContext::new(&tx, media);
            importer
                .format_data(&mut ctx, record)
                .and_then(|item| importer.create_content_item(&mut ctx, item))
        };
        match created {
            Ok(item) => {
                tx.commit()?;
                info!("Created {}", item);
                report.created += 1;
            }
            Err(Error::Validation(msg)) => {
                warn!(
                    "Could not create {} record {}: {}",
                    importer.content_type(),
                    legacy_id,
                    msg
                );
                report.failed += 1;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(report)
}

/// Format the basic page fields from a source record
///
/// Populates the core fields every page carries: legacy identifier,
/// cleaned title, publication date, legacy URL, a slug unique among the
/// parent's children, and the record's image brought into the library.
/// Importers extend the result with their own fields.
pub fn base_page_data(
    ctx: &mut ImportContext<'_>,
    parent: &Page,
    record: &Record,
) -> Result<PageData> {
    let legacy_id = record.id_field("nid")?;
    let title = text::clean_text(record.str_field("title")?, Some(255));

    // The date the content was created in the legacy system
    let first_published_at = Some(parse_source_date(record.str_field("created")?)?);

    // Keep the old URL for reference and creating redirects
    let legacy_url = record.str_field("url")?.to_string();

    // Slug precedence: explicit slug field, then the legacy URL's last
    // path segment, then the title.
    let requested = match record.opt_str_field("slug")? {
        Some(slug) => text::slug_from_title(slug),
        None => text::slug_from_url(&legacy_url)
            .unwrap_or_else(|| text::slug_from_title(&title)),
    };
    let slug = available_page_slug(ctx.conn, parent, &requested)?;

    // Bring the record's image into the library, if it has one
    let image_id = match record.opt_str_field("image")? {
        Some(url) => ctx
            .media
            .get_or_fetch(ctx.conn, url)?
            .and_then(|image| image.id),
        None => None,
    };

    Ok(PageData {
        legacy_id,
        title,
        slug,
        body: String::new(),
        legacy_url: Some(legacy_url),
        first_published_at,
        image_id,
        extra: Map::new(),
    })
}

/// Find a slug for a new child of `parent`, deduplicating among siblings
pub fn available_page_slug(conn: &Connection, parent: &Page, requested: &str) -> Result<String> {
    let taken = parent.child_slugs_with_prefix(conn, requested)?;
    Ok(text::first_free_slug(&taken, requested))
}

/// Parse a source datetime; the store's timezone is fixed to UTC
pub fn parse_source_date(raw: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(raw, SOURCE_DATE_FORMAT)?;
    Ok(naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::source::records_from_value;
    use serde_json::json;

    fn setup() -> (tempfile::TempDir, Connection, MediaStore, Page) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let conn = db::init(db_path.to_str().unwrap()).unwrap();
        let media = MediaStore::new(dir.path().join("media")).unwrap();

        let root = Page::find_root(&conn).unwrap().unwrap();
        let index = root
            .add_child(
                &conn,
                Page::new("news-index", "News".to_string(), "news".to_string()),
            )
            .unwrap();
        (dir, conn, media, index)
    }

    #[test]
    fn test_base_page_data_maps_core_fields() {
        let (_dir, conn, media, index) = setup();
        let records = records_from_value(json!([{
            "nid": 42,
            "title": "  <h1>Big &amp; Bold</h1>  ",
            "created": "2019-03-01 09:30:00",
            "url": "https://legacy.example.org/news/big-bold"
        }]))
        .unwrap();

        let mut ctx = ImportContext::new(&conn, &media);
        let data = base_page_data(&mut ctx, &index, &records[0]).unwrap();

        assert_eq!(data.legacy_id, "42");
        assert_eq!(data.title, "Big & Bold");
        assert_eq!(data.slug, "big-bold");
        assert_eq!(data.legacy_url.as_deref(), Some("https://legacy.example.org/news/big-bold"));
        assert_eq!(
            data.first_published_at.unwrap().to_rfc3339(),
            "2019-03-01T09:30:00+00:00"
        );
        assert_eq!(data.image_id, None);
    }

    #[test]
    fn test_base_page_data_prefers_explicit_slug() {
        let (_dir, conn, media, index) = setup();
        let records = records_from_value(json!([{
            "nid": 1,
            "title": "A Title",
            "created": "2019-03-01 09:30:00",
            "url": "https://legacy.example.org/news/url-slug",
            "slug": "Chosen Slug"
        }]))
        .unwrap();

        let mut ctx = ImportContext::new(&conn, &media);
        let data = base_page_data(&mut ctx, &index, &records[0]).unwrap();
        assert_eq!(data.slug, "chosen-slug");
    }

    #[test]
    fn test_base_page_data_falls_back_to_title_slug() {
        let (_dir, conn, media, index) = setup();
        let records = records_from_value(json!([{
            "nid": 1,
            "title": "Plain Title",
            "created": "2019-03-01 09:30:00",
            "url": "https://legacy.example.org/"
        }]))
        .unwrap();

        let mut ctx = ImportContext::new(&conn, &media);
        let data = base_page_data(&mut ctx, &index, &records[0]).unwrap();
        assert_eq!(data.slug, "plain-title");
    }

    #[test]
    fn test_available_page_slug_deduplicates_among_siblings() {
        let (_dir, conn, _media, index) = setup();
        index
            .add_child(&conn, Page::new("news", "T".to_string(), "story".to_string()))
            .unwrap();
        index
            .add_child(&conn, Page::new("news", "T".to_string(), "story-1".to_string()))
            .unwrap();

        assert_eq!(
            available_page_slug(&conn, &index, "story").unwrap(),
            "story-2"
        );

        // A different parent sees no collision
        let root = Page::find_root(&conn).unwrap().unwrap();
        assert_eq!(available_page_slug(&conn, &root, "story").unwrap(), "story");
    }

    #[test]
    fn test_parse_source_date_rejects_bad_input() {
        assert!(parse_source_date("2019-03-01 09:30:00").is_ok());
        assert!(parse_source_date("01/03/2019").is_err());
    }
}
