// src/importer/news.rs

//! News importer
//!
//! Example use of the page importer contract for a specific page type:
//! news pages live under a news index and add a rich-text body and a
//! publication date to the core fields.

use super::{ImportContext, PageData, PageImporter, base_page_data};
use crate::db::models::Page;
use crate::error::Result;
use crate::richtext;
use crate::source::Record;
use serde_json::json;

pub struct NewsImporter;

impl PageImporter for NewsImporter {
    fn content_type(&self) -> &'static str {
        "news"
    }

    fn parent_content_type(&self) -> &'static str {
        "news-index"
    }

    fn format_data(
        &self,
        ctx: &mut ImportContext<'_>,
        parent: &Page,
        record: &Record,
    ) -> Result<PageData> {
        let mut data = base_page_data(ctx, parent, record)?;

        // Format the rich text body, pulling its images into the library
        data.body = richtext::rewrite_images(ctx.conn, ctx.media, record.str_field("body")?)?;

        // News exposes the legacy creation date as its publication date
        if let Some(ts) = data.first_published_at {
            data.extra
                .insert("publication_date".to_string(), json!(ts.to_rfc3339()));
        }

        Ok(data)
    }
}
