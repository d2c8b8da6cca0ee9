// src/importer/contacts.rs

//! Contact importer
//!
//! Non-page content: contacts have no parent, no revisions and no
//! redirects, and their slug is deduplicated against the whole table
//! instead of among siblings.

use super::{ContentImporter, ImportContext};
use crate::db::models::Contact;
use crate::error::Result;
use crate::source::Record;
use crate::text;
use rusqlite::Connection;

pub struct ContactImporter;

impl ContactImporter {
    /// Find a free slug table-wide, probing numbered suffixes
    fn available_slug(conn: &Connection, requested: &str) -> Result<String> {
        let mut slug = requested.to_string();
        let mut number = 1;
        while Contact::slug_exists(conn, &slug)? {
            slug = format!("{}-{}", requested, number);
            number += 1;
        }
        Ok(slug)
    }
}

impl ContentImporter for ContactImporter {
    type Item = Contact;

    fn content_type(&self) -> &'static str {
        "contact"
    }

    fn exists(&self, conn: &Connection, legacy_id: &str) -> Result<bool> {
        Ok(Contact::find_by_legacy_id(conn, legacy_id)?.is_some())
    }

    fn format_data(&self, ctx: &mut ImportContext<'_>, record: &Record) -> Result<Contact> {
        let name = text::clean_text(record.str_field("name")?, Some(255));

        let requested = match record.opt_str_field("slug")? {
            Some(slug) => text::slug_from_title(slug),
            None => text::slug_from_title(&name),
        };
        let slug = Self::available_slug(ctx.conn, &requested)?;

        let mut contact = Contact::new(name, slug);
        contact.legacy_id = Some(self.legacy_id(record)?);
        contact.email = record.opt_str_field("email")?.map(str::to_string);
        contact.biography = record
            .opt_str_field("biography")?
            .map(|raw| text::clean_text(raw, None));
        Ok(contact)
    }

    fn create_content_item(
        &self,
        ctx: &mut ImportContext<'_>,
        mut contact: Contact,
    ) -> Result<Contact> {
        contact.insert(ctx.conn)?;
        Ok(contact)
    }
}
