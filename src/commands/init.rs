// src/commands/init.rs
//! Store initialization and index page creation

use anyhow::{Context, Result};
use porter::db;
use porter::db::models::Page;
use porter::text;
use tracing::info;

/// Initialize the content store
pub fn cmd_init(db_path: &str) -> Result<()> {
    info!("Initializing content store at {}", db_path);
    db::init(db_path).context("Failed to initialize the content store")?;
    println!("Content store initialized at {}", db_path);
    Ok(())
}

/// Create an index page under an existing parent
///
/// Imports attach pages under an index of the matching content type;
/// this sets one up (the legacy system's admin UI did this by hand).
pub fn cmd_add_index(
    parent_id: i64,
    title: &str,
    content_type: &str,
    slug: Option<&str>,
    db_path: &str,
) -> Result<()> {
    let mut conn = db::open(db_path).context("Failed to open the content store")?;

    let parent = Page::find_by_id(&conn, parent_id)?
        .with_context(|| format!("Parent page {} not found", parent_id))?;

    let requested = match slug {
        Some(slug) => text::slug_from_title(slug),
        None => text::slug_from_title(title),
    };

    let index = db::transaction(&mut conn, |tx| {
        let taken = parent.child_slugs_with_prefix(tx, &requested)?;
        let slug = text::first_free_slug(&taken, &requested);

        let mut index = Page::new(content_type, title.to_string(), slug);
        index.live = true;
        parent.add_child(tx, index)
    })?;

    println!(
        "Created index page [{}] '{}' ({}) under [{}] '{}'",
        index.id.unwrap_or_default(),
        index.title,
        index.content_type,
        parent_id,
        parent.title,
    );
    Ok(())
}
