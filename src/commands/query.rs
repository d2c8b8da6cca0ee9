// src/commands/query.rs
//! Inspection commands for the content store

use anyhow::{Context, Result};
use porter::db;
use porter::db::models::{Page, Redirect};

/// Print the page tree
pub fn cmd_tree(db_path: &str) -> Result<()> {
    let conn = db::open(db_path).context("Failed to open the content store")?;
    let pages = Page::list_all(&conn)?;

    if pages.is_empty() {
        println!("The content store is empty.");
        return Ok(());
    }

    for page in &pages {
        let indent = "  ".repeat((page.depth.max(1) - 1) as usize);
        let id = page
            .id
            .map(|i| i.to_string())
            .unwrap_or_else(|| "?".to_string());
        let status = if page.live { "live" } else { "draft" };
        println!(
            "{}[{}] {} '{}' ({}, {})",
            indent, id, page.slug, page.title, page.content_type, status
        );
    }
    println!("\nTotal: {} page(s)", pages.len());
    Ok(())
}

/// List redirects created for imported pages
pub fn cmd_redirects(db_path: &str) -> Result<()> {
    let conn = db::open(db_path).context("Failed to open the content store")?;
    let redirects = Redirect::list_all(&conn)?;

    if redirects.is_empty() {
        println!("No redirects.");
        return Ok(());
    }

    for redirect in &redirects {
        let title = Page::find_by_id(&conn, redirect.page_id)?
            .map(|page| page.title)
            .unwrap_or_else(|| "?".to_string());
        println!("  {} -> [{}] {}", redirect.old_path, redirect.page_id, title);
    }
    println!("\nTotal: {} redirect(s)", redirects.len());
    Ok(())
}
