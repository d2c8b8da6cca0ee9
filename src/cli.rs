// src/cli.rs
//! CLI definitions for the porter content importer
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

pub const DEFAULT_DB_PATH: &str = "porter.db";

#[derive(Parser)]
#[command(name = "porter")]
#[command(author = "Porter Project")]
#[command(version)]
#[command(about = "Import legacy JSON content into a page-tree content store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new content store
    Init {
        /// Path to the database file
        #[arg(short, long, default_value = DEFAULT_DB_PATH)]
        db_path: String,
    },

    /// Create an index page to import content under
    AddIndex {
        /// The ID of the page to create the index under
        parent_id: i64,

        /// Title of the index page
        title: String,

        /// Content type of the index page (e.g. news-index)
        #[arg(short, long)]
        content_type: String,

        /// Slug for the index page (defaults to a slugified title)
        #[arg(short, long)]
        slug: Option<String>,

        /// Path to the database file
        #[arg(short, long, default_value = DEFAULT_DB_PATH)]
        db_path: String,
    },

    /// Import news pages under a news index
    ImportNews {
        /// The ID of the page to import the records under
        parent_page_id: i64,

        /// Migration source JSON file
        source: String,

        /// Path to the database file
        #[arg(short, long, default_value = DEFAULT_DB_PATH)]
        db_path: String,

        /// Directory for downloaded images (default: media/ next to the
        /// database)
        #[arg(short, long)]
        media_dir: Option<String>,
    },

    /// Import contact records
    ImportContacts {
        /// Migration source JSON file
        source: String,

        /// Path to the database file
        #[arg(short, long, default_value = DEFAULT_DB_PATH)]
        db_path: String,
    },

    /// Print the page tree
    Tree {
        /// Path to the database file
        #[arg(short, long, default_value = DEFAULT_DB_PATH)]
        db_path: String,
    },

    /// List redirects created for imported pages
    Redirects {
        /// Path to the database file
        #[arg(short, long, default_value = DEFAULT_DB_PATH)]
        db_path: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}
