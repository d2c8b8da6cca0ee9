// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { db_path } => commands::cmd_init(&db_path),
        Commands::AddIndex {
            parent_id,
            title,
            content_type,
            slug,
            db_path,
        } => commands::cmd_add_index(parent_id, &title, &content_type, slug.as_deref(), &db_path),
        Commands::ImportNews {
            parent_page_id,
            source,
            db_path,
            media_dir,
        } => commands::cmd_import_news(parent_page_id, &source, &db_path, media_dir.as_deref()),
        Commands::ImportContacts { source, db_path } => {
            commands::cmd_import_contacts(&source, &db_path)
        }
        Commands::Tree { db_path } => commands::cmd_tree(&db_path),
        Commands::Redirects { db_path } => commands::cmd_redirects(&db_path),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "porter",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
