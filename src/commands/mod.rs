// src/commands/mod.rs
//! Command handlers for the porter CLI

mod import;
mod init;
mod query;

pub use import::{cmd_import_contacts, cmd_import_news};
pub use init::{cmd_add_index, cmd_init};
pub use query::{cmd_redirects, cmd_tree};
