// src/db/models/mod.rs

//! Data models for content store entities
//!
//! This module defines Rust structs that correspond to database tables
//! and provides methods for creating and reading records.

mod contact;
mod image;
mod page;
mod redirect;
mod revision;

pub use contact::Contact;
pub use image::Image;
pub use page::{Page, ROOT_PATH, STEP_LEN};
pub use redirect::Redirect;
pub use revision::Revision;
