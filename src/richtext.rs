// src/richtext.rs

//! Rich text formatting for imported body fields
//!
//! Legacy body HTML references images by URL. `rewrite_images` walks the
//! fragment and replaces each `<img>` whose file could be brought into
//! the image library with an `<embed>` tag referencing the stored image,
//! leaving everything else as it was.

use crate::db::models::Image;
use crate::error::Result;
use crate::media::MediaStore;
use html_escape::{encode_double_quoted_attribute, encode_text};
use rusqlite::Connection;
use scraper::node::Node;
use scraper::Html;
use tracing::debug;

/// Elements with no closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Rewrite `<img>` elements in `html` into embed tags for stored images
///
/// Images that cannot be fetched (missing `src`, HTTP failure) are left
/// untouched; a structurally invalid image payload is an error.
pub fn rewrite_images(conn: &Connection, media: &MediaStore, html: &str) -> Result<String> {
    let fragment = Html::parse_fragment(html);
    let mut out = String::new();
    for child in fragment.root_element().children() {
        serialize_node(conn, media, child, &mut out)?;
    }
    Ok(out)
}

fn serialize_node(
    conn: &Connection,
    media: &MediaStore,
    node: ego_tree::NodeRef<'_, Node>,
    out: &mut String,
) -> Result<()> {
    match node.value() {
        Node::Text(text) => {
            let raw: &str = &text.text;
            out.push_str(&encode_text(raw));
        }
        Node::Comment(comment) => {
            let raw: &str = &comment.comment;
            out.push_str("<!--");
            out.push_str(raw);
            out.push_str("-->");
        }
        Node::Element(element) => {
            if element.name() == "img" {
                if let Some(src) = element.attr("src") {
                    if let Some(image) = media.get_or_fetch(conn, src)? {
                        out.push_str(&embed_tag(&image));
                        return Ok(());
                    }
                    // Download failed; keep the original element.
                    debug!("Keeping original img element for {}", src);
                }
                // No src to download from, or fetch declined: fall through
                // and serialize the element unchanged.
            }
            serialize_element(conn, media, node, element, out)?;
        }
        // Doctypes and processing instructions have no place in a body
        // fragment; drop them.
        _ => {}
    }
    Ok(())
}

fn serialize_element(
    conn: &Connection,
    media: &MediaStore,
    node: ego_tree::NodeRef<'_, Node>,
    element: &scraper::node::Element,
    out: &mut String,
) -> Result<()> {
    let name = element.name();
    out.push('<');
    out.push_str(name);
    for (attr, value) in element.attrs() {
        out.push(' ');
        out.push_str(attr);
        out.push_str("=\"");
        out.push_str(&encode_double_quoted_attribute(value));
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&name) {
        return Ok(());
    }

    for child in node.children() {
        serialize_node(conn, media, child, out)?;
    }

    out.push_str("</");
    out.push_str(name);
    out.push('>');
    Ok(())
}

/// Build the embed tag for a stored image
fn embed_tag(image: &Image) -> String {
    let title = encode_double_quoted_attribute(&image.title);
    let id = image.id.unwrap_or_default();
    format!(
        "<embed alt=\"{title}\" caption=\"{title}\" embedtype=\"image\" format=\"fullwidth\" id=\"{id}\"/>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;

    fn setup() -> (Connection, tempfile::TempDir, MediaStore) {
        let conn = Connection::open_in_memory().unwrap();
        schema::migrate(&conn).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path()).unwrap();
        (conn, dir, store)
    }

    #[test]
    fn test_plain_markup_passes_through() {
        let (conn, _dir, media) = setup();
        let html = "<p>Hello <strong>world</strong></p><p>Second</p>";
        assert_eq!(rewrite_images(&conn, &media, html).unwrap(), html);
    }

    #[test]
    fn test_img_without_src_is_kept() {
        let (conn, _dir, media) = setup();
        let html = "<p><img alt=\"no source\"></p>";
        assert_eq!(rewrite_images(&conn, &media, html).unwrap(), html);
    }

    #[test]
    fn test_img_with_library_hit_becomes_embed() {
        let (conn, _dir, media) = setup();

        // Pre-seed the library so no download is attempted.
        let mut image = Image::new("photo.jpg".to_string(), "photo.jpg".to_string());
        image.insert(&conn).unwrap();
        let id = image.id.unwrap();

        let html = "<p><img src=\"http://unreachable.invalid/media/photo.jpg\"></p>";
        let rewritten = rewrite_images(&conn, &media, html).unwrap();
        assert_eq!(
            rewritten,
            format!(
                "<p><embed alt=\"photo.jpg\" caption=\"photo.jpg\" embedtype=\"image\" format=\"fullwidth\" id=\"{id}\"/></p>"
            )
        );
    }

    #[test]
    fn test_img_with_directory_src_is_kept() {
        let (conn, _dir, media) = setup();

        // No filename to fetch; the element survives and the rewrite
        // still succeeds so the record imports without its image.
        let html = "<p><img src=\"http://example.org/media/\"></p>";
        assert_eq!(rewrite_images(&conn, &media, html).unwrap(), html);
    }

    #[test]
    fn test_text_entities_are_reencoded() {
        let (conn, _dir, media) = setup();
        let html = "<p>Fish &amp; Chips</p>";
        assert_eq!(
            rewrite_images(&conn, &media, html).unwrap(),
            "<p>Fish &amp; Chips</p>"
        );
    }
}
