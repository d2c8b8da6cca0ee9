// src/text.rs

//! Field formatting utilities shared by importers
//!
//! Source records arrive with HTML-laden titles, legacy URLs, and
//! arbitrary whitespace; these helpers turn them into clean store fields.

use scraper::Html;
use slug::slugify;
use url::Url;

/// Strip HTML tags from a string, decoding entities along the way
pub fn strip_tags(value: &str) -> String {
    let fragment = Html::parse_fragment(value);
    fragment.root_element().text().collect()
}

/// Clean a char or text field: strip tags, trim, and truncate to
/// `max_chars` if provided (on a character boundary).
pub fn clean_text(value: &str, max_chars: Option<usize>) -> String {
    let cleaned = strip_tags(value);
    let cleaned = cleaned.trim();
    match max_chars {
        Some(max) => cleaned.chars().take(max).collect(),
        None => cleaned.to_string(),
    }
}

/// Derive a slug from a title
pub fn slug_from_title(title: &str) -> String {
    slugify(title)
}

/// Derive a slug from the last path segment of a legacy URL
///
/// Returns None when the URL has no usable path segment (e.g. a bare
/// domain), in which case callers fall back to the title.
pub fn slug_from_url(url: &str) -> Option<String> {
    let path = url_path(url);
    let segment = path.rsplit('/').find(|segment| !segment.is_empty())?;
    let decoded = urlencoding::decode(segment).ok()?;
    let slug = slugify(decoded.as_ref());
    if slug.is_empty() { None } else { Some(slug) }
}

/// Extract the filename from an image URL
pub fn filename_from_url(url: &str) -> Option<String> {
    let path = url_path(url);
    let segment = path.rsplit('/').next().filter(|s| !s.is_empty())?;
    let decoded = urlencoding::decode(segment).ok()?;
    Some(decoded.into_owned())
}

/// The path portion of a URL; relative references are treated as a path
fn url_path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        // Not absolute; strip any query and use the rest as a path.
        Err(_) => url.split(['?', '#']).next().unwrap_or("").to_string(),
    }
}

/// First slug not present in `taken`, probing `base`, `base-1`, `base-2`, ...
pub fn first_free_slug<'a, I>(taken: I, requested: &str) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    let taken: std::collections::HashSet<&str> =
        taken.into_iter().map(|s| s.as_str()).collect();
    let mut slug = requested.to_string();
    let mut number = 1;
    while taken.contains(slug.as_str()) {
        slug = format!("{}-{}", requested, number);
        number += 1;
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags_decodes_entities() {
        assert_eq!(
            strip_tags("<p>Fish &amp; <b>Chips</b></p>"),
            "Fish & Chips"
        );
    }

    #[test]
    fn test_clean_text_trims_and_truncates() {
        assert_eq!(clean_text("  <h1>Hello world</h1>  ", None), "Hello world");
        assert_eq!(clean_text("Hello world", Some(5)), "Hello");
        // Truncation counts characters, not bytes
        assert_eq!(clean_text("日本語のテスト", Some(3)), "日本語");
    }

    #[test]
    fn test_slug_from_title() {
        assert_eq!(slug_from_title("Fish & Chips, twice!"), "fish-chips-twice");
    }

    #[test]
    fn test_slug_from_url_takes_last_segment() {
        assert_eq!(
            slug_from_url("https://example.org/news/2019/old-story/"),
            Some("old-story".to_string())
        );
        assert_eq!(
            slug_from_url("/news/Some%20Story"),
            Some("some-story".to_string())
        );
        assert_eq!(slug_from_url("https://example.org/"), None);
    }

    #[test]
    fn test_filename_from_url() {
        assert_eq!(
            filename_from_url("https://example.org/media/photo.jpg?v=2"),
            Some("photo.jpg".to_string())
        );
        assert_eq!(filename_from_url("https://example.org/media/"), None);
    }

    #[test]
    fn test_first_free_slug_probes_numbered_suffixes() {
        let taken = vec!["story".to_string(), "story-1".to_string()];
        assert_eq!(first_free_slug(&taken, "story"), "story-2");
        assert_eq!(first_free_slug(&taken, "other"), "other");
    }
}
