// tests/import_news.rs

//! Integration tests for the news import.
//!
//! These tests verify that:
//! 1. Records map onto pages with published revisions and redirects
//! 2. Re-running an import skips already-imported records
//! 3. Colliding slugs are deduplicated among siblings
//! 4. A record that fails validation is skipped without aborting the run

use porter::db;
use porter::db::models::{Page, Redirect, Revision};
use porter::importer::{NewsImporter, run_import};
use porter::{MediaStore, source};
use std::io::Write;
use tempfile::TempDir;

struct Store {
    _temp_dir: TempDir,
    db_path: String,
    media: MediaStore,
}

/// Create a store with a seeded root and a news index under it
fn setup_store() -> (Store, i64) {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_str()
        .unwrap()
        .to_string();

    let conn = db::init(&db_path).unwrap();
    let root = Page::find_root(&conn).unwrap().unwrap();
    let index = root
        .add_child(
            &conn,
            Page::new("news-index", "News".to_string(), "news".to_string()),
        )
        .unwrap();
    let index_id = index.id.unwrap();

    let media = MediaStore::new(temp_dir.path().join("media")).unwrap();
    (
        Store {
            _temp_dir: temp_dir,
            db_path,
            media,
        },
        index_id,
    )
}

fn write_source(store: &Store, json: &str) -> String {
    let path = store._temp_dir.path().join("source.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(json.as_bytes()).unwrap();
    path.to_str().unwrap().to_string()
}

const TWO_RECORDS: &str = r#"[
    {
        "nid": "101",
        "title": "First &amp; Foremost",
        "created": "2018-06-01 12:00:00",
        "url": "https://legacy.example.org/news/first-foremost",
        "body": "<p>Opening paragraph.</p>"
    },
    {
        "nid": 102,
        "title": "Second Story",
        "created": "2018-06-02 08:15:00",
        "url": "https://legacy.example.org/news/second-story",
        "body": "<p>More <em>news</em>.</p>"
    }
]"#;

#[test]
fn test_import_creates_published_pages_with_redirects() {
    let (store, index_id) = setup_store();
    let path = write_source(&store, TWO_RECORDS);

    let records = source::load(&path).unwrap();
    let mut conn = db::open(&store.db_path).unwrap();
    let report = run_import(&NewsImporter, &mut conn, &store.media, index_id, &records).unwrap();

    assert_eq!(report.created, 2);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.failed, 0);

    let index = Page::find_by_id(&conn, index_id).unwrap().unwrap();
    let children = index.children(&conn).unwrap();
    assert_eq!(children.len(), 2);

    let first = Page::find_by_legacy_id(&conn, "news", "101")
        .unwrap()
        .unwrap();
    assert_eq!(first.title, "First & Foremost");
    assert_eq!(first.slug, "first-foremost");
    assert_eq!(first.body, "<p>Opening paragraph.</p>");
    assert!(first.live);
    assert_eq!(
        first.first_published_at.as_deref(),
        Some("2018-06-01T12:00:00+00:00")
    );

    // Type-specific field landed in the extra JSON
    let extra: serde_json::Value =
        serde_json::from_str(first.extra.as_deref().unwrap()).unwrap();
    assert_eq!(extra["publication_date"], "2018-06-01T12:00:00+00:00");

    // One published revision per page
    let revisions = Revision::list_for_page(&conn, first.id.unwrap()).unwrap();
    assert_eq!(revisions.len(), 1);
    assert!(revisions[0].published_at.is_some());

    // One redirect per page, keyed on the legacy URL
    let redirect = Redirect::find_by_old_path(&conn, "https://legacy.example.org/news/first-foremost")
        .unwrap()
        .unwrap();
    assert_eq!(redirect.page_id, first.id.unwrap());
    assert_eq!(Redirect::list_all(&conn).unwrap().len(), 2);
}

#[test]
fn test_reimport_skips_existing_records() {
    let (store, index_id) = setup_store();
    let path = write_source(&store, TWO_RECORDS);
    let records = source::load(&path).unwrap();
    let mut conn = db::open(&store.db_path).unwrap();

    let first = run_import(&NewsImporter, &mut conn, &store.media, index_id, &records).unwrap();
    assert_eq!(first.created, 2);

    let second = run_import(&NewsImporter, &mut conn, &store.media, index_id, &records).unwrap();
    assert_eq!(second.created, 0);
    assert_eq!(second.skipped, 2);

    let index = Page::find_by_id(&conn, index_id).unwrap().unwrap();
    assert_eq!(index.children(&conn).unwrap().len(), 2);
    assert_eq!(Redirect::list_all(&conn).unwrap().len(), 2);
}

#[test]
fn test_colliding_slugs_are_deduplicated() {
    let (store, index_id) = setup_store();
    let json = r#"[
        {"nid": 1, "title": "Same", "created": "2018-01-01 00:00:00",
         "url": "https://legacy.example.org/a/story", "body": ""},
        {"nid": 2, "title": "Same", "created": "2018-01-02 00:00:00",
         "url": "https://legacy.example.org/b/story", "body": ""}
    ]"#;
    let path = write_source(&store, json);
    let records = source::load(&path).unwrap();
    let mut conn = db::open(&store.db_path).unwrap();

    run_import(&NewsImporter, &mut conn, &store.media, index_id, &records).unwrap();

    let index = Page::find_by_id(&conn, index_id).unwrap().unwrap();
    let slugs: Vec<String> = index
        .children(&conn)
        .unwrap()
        .into_iter()
        .map(|page| page.slug)
        .collect();
    assert_eq!(slugs, vec!["story".to_string(), "story-1".to_string()]);
}

#[test]
fn test_validation_failure_skips_record_and_continues() {
    let (store, index_id) = setup_store();
    // The middle record's title cleans down to nothing, which the page
    // insert rejects; its neighbours must still import.
    let json = r#"[
        {"nid": 1, "title": "Good One", "created": "2018-01-01 00:00:00",
         "url": "https://legacy.example.org/news/good-one", "body": ""},
        {"nid": 2, "title": "<p>   </p>", "created": "2018-01-02 00:00:00",
         "url": "https://legacy.example.org/news/broken", "body": ""},
        {"nid": 3, "title": "Good Two", "created": "2018-01-03 00:00:00",
         "url": "https://legacy.example.org/news/good-two", "body": ""}
    ]"#;
    let path = write_source(&store, json);
    let records = source::load(&path).unwrap();
    let mut conn = db::open(&store.db_path).unwrap();

    let report = run_import(&NewsImporter, &mut conn, &store.media, index_id, &records).unwrap();
    assert_eq!(report.created, 2);
    assert_eq!(report.failed, 1);

    // The failed record left nothing behind
    assert!(
        Page::find_by_legacy_id(&conn, "news", "2")
            .unwrap()
            .is_none()
    );
    assert!(
        Redirect::find_by_old_path(&conn, "https://legacy.example.org/news/broken")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_import_rejects_wrong_parent_type() {
    let (store, _index_id) = setup_store();
    let mut conn = db::open(&store.db_path).unwrap();
    let root = Page::find_root(&conn).unwrap().unwrap();
    let root_id = root.id.unwrap();

    let err = run_import(&NewsImporter, &mut conn, &store.media, root_id, &[]).unwrap_err();
    assert!(matches!(err, porter::Error::ParentType { .. }));
}

#[test]
fn test_import_rejects_missing_parent() {
    let (store, _index_id) = setup_store();
    let mut conn = db::open(&store.db_path).unwrap();

    let err = run_import(&NewsImporter, &mut conn, &store.media, 9999, &[]).unwrap_err();
    assert!(matches!(err, porter::Error::PageNotFound(9999)));
}

#[test]
fn test_non_array_source_file_is_rejected() {
    let (store, _index_id) = setup_store();
    let path = write_source(&store, r#"{"nid": 1}"#);
    let err = source::load(&path).unwrap_err();
    assert!(matches!(err, porter::Error::SourceData(_)));
}
