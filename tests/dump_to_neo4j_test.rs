//! Integration tests for the csv dump
//!
//! A single course with every structural level is written to a JSON content
//! store, dumped, and the resulting csv directory is checked file by file.

use coursegraph::adapters::modulestore::{ContentStore, JsonContentStore};
use coursegraph::core::export::{CsvDirectory, ExportCoordinator, RELATIONSHIPS_FILE};
use coursegraph::core::import_command::{BulkImportCommand, ImportOptions};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const COURSE_ID: &str = "course-v1:edX+Toy+2024_T1";

/// Block type and expected number of blocks of that type
const BLOCK_TYPES: [(&str, usize); 8] = [
    ("about", 1),
    ("course", 1),
    ("chapter", 1),
    ("sequential", 1),
    ("vertical", 1),
    ("html", 1),
    ("problem", 1),
    ("video", 2),
];

fn location(block_type: &str, block_id: &str) -> String {
    format!("block-v1:edX+Toy+2024_T1+type@{block_type}+block@{block_id}")
}

fn course_document() -> Value {
    json!({
        "id": COURSE_ID,
        "display_name": "Toy Course",
        "enrollment_end": "2024-12-31T00:00:00Z",
        "blocks": [
            {
                "location": location("course", "course"),
                "block_type": "course",
                "edited_on": "2024-01-03T10:00:00Z",
                "fields": {
                    "display_name": "Toy Course",
                    "checklists": [{"title": "Getting started"}],
                    "self_paced": false
                },
                "children": [location("chapter", "week_1")]
            },
            {
                "location": location("chapter", "week_1"),
                "block_type": "chapter",
                "children": [location("sequential", "lesson_1")]
            },
            {
                "location": location("sequential", "lesson_1"),
                "block_type": "sequential",
                "fields": {"graded": true, "format": "Homework"},
                "children": [location("vertical", "unit_1")]
            },
            {
                "location": location("vertical", "unit_1"),
                "block_type": "vertical",
                "children": [
                    location("html", "welcome"),
                    location("problem", "quiz"),
                    location("video", "intro"),
                    location("video", "outro")
                ]
            },
            {
                "location": location("html", "welcome"),
                "block_type": "html",
                "fields": {"data": "<p>Welcome, \"students\"</p>\n<p>Enjoy</p>"}
            },
            {
                "location": location("problem", "quiz"),
                "block_type": "problem",
                "fields": {"weight": 2, "max_attempts": null, "data": "'<problem/>'"}
            },
            {
                "location": location("video", "intro"),
                "block_type": "video",
                "fields": {"youtube_id_1_0": "abc123", "type": "video"}
            },
            {
                "location": location("video", "outro"),
                "block_type": "video",
                "fields": {"transcripts": {"en": "outro.srt"}}
            },
            {
                "location": location("about", "overview"),
                "block_type": "about",
                "fields": {"data": "About this course"}
            }
        ]
    })
}

async fn open_store() -> (TempDir, Arc<JsonContentStore>) {
    let store_dir = TempDir::new().unwrap();
    std::fs::write(
        store_dir.path().join("toy.json"),
        serde_json::to_string_pretty(&course_document()).unwrap(),
    )
    .unwrap();
    let store = Arc::new(JsonContentStore::open(store_dir.path()).await.unwrap());
    (store_dir, store)
}

async fn dump(store: Arc<JsonContentStore>, csv_dir: &Path, clear: bool) -> CsvDirectory {
    let csv_dir = CsvDirectory::new(csv_dir).unwrap();
    if clear {
        csv_dir.clear().unwrap();
    }
    let mut coordinator = ExportCoordinator::new(store, csv_dir.clone());
    coordinator.dump_to_csv().await.unwrap();
    csv_dir
}

fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|record| record.unwrap().iter().map(str::to_string).collect())
        .collect();
    (header, rows)
}

fn line_counts(csv_dir: &CsvDirectory) -> BTreeMap<String, usize> {
    csv_dir
        .csv_files()
        .unwrap()
        .into_iter()
        .map(|name| {
            let (_, rows) = read_csv(&csv_dir.file_path(&name));
            (name, rows.len() + 1)
        })
        .collect()
}

#[tokio::test]
async fn test_one_csv_per_block_type_plus_relationships() {
    let (_store_dir, store) = open_store().await;
    let out_dir = TempDir::new().unwrap();
    let csv_dir = dump(store, out_dir.path(), true).await;

    let mut expected: Vec<String> = BLOCK_TYPES
        .iter()
        .map(|(block_type, _)| format!("{block_type}.csv"))
        .chain(std::iter::once(RELATIONSHIPS_FILE.to_string()))
        .collect();
    expected.sort();

    assert_eq!(csv_dir.csv_files().unwrap(), expected);
}

#[tokio::test]
async fn test_headers_and_rows() {
    let (_store_dir, store) = open_store().await;
    let out_dir = TempDir::new().unwrap();
    let csv_dir = dump(store, out_dir.path(), true).await;

    for (block_type, count) in BLOCK_TYPES {
        let (header, rows) = read_csv(&csv_dir.file_path(&format!("{block_type}.csv")));

        assert_eq!(header[0], "type:LABEL", "{block_type} header");
        assert!(header.iter().any(|h| h == "location:ID"), "{block_type} header");
        for column in ["org", "course", "run", "course_key", "display_name", "edited_on"] {
            assert!(header.iter().any(|h| h == column), "{block_type} lacks {column}");
        }
        for column in ["parent", "children", "location", "type", "checklists"] {
            assert!(!header.iter().any(|h| h == column), "{block_type} has {column}");
        }

        assert_eq!(rows.len(), count, "{block_type} rows");
        for row in &rows {
            assert_eq!(row[0], block_type);
            assert_eq!(row.len(), header.len());
        }
    }
}

#[tokio::test]
async fn test_row_values() {
    let (_store_dir, store) = open_store().await;
    let out_dir = TempDir::new().unwrap();
    let csv_dir = dump(store, out_dir.path(), true).await;

    let (header, rows) = read_csv(&csv_dir.file_path("problem.csv"));
    let value = |name: &str| {
        let index = header.iter().position(|h| h == name).unwrap();
        rows[0][index].clone()
    };
    assert_eq!(value("location:ID"), location("problem", "quiz"));
    assert_eq!(value("display_name"), "quiz");
    assert_eq!(value("max_attempts"), "NULL");
    assert_eq!(value("data"), "<problem/>");
    assert_eq!(value("weight"), "2");
    assert_eq!(value("org"), "edX");
    assert_eq!(value("course"), "Toy");
    assert_eq!(value("run"), "2024_T1");
    assert_eq!(value("course_key"), COURSE_ID);
    assert_eq!(value("edited_on"), "");

    let (header, rows) = read_csv(&csv_dir.file_path("video.csv"));
    let youtube = header.iter().position(|h| h == "youtube_id_1_0").unwrap();
    assert_eq!(rows[0][youtube], "abc123");
    assert_eq!(rows[1][youtube], "NULL");
    assert!(!header.iter().any(|h| h == "transcripts"));

    let (header, rows) = read_csv(&csv_dir.file_path("course.csv"));
    let edited_on = header.iter().position(|h| h == "edited_on").unwrap();
    assert_eq!(rows[0][edited_on], "2024-01-03T10:00:00+00:00");
}

#[tokio::test]
async fn test_relationships_one_row_per_edge() {
    let (_store_dir, store) = open_store().await;
    let out_dir = TempDir::new().unwrap();
    let csv_dir = dump(store, out_dir.path(), true).await;

    let (header, rows) = read_csv(&csv_dir.file_path(RELATIONSHIPS_FILE));
    assert_eq!(header, [":START_ID", ":END_ID"]);
    assert_eq!(rows.len(), 7);
    assert!(rows.contains(&vec![location("course", "course"), location("chapter", "week_1")]));
    assert!(rows.contains(&vec![location("vertical", "unit_1"), location("video", "outro")]));
}

#[tokio::test]
async fn test_rerun_with_clear_is_identical() {
    let (_store_dir, store) = open_store().await;
    let out_dir = TempDir::new().unwrap();

    let first = line_counts(&dump(store.clone(), out_dir.path(), true).await);
    let second = line_counts(&dump(store, out_dir.path(), true).await);

    assert_eq!(first, second);
    assert_eq!(first[RELATIONSHIPS_FILE], 8);
    assert_eq!(first["video.csv"], 3);
}

#[tokio::test]
async fn test_rerun_without_clear_appends() {
    let (_store_dir, store) = open_store().await;
    let out_dir = TempDir::new().unwrap();

    let first = line_counts(&dump(store.clone(), out_dir.path(), true).await);
    let csv_dir = dump(store, out_dir.path(), false).await;
    let second = line_counts(&csv_dir);

    for (file, lines) in &first {
        assert_eq!(second[file], 2 * lines - 1, "{file} appended without a second header");
    }

    let contents = std::fs::read_to_string(csv_dir.file_path("video.csv")).unwrap();
    assert_eq!(contents.matches("type:LABEL").count(), 1);
}

#[tokio::test]
async fn test_request_cache_cleared_after_dump() {
    let (_store_dir, store) = open_store().await;
    let out_dir = TempDir::new().unwrap();
    dump(store.clone(), out_dir.path(), true).await;

    assert_eq!(store.cached_courses(), 0);
    let items = store
        .items(&COURSE_ID.parse().unwrap())
        .await
        .unwrap();
    assert_eq!(items.len(), 9);
    assert_eq!(store.cached_courses(), 1);
}

#[tokio::test]
async fn test_import_command_lists_every_type() {
    let (_store_dir, store) = open_store().await;
    let out_dir = TempDir::new().unwrap();
    let csv_dir = dump(store, out_dir.path(), true).await;

    let command =
        BulkImportCommand::for_directory("/opt/neo4j", &csv_dir, ImportOptions::default())
            .unwrap();
    let text = command.to_string();

    for (block_type, _) in BLOCK_TYPES {
        let source = format!(
            "--nodes:{block_type} {}",
            csv_dir.file_path(&format!("{block_type}.csv")).display()
        );
        assert!(text.contains(&source), "missing {source}");
    }
    assert_eq!(text.matches("--relationships:PARENT_OF").count(), 1);
    assert!(text.starts_with("/opt/neo4j/bin/neo4j-import --id-type string"));
}
