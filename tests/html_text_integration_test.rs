//! Integration tests for the html text dump and course listing commands

use coursegraph::cli::commands::courses::ListCoursesArgs;
use coursegraph::cli::commands::html_text::HtmlTextArgs;
use coursegraph::cli::commands::EXIT_SUCCESS;
use serde_json::json;
use tempfile::TempDir;

fn write_store() -> TempDir {
    let store_dir = TempDir::new().unwrap();
    let courses = [
        (
            "demo.json",
            json!({
                "id": "course-v1:edX+DemoX+2024",
                "enrollment_end": "2024-06-30T00:00:00Z",
                "blocks": [
                    {
                        "location": "block-v1:edX+DemoX+2024+type@html+block@intro",
                        "block_type": "html",
                        "fields": {
                            "data": "<html><head><style>h1 {color: red}</style></head><body><h1>Intro</h1>\r\n<p>Read this.</p></body></html>"
                        }
                    },
                    {
                        "location": "block-v1:edX+DemoX+2024+type@video+block@v",
                        "block_type": "video"
                    }
                ]
            }),
        ),
        (
            "legacy.json",
            json!({
                "id": "edX/Legacy/2013",
                "blocks": [
                    {
                        "location": "i4x://edX/Legacy/html/notes",
                        "block_type": "html",
                        "fields": {"data": "<script>track()</script>Notes"}
                    }
                ]
            }),
        ),
    ];
    for (file, document) in courses {
        std::fs::write(store_dir.path().join(file), document.to_string()).unwrap();
    }
    store_dir
}

#[tokio::test]
async fn test_dump_html_as_text() {
    let store_dir = write_store();
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("modules.csv");

    let args = HtmlTextArgs {
        output: Some(output.to_string_lossy().to_string()),
        store: Some(store_dir.path().to_string_lossy().to_string()),
    };
    assert_eq!(args.execute(None).await.unwrap(), EXIT_SUCCESS);

    let mut reader = csv::Reader::from_path(&output).unwrap();
    assert_eq!(
        reader.headers().unwrap().iter().collect::<Vec<_>>(),
        ["text", "location", "course_key"]
    );
    let rows: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();

    assert_eq!(
        rows,
        vec![
            vec![
                "Intro Read this.".to_string(),
                "block-v1:edX+DemoX+2024+type@html+block@intro".to_string(),
                "course-v1:edX+DemoX+2024".to_string(),
            ],
            vec![
                "Notes".to_string(),
                "i4x://edX/Legacy/html/notes".to_string(),
                "edX/Legacy/2013".to_string(),
            ],
        ]
    );
}

#[tokio::test]
async fn test_list_courses() {
    let store_dir = write_store();
    let args = ListCoursesArgs {
        store: Some(store_dir.path().to_string_lossy().to_string()),
    };
    assert_eq!(args.execute(None).await.unwrap(), EXIT_SUCCESS);
}
