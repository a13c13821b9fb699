//! Plain-text dump of HTML blocks
//!
//! Every `html` block's markup is reduced to its visible text and written to
//! a single csv file with the columns `text,location,course_key`.

use crate::adapters::modulestore::ContentStore;
use crate::core::export::writer::absolutize;
use crate::domain::{CourseGraphError, Result};
use scraper::{Html, Node};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Header of the html text file
pub const HTML_TEXT_HEADER: [&str; 3] = ["text", "location", "course_key"];

/// Block type whose markup is extracted
pub const HTML_BLOCK_TYPE: &str = "html";

/// Elements whose contents are never visible text
const HIDDEN_ELEMENTS: [&str; 2] = ["script", "style"];

/// Visible text of one html block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTextRow {
    /// Extracted text
    pub text: String,
    /// Block location
    pub location: String,
    /// Course the block belongs to
    pub course_key: String,
}

impl HtmlTextRow {
    fn to_record(&self) -> [&str; 3] {
        [&self.text, &self.location, &self.course_key]
    }
}

/// Visible text of an html fragment
///
/// Script and style contents and comments are dropped. The remaining text
/// nodes are concatenated, trimmed, newlines become spaces and carriage
/// returns are removed.
///
/// ```
/// use coursegraph::core::html_text::extract_text;
///
/// let text = extract_text("<style>p {}</style><p>Hello\n<b>world</b></p><!-- draft -->");
/// assert_eq!(text, "Hello world");
/// ```
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut text = String::new();
    for node in document.tree.root().descendants() {
        let Node::Text(content) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            matches!(ancestor.value(), Node::Element(element) if HIDDEN_ELEMENTS.contains(&element.name()))
        });
        if !hidden {
            text.push_str(content);
        }
    }

    text.trim().replace('\n', " ").replace('\r', "")
}

/// Extract the text of every html block in the store
///
/// Courses are visited in store order and the request cache is cleared
/// after each one. A block without a string `data` field yields empty text.
pub async fn collect_html_text(store: &dyn ContentStore) -> Result<Vec<HtmlTextRow>> {
    let mut rows = Vec::new();

    for course in store.course_summaries().await? {
        let items = store.items(&course.id).await?;
        let course_key = course.id.to_string();

        for block in items
            .iter()
            .filter(|block| block.block_type.as_str() == HTML_BLOCK_TYPE)
        {
            let text = match block.field("data") {
                Some(Value::String(data)) => extract_text(data),
                _ => String::new(),
            };
            rows.push(HtmlTextRow {
                text,
                location: block.location.to_string(),
                course_key: course_key.clone(),
            });
        }

        store.clear_request_cache();
    }

    tracing::info!(row_count = rows.len(), "Collected html block text");
    Ok(rows)
}

/// Write rows to `path`, replacing any existing file
///
/// # Returns
///
/// The absolute path written.
pub fn write_html_text(path: impl AsRef<Path>, rows: &[HtmlTextRow]) -> Result<PathBuf> {
    let path = absolutize(path)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(&path).map_err(|e| {
        CourseGraphError::Io(format!("Failed to create {}: {}", path.display(), e))
    })?;
    writer.write_record(HTML_TEXT_HEADER)?;
    for row in rows {
        writer.write_record(row.to_record())?;
    }
    writer.flush()?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::modulestore::JsonContentStore;
    use serde_json::json;
    use tempfile::TempDir;
    use test_case::test_case;

    #[test_case("<p>Plain</p>", "Plain" ; "paragraph")]
    #[test_case("  <div>\n  padded\n</div>  ", "padded" ; "trimmed")]
    #[test_case("<p>line one\r\nline two</p>", "line one line two" ; "newlines")]
    #[test_case("<script>alert(1)</script><p>safe</p>", "safe" ; "script dropped")]
    #[test_case("<p>a<!-- hidden -->b</p>", "ab" ; "comment dropped")]
    #[test_case("", "" ; "empty")]
    fn test_extract_text(html: &str, expected: &str) {
        assert_eq!(extract_text(html), expected);
    }

    #[tokio::test]
    async fn test_collect_html_text_only_html_blocks() {
        let store_dir = TempDir::new().unwrap();
        let document = json!({
            "id": "course-v1:edX+DemoX+2024",
            "blocks": [
                {
                    "location": "block-v1:edX+DemoX+2024+type@html+block@intro",
                    "block_type": "html",
                    "fields": {"data": "<h1>Welcome</h1>"}
                },
                {
                    "location": "block-v1:edX+DemoX+2024+type@html+block@empty",
                    "block_type": "html"
                },
                {
                    "location": "block-v1:edX+DemoX+2024+type@problem+block@quiz",
                    "block_type": "problem",
                    "fields": {"data": "<problem/>"}
                }
            ]
        });
        std::fs::write(store_dir.path().join("demo.json"), document.to_string()).unwrap();
        let store = JsonContentStore::open(store_dir.path()).await.unwrap();

        let rows = collect_html_text(&store).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text, "Welcome");
        assert_eq!(rows[0].course_key, "course-v1:edX+DemoX+2024");
        assert_eq!(rows[1].text, "");
        assert_eq!(store.cached_courses(), 0);
    }

    #[test]
    fn test_write_html_text_truncates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("modules.csv");
        std::fs::write(&path, "stale contents\n").unwrap();

        let rows = vec![HtmlTextRow {
            text: "Hello, world".to_string(),
            location: "block-v1:edX+DemoX+2024+type@html+block@h".to_string(),
            course_key: "course-v1:edX+DemoX+2024".to_string(),
        }];
        write_html_text(&path, &rows).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "text,location,course_key");
        assert_eq!(
            lines[1],
            "\"Hello, world\",block-v1:edX+DemoX+2024+type@html+block@h,course-v1:edX+DemoX+2024"
        );
        assert_eq!(lines.len(), 2);
    }
}
