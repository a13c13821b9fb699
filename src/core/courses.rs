//! Course listing
//!
//! Maps every course id to the end of its enrollment window, the data behind
//! the platform's course list endpoint.

use crate::adapters::modulestore::ContentStore;
use crate::domain::Result;
use chrono::SecondsFormat;
use serde_json::{Map, Value};

/// Course id to enrollment end, in store order
///
/// Courses without an enrollment end map to `null`.
pub async fn course_enrollment_windows(store: &dyn ContentStore) -> Result<Map<String, Value>> {
    let courses = store.course_summaries().await?;

    let windows = courses
        .into_iter()
        .map(|course| {
            let enrollment_end = course
                .enrollment_end
                .map(|end| Value::String(end.to_rfc3339_opts(SecondsFormat::Secs, true)))
                .unwrap_or(Value::Null);
            (course.id.to_string(), enrollment_end)
        })
        .collect();

    Ok(windows)
}
