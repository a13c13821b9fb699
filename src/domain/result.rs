//! Result type alias for coursegraph

use super::errors::CourseGraphError;

/// Result type alias using [`CourseGraphError`] as the error type
///
/// # Examples
///
/// ```
/// use coursegraph::domain::result::Result;
/// use coursegraph::domain::errors::CourseGraphError;
///
/// fn failing_function() -> Result<()> {
///     Err(CourseGraphError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CourseGraphError>;
