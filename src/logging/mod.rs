//! Logging and observability
//!
//! Structured logging with `tracing`: human-readable console output plus an
//! optional rotating JSON log file.
//!
//! ```no_run
//! use coursegraph::logging::init_logging;
//! use coursegraph::config::LoggingConfig;
//!
//! let _guard = init_logging("info", &LoggingConfig::default()).expect("logging");
//! tracing::info!(csv_dir = "/tmp/csvs", "Starting dump");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log progress through the course list
///
/// ```no_run
/// use coursegraph::log_course_progress;
///
/// log_course_progress!(1, 12, "course-v1:edX+DemoX+2024");
/// ```
#[macro_export]
macro_rules! log_course_progress {
    ($index:expr, $total:expr, $course_key:expr) => {
        tracing::info!(
            index = $index,
            total = $total,
            course_key = %$course_key,
            "dumping course {}/{}: {}",
            $index,
            $total,
            $course_key
        );
    };
}

/// Log an error with context
///
/// ```no_run
/// use coursegraph::log_error_with_context;
/// use coursegraph::domain::CourseGraphError;
///
/// let error = CourseGraphError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
