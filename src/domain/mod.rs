//! Domain models and types for coursegraph.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`CourseKey`], [`UsageKey`], [`BlockType`])
//! - **Content models** ([`ContentBlock`], [`CourseSummary`])
//! - **Error types** ([`CourseGraphError`], [`ModuleStoreError`], [`StorageError`])
//! - **Result type alias** ([`Result`])
//!
//! ```rust
//! use coursegraph::domain::{CourseKey, UsageKey};
//! use std::str::FromStr;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let course_key = CourseKey::from_str("course-v1:edX+DemoX+2024")?;
//! let location = UsageKey::new("block-v1:edX+DemoX+2024+type@course+block@course")?;
//! # Ok(())
//! # }
//! ```

pub mod block;
pub mod errors;
pub mod ids;
pub mod result;

pub use block::{ContentBlock, ContentBlockBuilder, CourseSummary};
pub use errors::{CourseGraphError, ModuleStoreError, StorageError};
pub use ids::{BlockType, CourseKey, UsageKey};
pub use result::Result;
