//! Content blocks and course summaries
//!
//! A [`ContentBlock`] is one node in a course's content tree. Its fields are
//! an open, insertion-ordered JSON map because every block type declares its
//! own set of fields.

use super::ids::{BlockType, CourseKey, UsageKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Summary of a course as listed by the content store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSummary {
    /// Course key
    pub id: CourseKey,

    /// Human-readable course name
    #[serde(default)]
    pub display_name: Option<String>,

    /// Enrollment window start
    #[serde(default)]
    pub enrollment_start: Option<DateTime<Utc>>,

    /// Enrollment window end
    #[serde(default)]
    pub enrollment_end: Option<DateTime<Utc>>,
}

/// A node in a course's content tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Stable identifier of the block
    pub location: UsageKey,

    /// Block type (category)
    pub block_type: BlockType,

    /// Last edit timestamp
    #[serde(default)]
    pub edited_on: Option<DateTime<Utc>>,

    /// Declared fields and their values, in declaration order
    #[serde(default)]
    pub fields: Map<String, Value>,

    /// Locations of the child blocks, in order
    #[serde(default)]
    pub children: Vec<UsageKey>,
}

impl ContentBlock {
    /// Whether the block has any children
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Value of a declared field
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Display name, falling back to the block id with underscores as spaces
    ///
    /// ```
    /// use coursegraph::domain::block::ContentBlockBuilder;
    ///
    /// let block = ContentBlockBuilder::new()
    ///     .location("block-v1:edX+DemoX+2024+type@video+block@intro_video").unwrap()
    ///     .block_type("video").unwrap()
    ///     .build().unwrap();
    /// assert_eq!(block.display_name_with_default(), "intro video");
    /// ```
    pub fn display_name_with_default(&self) -> String {
        match self.field("display_name") {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            _ => self.location.block_id().replace('_', " "),
        }
    }
}

/// Builder for [`ContentBlock`]
#[derive(Debug, Default)]
pub struct ContentBlockBuilder {
    location: Option<UsageKey>,
    block_type: Option<BlockType>,
    edited_on: Option<DateTime<Utc>>,
    fields: Map<String, Value>,
    children: Vec<UsageKey>,
}

impl ContentBlockBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the location
    pub fn location(mut self, location: impl Into<String>) -> Result<Self, String> {
        self.location = Some(UsageKey::new(location)?);
        Ok(self)
    }

    /// Set the block type
    pub fn block_type(mut self, block_type: impl Into<String>) -> Result<Self, String> {
        self.block_type = Some(BlockType::new(block_type)?);
        Ok(self)
    }

    /// Set the edit timestamp
    pub fn edited_on(mut self, edited_on: DateTime<Utc>) -> Self {
        self.edited_on = Some(edited_on);
        self
    }

    /// Add a field, keeping declaration order
    pub fn field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Add a child location
    pub fn child(mut self, location: UsageKey) -> Self {
        self.children.push(location);
        self
    }

    /// Build the block
    pub fn build(self) -> Result<ContentBlock, String> {
        Ok(ContentBlock {
            location: self.location.ok_or("Block location is required")?,
            block_type: self.block_type.ok_or("Block type is required")?,
            edited_on: self.edited_on,
            fields: self.fields,
            children: self.children,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_requires_location_and_type() {
        assert!(ContentBlockBuilder::new().build().is_err());
        assert!(ContentBlockBuilder::new()
            .location("block-v1:edX+DemoX+2024+type@html+block@a")
            .unwrap()
            .build()
            .is_err());
    }

    #[test]
    fn test_display_name_with_default_prefers_field() {
        let block = ContentBlockBuilder::new()
            .location("block-v1:edX+DemoX+2024+type@html+block@welcome_text")
            .unwrap()
            .block_type("html")
            .unwrap()
            .field("display_name", json!("Welcome"))
            .build()
            .unwrap();
        assert_eq!(block.display_name_with_default(), "Welcome");
    }

    #[test]
    fn test_display_name_with_default_null_field() {
        let block = ContentBlockBuilder::new()
            .location("block-v1:edX+DemoX+2024+type@html+block@welcome_text")
            .unwrap()
            .block_type("html")
            .unwrap()
            .field("display_name", Value::Null)
            .build()
            .unwrap();
        assert_eq!(block.display_name_with_default(), "welcome text");
    }

    #[test]
    fn test_block_deserialize_keeps_field_order() {
        let raw = r#"{
            "location": "block-v1:edX+DemoX+2024+type@problem+block@p1",
            "block_type": "problem",
            "fields": {"weight": 1, "display_name": "Quiz", "attempts": null},
            "children": []
        }"#;
        let block: ContentBlock = serde_json::from_str(raw).unwrap();
        let names: Vec<&String> = block.fields.keys().collect();
        assert_eq!(names, ["weight", "display_name", "attempts"]);
        assert!(!block.has_children());
        assert!(block.edited_on.is_none());
    }
}
