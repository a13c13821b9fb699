//! Block serialization for the Neo4j csv import
//!
//! Every block becomes a flat record of field name to value. Records are
//! grouped by block type (one csv file per type), and the parent/child
//! links between blocks become a separate edge list.

use crate::domain::{BlockType, ContentBlock, CourseKey, UsageKey};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Column holding the node label; the importer expects it first
pub const TYPE_LABEL: &str = "type:LABEL";

/// Column holding the node id
pub const LOCATION_ID: &str = "location:ID";

/// Text written for null and missing values
pub const NULL_VALUE: &str = "NULL";

/// Tree structure is exported through the relationships file instead
const STRUCTURE_FIELDS: [&str; 2] = ["parent", "children"];

/// Deprecated course field that carries no content
const DEPRECATED_FIELD: &str = "checklists";

/// A block flattened to field name and value, in column order
pub type SerializedBlock = Map<String, Value>;

/// Parent to child link between two blocks
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relationship {
    /// Location of the parent block
    pub parent: UsageKey,
    /// Location of the child block
    pub child: UsageKey,
}

impl Relationship {
    /// Csv row for the edge: start id, end id
    pub fn to_row(&self) -> [&str; 2] {
        [self.parent.as_str(), self.child.as_str()]
    }
}

/// Serialized blocks grouped by type, types in discovery order
#[derive(Debug, Default)]
pub struct BlocksByType {
    order: Vec<BlockType>,
    groups: HashMap<BlockType, Vec<SerializedBlock>>,
}

impl BlocksByType {
    /// Add a record to its type's group
    pub fn push(&mut self, block_type: BlockType, block: SerializedBlock) {
        self.groups
            .entry(block_type.clone())
            .or_insert_with(|| {
                self.order.push(block_type);
                Vec::new()
            })
            .push(block);
    }

    /// Records of one type
    pub fn get(&self, block_type: &BlockType) -> Option<&[SerializedBlock]> {
        self.groups.get(block_type).map(Vec::as_slice)
    }

    /// Iterate groups in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&BlockType, &[SerializedBlock])> {
        self.order
            .iter()
            .filter_map(|block_type| self.get(block_type).map(|blocks| (block_type, blocks)))
    }

    /// Number of distinct types
    pub fn type_count(&self) -> usize {
        self.order.len()
    }

    /// Total number of records
    pub fn block_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Whether no records were added
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Serializes blocks to csv records
///
/// Holds the column list chosen for each block type, so every file written
/// during a run keeps the columns of the first record of its type.
#[derive(Debug, Default)]
pub struct ModuleStoreSerializer {
    field_names_by_block_type: HashMap<BlockType, Vec<String>>,
}

impl ModuleStoreSerializer {
    /// Create a serializer with no cached column lists
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten one block into a record
    ///
    /// All declared fields are kept except the tree structure fields, then
    /// the derived columns are added: edit timestamp, display name, node id,
    /// node label and the denormalized course key parts.
    ///
    /// # Examples
    ///
    /// ```
    /// use coursegraph::core::export::serializer::{ModuleStoreSerializer, TYPE_LABEL};
    /// use coursegraph::domain::{ContentBlockBuilder, CourseKey};
    /// use serde_json::json;
    /// use std::str::FromStr;
    ///
    /// let course_key = CourseKey::from_str("course-v1:edX+DemoX+2024").unwrap();
    /// let block = ContentBlockBuilder::new()
    ///     .location("block-v1:edX+DemoX+2024+type@problem+block@quiz").unwrap()
    ///     .block_type("problem").unwrap()
    ///     .field("weight", json!(2))
    ///     .build().unwrap();
    ///
    /// let (record, block_type) = ModuleStoreSerializer::serialize_item(&block, &course_key);
    /// assert_eq!(block_type.as_str(), "problem");
    /// assert_eq!(record[TYPE_LABEL], json!("problem"));
    /// assert_eq!(record["course_key"], json!("course-v1:edX+DemoX+2024"));
    /// ```
    pub fn serialize_item(
        block: &ContentBlock,
        course_key: &CourseKey,
    ) -> (SerializedBlock, BlockType) {
        let mut fields: SerializedBlock = block
            .fields
            .iter()
            .filter(|(name, _)| !STRUCTURE_FIELDS.contains(&name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        let edited_on = block
            .edited_on
            .map(|edited_on| edited_on.to_rfc3339())
            .unwrap_or_default();
        fields.insert("edited_on".to_string(), Value::String(edited_on));
        fields.insert(
            "display_name".to_string(),
            Value::String(block.display_name_with_default()),
        );

        fields.insert(
            LOCATION_ID.to_string(),
            Value::String(block.location.to_string()),
        );
        fields.shift_remove("location");

        let block_type = block.block_type.clone();
        fields.shift_remove("type");
        fields.insert(
            TYPE_LABEL.to_string(),
            Value::String(block_type.to_string()),
        );

        fields.shift_remove(DEPRECATED_FIELD);

        fields.insert("org".to_string(), Value::String(course_key.org().to_string()));
        fields.insert(
            "course".to_string(),
            Value::String(course_key.course().to_string()),
        );
        fields.insert("run".to_string(), Value::String(course_key.run().to_string()));
        fields.insert("course_key".to_string(), Value::String(course_key.to_string()));

        (fields, block_type)
    }

    /// Serialize a course's blocks and group them by type
    pub fn serialize_items(blocks: &[ContentBlock], course_key: &CourseKey) -> BlocksByType {
        let mut blocks_by_type = BlocksByType::default();
        for block in blocks {
            let (serialized, block_type) = Self::serialize_item(block, course_key);
            blocks_by_type.push(block_type, serialized);
        }
        blocks_by_type
    }

    /// Column list for a block type
    ///
    /// The first call for a type fixes its columns from `sample`: the node
    /// label first, then the sample's fields in order. Later calls return
    /// the cached list whatever sample they pass.
    pub fn field_names_for_type(
        &mut self,
        block_type: &BlockType,
        sample: &SerializedBlock,
    ) -> &[String] {
        self.field_names_by_block_type
            .entry(block_type.clone())
            .or_insert_with(|| {
                std::iter::once(TYPE_LABEL.to_string())
                    .chain(
                        sample
                            .keys()
                            .filter(|name| name.as_str() != TYPE_LABEL)
                            .cloned(),
                    )
                    .collect()
            })
    }

    /// Header and rows for a group of records of one type
    ///
    /// Returns `None` for an empty group. Values missing from a record are
    /// written as `NULL`.
    pub fn rows_for_type(
        &mut self,
        block_type: &BlockType,
        blocks: &[SerializedBlock],
    ) -> Option<(Vec<String>, Vec<Vec<String>>)> {
        let first = blocks.first()?;
        let field_names = self.field_names_for_type(block_type, first).to_vec();

        let rows = blocks
            .iter()
            .map(|block| {
                let dropped = dropped_columns(block, &field_names);
                if !dropped.is_empty() {
                    tracing::debug!(
                        block_type = %block_type,
                        columns = ?dropped,
                        "Record has columns outside the {} header; their values are dropped",
                        block_type
                    );
                }
                field_names
                    .iter()
                    .map(|name| match block.get(name) {
                        Some(value) => normalize_value(value),
                        None => NULL_VALUE.to_string(),
                    })
                    .collect()
            })
            .collect();

        Some((field_names, rows))
    }
}

/// Columns of a record that are not in the header for its type
fn dropped_columns<'a>(block: &'a SerializedBlock, field_names: &[String]) -> Vec<&'a str> {
    block
        .keys()
        .filter(|name| !field_names.contains(*name))
        .map(String::as_str)
        .collect()
}

/// Render a field value as csv text
///
/// Null becomes `NULL`; strings are used as-is; other values use their JSON
/// text. The Neo4j importer rejects values that begin with a quote, so
/// while the text starts with `"` or `'` those characters are trimmed from
/// both ends.
///
/// ```
/// use coursegraph::core::export::serializer::normalize_value;
/// use serde_json::json;
///
/// assert_eq!(normalize_value(&json!(null)), "NULL");
/// assert_eq!(normalize_value(&json!("'single'")), "single");
/// assert_eq!(normalize_value(&json!("\"double")), "double");
/// ```
pub fn normalize_value(value: &Value) -> String {
    let mut text = match value {
        Value::Null => NULL_VALUE.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    while text.starts_with(['"', '\'']) {
        text = text.trim_matches('"').trim_matches('\'').to_string();
    }

    text
}

/// Parent/child edges of a course, in discovery order
pub fn relationships_from_items(blocks: &[ContentBlock]) -> Vec<Relationship> {
    blocks
        .iter()
        .filter(|block| block.has_children())
        .flat_map(|block| {
            block.children.iter().map(|child| Relationship {
                parent: block.location.clone(),
                child: child.clone(),
            })
        })
        .collect()
}
