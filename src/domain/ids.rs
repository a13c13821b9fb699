//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers the content store hands out:
//! course keys, block usage keys ("locations") and block types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Namespace prefix of modern course keys
const COURSE_KEY_PREFIX: &str = "course-v1:";

/// Textual form a [`CourseKey`] was parsed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CourseKeyFormat {
    /// `course-v1:ORG+COURSE+RUN`
    V1,
    /// `ORG/COURSE/RUN`
    Legacy,
}

/// Course identifier made of organization, course number and run
///
/// Both the `course-v1:ORG+COURSE+RUN` form and the legacy slash-separated
/// `ORG/COURSE/RUN` form are accepted. The key displays in the form it was
/// parsed from.
///
/// # Examples
///
/// ```
/// use coursegraph::domain::ids::CourseKey;
/// use std::str::FromStr;
///
/// let key = CourseKey::from_str("course-v1:edX+DemoX+2024_T1").unwrap();
/// assert_eq!(key.org(), "edX");
/// assert_eq!(key.course(), "DemoX");
/// assert_eq!(key.run(), "2024_T1");
/// assert_eq!(key.to_string(), "course-v1:edX+DemoX+2024_T1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseKey {
    org: String,
    course: String,
    run: String,
    format: CourseKeyFormat,
}

impl CourseKey {
    /// Creates a `course-v1` key from its parts
    pub fn new(
        org: impl Into<String>,
        course: impl Into<String>,
        run: impl Into<String>,
    ) -> Result<Self, String> {
        let key = Self {
            org: org.into(),
            course: course.into(),
            run: run.into(),
            format: CourseKeyFormat::V1,
        };
        key.validate()?;
        Ok(key)
    }

    fn validate(&self) -> Result<(), String> {
        for (name, part) in [("org", &self.org), ("course", &self.course), ("run", &self.run)] {
            if part.trim().is_empty() {
                return Err(format!("Course key {name} cannot be empty"));
            }
            if part.contains(['+', '/', ' ']) {
                return Err(format!("Course key {name} contains invalid characters: {part}"));
            }
        }
        Ok(())
    }

    /// Organization that owns the course
    pub fn org(&self) -> &str {
        &self.org
    }

    /// Course number
    pub fn course(&self) -> &str {
        &self.course
    }

    /// Course run
    pub fn run(&self) -> &str {
        &self.run
    }
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            CourseKeyFormat::V1 => {
                write!(f, "{COURSE_KEY_PREFIX}{}+{}+{}", self.org, self.course, self.run)
            }
            CourseKeyFormat::Legacy => write!(f, "{}/{}/{}", self.org, self.course, self.run),
        }
    }
}

impl FromStr for CourseKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (body, separator, format) = match s.strip_prefix(COURSE_KEY_PREFIX) {
            Some(body) => (body, '+', CourseKeyFormat::V1),
            None => (s, '/', CourseKeyFormat::Legacy),
        };

        let parts: Vec<&str> = body.split(separator).collect();
        if parts.len() != 3 {
            return Err(format!(
                "Invalid course key '{s}'. Expected course-v1:ORG+COURSE+RUN or ORG/COURSE/RUN"
            ));
        }

        let key = Self {
            org: parts[0].to_string(),
            course: parts[1].to_string(),
            run: parts[2].to_string(),
            format,
        };
        key.validate()?;
        Ok(key)
    }
}

impl TryFrom<String> for CourseKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CourseKey> for String {
    fn from(key: CourseKey) -> Self {
        key.to_string()
    }
}

/// Block location (usage key)
///
/// The stable identifier of a block inside a course, e.g.
/// `block-v1:edX+DemoX+2024_T1+type@problem+block@a1b2`. Legacy
/// `i4x://org/course/category/name` locations are accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UsageKey(String);

impl UsageKey {
    /// Creates a new usage key
    pub fn new(location: impl Into<String>) -> Result<Self, String> {
        let location = location.into();
        if location.trim().is_empty() {
            return Err("Block location cannot be empty".to_string());
        }
        Ok(Self(location))
    }

    /// Returns the location as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Block id: the last component of the location
    ///
    /// ```
    /// use coursegraph::domain::ids::UsageKey;
    ///
    /// let key = UsageKey::new("block-v1:edX+DemoX+2024+type@video+block@intro_video").unwrap();
    /// assert_eq!(key.block_id(), "intro_video");
    /// ```
    pub fn block_id(&self) -> &str {
        if let Some((_, id)) = self.0.rsplit_once("block@") {
            return id;
        }
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for UsageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UsageKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for UsageKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UsageKey> for String {
    fn from(key: UsageKey) -> Self {
        key.0
    }
}

impl AsRef<str> for UsageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Block type (category) such as `course`, `chapter` or `problem`
///
/// Block types name the per-type CSV files, so they must be usable as a
/// file stem and must not collide with the relationships file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlockType(String);

impl BlockType {
    /// Creates a new block type
    pub fn new(block_type: impl Into<String>) -> Result<Self, String> {
        let block_type = block_type.into();
        if block_type.trim().is_empty() {
            return Err("Block type cannot be empty".to_string());
        }
        if block_type.contains(['/', '\\']) || block_type.starts_with('.') {
            return Err(format!("Block type is not a valid file name: {block_type}"));
        }
        if block_type == "relationships" {
            return Err("Block type 'relationships' is reserved".to_string());
        }
        Ok(Self(block_type))
    }

    /// Returns the block type as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BlockType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for BlockType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BlockType> for String {
    fn from(block_type: BlockType) -> Self {
        block_type.0
    }
}
