use std::{borrow::Borrow, fmt, ops::Deref};

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};

/// A course identifier, normalized to uppercase.
///
/// Both insertion into the catalog and lookup go through [`CourseId::new`],
/// so `cs101` and `CS101` name the same course.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CourseId(String);

impl CourseId {
    /// Creates a course identifier, uppercasing the raw text.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.to_uppercase())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CourseId {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for CourseId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<CourseId> for String {
    fn from(value: CourseId) -> Self {
        value.0
    }
}

impl AsRef<str> for CourseId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CourseId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Deref for CourseId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single course in the catalog.
///
/// A course always has a name. Prerequisites are kept in the order they were
/// listed in the source and are not deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    id: CourseId,
    name: NonEmptyString,
    prerequisites: Vec<String>,
}

impl Course {
    /// Creates a course with no prerequisites.
    #[must_use]
    pub const fn new(id: CourseId, name: NonEmptyString) -> Self {
        Self {
            id,
            name,
            prerequisites: Vec::new(),
        }
    }

    /// Replaces the prerequisite list.
    #[must_use]
    pub fn with_prerequisites(mut self, prerequisites: Vec<String>) -> Self {
        self.prerequisites = prerequisites;
        self
    }

    /// Appends a prerequisite, keeping any existing entries.
    pub fn push_prerequisite(&mut self, prerequisite: String) {
        self.prerequisites.push(prerequisite);
    }

    /// The course identifier.
    #[must_use]
    pub const fn id(&self) -> &CourseId {
        &self.id
    }

    /// The course name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The prerequisite identifiers, in source order.
    #[must_use]
    pub fn prerequisites(&self) -> &[String] {
        &self.prerequisites
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}, {}", self.id, self.name)
    }
}
