//! Structured validation results
//!
//! An [`Issue`] is either a single message or a map of nested issues whose
//! keys mirror the shape of the rejected input: field names for objects and
//! dictionaries, positions for arrays and tuples. Serialized, an issue is
//! exactly the JSON a client receives, for example
//! `{"tags": {"2": "Must be boolean"}}`.
//!
//! Copyright (c) 2025 Contour Team
//! Licensed under the Apache-2.0 license

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Outcome of validating one value
pub type Validation = std::result::Result<(), Issue>;

/// Nested issues keyed by field name or position, in the order checked
pub type IssueMap = IndexMap<IssueKey, Issue>;

/// Key of an entry in an [`IssueMap`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IssueKey {
    /// Object field or dictionary key
    Field(String),
    /// Array or tuple position
    Index(usize),
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKey::Field(name) => write!(f, "{}", name),
            IssueKey::Index(index) => write!(f, "{}", index),
        }
    }
}

impl Serialize for IssueKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<&str> for IssueKey {
    fn from(name: &str) -> Self {
        IssueKey::Field(name.to_string())
    }
}

impl From<String> for IssueKey {
    fn from(name: String) -> Self {
        IssueKey::Field(name)
    }
}

impl From<usize> for IssueKey {
    fn from(index: usize) -> Self {
        IssueKey::Index(index)
    }
}

/// A validation failure, shaped like the input it describes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Issue {
    /// Leaf failure message
    Message(String),
    /// Failures of nested fields or elements
    Map(IssueMap),
}

impl Issue {
    /// Create a leaf issue
    pub fn message(message: impl Into<String>) -> Self {
        Issue::Message(message.into())
    }

    /// Wrap collected child issues, treating an empty map as "no issue"
    pub fn from_map(map: IssueMap) -> Option<Self> {
        if map.is_empty() {
            None
        } else {
            Some(Issue::Map(map))
        }
    }

    /// Leaf message, if this is a leaf
    pub fn as_message(&self) -> Option<&str> {
        match self {
            Issue::Message(message) => Some(message),
            Issue::Map(_) => None,
        }
    }

    /// Child issues, if this is a map
    pub fn as_map(&self) -> Option<&IssueMap> {
        match self {
            Issue::Message(_) => None,
            Issue::Map(map) => Some(map),
        }
    }

    /// Look up a nested issue by key
    pub fn get(&self, key: impl Into<IssueKey>) -> Option<&Issue> {
        self.as_map().and_then(|map| map.get(&key.into()))
    }

    /// Number of leaf messages contained in this issue
    pub fn leaf_count(&self) -> usize {
        match self {
            Issue::Message(_) => 1,
            Issue::Map(map) => map.values().map(Issue::leaf_count).sum(),
        }
    }

    /// Flatten into `(path, message)` pairs, paths rooted at `$`
    ///
    /// ```
    /// use contour_core::{Issue, IssueMap};
    ///
    /// let mut tags = IssueMap::new();
    /// tags.insert(2.into(), Issue::message("Must be boolean"));
    /// let mut root = IssueMap::new();
    /// root.insert("tags".into(), Issue::Map(tags));
    ///
    /// let flat = Issue::Map(root).flatten();
    /// assert_eq!(flat, vec![("$.tags[2]".to_string(), "Must be boolean".to_string())]);
    /// ```
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.flatten_into("$".to_string(), &mut out);
        out
    }

    fn flatten_into(&self, path: String, out: &mut Vec<(String, String)>) {
        match self {
            Issue::Message(message) => out.push((path, message.clone())),
            Issue::Map(map) => {
                for (key, child) in map {
                    let child_path = match key {
                        IssueKey::Field(name) => format!("{}.{}", path, name),
                        IssueKey::Index(index) => format!("{}[{}]", path, index),
                    };
                    child.flatten_into(child_path, out);
                }
            }
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::Message(message) => write!(f, "{}", message),
            Issue::Map(_) => {
                let lines: Vec<String> = self
                    .flatten()
                    .into_iter()
                    .map(|(path, message)| format!("{}: {}", path, message))
                    .collect();
                write!(f, "{}", lines.join("; "))
            }
        }
    }
}

impl std::error::Error for Issue {}

impl From<&str> for Issue {
    fn from(message: &str) -> Self {
        Issue::Message(message.to_string())
    }
}

impl From<String> for Issue {
    fn from(message: String) -> Self {
        Issue::Message(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nested() -> Issue {
        let mut items = IssueMap::new();
        items.insert(0.into(), Issue::message("Must be string"));
        items.insert(3.into(), Issue::message("Too long"));
        let mut root = IssueMap::new();
        root.insert("items".into(), Issue::Map(items));
        root.insert("name".into(), Issue::message("Required"));
        Issue::Map(root)
    }

    #[test]
    fn test_empty_map_is_no_issue() {
        assert_eq!(Issue::from_map(IssueMap::new()), None);
    }

    #[test]
    fn test_serializes_as_wire_shape() {
        let value = serde_json::to_value(nested()).unwrap();
        assert_eq!(
            value,
            json!({"items": {"0": "Must be string", "3": "Too long"}, "name": "Required"})
        );
    }

    #[test]
    fn test_flatten_paths() {
        let flat = nested().flatten();
        assert_eq!(
            flat,
            vec![
                ("$.items[0]".to_string(), "Must be string".to_string()),
                ("$.items[3]".to_string(), "Too long".to_string()),
                ("$.name".to_string(), "Required".to_string()),
            ]
        );
    }

    #[test]
    fn test_flatten_keeps_insertion_order() {
        let mut root = IssueMap::new();
        root.insert("zeta".into(), Issue::message("Must be string"));
        root.insert(1.into(), Issue::message("Must be number"));
        root.insert("alpha".into(), Issue::message("Required"));
        let paths: Vec<String> = Issue::Map(root)
            .flatten()
            .into_iter()
            .map(|(path, _)| path)
            .collect();
        assert_eq!(paths, vec!["$.zeta", "$[1]", "$.alpha"]);
    }

    #[test]
    fn test_leaf_count_and_lookup() {
        let issue = nested();
        assert_eq!(issue.leaf_count(), 3);
        assert_eq!(
            issue.get("items").and_then(|i| i.get(3)),
            Some(&Issue::message("Too long"))
        );
        assert!(issue.get("missing").is_none());
    }

    #[test]
    fn test_display_leaf() {
        assert_eq!(Issue::message("Required").to_string(), "Required");
    }
}
