//! Traversal plans.
//!
//! A plan mirrors the shape of a record: leaves carry a [`Directive`],
//! branches map field names to child plans. A sequence of records shares a
//! single branch for all of its elements, and a sequence of scalars shares a
//! single leaf.
//!
//! Plans are usually derived from a record's directive tags, but they can also
//! be written by hand in YAML:
//!
//! ```yaml
//! id: "rand[1;1000;1]"
//! tags: "regex[[a-z]{3,8}]"
//! owner:
//!   name: "func[full_name]"
//! ```
//!
//! Branch children are kept sorted by field name; that order is the
//! traversal order, and therefore the order in which entropy is consumed.

use crate::directive::Directive;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// Error type for plan loading.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Error reading plan file
    #[error("Failed to read plan file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing or writing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// A node of the traversal plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlanNode {
    Leaf(Directive),
    Branch(BTreeMap<String, PlanNode>),
}

impl PlanNode {
    /// Create a branch from `(field, node)` pairs.
    pub fn branch<I, K>(children: I) -> Self
    where
        I: IntoIterator<Item = (K, PlanNode)>,
        K: Into<String>,
    {
        PlanNode::Branch(
            children
                .into_iter()
                .map(|(name, node)| (name.into(), node))
                .collect(),
        )
    }

    /// Load a plan from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PlanError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a plan from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, PlanError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Render the plan as YAML.
    pub fn to_yaml(&self) -> Result<String, PlanError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Child plan for a field, if this is a branch that has one.
    pub fn child(&self, name: &str) -> Option<&PlanNode> {
        match self {
            PlanNode::Leaf(_) => None,
            PlanNode::Branch(children) => children.get(name),
        }
    }

    /// Number of leaves reachable from this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            PlanNode::Leaf(_) => 1,
            PlanNode::Branch(children) => children.values().map(PlanNode::leaf_count).sum(),
        }
    }

    /// `"leaf"` or `"branch"`, for error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            PlanNode::Leaf(_) => "leaf",
            PlanNode::Branch(_) => "branch",
        }
    }
}

impl<'de> Deserialize<'de> for PlanNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PlanNodeVisitor)
    }
}

struct PlanNodeVisitor;

impl<'de> Visitor<'de> for PlanNodeVisitor {
    type Value = PlanNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a directive string or a mapping of field names to plans")
    }

    fn visit_str<E: de::Error>(self, raw: &str) -> Result<PlanNode, E> {
        raw.parse().map(PlanNode::Leaf).map_err(E::custom)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<PlanNode, A::Error> {
        let mut children = BTreeMap::new();
        while let Some((name, node)) = map.next_entry::<String, PlanNode>()? {
            children.insert(name, node);
        }
        Ok(PlanNode::Branch(children))
    }
}
