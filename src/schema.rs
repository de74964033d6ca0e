//! Shape files for runtime-described records.
//!
//! A shape file lists record definitions in YAML. Each field has a `type`
//! and an optional directive:
//!
//! ```yaml
//! version: 1
//! seed: 42
//! records:
//!   - name: order
//!     fields:
//!       - name: id
//!         type: uint
//!         directive: "rand[1;100000;1]"
//!       - name: reference
//!         type: string
//!         directive: "regex[[A-Z]{2}-[0-9]{6}]"
//!       - name: lines
//!         type: sequence
//!         length: 3
//!         element:
//!           type: record
//!           fields:
//!             - name: quantity
//!               type: int
//!               directive: "rand[1;20;1]"
//! ```
//!
//! Sequences carry a fixed `length`; the filler never resizes them.

use maker_core::{FieldKind, ScalarKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for shape file operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading shape file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Record not found in shape file
    #[error("Record not found: {0}")]
    RecordNotFound(String),
}

// ============================================================================
// Field and Record Definitions
// ============================================================================

/// Shape of a field value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldShape {
    Int,
    Uint,
    Float,
    Complex,
    String,
    Bool,

    /// Nested record
    Record { fields: Vec<FieldDefinition> },

    /// Fixed-length sequence
    Sequence {
        element: Box<FieldShape>,
        #[serde(default)]
        length: usize,
    },
}

impl FieldShape {
    /// Kind reported to the filler.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldShape::Int => FieldKind::Scalar(ScalarKind::Int),
            FieldShape::Uint => FieldKind::Scalar(ScalarKind::Uint),
            FieldShape::Float => FieldKind::Scalar(ScalarKind::Float),
            FieldShape::Complex => FieldKind::Scalar(ScalarKind::Complex),
            FieldShape::String => FieldKind::Scalar(ScalarKind::String),
            FieldShape::Bool => FieldKind::Scalar(ScalarKind::Bool),
            FieldShape::Record { .. } => FieldKind::Record,
            FieldShape::Sequence { element, .. } => FieldKind::Sequence(Box::new(element.kind())),
        }
    }
}

/// A named field with its shape and optional directive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDefinition {
    /// Field name
    pub name: String,

    /// Field shape (flattened, so `type` sits next to `name`)
    #[serde(flatten)]
    pub shape: FieldShape,

    /// Directive tag such as `rand[1;10;1]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directive: Option<String>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, shape: FieldShape, directive: Option<&str>) -> Self {
        Self {
            name: name.into(),
            shape,
            directive: directive.map(str::to_string),
        }
    }
}

/// A named top-level record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordDefinition {
    /// Record name
    pub name: String,

    /// Field definitions in declaration order
    pub fields: Vec<FieldDefinition>,
}

impl RecordDefinition {
    /// Get a field definition by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}

fn default_version() -> u32 {
    1
}

/// A full shape file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShapeSchema {
    /// Shape file version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Seed used when none is given on the command line
    #[serde(default)]
    pub seed: Option<i64>,

    /// Record definitions
    pub records: Vec<RecordDefinition>,
}

impl ShapeSchema {
    /// Load a shape file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a shape file from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Get a record definition by name.
    pub fn get_record(&self, name: &str) -> Result<&RecordDefinition, SchemaError> {
        self.records
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| SchemaError::RecordNotFound(name.to_string()))
    }

    /// All record names in declaration order.
    pub fn record_names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }
}
