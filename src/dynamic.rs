//! Records described at runtime by a shape file.
//!
//! A [`DynamicRecord`] is built zeroed from a [`RecordDefinition`] and
//! implements [`Record`], so the generator fills it exactly like a derived
//! struct.

use crate::schema::{FieldDefinition, FieldShape, RecordDefinition};
use maker_core::{
    Complex64, FieldDescriptor, FieldKind, Record, ScalarSlot, Sequence, Slot,
};
use serde_json::{json, Map, Value as JsonValue};

/// A record whose fields come from a shape file.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
    name: String,
    fields: Vec<DynamicField>,
}

#[derive(Debug, Clone, PartialEq)]
struct DynamicField {
    name: String,
    kind: FieldKind,
    directive: Option<String>,
    value: DynamicValue,
}

/// Value held by a dynamic field.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    Int(i64),
    Uint(u64),
    Float(f64),
    Complex(Complex64),
    String(String),
    Bool(bool),
    Record(DynamicRecord),
    Sequence(DynamicSequence),
}

/// A fixed-length sequence of dynamic values.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicSequence {
    element: FieldKind,
    items: Vec<DynamicValue>,
}

impl DynamicRecord {
    /// Build a zeroed record from its definition.
    pub fn from_definition(definition: &RecordDefinition) -> Self {
        Self::from_fields(&definition.name, &definition.fields)
    }

    fn from_fields(name: &str, fields: &[FieldDefinition]) -> Self {
        Self {
            name: name.to_string(),
            fields: fields
                .iter()
                .map(|field| DynamicField {
                    name: field.name.clone(),
                    kind: field.shape.kind(),
                    directive: field.directive.clone(),
                    value: DynamicValue::zeroed(&field.name, &field.shape),
                })
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of a field by name.
    pub fn get(&self, name: &str) -> Option<&DynamicValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    /// Render the record as a JSON object.
    pub fn to_json(&self) -> JsonValue {
        let map: Map<String, JsonValue> = self
            .fields
            .iter()
            .map(|field| (field.name.clone(), field.value.to_json()))
            .collect();
        JsonValue::Object(map)
    }
}

impl Record for DynamicRecord {
    fn fields(&self) -> Vec<FieldDescriptor> {
        self.fields
            .iter()
            .map(|field| {
                FieldDescriptor::new(&field.name, field.kind.clone(), field.directive.as_deref())
            })
            .collect()
    }

    fn field_mut(&mut self, name: &str) -> Option<Slot<'_>> {
        self.fields
            .iter_mut()
            .find(|f| f.name == name)
            .map(|f| f.value.slot())
    }
}

impl DynamicValue {
    /// The zero value for a shape. Sequences are pre-sized to their length.
    fn zeroed(name: &str, shape: &FieldShape) -> Self {
        match shape {
            FieldShape::Int => DynamicValue::Int(0),
            FieldShape::Uint => DynamicValue::Uint(0),
            FieldShape::Float => DynamicValue::Float(0.0),
            FieldShape::Complex => DynamicValue::Complex(Complex64::new(0.0, 0.0)),
            FieldShape::String => DynamicValue::String(String::new()),
            FieldShape::Bool => DynamicValue::Bool(false),
            FieldShape::Record { fields } => {
                DynamicValue::Record(DynamicRecord::from_fields(name, fields))
            }
            FieldShape::Sequence { element, length } => DynamicValue::Sequence(DynamicSequence {
                element: element.kind(),
                items: (0..*length)
                    .map(|_| DynamicValue::zeroed(name, element))
                    .collect(),
            }),
        }
    }

    fn slot(&mut self) -> Slot<'_> {
        match self {
            DynamicValue::Int(v) => Slot::Scalar(ScalarSlot::I64(v)),
            DynamicValue::Uint(v) => Slot::Scalar(ScalarSlot::U64(v)),
            DynamicValue::Float(v) => Slot::Scalar(ScalarSlot::F64(v)),
            DynamicValue::Complex(v) => Slot::Scalar(ScalarSlot::Complex64(v)),
            DynamicValue::String(v) => Slot::Scalar(ScalarSlot::String(v)),
            DynamicValue::Bool(v) => Slot::Scalar(ScalarSlot::Bool(v)),
            DynamicValue::Record(record) => Slot::Record(record),
            DynamicValue::Sequence(sequence) => Slot::Sequence(sequence),
        }
    }

    /// Render the value as JSON. Complex numbers become `{re, im}` objects and
    /// non-finite floats become `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            DynamicValue::Int(v) => json!(v),
            DynamicValue::Uint(v) => json!(v),
            DynamicValue::Float(v) => json!(v),
            DynamicValue::Complex(v) => json!({ "re": v.re, "im": v.im }),
            DynamicValue::String(v) => json!(v),
            DynamicValue::Bool(v) => json!(v),
            DynamicValue::Record(record) => record.to_json(),
            DynamicValue::Sequence(sequence) => {
                JsonValue::Array(sequence.items.iter().map(DynamicValue::to_json).collect())
            }
        }
    }
}

impl DynamicSequence {
    pub fn items(&self) -> &[DynamicValue] {
        &self.items
    }
}

impl Sequence for DynamicSequence {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn element_kind(&self) -> FieldKind {
        self.element.clone()
    }

    fn element_mut(&mut self, index: usize) -> Option<Slot<'_>> {
        self.items.get_mut(index).map(DynamicValue::slot)
    }
}
