//! Derives a traversal plan from a record's directive tags.

use crate::error::ResolveError;
use maker_core::{FieldDescriptor, PlanNode, Record, Slot};
use std::collections::BTreeMap;

/// Build a plan mirroring `record`.
///
/// Nested records become branches. A sequence of records is resolved through
/// its first element, so it must be pre-sized. Scalar fields and sequences of
/// scalars become leaves when tagged; untagged scalars are left out of the
/// plan and are never filled.
pub fn resolve(record: &mut dyn Record) -> Result<PlanNode, ResolveError> {
    let mut children = BTreeMap::new();

    for descriptor in record.fields() {
        if let Some(node) = resolve_field(record, &descriptor)? {
            children.insert(descriptor.name, node);
        }
    }

    Ok(PlanNode::Branch(children))
}

/// Return `explicit` unchanged when present, otherwise derive a plan.
pub fn resolve_with(
    record: &mut dyn Record,
    explicit: Option<&PlanNode>,
) -> Result<PlanNode, ResolveError> {
    match explicit {
        Some(plan) => Ok(plan.clone()),
        None => resolve(record),
    }
}

fn resolve_field(
    record: &mut dyn Record,
    descriptor: &FieldDescriptor,
) -> Result<Option<PlanNode>, ResolveError> {
    if !descriptor.kind.is_composite() {
        return match descriptor.directive.as_deref() {
            Some(raw) => Ok(Some(PlanNode::Leaf(raw.parse()?))),
            None => Ok(None),
        };
    }

    let slot = record
        .field_mut(&descriptor.name)
        .ok_or_else(|| ResolveError::MissingField(descriptor.name.clone()))?;

    resolve_composite(descriptor, slot).map(Some)
}

fn resolve_composite(descriptor: &FieldDescriptor, slot: Slot<'_>) -> Result<PlanNode, ResolveError> {
    match slot {
        Slot::Record(nested) => resolve(nested),
        Slot::Sequence(sequence) => {
            let first = sequence
                .element_mut(0)
                .ok_or_else(|| ResolveError::EmptySequence {
                    field: descriptor.name.clone(),
                })?;
            resolve_composite(descriptor, first)
        }
        Slot::Scalar(scalar) => Err(ResolveError::KindMismatch {
            field: descriptor.name.clone(),
            described: descriptor.kind.to_string(),
            found: scalar.kind().to_string(),
        }),
    }
}
