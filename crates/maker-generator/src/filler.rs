//! Walks a record along a plan and fills every leaf.

use crate::error::MakerError;
use crate::generators::dispatch;
use crate::registry::DelegateRegistry;
use maker_core::{PlanNode, Record, Sequence, Slot};
use rand::Rng;
use tracing::trace;

/// Recursive filler driven by one entropy stream.
///
/// The first error aborts the walk. Fields written before it keep their
/// values.
pub struct Filler<'a, R> {
    rng: R,
    registry: &'a DelegateRegistry,
}

impl<'a, R: Rng> Filler<'a, R> {
    pub fn new(rng: R, registry: &'a DelegateRegistry) -> Self {
        Self { rng, registry }
    }

    /// Fill the fields of `record` named by the branch `plan`.
    pub fn fill_record(&mut self, record: &mut dyn Record, plan: &PlanNode) -> Result<(), MakerError> {
        let children = match plan {
            PlanNode::Branch(children) => children,
            PlanNode::Leaf(_) => {
                return Err(MakerError::ShapeMismatch {
                    field: "<root>".to_string(),
                    expected: plan.shape_name(),
                    found: "record".to_string(),
                })
            }
        };

        for (name, child) in children {
            let slot = record
                .field_mut(name)
                .ok_or_else(|| MakerError::UnknownField(name.clone()))?;
            self.fill_slot(name, slot, child)?;
        }
        Ok(())
    }

    /// Fill one field, recursing into records and sequences.
    pub fn fill_slot(&mut self, field: &str, slot: Slot<'_>, plan: &PlanNode) -> Result<(), MakerError> {
        match (slot, plan) {
            (Slot::Scalar(scalar), PlanNode::Leaf(directive)) => {
                trace!(field, directive = %directive, "Dispatching directive");
                dispatch(&mut self.rng, directive, self.registry, scalar)?;
                Ok(())
            }
            (Slot::Record(record), PlanNode::Branch(_)) => self.fill_record(record, plan),
            (Slot::Sequence(sequence), _) => self.fill_sequence(field, sequence, plan),
            (slot, plan) => Err(MakerError::ShapeMismatch {
                field: field.to_string(),
                expected: plan.shape_name(),
                found: slot.kind_name(),
            }),
        }
    }

    /// Fill every element of `sequence` with the same plan.
    fn fill_sequence(
        &mut self,
        field: &str,
        sequence: &mut dyn Sequence,
        plan: &PlanNode,
    ) -> Result<(), MakerError> {
        for index in 0..sequence.len() {
            let element = sequence
                .element_mut(index)
                .ok_or_else(|| MakerError::UnknownField(format!("{field}[{index}]")))?;
            self.fill_slot(field, element, plan)?;
        }
        Ok(())
    }
}
