//! Generated scalar values.

use crate::kind::ScalarKind;
use num_complex::Complex64;

/// A scalar produced by one of the engines, held at 64-bit width until it
/// is narrowed into its destination slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Uint(u64),
    Float(f64),
    Complex(Complex64),
    String(String),
    Bool(bool),
}

impl Value {
    /// The destination kind this value can be assigned to.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Value::Int(_) => ScalarKind::Int,
            Value::Uint(_) => ScalarKind::Uint,
            Value::Float(_) => ScalarKind::Float,
            Value::Complex(_) => ScalarKind::Complex,
            Value::String(_) => ScalarKind::String,
            Value::Bool(_) => ScalarKind::Bool,
        }
    }
}

/// Error type for assigning values into slots.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    /// The value's kind does not match the slot's kind
    #[error("type mismatch: expected {expected}, got {actual}")]
    Mismatch {
        expected: ScalarKind,
        actual: ScalarKind,
    },
}
