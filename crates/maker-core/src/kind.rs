//! Destination kinds.
//!
//! Every fillable location is described by a [`FieldKind`]. Scalar leaves
//! carry a [`ScalarKind`], which is the closed set the value engines switch
//! on when deciding what to produce.

use std::fmt;

/// Semantic kind of a scalar destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Signed integer family (`i8` .. `i64`, `isize`)
    Int,
    /// Unsigned integer family (`u8` .. `u64`, `usize`)
    Uint,
    /// Floating point family (`f32`, `f64`)
    Float,
    /// Complex family (`Complex<f32>`, `Complex<f64>`)
    Complex,
    /// Owned string
    String,
    /// Boolean
    Bool,
    /// A scalar type no engine can produce, named for error messages
    Unsupported(&'static str),
}

impl ScalarKind {
    /// Whether values of this kind must lie on a whole-number grid.
    pub fn is_integral(&self) -> bool {
        matches!(self, ScalarKind::Int | ScalarKind::Uint)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarKind::Int => f.write_str("int"),
            ScalarKind::Uint => f.write_str("uint"),
            ScalarKind::Float => f.write_str("float"),
            ScalarKind::Complex => f.write_str("complex"),
            ScalarKind::String => f.write_str("string"),
            ScalarKind::Bool => f.write_str("bool"),
            ScalarKind::Unsupported(name) => f.write_str(name),
        }
    }
}

/// Shape of a field: a scalar leaf, a nested record, or a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar(ScalarKind),
    Record,
    Sequence(Box<FieldKind>),
}

impl FieldKind {
    /// Whether the plan for this field is a branch rather than a leaf.
    ///
    /// Records are composite; sequences are composite when their elements
    /// are, so `Vec<Vec<i32>>` still takes a single directive.
    pub fn is_composite(&self) -> bool {
        match self {
            FieldKind::Scalar(_) => false,
            FieldKind::Record => true,
            FieldKind::Sequence(element) => element.is_composite(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Scalar(kind) => kind.fmt(f),
            FieldKind::Record => f.write_str("record"),
            FieldKind::Sequence(element) => write!(f, "sequence of {element}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_detection() {
        assert!(!FieldKind::Scalar(ScalarKind::Int).is_composite());
        assert!(FieldKind::Record.is_composite());
        assert!(FieldKind::Sequence(Box::new(FieldKind::Record)).is_composite());
        assert!(!FieldKind::Sequence(Box::new(FieldKind::Scalar(ScalarKind::String))).is_composite());
        assert!(FieldKind::Sequence(Box::new(FieldKind::Sequence(Box::new(FieldKind::Record))))
            .is_composite());
    }

    #[test]
    fn test_display() {
        assert_eq!(ScalarKind::Uint.to_string(), "uint");
        assert_eq!(ScalarKind::Unsupported("char").to_string(), "char");
        assert_eq!(
            FieldKind::Sequence(Box::new(FieldKind::Record)).to_string(),
            "sequence of record"
        );
    }
}
