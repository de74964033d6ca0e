//! Error types for resolution, generation and filling.
//!
//! Every error is returned to the caller of [`Maker::fill`](crate::Maker::fill)
//! unchanged; the first one aborts the traversal and fields written before it
//! keep their values.

use maker_core::{DirectiveError, ScalarKind, ValueError};

/// Constraint violations detected before a random draw.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConstraintError {
    #[error("min bigger than max ({min} > {max})")]
    MinAboveMax { min: i64, max: i64 },

    #[error("negative step {0}")]
    NegativeStep(f64),

    #[error("step {step} not whole number for {kind} type")]
    FractionalStep { step: f64, kind: ScalarKind },

    #[error("negative min {min} for {kind} type")]
    NegativeUnsigned { min: i64, kind: ScalarKind },
}

/// Delegate lookup and coercion failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DelegateError {
    /// No delegate registered under the name
    #[error("map missing fn {0}")]
    Missing(String),

    /// Delegate output does not parse as the destination kind
    #[error("cannot parse `{literal}` as {kind}")]
    Parse { literal: String, kind: ScalarKind },
}

/// Failures while producing a single value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    /// No engine can produce this destination kind
    #[error("kind not supported: {0}")]
    UnsupportedKind(ScalarKind),

    /// A nested regex operator failed
    #[error("generator failed")]
    Failed,

    /// Generated text does not parse as the destination kind
    #[error("cannot parse generated `{literal}` as {kind}: {reason}")]
    Parse {
        literal: String,
        kind: ScalarKind,
        reason: String,
    },

    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    #[error(transparent)]
    Delegate(#[from] DelegateError),

    #[error(transparent)]
    Value(#[from] ValueError),
}

/// Failures while building a plan from a record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// A sequence of records has no element to introspect
    #[error("cannot resolve `{field}`: sequence of records is empty")]
    EmptySequence { field: String },

    /// A field listed by the record is not accessible
    #[error("field `{0}` is described but not accessible")]
    MissingField(String),

    /// A field's described kind disagrees with the slot it hands out
    #[error("field `{field}` described as {described}, found {found}")]
    KindMismatch {
        field: String,
        described: String,
        found: String,
    },

    #[error(transparent)]
    Directive(#[from] DirectiveError),
}

/// Top-level error returned by [`Maker`](crate::Maker).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MakerError {
    /// The fill target is not a mutable record
    #[error("non-pointer argument")]
    NonPointerArgument { found: String },

    /// The plan names a field the record does not have
    #[error("field `{0}` not found in record")]
    UnknownField(String),

    /// The plan's shape disagrees with the record's shape
    #[error("plan has a {expected} for `{field}`, but the field is a {found}")]
    ShapeMismatch {
        field: String,
        expected: &'static str,
        found: String,
    },

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}
