//! Core types for the record-maker framework.
//!
//! This crate provides the foundational types shared by the generator,
//! the derive macro and the dynamic records of the CLI:
//!
//! - [`ScalarKind`] / [`FieldKind`] - closed set of destination kinds
//! - [`Record`], [`Sequence`], [`Field`] - the record accessor capability
//! - [`Slot`] / [`ScalarSlot`] - mutable views into a record's fields
//! - [`Value`] - a generated scalar before it is narrowed into its slot
//! - [`Directive`] - parsed `rand[..]`, `regex[..]` and `func[..]` tags
//! - [`PlanNode`] - the traversal plan mirroring a record's shape
//! - [`RegexOp`] - the operator tree used to synthesize strings from a pattern
//!
//! # Architecture
//!
//! ```text
//! maker-core (this crate)
//!    │
//!    ├─── maker-derive     (#[derive(Record)] emits maker_core::Record impls)
//!    ├─── maker-generator  (resolver, filler and value engines)
//!    └─── record-maker     (YAML-described dynamic records + CLI)
//! ```
//!
//! # Example
//!
//! ```rust
//! use maker_core::{Directive, PlanNode};
//!
//! let plan = PlanNode::from_yaml(r#"
//! id: "rand[1;100;1]"
//! email: "regex[[a-z]{8}@example\\.com]"
//! address:
//!   city: "func[city]"
//! "#).unwrap();
//!
//! assert_eq!(
//!     plan.child("id"),
//!     Some(&PlanNode::Leaf("rand[1;100;1]".parse::<Directive>().unwrap()))
//! );
//! ```

pub mod directive;
pub mod kind;
pub mod pattern;
pub mod plan;
pub mod record;
pub mod value;

// Re-exports for convenience
pub use directive::{Constraints, Directive, DirectiveError};
pub use kind::{FieldKind, ScalarKind};
pub use pattern::{RegexOp, RegexPattern};
pub use plan::{PlanError, PlanNode};
pub use record::{Field, FieldDescriptor, Record, ScalarSlot, Sequence, Slot};
pub use value::{Value, ValueError};

pub use num_complex::{Complex32, Complex64};
