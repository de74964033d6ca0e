//! record-maker
//!
//! Fills records with synthetic values for tests, fixtures and benchmarks.
//! Each field carries a directive:
//!
//! - `rand[min;max;step]` - constrained random value
//! - `regex[pattern]` - string matching a regular expression
//! - `func[name]` - value from a registered delegate
//!
//! # Crates
//!
//! - `maker_core` - record accessor traits, directives and plans
//! - `maker_generator` - the `Maker`, resolver, filler and value engines
//! - `maker_derive` - `#[derive(Record)]` for plain structs
//!
//! This crate adds records described at runtime by YAML shape files and the
//! `record-maker` CLI.
//!
//! # CLI Usage
//!
//! ```bash
//! # Ten orders as JSON lines
//! record-maker generate --schema shapes.yaml --record order --count 10 --seed 42
//!
//! # Print the derived plan, edit it, and generate with it
//! record-maker plan --schema shapes.yaml --record order > order-plan.yaml
//! record-maker generate --schema shapes.yaml --record order --plan order-plan.yaml
//! ```

pub mod dynamic;
pub mod generate;
pub mod schema;

pub use dynamic::{DynamicRecord, DynamicSequence, DynamicValue};
pub use generate::{GenerateArgs, PlanArgs, RowGenerator};
pub use schema::{FieldDefinition, FieldShape, RecordDefinition, SchemaError, ShapeSchema};
