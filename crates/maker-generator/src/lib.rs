//! Synthetic value generation for records.
//!
//! This crate provides the [`Maker`], which fills any [`Record`] with values
//! chosen by per-field directives:
//!
//! - `rand[min;max;step]` - constrained random numbers, strings and booleans
//! - `regex[pattern]` - strings that match a regular expression
//! - `func[name]` - output of a delegate registered with the maker
//!
//! # Architecture
//!
//! ```text
//! Maker::fill(&mut record)
//!        │
//!        ▼
//! ┌──────────────────┐     ┌─────────────────────┐
//! │ resolver         │────▶│ PlanNode (cached)   │
//! └──────────────────┘     └──────────┬──────────┘
//!                                     ▼
//!                          ┌─────────────────────┐
//!                          │ Filler (StdRng)     │
//!                          └──────────┬──────────┘
//!                                     ▼
//!                 generators::dispatch ─▶ random | regex | delegate
//! ```
//!
//! # Example
//!
//! ```rust
//! use maker_core::{Field, FieldDescriptor, Record, Slot};
//! use maker_generator::Maker;
//!
//! #[derive(Default)]
//! struct User {
//!     age: u8,
//!     handle: String,
//! }
//!
//! impl Record for User {
//!     fn fields(&self) -> Vec<FieldDescriptor> {
//!         vec![
//!             FieldDescriptor::new("age", u8::kind(), Some("rand[18;90;1]")),
//!             FieldDescriptor::new("handle", String::kind(), Some("regex[[a-z]{4,12}]")),
//!         ]
//!     }
//!
//!     fn field_mut(&mut self, name: &str) -> Option<Slot<'_>> {
//!         match name {
//!             "age" => Some(self.age.slot()),
//!             "handle" => Some(self.handle.slot()),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let maker = Maker::with_seed(42);
//! let mut user = User::default();
//! maker.fill(&mut user).unwrap();
//!
//! assert!((18..90).contains(&user.age));
//! assert!((4..=12).contains(&user.handle.len()));
//! ```
//!
//! Structs usually get their `Record` impl from `#[derive(Record)]` in
//! `maker-derive` instead.

pub mod error;
pub mod filler;
pub mod generators;
pub mod maker;
pub mod registry;
pub mod resolver;

// Re-exports for convenience
pub use error::{ConstraintError, DelegateError, GenerationError, MakerError, ResolveError};
pub use filler::Filler;
pub use maker::{Maker, MakerBuilder};
pub use registry::{Delegate, DelegateRegistry};

pub use maker_core::{PlanNode, Record};
