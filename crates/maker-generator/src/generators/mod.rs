//! Value engines and the directive dispatcher.
//!
//! Each directive kind has one engine:
//!
//! - [`random`] for `rand[..]`
//! - [`regex`] for `regex[..]`
//! - [`delegate`] for `func[..]`
//!
//! [`dispatch`] routes a parsed directive to its engine and writes the result
//! into the destination slot.

pub mod delegate;
pub mod random;
pub mod regex;

use crate::error::GenerationError;
use crate::registry::DelegateRegistry;
use maker_core::{Directive, ScalarSlot};
use rand::Rng;

/// Generate a value for `directive` and assign it to `slot`.
pub fn dispatch<R: Rng>(
    rng: &mut R,
    directive: &Directive,
    registry: &DelegateRegistry,
    slot: ScalarSlot<'_>,
) -> Result<(), GenerationError> {
    let kind = slot.kind();

    let value = match directive {
        Directive::Random(constraints) => random::synthesize(rng, constraints, kind)?,
        Directive::Regex(pattern) => regex::synthesize(rng, pattern, kind)?,
        Directive::Func(name) => delegate::invoke(registry, name, kind)?,
    };

    slot.assign(value)?;
    Ok(())
}
