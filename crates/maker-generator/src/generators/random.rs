//! Constrained random values for `rand[min;max;step]`.
//!
//! A draw is uniform in `[min, max)` and is then reduced against the step as
//! `(v - v % step) * step`. The reduction rescales rather than snapping to
//! the nearest multiple, and values generated by earlier releases depend on
//! that exact formula.

use crate::error::{ConstraintError, GenerationError};
use maker_core::{Complex64, Constraints, ScalarKind, Value};
use rand::Rng;

/// Alphabet for random strings and for `.` in patterns.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Check constraints against the destination kind.
pub fn validate(constraints: &Constraints, kind: ScalarKind) -> Result<(), ConstraintError> {
    if constraints.min > constraints.max {
        return Err(ConstraintError::MinAboveMax {
            min: constraints.min,
            max: constraints.max,
        });
    }
    if constraints.step < 0.0 {
        return Err(ConstraintError::NegativeStep(constraints.step));
    }
    if kind.is_integral() && constraints.step.fract() != 0.0 {
        return Err(ConstraintError::FractionalStep {
            step: constraints.step,
            kind,
        });
    }
    if kind == ScalarKind::Uint && constraints.min < 0 {
        return Err(ConstraintError::NegativeUnsigned {
            min: constraints.min,
            kind,
        });
    }
    Ok(())
}

/// Produce a random value of the given kind.
pub fn synthesize<R: Rng>(
    rng: &mut R,
    constraints: &Constraints,
    kind: ScalarKind,
) -> Result<Value, GenerationError> {
    validate(constraints, kind)?;

    let value = match kind {
        ScalarKind::Int => Value::Int(random_i64(rng, constraints)),
        ScalarKind::Uint => Value::Uint(random_i64(rng, constraints) as u64),
        ScalarKind::Float => Value::Float(random_f64(rng, constraints)),
        ScalarKind::Complex => {
            let re = random_f64(rng, constraints);
            let im = random_f64(rng, constraints);
            Value::Complex(Complex64::new(re, im))
        }
        ScalarKind::String => {
            let length = random_i64(rng, constraints).max(0) as usize;
            Value::String(random_string(rng, length))
        }
        ScalarKind::Bool => Value::Bool(rng.random::<f64>() < 0.5),
        ScalarKind::Unsupported(_) => return Err(GenerationError::UnsupportedKind(kind)),
    };

    Ok(value)
}

/// Draw a reduced value and truncate it toward zero.
pub fn random_i64<R: Rng>(rng: &mut R, constraints: &Constraints) -> i64 {
    random_f64(rng, constraints) as i64
}

/// Draw uniformly in `[min, max)` and reduce against the step.
pub fn random_f64<R: Rng>(rng: &mut R, constraints: &Constraints) -> f64 {
    let span = constraints.max as f64 - constraints.min as f64;
    let scaled = rng.random::<f64>() * span + constraints.min as f64;
    reduce_to_step(scaled, constraints.step)
}

fn reduce_to_step(value: f64, step: f64) -> f64 {
    // A zero step would turn every draw into NaN.
    if step == 0.0 {
        return value;
    }
    (value - value % step) * step
}

/// Random string of `length` characters from [`ALPHABET`].
pub fn random_string<R: Rng>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect()
}
