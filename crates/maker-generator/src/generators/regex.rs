//! String synthesis from `regex[pattern]`.
//!
//! Generation walks the [`RegexOp`] tree and draws fresh entropy at every
//! node, so the same tree can be generated any number of times:
//!
//! - `*` and `+` repeat at most [`REPEAT_LIMIT`] times
//! - alternation generates every branch, then keeps one chosen uniformly
//! - a character class draws one code point per range, then keeps one of
//!   those draws, so each range is equally likely regardless of its size
//! - `.` produces a character from the alphanumeric alphabet
//! - anchors and word boundaries produce nothing

use crate::error::GenerationError;
use crate::generators::random::random_string;
use maker_core::{RegexOp, RegexPattern, ScalarKind, Value};
use rand::Rng;

/// Upper bound for unbounded repetition.
pub const REPEAT_LIMIT: u32 = 10;

const SURROGATE_START: u32 = 0xD800;
const SURROGATE_COUNT: u32 = 0x800;

/// Generate a string matching `pattern` and coerce it into `kind`.
pub fn synthesize<R: Rng>(
    rng: &mut R,
    pattern: &RegexPattern,
    kind: ScalarKind,
) -> Result<Value, GenerationError> {
    let generated = generate(rng, pattern.root())?;
    coerce(generated, kind)
}

/// Coerce generated text into the destination kind.
///
/// Strings are kept, signed integers are parsed, anything else is rejected.
pub fn coerce(generated: String, kind: ScalarKind) -> Result<Value, GenerationError> {
    match kind {
        ScalarKind::String => Ok(Value::String(generated)),
        ScalarKind::Int => match generated.parse::<i64>() {
            Ok(v) => Ok(Value::Int(v)),
            Err(e) => Err(GenerationError::Parse {
                literal: generated,
                kind,
                reason: e.to_string(),
            }),
        },
        _ => Err(GenerationError::UnsupportedKind(kind)),
    }
}

/// Generate one string matching the tree rooted at `op`.
pub fn generate<R: Rng>(rng: &mut R, op: &RegexOp) -> Result<String, GenerationError> {
    match op {
        RegexOp::Star(sub) => repeat(rng, sub, 0, REPEAT_LIMIT),
        RegexOp::Plus(sub) => repeat(rng, sub, 1, REPEAT_LIMIT),
        RegexOp::Quest(sub) => repeat(rng, sub, 0, 1),
        RegexOp::Repeat { sub, min, max } => repeat(rng, sub, *min, *max),
        RegexOp::Alternate(branches) => alternate(rng, branches),
        RegexOp::CharClass(ranges) => char_class(rng, ranges),
        RegexOp::Capture(sub) => generate(rng, sub),
        RegexOp::AnyChar | RegexOp::AnyCharNotNewline => Ok(random_string(rng, 1)),
        RegexOp::Literal(text) => Ok(text.clone()),
        RegexOp::Concat(subs) => concat(rng, subs),
        RegexOp::EmptyMatch | RegexOp::Assertion => Ok(String::new()),
    }
}

fn repeat<R: Rng>(rng: &mut R, sub: &RegexOp, min: u32, max: u32) -> Result<String, GenerationError> {
    let count = rng.random_range(min..=max);
    let mut buffer = String::new();
    for _ in 0..count {
        buffer.push_str(&generate(rng, sub)?);
    }
    Ok(buffer)
}

fn concat<R: Rng>(rng: &mut R, subs: &[RegexOp]) -> Result<String, GenerationError> {
    let mut buffer = String::new();
    for sub in subs {
        let part = generate(rng, sub).map_err(|_| GenerationError::Failed)?;
        buffer.push_str(&part);
    }
    Ok(buffer)
}

fn alternate<R: Rng>(rng: &mut R, branches: &[RegexOp]) -> Result<String, GenerationError> {
    if branches.is_empty() {
        return Err(GenerationError::Failed);
    }
    let mut generated = branches
        .iter()
        .map(|branch| generate(rng, branch))
        .collect::<Result<Vec<_>, _>>()?;
    let chosen = rng.random_range(0..generated.len());
    Ok(generated.swap_remove(chosen))
}

fn char_class<R: Rng>(rng: &mut R, ranges: &[(char, char)]) -> Result<String, GenerationError> {
    if ranges.is_empty() {
        return Err(GenerationError::Failed);
    }
    let drawn = ranges
        .iter()
        .map(|&(start, end)| char_in_range(rng, start, end))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(drawn[rng.random_range(0..drawn.len())].to_string())
}

/// Uniform code point in `start..=end`, skipping the surrogate block.
fn char_in_range<R: Rng>(rng: &mut R, start: char, end: char) -> Result<char, GenerationError> {
    let (start, end) = (u32::from(start), u32::from(end));
    let spans_surrogates = start < SURROGATE_START && end >= SURROGATE_START + SURROGATE_COUNT;
    let gap = if spans_surrogates { SURROGATE_COUNT } else { 0 };

    let mut code = rng.random_range(start..=end - gap);
    if spans_surrogates && code >= SURROGATE_START {
        code += gap;
    }
    char::from_u32(code).ok_or(GenerationError::Failed)
}
