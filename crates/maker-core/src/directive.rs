//! Directive parsing.
//!
//! A directive tells the filler how to populate one field. The kind is
//! chosen by a fixed literal prefix:
//!
//! - `rand` / `rand[min;max;step]` - constrained random value; any of the
//!   three components may be empty and falls back to `1`, `10` and `1`
//! - `regex[pattern]` - string synthesized from a Perl-syntax pattern
//! - `func[name]` - value produced by a registered delegate
//!
//! Directives round-trip through their string form, which is also how they
//! appear in YAML plans.

use crate::pattern::RegexPattern;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

const RANDOM_PREFIX: &str = "rand";
const REGEX_PREFIX: &str = "regex";
const FUNC_PREFIX: &str = "func";

/// Error type for directive parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DirectiveError {
    /// Unrecognized directive prefix
    #[error("option not available {0}")]
    UnknownOption(String),

    /// Recognized prefix with an invalid body
    #[error("malformed directive {directive}: {reason}")]
    Malformed { directive: String, reason: String },

    /// `regex` directive without the `regex[..]` wrapper
    #[error("regex validation failed")]
    RegexValidation,

    /// Pattern inside `regex[..]` failed to parse
    #[error("regex parse failed: {0}")]
    RegexParse(String),

    /// Pattern uses an operator the synthesizer cannot produce
    #[error("unsupported regex operator: {0}")]
    UnsupportedOperator(String),
}

impl DirectiveError {
    fn malformed(directive: &str, reason: impl Into<String>) -> Self {
        DirectiveError::Malformed {
            directive: directive.to_string(),
            reason: reason.into(),
        }
    }
}

/// Bounds and granularity for random values.
///
/// For string destinations `min` and `max` bound the length, not the value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min: i64,
    pub max: i64,
    pub step: f64,
}

impl Constraints {
    pub const DEFAULT: Constraints = Constraints {
        min: 1,
        max: 10,
        step: 1.0,
    };

    pub fn new(min: i64, max: i64, step: f64) -> Self {
        Self { min, max, step }
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A parsed directive.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// `rand[min;max;step]`
    Random(Constraints),
    /// `regex[pattern]`, parsed once and shared
    Regex(Arc<RegexPattern>),
    /// `func[name]`
    Func(String),
}

impl Directive {
    /// Short name of the directive kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Directive::Random(_) => RANDOM_PREFIX,
            Directive::Regex(_) => REGEX_PREFIX,
            Directive::Func(_) => FUNC_PREFIX,
        }
    }
}

impl FromStr for Directive {
    type Err = DirectiveError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.starts_with(REGEX_PREFIX) {
            RegexPattern::from_directive(raw).map(|pattern| Directive::Regex(Arc::new(pattern)))
        } else if let Some(rest) = raw.strip_prefix(RANDOM_PREFIX) {
            parse_constraints(raw, rest).map(Directive::Random)
        } else if let Some(rest) = raw.strip_prefix(FUNC_PREFIX) {
            parse_func_name(raw, rest).map(Directive::Func)
        } else {
            Err(DirectiveError::UnknownOption(raw.to_string()))
        }
    }
}

/// Parse the part of a `rand` directive after the prefix.
fn parse_constraints(raw: &str, rest: &str) -> Result<Constraints, DirectiveError> {
    if rest.is_empty() {
        return Ok(Constraints::DEFAULT);
    }

    let body = rest
        .strip_prefix('[')
        .and_then(|r| r.strip_suffix(']'))
        .ok_or_else(|| DirectiveError::malformed(raw, "expected rand[min;max;step]"))?;

    let parts: Vec<&str> = body.split(';').collect();
    let [min, max, step] = parts.as_slice() else {
        return Err(DirectiveError::malformed(
            raw,
            format!("expected 3 components, found {}", parts.len()),
        ));
    };

    let mut constraints = Constraints::DEFAULT;
    if !min.is_empty() {
        constraints.min = parse_bound(min)
            .ok_or_else(|| DirectiveError::malformed(raw, format!("invalid min `{min}`")))?;
    }
    if !max.is_empty() {
        constraints.max = parse_bound(max)
            .ok_or_else(|| DirectiveError::malformed(raw, format!("invalid max `{max}`")))?;
    }
    if !step.is_empty() {
        constraints.step = parse_step(step)
            .ok_or_else(|| DirectiveError::malformed(raw, format!("invalid step `{step}`")))?;
    }

    Ok(constraints)
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// `min` and `max`: one or more decimal digits.
fn parse_bound(s: &str) -> Option<i64> {
    is_digits(s).then(|| s.parse().ok()).flatten()
}

/// `step`: `\d*(\.\d+)?`, with at least one digit.
fn parse_step(s: &str) -> Option<f64> {
    let valid = match s.split_once('.') {
        Some((whole, fraction)) => is_digits(whole) && !fraction.is_empty() && is_digits(fraction),
        None => is_digits(s),
    };
    valid.then(|| s.parse().ok()).flatten()
}

/// Parse the part of a `func` directive after the prefix.
fn parse_func_name(raw: &str, rest: &str) -> Result<String, DirectiveError> {
    let name = rest
        .strip_prefix('[')
        .and_then(|r| r.strip_suffix(']'))
        .ok_or_else(|| DirectiveError::malformed(raw, "expected func[name]"))?;

    if name.is_empty() || name.contains(']') {
        return Err(DirectiveError::malformed(raw, "invalid function name"));
    }

    Ok(name.to_string())
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Random(c) if *c == Constraints::DEFAULT => f.write_str(RANDOM_PREFIX),
            Directive::Random(c) => write!(f, "{RANDOM_PREFIX}[{};{};{}]", c.min, c.max, c.step),
            Directive::Regex(pattern) => write!(f, "{REGEX_PREFIX}[{}]", pattern.source()),
            Directive::Func(name) => write!(f, "{FUNC_PREFIX}[{name}]"),
        }
    }
}

impl Serialize for Directive {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Directive {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraints(raw: &str) -> Constraints {
        match raw.parse::<Directive>().unwrap() {
            Directive::Random(c) => c,
            other => panic!("Expected Random directive, got {other:?}"),
        }
    }

    #[test]
    fn test_rand_defaults() {
        assert_eq!(constraints("rand"), Constraints::new(1, 10, 1.0));
    }

    #[test]
    fn test_rand_full() {
        assert_eq!(constraints("rand[2;11;.5]"), Constraints::new(2, 11, 0.5));
    }

    #[test]
    fn test_rand_partial() {
        assert_eq!(constraints("rand[2;;]"), Constraints::new(2, 10, 1.0));
        assert_eq!(constraints("rand[;11;]"), Constraints::new(1, 11, 1.0));
        assert_eq!(constraints("rand[;;]"), Constraints::DEFAULT);
    }

    #[test]
    fn test_rand_inverted_range_parses() {
        // Range checks belong to the random engine, not the parser.
        assert_eq!(constraints("rand[5;1;2]"), Constraints::new(5, 1, 2.0));
    }

    #[test]
    fn test_rand_components_are_unsigned() {
        for raw in [
            "rand[-5;1;1]",
            "rand[1;-2;1]",
            "rand[1;2;-2]",
            "rand[+1;2;1]",
            "rand[1;2;1.]",
            "rand[1;2;.]",
            "rand[1;2;1e3]",
            "rand[1;2;inf]",
        ] {
            assert!(
                matches!(
                    raw.parse::<Directive>(),
                    Err(DirectiveError::Malformed { .. })
                ),
                "{raw} should be malformed"
            );
        }
    }

    #[test]
    fn test_rand_malformed() {
        for raw in ["rand[1;2]", "rand[a;2;1]", "rand[1;2;x]", "rand[1;2;1", "randint"] {
            assert!(
                matches!(
                    raw.parse::<Directive>(),
                    Err(DirectiveError::Malformed { .. })
                ),
                "{raw} should be malformed"
            );
        }
    }

    #[test]
    fn test_unknown_option() {
        let err = "bogus123".parse::<Directive>().unwrap_err();
        assert_eq!(err.to_string(), "option not available bogus123");
    }

    #[test]
    fn test_regex_validation() {
        let err = "regex[".parse::<Directive>().unwrap_err();
        assert_eq!(err.to_string(), "regex validation failed");

        let err = "regex(abc)".parse::<Directive>().unwrap_err();
        assert_eq!(err, DirectiveError::RegexValidation);
    }

    #[test]
    fn test_regex_parse_failure() {
        let err = "regex[a{2,1}]".parse::<Directive>().unwrap_err();
        assert!(err.to_string().starts_with("regex parse failed"));
    }

    #[test]
    fn test_func() {
        assert_eq!(
            "func[email]".parse::<Directive>().unwrap(),
            Directive::Func("email".to_string())
        );
        assert!("func[]".parse::<Directive>().is_err());
        assert!("func".parse::<Directive>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for raw in ["rand", "rand[2;11;0.5]", "regex[^[a-z]+$]", "func[name]"] {
            let directive: Directive = raw.parse().unwrap();
            assert_eq!(directive.to_string(), raw);
            assert_eq!(directive.to_string().parse::<Directive>().unwrap(), directive);
        }
    }
}
