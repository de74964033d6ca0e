//! Values produced by registered delegates for `func[name]`.

use crate::error::{DelegateError, GenerationError};
use crate::registry::DelegateRegistry;
use maker_core::{Complex64, ScalarKind, Value};

/// Call the delegate registered as `name` and parse its output into `kind`.
pub fn invoke(
    registry: &DelegateRegistry,
    name: &str,
    kind: ScalarKind,
) -> Result<Value, GenerationError> {
    let delegate = registry
        .get(name)
        .ok_or_else(|| DelegateError::Missing(name.to_string()))?;

    if let ScalarKind::Unsupported(_) = kind {
        return Err(GenerationError::UnsupportedKind(kind));
    }

    Ok(parse_literal(delegate(), kind)?)
}

/// Parse delegate output into a value of the destination kind.
pub fn parse_literal(literal: String, kind: ScalarKind) -> Result<Value, DelegateError> {
    let parsed = match kind {
        ScalarKind::Int => literal.parse::<i64>().ok().map(Value::Int),
        ScalarKind::Uint => literal.parse::<u64>().ok().map(Value::Uint),
        ScalarKind::Float => literal.parse::<f64>().ok().map(Value::Float),
        ScalarKind::Complex => literal.parse::<Complex64>().ok().map(Value::Complex),
        ScalarKind::Bool => parse_bool(&literal).map(Value::Bool),
        ScalarKind::String => return Ok(Value::String(literal)),
        ScalarKind::Unsupported(_) => None,
    };

    parsed.ok_or(DelegateError::Parse { literal, kind })
}

fn parse_bool(literal: &str) -> Option<bool> {
    match literal {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
