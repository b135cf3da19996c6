use std::collections::{HashMap, HashSet};

use serde_json::Value;

/// String form used when comparing constraint and property values.
///
/// Integral floats print without a fraction (`1.0` becomes `"1"`) so that a
/// property sent as a float still matches an integer constraint.
pub fn to_string_representation(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(u)) => u.to_string(),
            // f64's Display is the shortest round-trip form and drops a zero fraction
            _ => n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string()),
        },
        Value::Array(items) => items
            .iter()
            .map(to_string_representation)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Coerces a constraint or property value into the set of strings it stands for.
///
/// Scalars become a one-element set. Arrays keep only the elements whose
/// string form is non-empty.
pub fn to_comparable_set(value: &Value) -> HashSet<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(to_string_representation)
            .filter(|s| !s.is_empty())
            .collect(),
        other => HashSet::from([to_string_representation(other)]),
    }
}

/// A constraint holds when the actor carries the property and at least one of
/// the required values is among the property's values.
pub fn match_constraint(key: &str, required: &Value, properties: &HashMap<String, Value>) -> bool {
    let Some(actual) = properties.get(key) else {
        return false;
    };

    let required = to_comparable_set(required);
    let actual = to_comparable_set(actual);
    !required.is_disjoint(&actual)
}

/// All constraints must hold; an empty constraint map matches every actor.
pub fn match_constraints(
    constraints: &HashMap<String, Value>,
    properties: &HashMap<String, Value>,
) -> bool {
    constraints
        .iter()
        .all(|(key, required)| match_constraint(key, required, properties))
}
