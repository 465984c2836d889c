//! JSON-logic rule interpreter.
//!
//! Implements the subset of JSON-logic used by form conditions and
//! `nextPage` selectors. A rule is either a literal, an array of rules, or a
//! single-key object `{"operator": [args...]}`.

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Failure to evaluate a condition or page selector.
///
/// Never propagated past the evaluator; callers fall back to the fail-closed
/// default and log the error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("Unknown operator '{0}'")]
    UnknownOperator(String),

    #[error("Operator '{operator}' expects at least {expected} argument(s), got {actual}")]
    Arity {
        operator: String,
        expected: usize,
        actual: usize,
    },

    #[error("Malformed rule: {0}")]
    Malformed(String),

    #[error("Invalid page selector: {0}")]
    InvalidSelector(String),
}

/// Evaluates `rule` against the variable scope `vars`.
pub fn apply(rule: &Value, vars: &Value) -> Result<Value, EvaluationError> {
    match rule {
        Value::Array(items) => items
            .iter()
            .map(|item| apply(item, vars))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(map) if map.len() == 1 => {
            let (operator, raw_args) = map
                .iter()
                .next()
                .ok_or_else(|| EvaluationError::Malformed("empty rule".to_string()))?;
            let args: Vec<&Value> = match raw_args {
                Value::Array(items) => items.iter().collect(),
                other => vec![other],
            };
            apply_operator(operator, &args, vars)
        }
        literal => Ok(literal.clone()),
    }
}

fn apply_operator(operator: &str, args: &[&Value], vars: &Value) -> Result<Value, EvaluationError> {
    match operator {
        "var" => {
            let path = match args.first() {
                Some(path) => apply(path, vars)?,
                None => Value::String(String::new()),
            };
            let default = match args.get(1) {
                Some(default) => apply(default, vars)?,
                None => Value::Null,
            };
            Ok(resolve_var(vars, &path).cloned().unwrap_or(default))
        }
        "missing" => {
            let keys = evaluate_all(args, vars)?;
            let missing = flatten(keys)
                .into_iter()
                .filter(|key| {
                    resolve_var(vars, key)
                        .map(|v| v.is_null() || v == &Value::String(String::new()))
                        .unwrap_or(true)
                })
                .collect();
            Ok(Value::Array(missing))
        }
        "if" | "?:" => {
            let mut index = 0;
            while index + 1 < args.len() {
                if truthy(&apply(args[index], vars)?) {
                    return apply(args[index + 1], vars);
                }
                index += 2;
            }
            match args.get(index) {
                Some(otherwise) => apply(otherwise, vars),
                None => Ok(Value::Null),
            }
        }
        "==" | "!=" | "===" | "!==" => {
            require(operator, args, 2)?;
            let left = apply(args[0], vars)?;
            let right = apply(args[1], vars)?;
            let equal = if operator.len() == 3 {
                strict_eq(&left, &right)
            } else {
                loose_eq(&left, &right)
            };
            Ok(Value::Bool(equal == operator.starts_with('=')))
        }
        "!" => {
            require(operator, args, 1)?;
            Ok(Value::Bool(!truthy(&apply(args[0], vars)?)))
        }
        "!!" => {
            require(operator, args, 1)?;
            Ok(Value::Bool(truthy(&apply(args[0], vars)?)))
        }
        "and" => {
            require(operator, args, 1)?;
            let mut last = Value::Null;
            for arg in args {
                last = apply(arg, vars)?;
                if !truthy(&last) {
                    break;
                }
            }
            Ok(last)
        }
        "or" => {
            require(operator, args, 1)?;
            let mut last = Value::Null;
            for arg in args {
                last = apply(arg, vars)?;
                if truthy(&last) {
                    break;
                }
            }
            Ok(last)
        }
        "<" | "<=" | ">" | ">=" => {
            require(operator, args, 2)?;
            let values: Vec<f64> = evaluate_all(args, vars)?.iter().map(to_number).collect();
            let holds = values.windows(2).all(|pair| match operator {
                "<" => pair[0] < pair[1],
                "<=" => pair[0] <= pair[1],
                ">" => pair[0] > pair[1],
                _ => pair[0] >= pair[1],
            });
            Ok(Value::Bool(holds))
        }
        "in" => {
            require(operator, args, 2)?;
            let needle = apply(args[0], vars)?;
            let haystack = apply(args[1], vars)?;
            let found = match (&needle, &haystack) {
                (_, Value::Array(items)) => items.iter().any(|item| loose_eq(item, &needle)),
                (Value::String(n), Value::String(h)) => h.contains(n.as_str()),
                _ => false,
            };
            Ok(Value::Bool(found))
        }
        "cat" => {
            let joined: String = evaluate_all(args, vars)?.iter().map(to_text).collect();
            Ok(Value::String(joined))
        }
        "+" => {
            let sum = evaluate_all(args, vars)?.iter().map(to_number).sum();
            Ok(number(sum))
        }
        "-" => {
            require(operator, args, 1)?;
            let values: Vec<f64> = evaluate_all(args, vars)?.iter().map(to_number).collect();
            match values.as_slice() {
                [only] => Ok(number(-only)),
                [first, rest @ ..] => Ok(number(rest.iter().fold(*first, |acc, v| acc - v))),
                [] => Ok(Value::Null),
            }
        }
        unknown => Err(EvaluationError::UnknownOperator(unknown.to_string())),
    }
}

fn require(operator: &str, args: &[&Value], expected: usize) -> Result<(), EvaluationError> {
    if args.len() < expected {
        return Err(EvaluationError::Arity {
            operator: operator.to_string(),
            expected,
            actual: args.len(),
        });
    }
    Ok(())
}

fn evaluate_all(args: &[&Value], vars: &Value) -> Result<Vec<Value>, EvaluationError> {
    args.iter().map(|arg| apply(arg, vars)).collect()
}

fn flatten(values: Vec<Value>) -> Vec<Value> {
    values
        .into_iter()
        .flat_map(|value| match value {
            Value::Array(items) => items,
            other => vec![other],
        })
        .collect()
}

fn resolve_var<'a>(vars: &'a Value, path: &Value) -> Option<&'a Value> {
    let path = match path {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Null => return Some(vars),
        _ => return None,
    };
    if path.is_empty() {
        return Some(vars);
    }
    path.split('.').try_fold(vars, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => items.get(segment.parse::<usize>().ok()?),
        _ => None,
    })
}

fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Value::Number(Number::from(value as i64))
    } else {
        Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
    }
}

/// JSON-logic truthiness: `0`, `""`, `[]`, `null` and `false` are falsy.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

fn to_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) if s.trim().is_empty() => 0.0,
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        Value::Bool(true) => 1.0,
        Value::Bool(false) | Value::Null => 0.0,
        _ => f64::NAN,
    }
}

/// Renders a value the way string comparisons in conditions expect.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(to_text).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

fn strict_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => left == right,
    }
}

fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(_), _) | (_, Value::Array(_)) | (Value::Object(_), _) | (_, Value::Object(_)) => {
            left == right
        }
        _ => to_number(left) == to_number(right),
    }
}

/// Builds the variable scope shared by all rules.
pub fn scope(entries: Vec<(&str, Value)>) -> Value {
    let map: Map<String, Value> = entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();
    Value::Object(map)
}
