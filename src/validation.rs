use serde_json::Value;

use crate::db::SqlParam;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Missing,
    Empty,
    NotAnInteger,
    NotPositive,
    UnsupportedType,
}

/// First invalid field of a request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub violation: Violation,
}

impl ValidationError {
    pub fn new(field: &'static str, violation: Violation) -> Self {
        Self { field, violation }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let field = self.field;
        match self.violation {
            Violation::Missing => write!(f, "Le champ {field} est requis."),
            Violation::Empty => write!(f, "Le champ {field} ne peut être vide."),
            Violation::NotAnInteger => write!(f, "Le champ {field} doit être un nombre entier."),
            Violation::NotPositive => {
                write!(f, "Le champ {field} ne peut être zéro ou négatif.")
            }
            Violation::UnsupportedType => {
                write!(f, "Le champ {field} doit être un texte ou un nombre.")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// A required scalar stored as-is: any non-empty string, number or boolean.
pub fn required_value(
    field: &'static str,
    value: Option<Value>,
) -> Result<SqlParam, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::new(field, Violation::Missing)),
        Some(Value::String(s)) if s.is_empty() => {
            Err(ValidationError::new(field, Violation::Empty))
        }
        Some(Value::String(s)) => Ok(SqlParam::Text(s)),
        Some(Value::Number(n)) => Ok(match n.as_i64() {
            Some(i) => SqlParam::Integer(i),
            None => SqlParam::Real(n.as_f64().unwrap_or_default()),
        }),
        Some(Value::Bool(b)) => Ok(SqlParam::Integer(i64::from(b))),
        Some(Value::Array(_) | Value::Object(_)) => {
            Err(ValidationError::new(field, Violation::UnsupportedType))
        }
    }
}

/// A required strictly positive integer. Accepts JSON integers, floats
/// (truncated toward zero) and decimal strings.
pub fn required_id(field: &'static str, value: Option<Value>) -> Result<i64, ValidationError> {
    let parsed = match value {
        None | Some(Value::Null) => return Err(ValidationError::new(field, Violation::Missing)),
        Some(Value::String(s)) if s.is_empty() => {
            return Err(ValidationError::new(field, Violation::Empty));
        }
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Some(_) => None,
    };

    match parsed {
        Some(id) if id > 0 => Ok(id),
        Some(_) => Err(ValidationError::new(field, Violation::NotPositive)),
        None => Err(ValidationError::new(field, Violation::NotAnInteger)),
    }
}

fn truncate(f: f64) -> Option<i64> {
    let t = f.trunc();
    (t.is_finite() && t >= i64::MIN as f64 && t <= i64::MAX as f64).then_some(t as i64)
}
