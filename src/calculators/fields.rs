use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::CalcError;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldKind {
    Number { min: f64, max: f64, step: f64 },
    Integer { min: i64, max: i64 },
    Toggle,
    Choice { options: Vec<&'static str> },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn number(key: &'static str, label: &'static str, min: f64, max: f64, step: f64) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Number { min, max, step },
        }
    }

    pub fn integer(key: &'static str, label: &'static str, min: i64, max: i64) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Integer { min, max },
        }
    }

    pub fn toggle(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Toggle,
        }
    }

    pub fn choice(key: &'static str, label: &'static str, options: &[&'static str]) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Choice {
                options: options.to_vec(),
            },
        }
    }

    fn coerce(&self, raw: &Value) -> Result<Value, CalcError> {
        match &self.kind {
            FieldKind::Number { min, max, .. } => {
                let v = numeric(self.key, raw)?;
                Ok(json_number(v.clamp(*min, *max)))
            }
            FieldKind::Integer { min, max } => {
                let v = numeric(self.key, raw)?.round();
                let clamped = v.clamp(*min as f64, *max as f64) as i64;
                Ok(Value::Number(Number::from(clamped)))
            }
            FieldKind::Toggle => toggle(self.key, raw).map(Value::Bool),
            FieldKind::Choice { options } => {
                let s = match raw {
                    Value::String(s) => s.trim(),
                    _ => return Err(CalcError::invalid_field(self.key, "expected a string")),
                };
                if options.iter().any(|o| *o == s) {
                    Ok(Value::String(s.to_string()))
                } else {
                    Err(CalcError::invalid_field(
                        self.key,
                        format!("must be one of {}", options.join(", ")),
                    ))
                }
            }
        }
    }
}

fn numeric(key: &str, raw: &Value) -> Result<f64, CalcError> {
    let value = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .trim_end_matches('%')
                .chars()
                .filter(|c| *c != ',' && *c != '$' && *c != '_')
                .collect();
            cleaned.trim().parse::<f64>().ok()
        }
        _ => None,
    };
    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(CalcError::invalid_field(key, "expected a finite number")),
    }
}

fn toggle(key: &str, raw: &Value) -> Result<bool, CalcError> {
    match raw {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|v| v != 0.0)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "on" | "yes" => Ok(true),
            "false" | "0" | "off" | "no" | "" => Ok(false),
            _ => Err(CalcError::invalid_field(key, "expected true or false")),
        },
        _ => Err(CalcError::invalid_field(key, "expected true or false")),
    }
}

fn json_number(v: f64) -> Value {
    Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
}

/// Overlays `raw` onto `defaults`, coercing and clamping every field the
/// calculator declares. Keys without a field spec are ignored.
pub fn normalize(
    fields: &[FieldSpec],
    defaults: Value,
    raw: &Map<String, Value>,
) -> Result<Value, CalcError> {
    let mut merged = match defaults {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    for field in fields {
        let Some(value) = raw.get(field.key) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        merged.insert(field.key.to_string(), field.coerce(value)?);
    }

    Ok(Value::Object(merged))
}
