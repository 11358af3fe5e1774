//! Personal profile used for contraindication checks.
//!
//! Profiles come from HTML forms and older stored records where checkbox
//! values may be native booleans or the strings `"true"` / `"false"`.
//! Everything is normalized here, once, during deserialization: a flag is
//! true only for `true` or `"true"`, anything else (including `"TRUE"`,
//! `1`, `null`) is false.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "ProfileInput")]
pub struct Profile {
    pub gender: String,
    pub age: Option<u32>,
    pub weight: Option<f64>,
    pub stomach_sensitive: bool,
    pub pregnant: bool,
    /// Free text, matched by substring against medicine names and ingredients.
    pub allergies: String,
    pub alcohol_use: String,
    pub smoking: bool,
    pub conditions: BTreeSet<String>,
}

impl Profile {
    pub fn has_allergies(&self) -> bool {
        !self.allergies.is_empty()
    }
}

/// Raw wire shape. Every field is an untyped `Value` so that no input of
/// the right overall shape is rejected. Alternate key spellings are kept as
/// separate fields; the canonical snake_case key wins, then camelCase, then
/// the short form key.
#[derive(Deserialize, Default)]
#[serde(default)]
struct ProfileInput {
    gender: Value,
    age: Value,
    weight: Value,
    stomach_sensitive: Option<Value>,
    #[serde(rename = "stomachSensitive")]
    stomach_sensitive_camel: Option<Value>,
    stomach: Option<Value>,
    pregnant: Value,
    allergies: Value,
    alcohol_use: Option<Value>,
    #[serde(rename = "alcoholUse")]
    alcohol_use_camel: Option<Value>,
    alcohol: Option<Value>,
    smoking: Value,
    conditions: Value,
}

impl From<ProfileInput> for Profile {
    fn from(input: ProfileInput) -> Self {
        let stomach = input
            .stomach_sensitive
            .or(input.stomach_sensitive_camel)
            .or(input.stomach)
            .unwrap_or_default();
        let alcohol = input
            .alcohol_use
            .or(input.alcohol_use_camel)
            .or(input.alcohol)
            .unwrap_or_default();

        Self {
            gender: coerce_text(input.gender),
            age: coerce_age(&input.age),
            weight: coerce_weight(&input.weight),
            stomach_sensitive: coerce_flag(&stomach),
            pregnant: coerce_flag(&input.pregnant),
            allergies: coerce_text(input.allergies),
            alcohol_use: coerce_text(alcohol),
            smoking: coerce_flag(&input.smoking),
            conditions: coerce_conditions(input.conditions),
        }
    }
}

/// The single coercion rule for boolean-like profile fields.
pub fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s == "true",
        _ => false,
    }
}

fn coerce_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn coerce_age(value: &Value) -> Option<u32> {
    coerce_number(value)
        .filter(|n| n.is_finite() && *n >= 0.0 && *n <= u32::MAX as f64)
        .map(|n| n as u32)
}

fn coerce_weight(value: &Value) -> Option<f64> {
    coerce_number(value).filter(|n| n.is_finite() && *n > 0.0)
}

/// Null or a non-array is empty; non-string items are skipped.
fn coerce_conditions(value: Value) -> BTreeSet<String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => BTreeSet::new(),
    }
}
