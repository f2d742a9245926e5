//! Wire-name table for the character sheet schema.
//!
//! Each record lists its fields as `(rust field, wire key, kind)`. The codec
//! walks this table to name the offending field when a decode fails on a
//! type mismatch, and tests check that serialized output uses exactly these
//! keys.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Shape expected for a field's value on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    StringList,
    Record(&'static [WireField]),
}

/// One row of the wire-name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireField {
    /// In-memory field identifier
    pub field: &'static str,
    /// JSON key
    pub key: &'static str,
    pub kind: FieldKind,
}

impl WireField {
    const fn new(field: &'static str, key: &'static str, kind: FieldKind) -> Self {
        Self { field, key, kind }
    }
}

pub const ABILITY_SCORE: &[WireField] = &[
    WireField::new("value", "value", FieldKind::Integer),
    WireField::new("modifier", "modifier", FieldKind::Integer),
];

pub const ABILITY_SCORES: &[WireField] = &[
    WireField::new("strength", "strength", FieldKind::Record(ABILITY_SCORE)),
    WireField::new("dexterity", "dexterity", FieldKind::Record(ABILITY_SCORE)),
    WireField::new("constitution", "constitution", FieldKind::Record(ABILITY_SCORE)),
    WireField::new("intelligence", "intelligence", FieldKind::Record(ABILITY_SCORE)),
    WireField::new("wisdom", "wisdom", FieldKind::Record(ABILITY_SCORE)),
    WireField::new("charisma", "charisma", FieldKind::Record(ABILITY_SCORE)),
];

pub const CLASS_INFO: &[WireField] = &[
    WireField::new("name", "name", FieldKind::String),
    WireField::new("description", "description", FieldKind::String),
    WireField::new("primary_stat", "primaryStat", FieldKind::String),
    WireField::new("hit_die", "hitDie", FieldKind::String),
];

pub const RACE_INFO: &[WireField] = &[
    WireField::new("name", "name", FieldKind::String),
    WireField::new("traits", "traits", FieldKind::StringList),
];

pub const CHARACTER_SHEET: &[WireField] = &[
    WireField::new("name", "name", FieldKind::String),
    WireField::new("race", "race", FieldKind::Record(RACE_INFO)),
    WireField::new("character_class", "class", FieldKind::Record(CLASS_INFO)),
    WireField::new("background", "background", FieldKind::String),
    WireField::new("personality", "personality", FieldKind::String),
    WireField::new("motivation", "motivation", FieldKind::String),
    WireField::new("stats", "stats", FieldKind::Record(ABILITY_SCORES)),
    WireField::new("hit_points", "hp", FieldKind::Integer),
];

/// Envelope wrapping every API payload
pub const RESPONSE_ENVELOPE: &[WireField] = &[
    WireField::new("status", "status", FieldKind::String),
    WireField::new("error", "error", FieldKind::String),
    WireField::new("data", "data", FieldKind::Record(CHARACTER_SHEET)),
    WireField::new("code", "code", FieldKind::Integer),
];

/// Wire key for an in-memory field of `record`
pub fn wire_key(record: &[WireField], field: &str) -> Option<&'static str> {
    record.iter().find(|f| f.field == field).map(|f| f.key)
}

/// Treats an explicit `null` the same as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A value that does not fit the table, with its dotted wire path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Mismatch {
    pub path: String,
    pub message: String,
}

/// Finds the first value in `root` that does not fit `record`.
///
/// `root` itself must be an object; nested records may also be `null`.
pub(crate) fn find_mismatch(root: &Value, record: &'static [WireField]) -> Option<Mismatch> {
    match root {
        Value::Object(_) => check_record(root, record, ""),
        other => Some(mismatch("$", "object", other)),
    }
}

fn check_record(value: &Value, record: &'static [WireField], prefix: &str) -> Option<Mismatch> {
    let obj = value.as_object()?;
    record.iter().find_map(|field| {
        let child = obj.get(field.key)?;
        let path = if prefix.is_empty() {
            field.key.to_string()
        } else {
            format!("{prefix}.{}", field.key)
        };
        check_field(child, field.kind, &path)
    })
}

fn check_field(value: &Value, kind: FieldKind, path: &str) -> Option<Mismatch> {
    match (kind, value) {
        (_, Value::Null) => None,
        (FieldKind::String, Value::String(_)) => None,
        (FieldKind::String, other) => Some(mismatch(path, "string", other)),
        (FieldKind::Integer, Value::Number(n)) if n.as_i64().is_some() => None,
        (FieldKind::Integer, other) => Some(mismatch(path, "integer", other)),
        (FieldKind::StringList, Value::Array(items)) => {
            items.iter().enumerate().find_map(|(i, item)| match item {
                Value::String(_) => None,
                other => Some(mismatch(&format!("{path}[{i}]"), "string", other)),
            })
        }
        (FieldKind::StringList, other) => Some(mismatch(path, "array of strings", other)),
        (FieldKind::Record(fields), Value::Object(_)) => check_record(value, fields, path),
        (FieldKind::Record(_), other) => Some(mismatch(path, "object", other)),
    }
}

fn mismatch(path: &str, expected: &str, found: &Value) -> Mismatch {
    Mismatch {
        path: path.to_string(),
        message: format!("expected {expected}, found {}", describe(found)),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "floating-point number",
        Value::Number(_) => "out-of-range integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
