//! # Todo Record Schema
//!
//! Validation and coercion between raw JSON and [`Todo`] values, plus the
//! durable string encoding.
//!
//! ## Storage Format
//!
//! A JSON array of objects with camelCase keys. Dates are ISO 8601 UTC strings
//! with millisecond precision; optional dates are omitted when unset:
//!
//! ```text
//! [
//!   {
//!     "id": "5f1c…",
//!     "title": "Buy milk",
//!     "description": "",
//!     "dateCreated": "2024-03-07T09:05:02.000Z",
//!     "isDone": false,
//!     "dateMarkedAsToBeDoneToday": "2024-03-07T09:05:02.000Z",
//!     "numberOfTimesMarkedAsToBeDoneToday": 1
//!   }
//! ]
//! ```
//!
//! ## Two Validation Modes
//!
//! - [`validate_batch`] partitions input into valid todos and per-record
//!   failures. Loading from storage uses this: a single malformed record must
//!   not lock the user out of the rest of the list.
//! - [`decode_strict`] fails on the first problem. Imports use this: a bad
//!   file must never be half-applied.
//!
//! Date-like fields are coerced before validation. Accepted inputs are
//! RFC 3339 strings, naive `YYYY-MM-DDTHH:MM:SS[.fff]` strings (read as UTC),
//! plain `YYYY-MM-DD` dates and integer epoch milliseconds. Years outside
//! 0000..=9999 are refused since the encoding cannot represent them.

use crate::model::Todo;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

/// Why a single record failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("{0}")]
    Shape(String),

    #[error("id must not be empty")]
    EmptyId,

    #[error("field '{field}' is not a valid date: {value}")]
    InvalidDate { field: &'static str, value: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("malformed JSON: {0}")]
    Malformed(String),

    #[error("expected a JSON array of todos")]
    NotAnArray,

    #[error("record {index}: {source}")]
    InvalidRecord { index: usize, source: RecordError },

    #[error("record {index}: duplicate id '{id}'")]
    DuplicateId { index: usize, id: String },
}

/// The encoded, storage-side shape of a todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date_created: String,
    pub is_done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_deleted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_marked_as_to_be_done_today: Option<String>,
    pub number_of_times_marked_as_to_be_done_today: u32,
}

impl From<&Todo> for TodoRecord {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.clone(),
            title: todo.title.clone(),
            description: todo.description.clone(),
            date_created: format_date(&todo.date_created),
            is_done: todo.is_done,
            date_deleted: todo.date_deleted.as_ref().map(format_date),
            date_marked_as_to_be_done_today: todo
                .date_marked_as_to_be_done_today
                .as_ref()
                .map(format_date),
            number_of_times_marked_as_to_be_done_today: todo
                .number_of_times_marked_as_to_be_done_today,
        }
    }
}

/// Incoming shape: dates are left as raw JSON so they can be coerced.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    date_created: Value,
    is_done: bool,
    #[serde(default)]
    date_deleted: Option<Value>,
    #[serde(default)]
    date_marked_as_to_be_done_today: Option<Value>,
    number_of_times_marked_as_to_be_done_today: u32,
}

/// Result of validating a batch with partial tolerance.
#[derive(Debug, Default)]
pub struct BatchValidation {
    pub valid: Vec<Todo>,
    pub invalid: Vec<(usize, RecordError)>,
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Coerces a date-like JSON value into a UTC timestamp that
/// [`format_date`] can write back.
pub fn coerce_date(value: &Value) -> Option<DateTime<Utc>> {
    let date = match value {
        Value::String(s) => parse_date_str(s.trim()),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }?;
    (0..=9999).contains(&date.year()).then_some(date)
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn required_date(field: &'static str, value: &Value) -> Result<DateTime<Utc>, RecordError> {
    coerce_date(value).ok_or_else(|| RecordError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

fn optional_date(
    field: &'static str,
    value: Option<&Value>,
) -> Result<Option<DateTime<Utc>>, RecordError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => required_date(field, v).map(Some),
    }
}

/// Validates one raw record.
pub fn validate_record(value: &Value) -> Result<Todo, RecordError> {
    let raw: RawRecord =
        RawRecord::deserialize(value).map_err(|e| RecordError::Shape(e.to_string()))?;

    if raw.id.trim().is_empty() {
        return Err(RecordError::EmptyId);
    }

    Ok(Todo {
        date_created: required_date("dateCreated", &raw.date_created)?,
        date_deleted: optional_date("dateDeleted", raw.date_deleted.as_ref())?,
        date_marked_as_to_be_done_today: optional_date(
            "dateMarkedAsToBeDoneToday",
            raw.date_marked_as_to_be_done_today.as_ref(),
        )?,
        id: raw.id,
        title: raw.title,
        description: raw.description,
        is_done: raw.is_done,
        number_of_times_marked_as_to_be_done_today: raw.number_of_times_marked_as_to_be_done_today,
    })
}

/// Validates every record, partitioning into valid todos and failures.
///
/// A record whose id repeats an earlier valid record is reported as invalid so
/// the surviving list keeps ids unique.
pub fn validate_batch(values: &[Value]) -> BatchValidation {
    let mut batch = BatchValidation::default();
    let mut seen = HashSet::new();

    for (index, value) in values.iter().enumerate() {
        match validate_record(value) {
            Ok(todo) if !seen.insert(todo.id.clone()) => batch
                .invalid
                .push((index, RecordError::Shape(format!("duplicate id '{}'", todo.id)))),
            Ok(todo) => batch.valid.push(todo),
            Err(e) => batch.invalid.push((index, e)),
        }
    }

    batch
}

/// All-or-nothing validation of a JSON array of todos.
pub fn decode_strict(value: &Value) -> Result<Vec<Todo>, SchemaError> {
    let items = value.as_array().ok_or(SchemaError::NotAnArray)?;
    let mut seen = HashSet::new();
    let mut todos = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let todo = validate_record(item)
            .map_err(|source| SchemaError::InvalidRecord { index, source })?;
        if !seen.insert(todo.id.clone()) {
            return Err(SchemaError::DuplicateId {
                index,
                id: todo.id,
            });
        }
        todos.push(todo);
    }

    Ok(todos)
}

/// Decodes the stored string with partial tolerance.
///
/// Only a value that is not a JSON array at all is an error; individual bad
/// records end up in [`BatchValidation::invalid`].
pub fn decode_stored(raw: &str) -> Result<BatchValidation, SchemaError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| SchemaError::Malformed(e.to_string()))?;
    let items = value.as_array().ok_or(SchemaError::NotAnArray)?;
    Ok(validate_batch(items))
}

/// Encodes the list to its durable form.
///
/// The encoded records are validated again before the string is produced, so
/// callers never get a value that [`decode_strict`] would refuse.
pub fn encode(todos: &[Todo]) -> Result<String, SchemaError> {
    let records: Vec<TodoRecord> = todos.iter().map(TodoRecord::from).collect();
    let value = serde_json::to_value(&records).map_err(|e| SchemaError::Malformed(e.to_string()))?;
    decode_strict(&value)?;
    serde_json::to_string(&value).map_err(|e| SchemaError::Malformed(e.to_string()))
}
