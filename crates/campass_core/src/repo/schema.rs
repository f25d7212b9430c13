//! Table mapping for each record kind.
//!
//! # Invariants
//! - `COLUMNS` lists every non-id column, in the order `to_values` emits.
//! - Decoding rejects out-of-range flags and unparsable timestamps instead
//!   of masking them.

use crate::model::deadline::DeadlineFields;
use crate::model::event::EventFields;
use crate::model::note::NoteFields;
use crate::model::record::Record;
use crate::model::timestamp::{format_timestamp, parse_timestamp};
use crate::repo::record_repo::{RepoError, RepoResult};
use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::Row;

/// SQL mapping for one record kind's table.
pub trait RecordSchema: Record {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    /// Encodes every field as a bind value, in `COLUMNS` order.
    fn to_values(&self) -> Vec<Value>;

    /// Decodes the fields from a row selected with `COLUMNS`.
    fn from_row(row: &Row<'_>) -> RepoResult<Self>;
}

impl RecordSchema for DeadlineFields {
    const TABLE: &'static str = "deadlines";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "due_at",
        "completed",
        "pinned",
        "icon_index",
        "color_index",
        "notification_enabled",
        "notification_minutes_before",
        "widget",
    ];

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.title.clone()),
            Value::Text(self.description.clone()),
            timestamp_value(&self.due_at),
            bool_value(self.completed),
            bool_value(self.pinned),
            Value::Integer(i64::from(self.icon_index)),
            Value::Integer(i64::from(self.color_index)),
            bool_value(self.notification_enabled),
            optional_int_value(self.notification_minutes_before),
            bool_value(self.widget),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            title: row.get("title")?,
            description: row.get("description")?,
            due_at: timestamp_column(row, Self::TABLE, "due_at")?,
            completed: bool_column(row, Self::TABLE, "completed")?,
            pinned: bool_column(row, Self::TABLE, "pinned")?,
            icon_index: row.get("icon_index")?,
            color_index: row.get("color_index")?,
            notification_enabled: bool_column(row, Self::TABLE, "notification_enabled")?,
            notification_minutes_before: row.get("notification_minutes_before")?,
            widget: bool_column(row, Self::TABLE, "widget")?,
        })
    }
}

impl RecordSchema for EventFields {
    const TABLE: &'static str = "events";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "start_time",
        "end_time",
        "completed",
        "notification_enabled",
        "notification_minutes_before",
    ];

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.title.clone()),
            Value::Text(self.description.clone()),
            timestamp_value(&self.start_time),
            timestamp_value(&self.end_time),
            bool_value(self.completed),
            bool_value(self.notification_enabled),
            optional_int_value(self.notification_minutes_before),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            title: row.get("title")?,
            description: row.get("description")?,
            start_time: timestamp_column(row, Self::TABLE, "start_time")?,
            end_time: timestamp_column(row, Self::TABLE, "end_time")?,
            completed: bool_column(row, Self::TABLE, "completed")?,
            notification_enabled: bool_column(row, Self::TABLE, "notification_enabled")?,
            notification_minutes_before: row.get("notification_minutes_before")?,
        })
    }
}

impl RecordSchema for NoteFields {
    const TABLE: &'static str = "notes";
    const COLUMNS: &'static [&'static str] = &["content", "author", "color_index"];

    fn to_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.content.clone()),
            Value::Text(self.author.clone()),
            Value::Integer(i64::from(self.color_index)),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            content: row.get("content")?,
            author: row.get("author")?,
            color_index: row.get("color_index")?,
        })
    }
}

fn timestamp_value(value: &NaiveDateTime) -> Value {
    Value::Text(format_timestamp(value))
}

fn bool_value(value: bool) -> Value {
    Value::Integer(if value { 1 } else { 0 })
}

fn optional_int_value(value: Option<i32>) -> Value {
    value.map_or(Value::Null, |minutes| Value::Integer(i64::from(minutes)))
}

fn bool_column(row: &Row<'_>, table: &str, column: &str) -> RepoResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid flag value `{other}` in {table}.{column}"
        ))),
    }
}

fn timestamp_column(row: &Row<'_>, table: &str, column: &str) -> RepoResult<NaiveDateTime> {
    let text: String = row.get(column)?;
    parse_timestamp(&text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid timestamp `{text}` in {table}.{column}"))
    })
}
