//! Deadline domain model.
//!
//! # Responsibility
//! - Define the full field set of a deadline (task + due date + display and
//!   notification settings).
//! - Apply creation defaults for the optional settings.
//!
//! # Invariants
//! - `due_at` may be any timestamp, including one in the past.
//! - `notification_minutes_before` is meaningful only while
//!   `notification_enabled` is true.
//! - `completed` and `pinned` are independent flags with no enforced
//!   transition order.

use crate::model::notification::notification_time;
use crate::model::record::Record;
use crate::model::timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Every non-id field of a deadline.
///
/// This is the full-replace payload of `PUT /deadlines/{id}`: fields missing
/// from the request decode to their zero value, so callers resend the
/// complete record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeadlineFields {
    pub title: String,
    pub description: String,
    #[serde(with = "timestamp")]
    pub due_at: NaiveDateTime,
    pub completed: bool,
    pub pinned: bool,
    /// Index into the client's icon palette.
    pub icon_index: i32,
    /// Index into the client's color palette.
    pub color_index: i32,
    pub notification_enabled: bool,
    pub notification_minutes_before: Option<i32>,
    /// Whether the client shows this deadline as a desktop widget.
    pub widget: bool,
}

impl DeadlineFields {
    /// Returns when the due-date notification should fire, if scheduled.
    pub fn notify_at(&self) -> Option<NaiveDateTime> {
        notification_time(
            self.due_at,
            self.notification_enabled,
            self.notification_minutes_before,
        )
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
    }
}

impl Record for DeadlineFields {
    const KIND: &'static str = "deadline";
    type Draft = NewDeadline;
}

/// Creation request for a deadline.
///
/// `title`, `description`, `due_at`, `completed` and `pinned` come from the
/// caller. The remaining settings are optional and default when omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewDeadline {
    pub title: String,
    pub description: String,
    #[serde(with = "timestamp")]
    pub due_at: NaiveDateTime,
    pub completed: bool,
    pub pinned: bool,
    pub icon_index: Option<i32>,
    pub color_index: Option<i32>,
    pub notification_enabled: Option<bool>,
    pub notification_minutes_before: Option<i32>,
    pub widget: Option<bool>,
}

impl NewDeadline {
    /// Builds a request from the caller-supplied fields with every setting
    /// left at its default.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_at: NaiveDateTime,
        completed: bool,
        pinned: bool,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            due_at,
            completed,
            pinned,
            ..Self::default()
        }
    }
}

impl From<NewDeadline> for DeadlineFields {
    fn from(draft: NewDeadline) -> Self {
        Self {
            title: draft.title,
            description: draft.description,
            due_at: draft.due_at,
            completed: draft.completed,
            pinned: draft.pinned,
            icon_index: draft.icon_index.unwrap_or(0),
            color_index: draft.color_index.unwrap_or(0),
            notification_enabled: draft.notification_enabled.unwrap_or(false),
            notification_minutes_before: draft.notification_minutes_before,
            widget: draft.widget.unwrap_or(false),
        }
    }
}
