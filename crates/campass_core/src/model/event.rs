//! Event domain model.
//!
//! # Invariants
//! - `end_time` is not required to be `>= start_time`; ordering is left to
//!   the caller.
//! - `notification_minutes_before` counts back from `start_time` and is
//!   meaningful only while `notification_enabled` is true.

use crate::model::notification::notification_time;
use crate::model::record::Record;
use crate::model::timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Every non-id field of a calendar event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventFields {
    pub title: String,
    pub description: String,
    #[serde(with = "timestamp")]
    pub start_time: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub end_time: NaiveDateTime,
    pub completed: bool,
    pub notification_enabled: bool,
    pub notification_minutes_before: Option<i32>,
}

impl EventFields {
    /// Returns when the start-time notification should fire, if scheduled.
    pub fn notify_at(&self) -> Option<NaiveDateTime> {
        notification_time(
            self.start_time,
            self.notification_enabled,
            self.notification_minutes_before,
        )
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

impl Record for EventFields {
    const KIND: &'static str = "event";
    type Draft = NewEvent;
}

/// Creation request for an event. Notification settings default to off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    #[serde(with = "timestamp")]
    pub start_time: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub end_time: NaiveDateTime,
    pub completed: bool,
    pub notification_enabled: Option<bool>,
    pub notification_minutes_before: Option<i32>,
}

impl NewEvent {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        completed: bool,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            start_time,
            end_time,
            completed,
            ..Self::default()
        }
    }
}

impl From<NewEvent> for EventFields {
    fn from(draft: NewEvent) -> Self {
        Self {
            title: draft.title,
            description: draft.description,
            start_time: draft.start_time,
            end_time: draft.end_time,
            completed: draft.completed,
            notification_enabled: draft.notification_enabled.unwrap_or(false),
            notification_minutes_before: draft.notification_minutes_before,
        }
    }
}
