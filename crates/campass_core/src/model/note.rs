//! Note domain model.
//!
//! # Invariants
//! - `content` may be empty.
//! - The `"Anonymous"` author default applies at construction only; an
//!   existing note keeps whatever author it is given later.

use crate::model::record::Record;
use serde::{Deserialize, Serialize};

/// Author stored when a note is created without one.
pub const DEFAULT_AUTHOR: &str = "Anonymous";

/// Every non-id field of a note. Each field is independently settable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NoteFields {
    pub content: String,
    pub author: String,
    pub color_index: i32,
}

impl Record for NoteFields {
    const KIND: &'static str = "note";
    type Draft = NewNote;
}

/// Creation request for a note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewNote {
    pub content: String,
    pub author: Option<String>,
    pub color_index: Option<i32>,
}

impl NewNote {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

impl From<NewNote> for NoteFields {
    fn from(draft: NewNote) -> Self {
        Self {
            content: draft.content,
            author: draft.author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            color_index: draft.color_index.unwrap_or(0),
        }
    }
}
