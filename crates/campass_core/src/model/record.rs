//! Identity and envelope shared by every record kind.

use serde::{Deserialize, Serialize};

/// Store-assigned identifier. Monotonic per record kind and never reused.
pub type RecordId = i64;

/// Field set owned by one record store.
///
/// Implementors are plain value types holding every non-id field. Updates
/// replace the whole value, so there is no partial form of `Self`.
pub trait Record: Clone {
    /// Stable lower-case kind name used in errors and log events.
    const KIND: &'static str;

    /// Creation input. Converting it applies the kind's defaults.
    type Draft: Into<Self>;
}

/// A record as persisted: its assigned id plus its fields.
///
/// Serialized flat, so the wire shape is `{"id": 1, "title": ..., ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stored<F> {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: F,
}

impl<F> Stored<F> {
    pub fn new(id: RecordId, fields: F) -> Self {
        Self { id, fields }
    }
}
