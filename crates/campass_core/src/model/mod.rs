//! Domain model for deadline/event/note records.
//!
//! # Responsibility
//! - Define the field sets owned by each record store.
//! - Define creation drafts and the defaults they apply.
//!
//! # Invariants
//! - Every stored record is identified by a store-assigned `RecordId`.
//! - Deletion is a hard delete; there are no tombstones.
//! - Field types stay storage-agnostic; SQL mapping lives in `repo`.

pub mod deadline;
pub mod event;
pub mod note;
pub mod notification;
pub mod record;
pub mod timestamp;
