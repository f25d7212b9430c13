//! Core record lifecycle for the Campass productivity backend.
//! This crate owns the deadline, event and note stores and their invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::deadline::{DeadlineFields, NewDeadline};
pub use model::event::{EventFields, NewEvent};
pub use model::note::{NewNote, NoteFields, DEFAULT_AUTHOR};
pub use model::record::{Record, RecordId, Stored};
pub use repo::record_repo::{RecordRepository, RepoError, RepoResult, SqliteRecordRepository};
pub use repo::schema::RecordSchema;
pub use service::record_service::{
    DeadlineService, EventService, NoteService, RecordService, ServiceError, ServiceResult,
};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
