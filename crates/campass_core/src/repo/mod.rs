//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define one CRUD contract shared by every record kind.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Deleting a missing id is not an error.

pub mod record_repo;
pub mod schema;
