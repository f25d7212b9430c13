//! Record lifecycle service.
//!
//! # Responsibility
//! - Turn creation drafts into full field sets (applying defaults) and
//!   persist them.
//! - Apply full-replace updates and return the stored result.
//!
//! # Invariants
//! - `update` overwrites every field from the payload. Fields a client left
//!   out arrive as zero values and are stored as such.
//! - `update` on an id that was never created, or was deleted, is
//!   `ServiceError::NotFound`.
//! - `delete` is idempotent and never reports a missing id.
//! - Returned records are read back from storage, never echoed from input.

use crate::model::deadline::DeadlineFields;
use crate::model::event::EventFields;
use crate::model::note::NoteFields;
use crate::model::record::{Record, RecordId, Stored};
use crate::repo::record_repo::{RecordRepository, RepoError, SqliteRecordRepository};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for record use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Target record does not exist.
    NotFound { kind: &'static str, id: RecordId },
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found with id: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent record state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { kind, id } => Self::NotFound { kind, id },
            other => Self::Repo(other),
        }
    }
}

/// CRUD manager for one record kind over any repository implementation.
pub struct RecordService<R: RecordRepository> {
    repo: R,
}

pub type DeadlineService<'conn> = RecordService<SqliteRecordRepository<'conn, DeadlineFields>>;
pub type EventService<'conn> = RecordService<SqliteRecordRepository<'conn, EventFields>>;
/// Note updates are not exposed over HTTP; `update` remains available to
/// core callers.
pub type NoteService<'conn> = RecordService<SqliteRecordRepository<'conn, NoteFields>>;

type Fields<R> = <R as RecordRepository>::Fields;
type Draft<R> = <Fields<R> as Record>::Draft;

impl<R: RecordRepository> RecordService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    fn kind() -> &'static str {
        <Fields<R> as Record>::KIND
    }

    /// Lists every record of this kind in insertion order.
    pub fn list(&self) -> ServiceResult<Vec<Stored<Fields<R>>>> {
        let records = self.repo.list()?;
        debug!(
            "event=record_list module=service status=ok kind={} count={}",
            Self::kind(),
            records.len()
        );
        Ok(records)
    }

    /// Gets one record by id.
    pub fn get(&self, id: RecordId) -> ServiceResult<Option<Stored<Fields<R>>>> {
        Ok(self.repo.get(id)?)
    }

    /// Creates a record from a draft, applying the kind's defaults.
    pub fn create(&self, draft: Draft<R>) -> ServiceResult<Stored<Fields<R>>> {
        let fields: Fields<R> = draft.into();
        let id = self.repo.insert(&fields)?;
        info!(
            "event=record_create module=service status=ok kind={} id={id}",
            Self::kind()
        );

        self.repo
            .get(id)?
            .ok_or(ServiceError::InconsistentState(
                "created record not found in read-back",
            ))
    }

    /// Replaces every field of an existing record.
    pub fn update(&self, id: RecordId, fields: Fields<R>) -> ServiceResult<Stored<Fields<R>>> {
        if let Err(err) = self.repo.replace(id, &fields) {
            warn!(
                "event=record_update module=service status=error kind={} id={id} error={}",
                Self::kind(),
                err
            );
            return Err(err.into());
        }
        info!(
            "event=record_update module=service status=ok kind={} id={id}",
            Self::kind()
        );

        self.repo
            .get(id)?
            .ok_or(ServiceError::InconsistentState(
                "updated record not found in read-back",
            ))
    }

    /// Deletes a record. A missing id counts as already deleted.
    pub fn delete(&self, id: RecordId) -> ServiceResult<()> {
        self.repo.delete(id)?;
        info!(
            "event=record_delete module=service status=ok kind={} id={id}",
            Self::kind()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordService, ServiceError};
    use crate::model::note::{NewNote, NoteFields};
    use crate::model::record::{RecordId, Stored};
    use crate::repo::record_repo::{RecordRepository, RepoError, RepoResult};
    use std::cell::RefCell;

    /// In-memory repository used to exercise the service without SQLite.
    #[derive(Default)]
    struct MemoryNotes {
        rows: RefCell<Vec<Stored<NoteFields>>>,
        next_id: RefCell<RecordId>,
    }

    impl RecordRepository for MemoryNotes {
        type Fields = NoteFields;

        fn list(&self) -> RepoResult<Vec<Stored<NoteFields>>> {
            Ok(self.rows.borrow().clone())
        }

        fn get(&self, id: RecordId) -> RepoResult<Option<Stored<NoteFields>>> {
            Ok(self.rows.borrow().iter().find(|row| row.id == id).cloned())
        }

        fn insert(&self, fields: &NoteFields) -> RepoResult<RecordId> {
            let mut next_id = self.next_id.borrow_mut();
            *next_id += 1;
            self.rows.borrow_mut().push(Stored::new(*next_id, fields.clone()));
            Ok(*next_id)
        }

        fn replace(&self, id: RecordId, fields: &NoteFields) -> RepoResult<()> {
            let mut rows = self.rows.borrow_mut();
            let row = rows
                .iter_mut()
                .find(|row| row.id == id)
                .ok_or(RepoError::NotFound { kind: "note", id })?;
            row.fields = fields.clone();
            Ok(())
        }

        fn delete(&self, id: RecordId) -> RepoResult<()> {
            self.rows.borrow_mut().retain(|row| row.id != id);
            Ok(())
        }
    }

    #[test]
    fn create_reads_back_defaults() {
        let service = RecordService::new(MemoryNotes::default());
        let created = service.create(NewNote::new("hello")).unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.fields.author, "Anonymous");
    }

    #[test]
    fn update_keeps_replaced_author() {
        let service = RecordService::new(MemoryNotes::default());
        let created = service.create(NewNote::new("hello")).unwrap();

        let replacement = NoteFields {
            author: String::new(),
            ..created.fields.clone()
        };
        let updated = service.update(created.id, replacement).unwrap();
        assert_eq!(updated.fields.author, "");
    }

    #[test]
    fn repository_not_found_maps_to_service_not_found() {
        let service = RecordService::new(MemoryNotes::default());
        let err = service.update(7, NoteFields::default()).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { kind: "note", id: 7 }));
    }
}
