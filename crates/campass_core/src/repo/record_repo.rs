//! Record repository contract and its generic SQLite implementation.
//!
//! # Responsibility
//! - Provide one CRUD API over any table described by `RecordSchema`.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `replace` overwrites every column; there is no partial update path.
//! - `replace` on a missing id yields `RepoError::NotFound`.
//! - `delete` succeeds whether or not the row existed.
//! - `list` returns rows in insertion (`id ASC`) order.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::record::{RecordId, Stored};
use crate::repo::schema::RecordSchema;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound {
        kind: &'static str,
        id: RecordId,
    },
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found with id: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for one record kind.
pub trait RecordRepository {
    type Fields: RecordSchema;

    /// Returns every stored record.
    fn list(&self) -> RepoResult<Vec<Stored<Self::Fields>>>;
    /// Gets one record by id.
    fn get(&self, id: RecordId) -> RepoResult<Option<Stored<Self::Fields>>>;
    /// Inserts a new row and returns its freshly assigned id.
    fn insert(&self, fields: &Self::Fields) -> RepoResult<RecordId>;
    /// Overwrites every field of an existing row.
    fn replace(&self, id: RecordId, fields: &Self::Fields) -> RepoResult<()>;
    /// Removes a row if present.
    fn delete(&self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed repository for the table described by `F`.
pub struct SqliteRecordRepository<'conn, F> {
    conn: &'conn Connection,
    _fields: PhantomData<F>,
}

impl<'conn, F: RecordSchema> SqliteRecordRepository<'conn, F> {
    /// Constructs a repository from a migrated connection.
    ///
    /// Rejects connections that were not opened through `db::open_db*` or
    /// that lack the record table.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        if !table_exists(conn, F::TABLE)? {
            return Err(RepoError::MissingRequiredTable(F::TABLE));
        }

        Ok(Self {
            conn,
            _fields: PhantomData,
        })
    }

    fn select_sql() -> String {
        format!("SELECT id, {} FROM {}", F::COLUMNS.join(", "), F::TABLE)
    }
}

impl<F: RecordSchema> RecordRepository for SqliteRecordRepository<'_, F> {
    type Fields = F;

    fn list(&self) -> RepoResult<Vec<Stored<F>>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY id ASC;", Self::select_sql()))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_stored_row(row)?);
        }

        Ok(records)
    }

    fn get(&self, id: RecordId) -> RepoResult<Option<Stored<F>>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE id = ?1;", Self::select_sql()))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_stored_row(row)?));
        }

        Ok(None)
    }

    fn insert(&self, fields: &F) -> RepoResult<RecordId> {
        let placeholders = (1..=F::COLUMNS.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders});",
            F::TABLE,
            F::COLUMNS.join(", ")
        );

        self.conn.execute(&sql, params_from_iter(fields.to_values()))?;
        Ok(self.conn.last_insert_rowid())
    }

    fn replace(&self, id: RecordId, fields: &F) -> RepoResult<()> {
        let assignments = F::COLUMNS
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let id_placeholder = F::COLUMNS.len() + 1;
        let sql = format!(
            "UPDATE {} SET {assignments} WHERE id = ?{id_placeholder};",
            F::TABLE
        );

        let mut values = fields.to_values();
        values.push(Value::Integer(id));
        let changed = self.conn.execute(&sql, params_from_iter(values))?;

        if changed == 0 {
            return Err(RepoError::NotFound { kind: F::KIND, id });
        }

        Ok(())
    }

    fn delete(&self, id: RecordId) -> RepoResult<()> {
        self.conn
            .execute(&format!("DELETE FROM {} WHERE id = ?1;", F::TABLE), [id])?;
        Ok(())
    }
}

fn parse_stored_row<F: RecordSchema>(row: &Row<'_>) -> RepoResult<Stored<F>> {
    let id: RecordId = row.get("id")?;
    Ok(Stored::new(id, F::from_row(row)?))
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let found = conn
        .query_row(
            "SELECT 1
             FROM sqlite_master
             WHERE type = 'table' AND name = ?1;",
            [table],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    Ok(found.is_some())
}
