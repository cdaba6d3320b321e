//! Entry storage contract and SQLite implementation.
//!
//! # Responsibility
//! - Read every stored entry row in storage order.
//! - Accept new rows from the entry-creation flow.
//!
//! # Invariants
//! - Reads never validate rows; mapping happens in the service layer.
//! - A column holding a blob or invalid UTF-8 reads as `None`, so one bad
//!   row is dropped by mapping instead of failing the whole read.
//! - Storage order is insertion order (`rowid ASC`).

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use crate::model::entry::PersistedEntry;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ENTRY_SELECT_SQL: &str = "SELECT title, body, created_date FROM entries ORDER BY rowid ASC;";

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure while talking to entry storage.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// The connection was not migrated to the schema this build expects.
    SchemaNotReady { found: u32, expected: u32 },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::SchemaNotReady { found, expected } => write!(
                f,
                "entry storage schema version {found} does not match expected {expected}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::SchemaNotReady { .. } => None,
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

/// Local entry storage.
pub trait EntryStore {
    /// Returns every stored row in storage order.
    fn read_all(&self) -> RepoResult<Vec<PersistedEntry>>;
    /// Appends one row.
    fn insert(&self, entry: &PersistedEntry) -> RepoResult<()>;
    /// Returns the number of stored rows, valid or not.
    fn count(&self) -> RepoResult<u64>;
}

impl<S: EntryStore + ?Sized> EntryStore for &S {
    fn read_all(&self) -> RepoResult<Vec<PersistedEntry>> {
        (**self).read_all()
    }

    fn insert(&self, entry: &PersistedEntry) -> RepoResult<()> {
        (**self).insert(entry)
    }

    fn count(&self) -> RepoResult<u64> {
        (**self).count()
    }
}

/// SQLite-backed entry storage.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - `RepoError::SchemaNotReady` when the connection was not migrated.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let found = schema_version(conn)?;
        let expected = latest_version();
        if found != expected {
            return Err(RepoError::SchemaNotReady { found, expected });
        }
        Ok(Self { conn })
    }
}

impl EntryStore for SqliteEntryRepository<'_> {
    fn read_all(&self) -> RepoResult<Vec<PersistedEntry>> {
        let mut stmt = self.conn.prepare(ENTRY_SELECT_SQL)?;
        let rows = stmt.query_map([], parse_entry_row)?;
        let entries = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    fn insert(&self, entry: &PersistedEntry) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO entries (title, body, created_date) VALUES (?1, ?2, ?3);",
            params![
                entry.title.as_deref(),
                entry.body.as_deref(),
                entry.created_date.as_deref(),
            ],
        )?;
        Ok(())
    }

    fn count(&self) -> RepoResult<u64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries;", [], |row| row.get::<_, i64>(0))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

fn parse_entry_row(row: &Row<'_>) -> rusqlite::Result<PersistedEntry> {
    Ok(PersistedEntry {
        title: text_column(row, "title")?,
        body: text_column(row, "body")?,
        created_date: text_column(row, "created_date")?,
    })
}

/// Reads a column as text, mapping values that are not text to `None`.
///
/// Numbers written by other writers keep their decimal form.
fn text_column(row: &Row<'_>, column: &str) -> rusqlite::Result<Option<String>> {
    let value = match row.get_ref(column)? {
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok().map(str::to_string),
        ValueRef::Integer(value) => Some(value.to_string()),
        ValueRef::Real(value) => Some(value.to_string()),
        ValueRef::Null | ValueRef::Blob(_) => None,
    };
    Ok(value)
}
