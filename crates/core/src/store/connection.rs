//! Opening the jokebook database.
//!
//! One handle type wraps the async connection. Opening applies the
//! pragmas the store relies on and brings the schema up to date before
//! any read or write runs.

use super::migrations;
use crate::Error;
use std::path::Path;
use tokio_rusqlite::Connection;

/// Handle to the jokebook database.
///
/// Cheap to clone; every query runs on the connection's background
/// thread, so concurrent resolvers share one handle freely.
#[derive(Clone, Debug)]
pub struct JokeDb {
    pub(crate) conn: Connection,
}

impl JokeDb {
    /// Open (or create) the jokebook at `path` and migrate it.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        tracing::debug!("opening jokebook database at {}", path.as_ref().display());
        let conn = Connection::open(path).await.map_err(|e| Error::Database(e.into()))?;
        Self::init(conn).await
    }

    /// Open a throwaway in-memory jokebook, mainly for tests.
    pub async fn open_in_memory() -> Result<Self, Error> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| Error::Database(e.into()))?;
        Self::init(conn).await
    }

    /// Apply pragmas and pending migrations to a fresh connection.
    ///
    /// WAL keeps concurrent readers from blocking behind an import;
    /// foreign_keys enforces the joke-to-category relation.
    async fn init(conn: Connection) -> Result<Self, Error> {
        conn.call(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode=WAL;
                 PRAGMA synchronous=NORMAL;
                 PRAGMA temp_store=MEMORY;
                 PRAGMA foreign_keys=ON;",
            )?;
            Ok(())
        })
        .await
        .map_err(Error::Database)?;

        migrations::run(&conn).await?;

        Ok(Self { conn })
    }
}
