//! Category read and upsert operations.
//!
//! Category names are unique case-insensitively. The NOCASE collation on
//! the name column is the single canonicalization point: the uniqueness
//! constraint and every lookup below compare through it, so "Foo" and
//! "foo" always resolve to the same row.

use super::connection::JokeDb;
use crate::Error;
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// Upsert a category by name inside an existing connection or transaction.
///
/// Returns the id of the existing row on a name conflict. The no-op
/// `SET name = name` keeps the stored casing of the first writer while
/// still making `RETURNING` produce the row.
pub(crate) fn upsert_category_in(conn: &rusqlite::Connection, name: &str) -> Result<i64, Error> {
    if name.is_empty() {
        return Err(Error::InvalidInput("category name cannot be empty".into()));
    }

    let id = conn
        .query_row(
            "INSERT INTO categories (name) VALUES (?1)
             ON CONFLICT(name) DO UPDATE SET name = name
             RETURNING id",
            params![name],
            |row| row.get(0),
        )
        .map_err(Error::from)?;

    Ok(id)
}

impl JokeDb {
    /// List all category names, lexicographically sorted.
    ///
    /// Casing is preserved as stored.
    pub async fn list_categories(&self) -> Result<Vec<String>, Error> {
        self.conn
            .call(|conn| -> Result<Vec<String>, Error> {
                let mut stmt = conn.prepare("SELECT name FROM categories ORDER BY name")?;
                let names = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<Result<Vec<String>, _>>()?;
                Ok(names)
            })
            .await
            .map_err(Error::from)
    }

    /// Look up a category id by name, case-insensitively.
    ///
    /// Returns None if no category with that name exists.
    pub async fn category_id(&self, name: &str) -> Result<Option<i64>, Error> {
        let name = name.to_string();
        self.conn
            .call(move |conn| -> Result<Option<i64>, Error> {
                let result = conn.query_row(
                    "SELECT id FROM categories WHERE name = ?1",
                    params![name],
                    |row| row.get(0),
                );

                match result {
                    Ok(id) => Ok(Some(id)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Check whether a category exists, case-insensitively.
    pub async fn category_exists(&self, name: &str) -> Result<bool, Error> {
        Ok(self.category_id(name).await?.is_some())
    }

    /// Create a category if absent, returning its id either way.
    ///
    /// This is a conflict-tolerant atomic upsert: concurrent callers with
    /// the same name (in any casing) converge on one row, and the stored
    /// casing is never rewritten.
    pub async fn upsert_category(&self, name: &str) -> Result<i64, Error> {
        let name = name.to_string();
        self.conn
            .call(move |conn| upsert_category_in(conn, &name))
            .await
            .map_err(Error::from)
    }
}
