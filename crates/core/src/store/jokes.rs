//! Joke read and write operations.
//!
//! Jokes are immutable once created and belong to exactly one category.
//! The autoincrement rowid is the creation sequence, so ordering by id
//! gives deterministic insertion-order listings.

use super::categories::upsert_category_in;
use super::connection::JokeDb;
use crate::Error;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;

/// A stored two-part joke.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Joke {
    pub id: i64,
    pub setup: String,
    pub delivery: String,
}

/// A joke paired with its category name, as returned by random selection.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct RandomJoke {
    pub id: i64,
    pub category: String,
    pub setup: String,
    pub delivery: String,
}

/// A joke that has not been persisted yet.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct NewJoke {
    pub setup: String,
    pub delivery: String,
}

impl JokeDb {
    /// List jokes for a category in creation order.
    ///
    /// The category match is case-insensitive. An unknown category or a
    /// category without jokes yields an empty vec, not an error. When
    /// `limit` is given the result is truncated to at most that many
    /// entries.
    pub async fn list_jokes(&self, category: &str, limit: Option<u32>) -> Result<Vec<Joke>, Error> {
        let category = category.to_string();
        let limit = limit.map_or(-1, i64::from);
        self.conn
            .call(move |conn| -> Result<Vec<Joke>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT j.id, j.setup, j.delivery
                     FROM jokes j
                     JOIN categories c ON c.id = j.category_id
                     WHERE c.name = ?1
                     ORDER BY j.id
                     LIMIT ?2",
                )?;

                let jokes = stmt
                    .query_map(params![category, limit], |row| {
                        Ok(Joke { id: row.get(0)?, setup: row.get(1)?, delivery: row.get(2)? })
                    })?
                    .collect::<Result<Vec<Joke>, _>>()?;

                Ok(jokes)
            })
            .await
            .map_err(Error::from)
    }

    /// Pick one joke uniformly at random across every category.
    ///
    /// Returns None when the store holds no jokes at all.
    pub async fn random_joke(&self) -> Result<Option<RandomJoke>, Error> {
        self.conn
            .call(|conn| -> Result<Option<RandomJoke>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT j.id, c.name, j.setup, j.delivery
                     FROM jokes j
                     JOIN categories c ON c.id = j.category_id
                     ORDER BY RANDOM()
                     LIMIT 1",
                )?;

                let result = stmt.query_row([], |row| {
                    Ok(RandomJoke {
                        id: row.get(0)?,
                        category: row.get(1)?,
                        setup: row.get(2)?,
                        delivery: row.get(3)?,
                    })
                });

                match result {
                    Ok(joke) => Ok(Some(joke)),
                    Err(tokio_rusqlite::rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Append one joke, creating the category if needed.
    pub async fn add_joke(&self, category: &str, setup: &str, delivery: &str) -> Result<Joke, Error> {
        let category = category.to_string();
        let setup = setup.to_string();
        let delivery = delivery.to_string();
        self.conn
            .call(move |conn| -> Result<Joke, Error> {
                let category_id = upsert_category_in(conn, &category)?;

                let joke = conn
                    .query_row(
                        "INSERT INTO jokes (category_id, setup, delivery)
                         VALUES (?1, ?2, ?3)
                         RETURNING id, setup, delivery",
                        params![category_id, setup, delivery],
                        |row| Ok(Joke { id: row.get(0)?, setup: row.get(1)?, delivery: row.get(2)? }),
                    )
                    .map_err(Error::from)?;

                Ok(joke)
            })
            .await
            .map_err(Error::from)
    }

    /// Append a batch of jokes as one atomic write.
    ///
    /// The category is upserted once and all jokes are inserted inside a
    /// single transaction. An empty batch performs no writes and returns
    /// an empty vec.
    pub async fn add_jokes(&self, category: &str, jokes: &[NewJoke]) -> Result<Vec<Joke>, Error> {
        if jokes.is_empty() {
            return Ok(Vec::new());
        }

        let category = category.to_string();
        let jokes = jokes.to_vec();
        self.conn
            .call(move |conn| -> Result<Vec<Joke>, Error> {
                let tx = conn.transaction().map_err(Error::from)?;

                let category_id = upsert_category_in(&tx, &category)?;

                let mut created = Vec::with_capacity(jokes.len());
                for joke in &jokes {
                    let row = tx
                        .query_row(
                            "INSERT INTO jokes (category_id, setup, delivery)
                             VALUES (?1, ?2, ?3)
                             RETURNING id, setup, delivery",
                            params![category_id, joke.setup, joke.delivery],
                            |row| Ok(Joke { id: row.get(0)?, setup: row.get(1)?, delivery: row.get(2)? }),
                        )
                        .map_err(Error::from)?;
                    created.push(row);
                }

                tx.commit().map_err(Error::from)?;

                Ok(created)
            })
            .await
            .map_err(Error::from)
    }
}
