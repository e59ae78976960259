//! SQLite-backed weight store.
//!
//! Entries live in a single `weights` table. The timestamp column holds the
//! fixed-shape RFC 3339 text produced by [`WeightEntry::timestamp_rfc3339`],
//! and the autoincrement `id` records insertion order for tie-breaking.

use async_trait::async_trait;
use rusqlite::{Connection, params};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument};

use super::error::{StoreError, StoreResult};
use super::store::{WeightEntry, WeightStore};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS weights (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    datetime    TEXT NOT NULL,
    weight_lbs  REAL NOT NULL
);
CREATE INDEX IF NOT EXISTS weights_datetime_idx ON weights (datetime, id);
";

/// Weight store persisted in a SQLite database file.
#[derive(Clone)]
pub struct SqliteWeightStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteWeightStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        info!("Opened weight database at {}", path.display());
        Self::init(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking thread pool.
    async fn with_connection<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| StoreError::Poisoned)?;
            f(&*guard)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

#[async_trait]
impl WeightStore for SqliteWeightStore {
    #[instrument(skip(self, entry), fields(weight_lbs = entry.weight_lbs))]
    async fn append(&self, entry: WeightEntry) -> StoreResult<()> {
        let datetime = entry.timestamp_rfc3339();
        self.with_connection(move |conn| {
            conn.execute(
                "INSERT INTO weights (datetime, weight_lbs) VALUES (?1, ?2)",
                params![datetime, entry.weight_lbs],
            )?;
            Ok(())
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list_ascending(&self) -> StoreResult<Vec<WeightEntry>> {
        let rows = self
            .with_connection(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT datetime, weight_lbs FROM weights ORDER BY datetime ASC, id ASC",
                )?;
                let rows = stmt
                    .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?)))?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await?;

        debug!("Loaded {} weight entries", rows.len());

        rows.into_iter()
            .map(|(datetime, weight_lbs)| {
                Ok(WeightEntry::new(
                    WeightEntry::parse_timestamp(&datetime)?,
                    weight_lbs,
                ))
            })
            .collect()
    }
}
