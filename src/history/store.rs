//! SQLite-backed bounded history log.
//!
//! The database holds a single `history` collection keyed by big-endian ids
//! and a `sequence` table with the collection's id counter. The connection
//! runs in `EXCLUSIVE` locking mode: the file lock taken while opening is
//! held until the store is closed, so a second process waits at most
//! [`LOCK_TIMEOUT`] and then fails to open.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior, params};
use tracing::{debug, warn};

use super::entry::{decode_key, decode_record, encode_key, encode_value, Entry};
use super::error::{HistoryError, HistoryResult};
use super::MAX_ENTRIES;
use crate::config::TedPaths;

/// How long to wait for another process to release the store lock.
pub const LOCK_TIMEOUT: Duration = Duration::from_secs(1);

const BUCKET: &str = "history";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS history (
        key   BLOB PRIMARY KEY,
        value BLOB NOT NULL
    ) WITHOUT ROWID;

    CREATE TABLE IF NOT EXISTS sequence (
        bucket TEXT PRIMARY KEY,
        value  INTEGER NOT NULL
    );
";

/// Handle to an open history file. Owned by whoever opened it; every
/// operation goes through this value.
#[derive(Debug)]
pub struct HistoryStore {
    conn: Option<Connection>,
    path: PathBuf,
}

impl HistoryStore {
    /// Open the store at the default per-user location.
    pub fn open_default(paths: &TedPaths) -> HistoryResult<Self> {
        Self::open(&paths.history_file)
    }

    /// Open (creating if needed) the store at `path`.
    pub fn open(path: impl AsRef<Path>) -> HistoryResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| HistoryError::unavailable(&path, e))?;
        }

        let mut conn = Connection::open(&path).map_err(|e| HistoryError::unavailable(&path, e))?;
        Self::init(&mut conn).map_err(|e| HistoryError::unavailable(&path, e))?;

        debug!("Opened history store at {}", path.display());
        Ok(Self {
            conn: Some(conn),
            path,
        })
    }

    fn init(conn: &mut Connection) -> rusqlite::Result<()> {
        conn.busy_timeout(LOCK_TIMEOUT)?;
        conn.execute_batch("PRAGMA locking_mode = EXCLUSIVE;")?;

        let tx = conn.transaction_with_behavior(TransactionBehavior::Exclusive)?;
        tx.execute_batch(SCHEMA)?;
        tx.execute(
            "INSERT OR IGNORE INTO sequence (bucket, value) VALUES (?1, 0)",
            params![BUCKET],
        )?;
        tx.commit()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Release the file and its lock. Closing an already closed store does nothing.
    pub fn close(&mut self) -> HistoryResult<()> {
        match self.conn.take() {
            Some(conn) => {
                conn.close().map_err(|(_, e)| HistoryError::StorageWrite(e))?;
                debug!("Closed history store at {}", self.path.display());
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn conn(&self) -> HistoryResult<&Connection> {
        self.conn.as_ref().ok_or(HistoryError::NotOpen)
    }

    fn conn_mut(&mut self) -> HistoryResult<&mut Connection> {
        self.conn.as_mut().ok_or(HistoryError::NotOpen)
    }

    /// Record a new interaction and evict the oldest entries beyond
    /// [`MAX_ENTRIES`]. Insert and eviction commit together or not at all.
    pub fn add_entry(
        &mut self,
        kind: &str,
        query: &str,
        response: &str,
        selected: Option<&str>,
    ) -> HistoryResult<Entry> {
        let conn = self.conn_mut()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(HistoryError::StorageWrite)?;

        let entry = Entry {
            id: next_sequence(&tx)?,
            timestamp: Utc::now(),
            command_kind: kind.to_string(),
            query: query.to_string(),
            response: response.to_string(),
            selected: selected.map(str::to_string),
        };

        let value = encode_value(&entry).map_err(|e| {
            HistoryError::StorageWrite(rusqlite::Error::ToSqlConversionFailure(e.into()))
        })?;
        tx.execute(
            "INSERT INTO history (key, value) VALUES (?1, ?2)",
            params![&encode_key(entry.id)[..], value],
        )
        .map_err(HistoryError::StorageWrite)?;

        let evicted = trim_to_capacity(&tx)?;
        tx.commit().map_err(HistoryError::StorageWrite)?;

        debug!(id = entry.id, evicted, "Added history entry");
        Ok(entry)
    }

    /// All stored entries, newest first. Records that fail to decode are
    /// skipped.
    pub fn entries(&self) -> HistoryResult<Vec<Entry>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT key, value FROM history ORDER BY key DESC")
            .map_err(HistoryError::StorageRead)?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, Vec<u8>>(0)?, row.get::<_, Vec<u8>>(1)?)))
            .map_err(HistoryError::StorageRead)?;

        let mut entries = Vec::new();
        let mut skipped = 0usize;
        for row in rows {
            let (key, value) = row.map_err(HistoryError::StorageRead)?;
            match decode_record(&key, &value) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    warn!("{}", e);
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            debug!(skipped, kept = entries.len(), "Read history with undecodable records");
        }
        Ok(entries)
    }

    pub fn len(&self) -> HistoryResult<usize> {
        let conn = self.conn()?;
        count(conn).map_err(HistoryError::StorageRead)
    }

    pub fn is_empty(&self) -> HistoryResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Remove the newest entry and return its id.
    pub fn delete_most_recent(&mut self) -> HistoryResult<u64> {
        let conn = self.conn_mut()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(HistoryError::StorageWrite)?;

        let key: Option<Vec<u8>> = tx
            .query_row(
                "SELECT key FROM history WHERE length(key) = 8 ORDER BY key DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(HistoryError::StorageRead)?;
        let Some(key) = key else {
            return Err(HistoryError::NotFound);
        };

        let id = decode_key(&key).ok_or_else(|| HistoryError::DecodeSkipped {
            key: key.clone(),
            reason: "key is not an 8-byte id".to_string(),
        })?;

        tx.execute("DELETE FROM history WHERE key = ?1", params![key])
            .map_err(HistoryError::StorageWrite)?;
        tx.commit().map_err(HistoryError::StorageWrite)?;

        debug!(id, "Deleted most recent history entry");
        Ok(id)
    }

    /// Remove every entry. The id sequence keeps counting from where it was.
    pub fn clear(&mut self) -> HistoryResult<()> {
        let conn = self.conn_mut()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(HistoryError::StorageWrite)?;
        let removed = tx
            .execute("DELETE FROM history", [])
            .map_err(HistoryError::StorageWrite)?;
        tx.commit().map_err(HistoryError::StorageWrite)?;

        debug!(removed, "Cleared history");
        Ok(())
    }
}

fn next_sequence(tx: &Transaction<'_>) -> HistoryResult<u64> {
    let value: i64 = tx
        .query_row(
            "UPDATE sequence SET value = value + 1 WHERE bucket = ?1 RETURNING value",
            params![BUCKET],
            |row| row.get(0),
        )
        .map_err(HistoryError::StorageWrite)?;
    u64::try_from(value)
        .map_err(|_| HistoryError::StorageWrite(rusqlite::Error::IntegralValueOutOfRange(0, value)))
}

fn count(conn: &Connection) -> rusqlite::Result<usize> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM history WHERE length(key) = 8",
        [],
        |row| row.get(0),
    )?;
    Ok(usize::try_from(n).unwrap_or_default())
}

/// Delete the lowest keys until at most `MAX_ENTRIES` remain. Returns how many
/// entries were evicted.
fn trim_to_capacity(tx: &Transaction<'_>) -> HistoryResult<usize> {
    let total = count(tx).map_err(HistoryError::StorageWrite)?;
    if total <= MAX_ENTRIES {
        return Ok(0);
    }

    let excess = (total - MAX_ENTRIES) as i64;
    tx.execute(
        "DELETE FROM history WHERE key IN (
            SELECT key FROM history WHERE length(key) = 8 ORDER BY key ASC LIMIT ?1
        )",
        params![excess],
    )
    .map_err(HistoryError::StorageWrite)
}
