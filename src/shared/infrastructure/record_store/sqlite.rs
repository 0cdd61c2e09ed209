// SQLite implementation of the record store ports.
//
// Dates are stored as ISO-8601 TEXT so `ORDER BY week_start` sorts
// chronologically. Duplicate skipping is an `INSERT OR IGNORE` against the
// UNIQUE natural-key constraints declared in schema.sql.

use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;
use rusqlite::{Connection, params};
use tokio::sync::Mutex;
use tracing::info;

use crate::modules::cohort_hours::core::records::{RosterEntry, TimeEntry};
use crate::shared::infrastructure::record_store::{
    RosterStore, StoreError, TimeEntryStore,
};

const SCHEMA_SQL: &str = include_str!("schema.sql");

pub struct SqliteRecordStore {
    conn: Mutex<Connection>,
}

impl SqliteRecordStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::Backend(e.to_string()))?;
            }
        }

        let conn = Connection::open(path).map_err(backend)?;
        conn.pragma_update(None, "journal_mode", "WAL").map_err(backend)?;
        info!(db_path = %path.display(), "record store opened");
        Self::from_connection(conn)
    }

    /// Private in-memory database; used by tests and local development.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory().map_err(backend)?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.busy_timeout(Duration::from_secs(5)).map_err(backend)?;
        conn.execute_batch(SCHEMA_SQL).map_err(backend)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn backend(e: rusqlite::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

#[async_trait::async_trait]
impl TimeEntryStore for SqliteRecordStore {
    async fn insert_entries(&self, entries: &[TimeEntry]) -> Result<u64, StoreError> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction().map_err(backend)?;
        let mut inserted = 0u64;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT OR IGNORE INTO time_entries
                         (project, client, week_start, week_end, user, time, time_decimal)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                )
                .map_err(backend)?;
            for entry in entries {
                inserted += stmt
                    .execute(params![
                        entry.project,
                        entry.client,
                        entry.week_start,
                        entry.week_end,
                        entry.user,
                        entry.time,
                        entry.time_decimal,
                    ])
                    .map_err(backend)? as u64;
            }
        }
        tx.commit().map_err(backend)?;
        Ok(inserted)
    }

    async fn projects(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT DISTINCT project FROM time_entries ORDER BY project ASC")
            .map_err(backend)?;
        let rows = stmt
            .query_map([], |row| row.get(0))
            .map_err(backend)?;
        rows.collect::<Result<Vec<String>, _>>().map_err(backend)
    }

    async fn week_starts(&self, project: &str) -> Result<Vec<NaiveDate>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(
                "SELECT DISTINCT week_start FROM time_entries
                 WHERE project = ?1 ORDER BY week_start ASC",
            )
            .map_err(backend)?;
        let rows = stmt
            .query_map(params![project], |row| row.get(0))
            .map_err(backend)?;
        rows.collect::<Result<Vec<NaiveDate>, _>>().map_err(backend)
    }

    async fn users(&self, project: &str) -> Result<Vec<String>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(
                "SELECT DISTINCT user FROM time_entries
                 WHERE project = ?1 ORDER BY user ASC",
            )
            .map_err(backend)?;
        let rows = stmt
            .query_map(params![project], |row| row.get(0))
            .map_err(backend)?;
        rows.collect::<Result<Vec<String>, _>>().map_err(backend)
    }

    async fn entries_for_project(&self, project: &str) -> Result<Vec<TimeEntry>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(
                "SELECT project, client, week_start, week_end, user, time, time_decimal
                 FROM time_entries WHERE project = ?1 ORDER BY id ASC",
            )
            .map_err(backend)?;
        let rows = stmt
            .query_map(params![project], |row| {
                Ok(TimeEntry {
                    project: row.get(0)?,
                    client: row.get(1)?,
                    week_start: row.get(2)?,
                    week_end: row.get(3)?,
                    user: row.get(4)?,
                    time: row.get(5)?,
                    time_decimal: row.get(6)?,
                })
            })
            .map_err(backend)?;
        rows.collect::<Result<Vec<TimeEntry>, _>>().map_err(backend)
    }
}

#[async_trait::async_trait]
impl RosterStore for SqliteRecordStore {
    async fn insert_members(&self, members: &[RosterEntry]) -> Result<u64, StoreError> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction().map_err(backend)?;
        let mut inserted = 0u64;
        {
            let mut stmt = tx
                .prepare("INSERT OR IGNORE INTO roster_entries (name, project) VALUES (?1, ?2)")
                .map_err(backend)?;
            for member in members {
                inserted += stmt
                    .execute(params![member.name, member.project])
                    .map_err(backend)? as u64;
            }
        }
        tx.commit().map_err(backend)?;
        Ok(inserted)
    }

    async fn members(&self) -> Result<Vec<RosterEntry>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT name, project FROM roster_entries ORDER BY id ASC")
            .map_err(backend)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(RosterEntry {
                    name: row.get(0)?,
                    project: row.get(1)?,
                })
            })
            .map_err(backend)?;
        rows.collect::<Result<Vec<RosterEntry>, _>>().map_err(backend)
    }
}
