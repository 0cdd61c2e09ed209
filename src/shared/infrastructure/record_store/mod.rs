// Ports for the relational record store holding time entries and roster
// entries. Adapters implement these traits; the rest of the crate codes
// against them so handlers never see a concrete database.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::modules::cohort_hours::core::records::{RosterEntry, TimeEntry};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait TimeEntryStore: Send + Sync {
    /// Inserts a batch in one transaction, silently skipping rows whose
    /// natural key `(project, user, week_start)` already exists. Returns the
    /// number of rows actually inserted.
    async fn insert_entries(&self, entries: &[TimeEntry]) -> Result<u64, StoreError>;

    /// Distinct project names across all entries, ascending.
    async fn projects(&self) -> Result<Vec<String>, StoreError>;

    /// Distinct week-start dates for a project, ascending.
    async fn week_starts(&self, project: &str) -> Result<Vec<NaiveDate>, StoreError>;

    /// Distinct user names for a project, ascending.
    async fn users(&self, project: &str) -> Result<Vec<String>, StoreError>;

    async fn entries_for_project(&self, project: &str) -> Result<Vec<TimeEntry>, StoreError>;
}

#[async_trait]
pub trait RosterStore: Send + Sync {
    /// Inserts a batch in one transaction, silently skipping rows whose
    /// natural key `(name, project)` already exists. Returns the number of
    /// rows actually inserted.
    async fn insert_members(&self, members: &[RosterEntry]) -> Result<u64, StoreError>;

    /// All roster rows in insertion order (reconciliation takes the first
    /// match by name).
    async fn members(&self) -> Result<Vec<RosterEntry>, StoreError>;
}

pub mod in_memory;
pub mod sqlite;
