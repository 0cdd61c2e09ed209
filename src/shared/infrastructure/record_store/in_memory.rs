// In-memory implementation of the record store ports.
//
// Purpose
// - Exercise handlers and HTTP inbounds without a database file.
//
// Responsibilities
// - Keep rows in insertion order and apply the same natural-key duplicate
//   skipping as the SQLite adapter.

use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::modules::cohort_hours::core::records::{RosterEntry, TimeEntry};
use crate::shared::infrastructure::record_store::{
    RosterStore, StoreError, TimeEntryStore,
};

#[derive(Default)]
pub struct InMemoryRecordStore {
    entries: RwLock<Vec<TimeEntry>>,
    roster: RwLock<Vec<RosterEntry>>,
    is_offline: bool,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.is_offline {
            return Err(StoreError::Backend("record store offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl TimeEntryStore for InMemoryRecordStore {
    async fn insert_entries(&self, entries: &[TimeEntry]) -> Result<u64, StoreError> {
        self.check_online()?;
        let mut guard = self.entries.write().await;
        let mut inserted = 0u64;
        for entry in entries {
            if guard
                .iter()
                .any(|existing| existing.natural_key() == entry.natural_key())
            {
                continue;
            }
            guard.push(entry.clone());
            inserted += 1;
        }
        Ok(inserted)
    }

    async fn projects(&self) -> Result<Vec<String>, StoreError> {
        self.check_online()?;
        let guard = self.entries.read().await;
        let mut projects: Vec<String> = Vec::new();
        for entry in guard.iter() {
            if !projects.contains(&entry.project) {
                projects.push(entry.project.clone());
            }
        }
        projects.sort();
        Ok(projects)
    }

    async fn week_starts(&self, project: &str) -> Result<Vec<NaiveDate>, StoreError> {
        self.check_online()?;
        let guard = self.entries.read().await;
        let mut weeks: Vec<NaiveDate> = Vec::new();
        for entry in guard.iter().filter(|e| e.project == project) {
            if !weeks.contains(&entry.week_start) {
                weeks.push(entry.week_start);
            }
        }
        weeks.sort();
        Ok(weeks)
    }

    async fn users(&self, project: &str) -> Result<Vec<String>, StoreError> {
        self.check_online()?;
        let guard = self.entries.read().await;
        let mut users: Vec<String> = Vec::new();
        for entry in guard.iter().filter(|e| e.project == project) {
            if !users.contains(&entry.user) {
                users.push(entry.user.clone());
            }
        }
        users.sort();
        Ok(users)
    }

    async fn entries_for_project(&self, project: &str) -> Result<Vec<TimeEntry>, StoreError> {
        self.check_online()?;
        let guard = self.entries.read().await;
        Ok(guard
            .iter()
            .filter(|e| e.project == project)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl RosterStore for InMemoryRecordStore {
    async fn insert_members(&self, members: &[RosterEntry]) -> Result<u64, StoreError> {
        self.check_online()?;
        let mut guard = self.roster.write().await;
        let mut inserted = 0u64;
        for member in members {
            if guard
                .iter()
                .any(|existing| existing.natural_key() == member.natural_key())
            {
                continue;
            }
            guard.push(member.clone());
            inserted += 1;
        }
        Ok(inserted)
    }

    async fn members(&self) -> Result<Vec<RosterEntry>, StoreError> {
        self.check_online()?;
        Ok(self.roster.read().await.clone())
    }
}
