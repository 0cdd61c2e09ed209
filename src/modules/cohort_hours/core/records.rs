use chrono::NaiveDate;

/// One row of a time-tracking export. Never mutated after ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntry {
    pub project: String,
    pub client: Option<String>,
    pub week_start: NaiveDate,
    pub week_end: Option<NaiveDate>,
    pub user: String,
    /// Duration as exported, `"HH:MM:SS"`.
    pub time: String,
    pub time_decimal: Option<String>,
}

impl TimeEntry {
    /// Natural key used for duplicate skipping on insert.
    pub fn natural_key(&self) -> (&str, &str, NaiveDate) {
        (self.project.as_str(), self.user.as_str(), self.week_start)
    }
}

/// Authoritative assignment of a user to a project. A user should map to a
/// single project; the store does not enforce that structurally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub project: String,
}

impl RosterEntry {
    pub fn natural_key(&self) -> (&str, &str) {
        (self.name.as_str(), self.project.as_str())
    }
}

/// A time entry filed under a project other than the user's roster-assigned
/// one. Derived during ingestion, returned to the caller, never persisted.
/// `correct_project` is `None` when the user has no roster row at all.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Mismatch {
    pub user: String,
    pub filed_project: String,
    pub correct_project: Option<String>,
}
