// CSV parsing for the two upload kinds. Layouts are fixed and positional;
// the exports carry no header row. Any malformed row fails the whole file so
// ingestion stays all-or-nothing.

use chrono::NaiveDate;
use csv::StringRecord;
use thiserror::Error;

use crate::modules::cohort_hours::core::records::{RosterEntry, TimeEntry};
use crate::modules::cohort_hours::core::week::parse_week_range;

const TIME_ENTRY_COLUMNS: usize = 6;
const ROSTER_COLUMNS: usize = 2;

/// Where a row's reporting week comes from. Resolved from the configured
/// [`WeekPolicy`](crate::modules::cohort_hours::core::week::WeekPolicy)
/// before parsing starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekSource {
    /// Parse each row's week-range column.
    RangeColumn,
    /// Apply this start date (taken from the file name) to every row; the
    /// week column is ignored and no end date is recorded.
    Uniform(NaiveDate),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("row {row}: {reason}")]
    Row { row: usize, reason: String },

    #[error("csv parse error: {0}")]
    Csv(#[from] csv::Error),
}

/// Parses a time-entry export: `[project, client, week, user, time,
/// time_decimal]` per row. Empty `client` / `time_decimal` fields become
/// `None`.
pub fn parse_time_entries(bytes: &[u8], week: &WeekSource) -> Result<Vec<TimeEntry>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut entries = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let record = record?;
        expect_columns(&record, TIME_ENTRY_COLUMNS, row)?;

        let (week_start, week_end) = match week {
            WeekSource::RangeColumn => {
                let field = required(&record, 2, "week", row)?;
                parse_week_range(&field).map_err(|e| ParseError::Row {
                    row,
                    reason: e.to_string(),
                })?
            }
            WeekSource::Uniform(start) => (*start, None),
        };

        entries.push(TimeEntry {
            project: required(&record, 0, "project", row)?,
            client: optional(&record, 1),
            week_start,
            week_end,
            user: required(&record, 3, "user", row)?,
            time: required(&record, 4, "time", row)?,
            time_decimal: optional(&record, 5),
        });
    }

    Ok(entries)
}

/// Parses a roster export: `[name, project]` per row, both required.
pub fn parse_roster(bytes: &[u8]) -> Result<Vec<RosterEntry>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut members = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let record = record?;
        expect_columns(&record, ROSTER_COLUMNS, row)?;

        members.push(RosterEntry {
            name: required(&record, 0, "name", row)?,
            project: required(&record, 1, "project", row)?,
        });
    }

    Ok(members)
}

fn expect_columns(record: &StringRecord, expected: usize, row: usize) -> Result<(), ParseError> {
    if record.len() != expected {
        return Err(ParseError::Row {
            row,
            reason: format!("expected {expected} columns, found {}", record.len()),
        });
    }
    Ok(())
}

fn required(
    record: &StringRecord,
    index: usize,
    name: &str,
    row: usize,
) -> Result<String, ParseError> {
    match record.get(index) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(ParseError::Row {
            row,
            reason: format!("missing required field {name:?}"),
        }),
    }
}

fn optional(record: &StringRecord, index: usize) -> Option<String> {
    record
        .get(index)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}


#[cfg(test)]
mod parse_roster_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_parse_name_and_project_pairs() {
        let csv = "Alice,ProjX\nBob,ProjY\n";

        let members = parse_roster(csv.as_bytes()).unwrap();

        assert_eq!(
            members,
            vec![
                RosterEntry {
                    name: "Alice".to_string(),
                    project: "ProjX".to_string(),
                },
                RosterEntry {
                    name: "Bob".to_string(),
                    project: "ProjY".to_string(),
                },
            ]
        );
    }

    #[rstest]
    #[case("Alice\n")]
    #[case("Alice,ProjX,extra\n")]
    #[case(",ProjX\n")]
    #[case("Alice,\n")]
    fn it_should_reject_malformed_roster_rows(#[case] csv: &str) {
        assert!(parse_roster(csv.as_bytes()).is_err());
    }
}
