use chrono::NaiveDate;
use thiserror::Error;

use crate::modules::cohort_hours::core::records::TimeEntry;

/// Sentinel for a week with no matching entry. Rows are never sparse: every
/// week column discovered for a project gets a value.
pub const ZERO_TIME: &str = "00:00:00";

/// Name of the identifying column in the rendered CSV.
const LABEL_COLUMN: &str = "name";

/// One report row: an identifying label (user or project name) plus an
/// explicit ordered list of (week-start, value) cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub label: String,
    pub cells: Vec<(NaiveDate, String)>,
}

impl ReportRow {
    pub fn value_for(&self, week: NaiveDate) -> Option<&str> {
        self.cells
            .iter()
            .find(|(cell_week, _)| *cell_week == week)
            .map(|(_, value)| value.as_str())
    }
}

/// The full report: rows for every selected project, concatenated in
/// request order. Rebuilt fresh on every request, never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportMatrix {
    pub rows: Vec<ReportRow>,
}

impl ReportMatrix {
    /// Union of week columns across all rows, in first-occurrence order.
    pub fn week_columns(&self) -> Vec<NaiveDate> {
        let mut columns: Vec<NaiveDate> = Vec::new();
        for row in &self.rows {
            for (week, _) in &row.cells {
                if !columns.contains(week) {
                    columns.push(*week);
                }
            }
        }
        columns
    }

    /// Floats rows with more populated weeks to the top. Cosmetic ordering;
    /// the sort is stable, so a project's header row stays ahead of its own
    /// user rows (they share a cell count) and equal-width projects keep
    /// their request order.
    pub fn sort_densest_first(&mut self) {
        self.rows
            .sort_by(|a, b| b.cells.len().cmp(&a.cells.len()));
    }
}

/// Builds the rows for one project: a header/metadata row carrying the week
/// dates themselves, then one row per user with the entry's time string for
/// each week (exact week-start match) or [`ZERO_TIME`].
///
/// `weeks` and `users` come from the store already sorted ascending;
/// `entries` is the project's full entry set.
pub fn project_rows(
    project: &str,
    weeks: &[NaiveDate],
    users: &[String],
    entries: &[TimeEntry],
) -> Vec<ReportRow> {
    let mut rows = Vec::with_capacity(users.len() + 1);

    rows.push(ReportRow {
        label: project.to_string(),
        cells: weeks.iter().map(|week| (*week, week.to_string())).collect(),
    });

    for user in users {
        let cells = weeks
            .iter()
            .map(|week| {
                let time = entries
                    .iter()
                    .find(|entry| entry.user == *user && entry.week_start == *week)
                    .map(|entry| entry.time.clone())
                    .unwrap_or_else(|| ZERO_TIME.to_string());
                (*week, time)
            })
            .collect();
        rows.push(ReportRow {
            label: user.clone(),
            cells,
        });
    }

    rows
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("csv serialization failed: {0}")]
    Csv(String),
}

/// Serializes the matrix to CSV bytes: a header record (`name` plus the
/// unioned week columns), then one record per row. Weeks a row does not
/// carry serialize as empty fields; quoting is delegated to the csv crate.
/// An empty matrix renders as zero bytes.
pub fn render_csv(matrix: &ReportMatrix) -> Result<Vec<u8>, RenderError> {
    if matrix.rows.is_empty() {
        return Ok(Vec::new());
    }

    let columns = matrix.week_columns();
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<String> = Vec::with_capacity(columns.len() + 1);
    header.push(LABEL_COLUMN.to_string());
    header.extend(columns.iter().map(|week| week.to_string()));
    writer
        .write_record(&header)
        .map_err(|e| RenderError::Csv(e.to_string()))?;

    for row in &matrix.rows {
        let mut record: Vec<String> = Vec::with_capacity(columns.len() + 1);
        record.push(row.label.clone());
        for week in &columns {
            record.push(row.value_for(*week).unwrap_or_default().to_string());
        }
        writer
            .write_record(&record)
            .map_err(|e| RenderError::Csv(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| RenderError::Csv(e.to_string()))
}

#[cfg(test)]
mod report_matrix_tests {
    use super::*;
    use rstest::rstest;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(user: &str, project: &str, week: &str, time: &str) -> TimeEntry {
        TimeEntry {
            project: project.to_string(),
            client: None,
            week_start: date(week),
            week_end: None,
            user: user.to_string(),
            time: time.to_string(),
            time_decimal: None,
        }
    }

    #[rstest]
    fn it_should_emit_a_header_row_then_one_row_per_user() {
        let weeks = vec![date("2024-01-01"), date("2024-01-08")];
        let users = vec!["Alice".to_string(), "Jo".to_string()];
        let entries = vec![
            entry("Alice", "ProjX", "2024-01-01", "05:00:00"),
            entry("Alice", "ProjX", "2024-01-08", "02:30:00"),
            entry("Jo", "ProjX", "2024-01-01", "03:00:00"),
        ];

        let rows = project_rows("ProjX", &weeks, &users, &entries);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].label, "ProjX");
        assert_eq!(
            rows[0].cells,
            vec![
                (date("2024-01-01"), "2024-01-01".to_string()),
                (date("2024-01-08"), "2024-01-08".to_string()),
            ]
        );
        assert_eq!(rows[1].label, "Alice");
        assert_eq!(rows[1].value_for(date("2024-01-01")), Some("05:00:00"));
        assert_eq!(rows[1].value_for(date("2024-01-08")), Some("02:30:00"));
    }

    #[rstest]
    fn it_should_fill_weeks_without_entries_with_the_zero_sentinel() {
        let weeks = vec![date("2024-01-01"), date("2024-01-08")];
        let users = vec!["Jo".to_string()];
        let entries = vec![entry("Jo", "ProjX", "2024-01-01", "03:00:00")];

        let rows = project_rows("ProjX", &weeks, &users, &entries);

        let jo = &rows[1];
        assert_eq!(jo.value_for(date("2024-01-01")), Some("03:00:00"));
        assert_eq!(jo.value_for(date("2024-01-08")), Some(ZERO_TIME));
        assert_eq!(jo.cells.len(), weeks.len(), "rows are never sparse");
    }

    #[rstest]
    fn it_should_produce_only_the_header_row_for_a_project_without_entries() {
        let rows = project_rows("Empty", &[], &[], &[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "Empty");
        assert!(rows[0].cells.is_empty());
    }

    #[rstest]
    fn it_should_union_week_columns_in_first_occurrence_order() {
        let matrix = ReportMatrix {
            rows: vec![
                ReportRow {
                    label: "A".to_string(),
                    cells: vec![
                        (date("2024-01-08"), "x".to_string()),
                        (date("2024-01-01"), "y".to_string()),
                    ],
                },
                ReportRow {
                    label: "B".to_string(),
                    cells: vec![
                        (date("2024-01-01"), "z".to_string()),
                        (date("2024-02-05"), "w".to_string()),
                    ],
                },
            ],
        };
        assert_eq!(
            matrix.week_columns(),
            vec![date("2024-01-08"), date("2024-01-01"), date("2024-02-05")]
        );
    }

    #[rstest]
    fn it_should_keep_the_densest_first_sort_stable() {
        let row = |label: &str, n: usize| ReportRow {
            label: label.to_string(),
            cells: (0..n)
                .map(|i| (date("2024-01-01") + chrono::Days::new(7 * i as u64), "t".to_string()))
                .collect(),
        };
        let mut matrix = ReportMatrix {
            rows: vec![row("small", 1), row("big", 3), row("big-second", 3)],
        };

        matrix.sort_densest_first();

        let labels: Vec<&str> = matrix.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["big", "big-second", "small"]);
    }
}
