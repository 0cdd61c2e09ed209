use chrono::NaiveDate;
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_WIDTH: usize = 10;

/// How the reporting week of an uploaded row is determined. The two policies
/// come from different revisions of the export format and are mutually
/// exclusive; the active one is chosen by configuration, never guessed from
/// the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekPolicy {
    /// The third CSV column holds a week range (or a bare start date).
    RangeColumn,
    /// The week start is carried in the uploaded file's name, pattern
    /// `..._<day>_<month>_<year>-*`, and applies to every row of the file.
    FileName,
}

impl WeekPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "range-column" => Some(Self::RangeColumn),
            "file-name" => Some(Self::FileName),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeekParseError {
    #[error("unparseable date in {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("file name {0:?} has no week token (expected ..._<day>_<month>_<year>-*)")]
    MissingFileToken(String),
}

/// Splits a week field into a start date and an optional end date.
///
/// Accepted shapes: `"2024-01-01 - 2024-01-07"`, `"2024-01-01-2024-01-07"`
/// and a bare `"2024-01-01"` (no end). Dates are ISO and the compact form is
/// split after the tenth character, so nothing else is ambiguous with the
/// in-date hyphens.
pub fn parse_week_range(field: &str) -> Result<(NaiveDate, Option<NaiveDate>), WeekParseError> {
    let field = field.trim();

    if let Some((start, end)) = field.split_once(" - ") {
        return Ok((parse_date(start)?, Some(parse_date(end)?)));
    }

    if field.len() > DATE_WIDTH && field.is_char_boundary(DATE_WIDTH) {
        let (start, rest) = field.split_at(DATE_WIDTH);
        let end = rest.trim_start_matches(['-', ' ']);
        return Ok((parse_date(start)?, Some(parse_date(end)?)));
    }

    Ok((parse_date(field)?, None))
}

/// Extracts the week-start date from an uploaded file's name. The token is
/// the last three `_`-separated segments before the first `-`, as
/// day, month, year: `clockify_7_1_2024-weekly.csv` -> 2024-01-07.
pub fn week_start_from_file_name(name: &str) -> Result<NaiveDate, WeekParseError> {
    let missing = || WeekParseError::MissingFileToken(name.to_string());

    let (token, _) = name.split_once('-').ok_or_else(missing)?;
    let mut segments = token.rsplit('_');
    let year: i32 = segments.next().and_then(|s| s.parse().ok()).ok_or_else(missing)?;
    let month: u32 = segments.next().and_then(|s| s.parse().ok()).ok_or_else(missing)?;
    let day: u32 = segments.next().and_then(|s| s.parse().ok()).ok_or_else(missing)?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| WeekParseError::InvalidDate(format!("{day}_{month}_{year}")))
}

fn parse_date(s: &str) -> Result<NaiveDate, WeekParseError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| WeekParseError::InvalidDate(s.trim().to_string()))
}
