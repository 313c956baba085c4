//! Canonical partial-date handling.
//!
//! Resumes rarely carry day-level precision, so extracted dates arrive as
//! `YYYY-MM-DD`, `YYYY-MM`, a bare `YYYY`, or prose like "Present". Storage
//! wants full dates; the rules here synthesize only the least-significant
//! components and map everything unusable to `None`. The `2000-01-01`
//! placeholder for structurally-required start columns is materialized at
//! the storage boundary only, and every substitution is logged.

use chrono::NaiveDate;
use tracing::warn;

/// Whether a field semantically marks the start or the end of a range.
/// Drives how a bare year is expanded and how "Present" is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRole {
    Start,
    End,
}

/// Placeholder stored when a required start column has no usable date.
/// A deliberate sentinel, not an inferred date.
pub const START_DATE_PLACEHOLDER: NaiveDate = match NaiveDate::from_ymd_opt(2000, 1, 1) {
    Some(d) => d,
    None => unreachable!(),
};

/// Labels an end-date field uses for "still ongoing".
const OPEN_ENDED_LABELS: &[&str] = &["present", "till date"];

/// Normalizes one extracted date string to a canonical date, or `None`.
///
/// Rules, in order:
/// 1. `YYYY-MM-DD` is kept unchanged.
/// 2. `YYYY-MM` gets day 01.
/// 3. A bare `YYYY` expands to Jan 1 (start) or Dec 31 (end).
/// 4. "Present" / "Till date" as an end date means "no end date".
/// 5. Anything else is `None`.
pub fn normalize_date(raw: &str, role: DateRole) -> Option<NaiveDate> {
    let raw = raw.trim();

    if role == DateRole::End && OPEN_ENDED_LABELS.contains(&raw.to_lowercase().as_str()) {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    if let Some((year, month)) = parse_year_month(raw) {
        return NaiveDate::from_ymd_opt(year, month, 1);
    }

    if let Some(year) = parse_bare_year(raw) {
        return match role {
            DateRole::Start => NaiveDate::from_ymd_opt(year, 1, 1),
            DateRole::End => NaiveDate::from_ymd_opt(year, 12, 31),
        };
    }

    None
}

/// Optional-string convenience used by the normalization pass.
pub fn normalize_opt(raw: Option<&str>, role: DateRole) -> Option<NaiveDate> {
    raw.and_then(|s| normalize_date(s, role))
}

/// Materializes a required start date at the storage boundary.
/// `context` names the entry for the substitution log line.
pub fn materialize_start(date: Option<NaiveDate>, context: &str) -> NaiveDate {
    match date {
        Some(d) => d,
        None => {
            warn!("no usable start date for {context}; storing placeholder {START_DATE_PLACEHOLDER}");
            START_DATE_PLACEHOLDER
        }
    }
}

fn parse_year_month(raw: &str) -> Option<(i32, u32)> {
    let (y, m) = raw.split_once('-')?;
    if y.len() != 4 || m.len() != 2 {
        return None;
    }
    Some((y.parse().ok()?, m.parse().ok()?))
}

fn parse_bare_year(raw: &str) -> Option<i32> {
    if raw.len() == 4 && raw.chars().all(|c| c.is_ascii_digit()) {
        raw.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_full_date_unchanged() {
        assert_eq!(
            normalize_date("2021-06-15", DateRole::Start),
            Some(d(2021, 6, 15))
        );
        assert_eq!(
            normalize_date("2021-06-15", DateRole::End),
            Some(d(2021, 6, 15))
        );
    }

    #[test]
    fn test_year_month_gets_first_of_month() {
        assert_eq!(
            normalize_date("2021-06", DateRole::Start),
            Some(d(2021, 6, 1))
        );
        assert_eq!(normalize_date("2021-06", DateRole::End), Some(d(2021, 6, 1)));
    }

    #[test]
    fn test_bare_year_start_expands_to_jan_first() {
        assert_eq!(normalize_date("2019", DateRole::Start), Some(d(2019, 1, 1)));
    }

    #[test]
    fn test_bare_year_end_expands_to_dec_last() {
        assert_eq!(normalize_date("2019", DateRole::End), Some(d(2019, 12, 31)));
    }

    #[test]
    fn test_present_end_is_none() {
        assert_eq!(normalize_date("Present", DateRole::End), None);
        assert_eq!(normalize_date("present", DateRole::End), None);
    }

    #[test]
    fn test_till_date_end_is_none() {
        assert_eq!(normalize_date("Till date", DateRole::End), None);
    }

    #[test]
    fn test_present_as_start_is_not_special() {
        // "Present" only means open-ended for end fields.
        assert_eq!(normalize_date("Present", DateRole::Start), None);
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert_eq!(normalize_date("2021-13", DateRole::Start), None);
        assert_eq!(normalize_date("2021-13-01", DateRole::Start), None);
    }

    #[test]
    fn test_prose_rejected() {
        assert_eq!(normalize_date("June 2021", DateRole::Start), None);
        assert_eq!(normalize_date("ongoing", DateRole::Start), None);
        assert_eq!(normalize_date("", DateRole::End), None);
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(
            normalize_date("  2021-06-15 ", DateRole::Start),
            Some(d(2021, 6, 15))
        );
    }

    #[test]
    fn test_materialize_start_placeholder() {
        assert_eq!(materialize_start(None, "test entry"), d(2000, 1, 1));
        assert_eq!(
            materialize_start(Some(d(2019, 1, 1)), "test entry"),
            d(2019, 1, 1)
        );
    }

    #[test]
    fn test_normalize_opt_none_passthrough() {
        assert_eq!(normalize_opt(None, DateRole::End), None);
    }
}
