//! C2 — the calendar filter. Pure, deterministic, idempotent: computes the
//! ordered set of legal dates in a competition window.

use chrono::{Datelike, NaiveDate};

use crate::config::SchedulerConfig;
use crate::model::CompetitionWindow;

/// A date is legal iff its weekday is allowed, it is not a configured
/// holiday, and it does not lie within any vacation interval (inclusive).
pub fn is_legal_date(date: NaiveDate, config: &SchedulerConfig) -> bool {
    if !config.allowed_weekdays.contains(&date.weekday()) {
        return false;
    }
    if config.holidays.contains(&date) {
        return false;
    }
    config
        .vacations
        .iter()
        .all(|(start, end)| date < *start || date > *end)
}

/// The ordered sequence of legal dates in `[window.start_date, window.end_date]`.
pub fn legal_dates(window: &CompetitionWindow, config: &SchedulerConfig) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut cursor = window.start_date;
    while cursor <= window.end_date {
        if is_legal_date(cursor, config) {
            dates.push(cursor);
        }
        cursor = match cursor.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekends_are_not_legal_by_default() {
        let config = SchedulerConfig::default();
        // 2026-03-07 is a Saturday.
        assert!(!is_legal_date(date(2026, 3, 7), &config));
    }

    #[test]
    fn holiday_skip() {
        let config = SchedulerConfig::default().with_holidays([date(2026, 5, 5)]);
        let window = CompetitionWindow {
            start_date: date(2026, 5, 4),
            end_date: date(2026, 5, 6),
        };
        let dates = legal_dates(&window, &config);
        assert_eq!(dates, vec![date(2026, 5, 4), date(2026, 5, 6)]);
    }

    #[test]
    fn vacation_interval_is_inclusive() {
        let config = SchedulerConfig::default()
            .with_vacations([(date(2026, 2, 8), date(2026, 2, 23))]);
        let window = CompetitionWindow {
            start_date: date(2026, 2, 6),
            end_date: date(2026, 2, 25),
        };
        let dates = legal_dates(&window, &config);
        assert!(!dates.contains(&date(2026, 2, 8)));
        assert!(!dates.contains(&date(2026, 2, 23)));
        assert!(dates.contains(&date(2026, 2, 25)));
    }

    #[test]
    fn is_idempotent() {
        let config = SchedulerConfig::default();
        let window = CompetitionWindow {
            start_date: date(2026, 3, 2),
            end_date: date(2026, 3, 20),
        };
        assert_eq!(legal_dates(&window, &config), legal_dates(&window, &config));
    }
}
