//! Business-day calendar math for the target date set.
//!
//! The registry publishes nothing on weekends, so "yesterday" skips back
//! over the weekend boundary: a Sunday run looks at Friday, a Saturday run
//! also lands on Friday via the single-day step. Exchange holidays are not
//! modelled; a holiday date simply yields no published file, which the
//! fetcher treats as a normal no-data outcome.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// The previous working day, `days_back` additional days earlier.
///
/// `days_back = 0` is the immediate prior working day; `days_back = 1`
/// reaches one day further back without re-checking for weekends.
pub fn last_working_day(today: NaiveDate, days_back: i64) -> NaiveDate {
    let step = match today.weekday() {
        Weekday::Sun => 2,
        _ => 1,
    };
    today - Duration::days(step + days_back)
}

/// The three dates one run processes, in processing order: two working-day
/// offsets back, then today itself unadjusted.
pub fn target_dates(today: NaiveDate) -> [NaiveDate; 3] {
    [
        last_working_day(today, 1),
        last_working_day(today, 0),
        today,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sunday_resolves_to_friday() {
        // 2024-06-09 is a Sunday; the prior working day is Friday the 7th.
        assert_eq!(last_working_day(date(2024, 6, 9), 0), date(2024, 6, 7));
    }

    #[test]
    fn saturday_resolves_to_friday() {
        assert_eq!(last_working_day(date(2024, 6, 8), 0), date(2024, 6, 7));
    }

    #[test]
    fn midweek_resolves_to_previous_day() {
        // Wednesday -> Tuesday
        assert_eq!(last_working_day(date(2024, 6, 12), 0), date(2024, 6, 11));
    }

    #[test]
    fn extra_offset_reaches_one_day_further() {
        assert_eq!(last_working_day(date(2024, 6, 12), 1), date(2024, 6, 10));
        // Sunday with offset 1 lands on Thursday (2 for the weekend + 1).
        assert_eq!(last_working_day(date(2024, 6, 9), 1), date(2024, 6, 6));
    }

    #[test]
    fn target_dates_order_is_fixed() {
        let today = date(2024, 6, 12);
        assert_eq!(
            target_dates(today),
            [date(2024, 6, 10), date(2024, 6, 11), today]
        );
    }
}
