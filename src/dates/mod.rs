//! Target-day resolution.
//!
//! The results site prints day/month without a year, so everything past
//! [`resolve_target_day`] compares day/month tokens, never full dates.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use std::fmt;

/// The calendar day a run collects results for. Computed once, then passed
/// by value into every component that needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetDay(NaiveDate);

impl TargetDay {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Yesterday in `tz`, as of the current wall clock.
    pub fn yesterday(tz: Tz) -> Self {
        resolve_target_day(tz, Utc::now())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// `YYYY-MM-DD`, used in the report title and the output file name.
    pub fn label(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    pub fn tokens(&self) -> DateTokenSet {
        tokens_for(*self)
    }
}

impl fmt::Display for TargetDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Resolve the civil date of `now` in `tz`, then step back one calendar day.
/// The subtraction happens on the naive date so DST transitions in `tz`
/// cannot shift the result.
pub fn resolve_target_day(tz: Tz, now: DateTime<Utc>) -> TargetDay {
    let today = now.with_timezone(&tz).date_naive();
    let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);
    TargetDay(yesterday)
}

/// Textual spellings of a day/month pair as they appear in result listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTokenSet {
    tokens: Vec<String>,
}

impl DateTokenSet {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Substring test: true if any token occurs anywhere in `haystack`.
    pub fn matches(&self, haystack: &str) -> bool {
        self.tokens.iter().any(|t| haystack.contains(t.as_str()))
    }
}

/// `dd.mm.`, `dd.mm` and `dd-mm`, zero padded.
pub fn tokens_for(day: TargetDay) -> DateTokenSet {
    let date = day.date();
    let dd = format!("{:02}", date.day());
    let mm = format!("{:02}", date.month());

    DateTokenSet {
        tokens: vec![
            format!("{dd}.{mm}."),
            format!("{dd}.{mm}"),
            format!("{dd}-{mm}"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> TargetDay {
        TargetDay::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn yesterday_uses_local_calendar_not_utc() {
        // 23:30 UTC on the 9th is already 00:30 on the 10th in Amsterdam.
        let now = utc(2024, 11, 9, 23, 30);
        assert_eq!(
            resolve_target_day(chrono_tz::Europe::Amsterdam, now),
            day(2024, 11, 9)
        );
        assert_eq!(resolve_target_day(chrono_tz::UTC, now), day(2024, 11, 8));
    }

    #[test]
    fn yesterday_west_of_utc() {
        // 03:00 UTC on the 10th is still the evening of the 9th in Havana.
        let now = utc(2024, 11, 10, 3, 0);
        assert_eq!(
            resolve_target_day(chrono_tz::America::Havana, now),
            day(2024, 11, 8)
        );
    }

    #[test]
    fn crosses_month_and_leap_day() {
        let now = utc(2024, 3, 1, 12, 0);
        assert_eq!(resolve_target_day(chrono_tz::UTC, now), day(2024, 2, 29));

        let now = utc(2025, 1, 1, 12, 0);
        assert_eq!(resolve_target_day(chrono_tz::UTC, now), day(2024, 12, 31));
    }

    #[test]
    fn same_instant_same_day() {
        let now = Utc::now();
        let a = resolve_target_day(chrono_tz::Australia::Sydney, now);
        let b = resolve_target_day(chrono_tz::Australia::Sydney, now);
        assert_eq!(a, b);
    }

    #[test]
    fn tokens_are_zero_padded() {
        let tokens = tokens_for(day(2024, 3, 7));
        assert_eq!(tokens.tokens(), ["07.03.", "07.03", "07-03"]);
    }

    #[test]
    fn tokens_match_their_own_spelling() {
        for (m, d) in [(1, 1), (2, 29), (11, 9), (12, 31)] {
            let tokens = tokens_for(day(2024, m, d));
            for token in tokens.tokens() {
                assert!(tokens.matches(token), "{token} should match itself");
                assert!(tokens.matches(&format!("Sat {token} 19:05")));
            }
        }
    }

    #[test]
    fn other_days_do_not_match() {
        let tokens = tokens_for(day(2024, 11, 9));
        assert!(!tokens.matches("10.11. 19:00"));
        assert!(!tokens.matches("09/11"));
        assert!(!tokens.matches(""));
    }

    #[test]
    fn label_is_iso() {
        assert_eq!(day(2024, 11, 9).label(), "2024-11-09");
        assert_eq!(day(2024, 11, 9).to_string(), "2024-11-09");
    }
}
