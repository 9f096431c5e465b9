//! Hold markers in task notes.
//!
//! A hold is written as a note such as `03/07 hold 04/15/26 ///AB`: the task
//! is paused for the user with initials `AB` until April 15th.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static HOLD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:.*?\s)?hold\s+(\d{1,2}/\d{1,2}(?:/\d{2,4})?)\s+/*(\w+)/*").unwrap()
});

/// Whether `notes` hold the task for the user with `initials` as of `today`.
///
/// The first hold entry carrying the user's initials and a valid date decides;
/// a hold ending today still counts.
pub fn is_on_hold(notes: &str, initials: Option<&str>, today: NaiveDate) -> bool {
    let Some(initials) = initials.filter(|i| !i.is_empty()) else {
        return false;
    };
    if notes.is_empty() {
        return false;
    }

    for caps in HOLD_PATTERN.captures_iter(notes) {
        let date_str = &caps[1];
        if !caps[2].eq_ignore_ascii_case(initials) {
            continue;
        }
        match parse_hold_date(date_str, today) {
            Some(until) => return until >= today,
            None => {
                tracing::warn!(date = %date_str, "Invalid date in hold entry");
                continue;
            }
        }
    }

    false
}

/// Parse `M/D`, `M/D/YY` or `M/D/YYYY`. A missing year means this year.
pub fn parse_hold_date(date_str: &str, today: NaiveDate) -> Option<NaiveDate> {
    let mut parts = date_str.split('/');
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    let year = match parts.next() {
        None => today.year(),
        Some(y) if y.len() == 4 => y.parse().ok()?,
        Some(y) if y.len() == 2 => {
            let short: i32 = y.parse().ok()?;
            if short < 69 { 2000 + short } else { 1900 + short }
        }
        Some(_) => return None,
    };
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn test_future_hold_for_user() {
        let notes = "Intake\n\n03/07 hold 04/15/26 ///AB";
        assert!(is_on_hold(notes, Some("AB"), today()));
    }

    #[test]
    fn test_initials_match_case_insensitively() {
        let notes = "03/07 hold 04/15/26 ///ab";
        assert!(is_on_hold(notes, Some("AB"), today()));
    }

    #[test]
    fn test_hold_for_other_user_is_ignored() {
        let notes = "03/07 hold 04/15/26 ///CD";
        assert!(!is_on_hold(notes, Some("AB"), today()));
    }

    #[test]
    fn test_expired_hold() {
        let notes = "01/02 hold 02/01/26 ///AB";
        assert!(!is_on_hold(notes, Some("AB"), today()));
    }

    #[test]
    fn test_hold_ending_today_still_holds() {
        let notes = "03/01 hold 3/10 ///AB";
        assert!(is_on_hold(notes, Some("AB"), today()));
    }

    #[test]
    fn test_first_matching_entry_decides() {
        // Newest note sits on top; an older, longer hold below it is ignored
        let notes = "03/08 hold 03/01/26 ///AB\n02/01 hold 12/31/26 ///AB";
        assert!(!is_on_hold(notes, Some("AB"), today()));
    }

    #[test]
    fn test_invalid_date_is_skipped() {
        let notes = "hold 13/45 ///AB\nhold 05/01/2026 ///AB";
        assert!(is_on_hold(notes, Some("AB"), today()));
    }

    #[test]
    fn test_slashes_before_initials_are_optional() {
        assert!(is_on_hold("hold 04/01 AB", Some("AB"), today()));
    }

    #[test]
    fn test_no_initials_never_holds() {
        let notes = "hold 04/15/26 ///AB";
        assert!(!is_on_hold(notes, None, today()));
        assert!(!is_on_hold(notes, Some(""), today()));
        assert!(!is_on_hold("", Some("AB"), today()));
    }

    #[test]
    fn test_parse_hold_date_formats() {
        let t = today();
        assert_eq!(parse_hold_date("4/5", t), NaiveDate::from_ymd_opt(2026, 4, 5));
        assert_eq!(parse_hold_date("04/05/27", t), NaiveDate::from_ymd_opt(2027, 4, 5));
        assert_eq!(parse_hold_date("04/05/2028", t), NaiveDate::from_ymd_opt(2028, 4, 5));
        assert_eq!(parse_hold_date("04/05/202", t), None);
        assert_eq!(parse_hold_date("02/30", t), None);
    }
}
