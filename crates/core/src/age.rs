//! Whole-year age computation from a birthdate.

use chrono::{Datelike, NaiveDate, TimeZone, Utc};

use crate::types::Timestamp;

/// Wire format for string birthdates.
pub const BIRTHDATE_FORMAT: &str = "%Y-%m-%d";

/// Compute whole elapsed years between `birth` and `now`.
///
/// The birthday counts as reached from midnight UTC on its calendar day. A
/// 29 February birthday rolls over to 1 March in non-leap years. Returns
/// `None` when `birth` lies in the future.
pub fn age_on(birth: NaiveDate, now: Timestamp) -> Option<i32> {
    let mut years = now.year() - birth.year();

    let birthday = NaiveDate::from_ymd_opt(now.year(), birth.month(), birth.day())
        .or_else(|| NaiveDate::from_ymd_opt(now.year(), 3, 1))
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| Utc.from_utc_datetime(&d));

    if let Some(birthday) = birthday {
        if now < birthday {
            years -= 1;
        }
    }

    (years >= 0).then_some(years)
}

/// Age from a `YYYY-MM-DD` string. `None` if the string does not parse or
/// the date lies in the future.
pub fn age_from_birthdate(raw: &str, now: Timestamp) -> Option<i32> {
    let birth = NaiveDate::parse_from_str(raw.trim(), BIRTHDATE_FORMAT).ok()?;
    age_on(birth, now)
}

/// Age from a stored timestamp, using its UTC calendar date.
pub fn age_from_timestamp(birth: Timestamp, now: Timestamp) -> Option<i32> {
    age_on(birth.date_naive(), now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn day_before_birthday_is_one_year_short() {
        assert_eq!(age_from_birthdate("2000-06-15", at(2024, 6, 14)), Some(23));
    }

    #[test]
    fn birthday_itself_counts() {
        assert_eq!(age_from_birthdate("2000-06-15", at(2024, 6, 15)), Some(24));
        let midnight = Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap();
        assert_eq!(age_from_birthdate("2000-06-15", midnight), Some(24));
    }

    #[test]
    fn after_birthday() {
        assert_eq!(age_from_birthdate("2000-06-15", at(2024, 12, 31)), Some(24));
    }

    #[test]
    fn unparsable_string_is_none() {
        assert_eq!(age_from_birthdate("not-a-date", at(2024, 1, 1)), None);
        assert_eq!(age_from_birthdate("", at(2024, 1, 1)), None);
        assert_eq!(age_from_birthdate("2000/06/15", at(2024, 1, 1)), None);
    }

    #[test]
    fn future_birthdate_is_none() {
        assert_eq!(age_from_birthdate("2030-01-01", at(2024, 1, 1)), None);
    }

    #[test]
    fn born_earlier_this_year_is_zero() {
        assert_eq!(age_from_birthdate("2024-01-10", at(2024, 6, 1)), Some(0));
    }

    #[test]
    fn leap_day_birthday_in_common_year() {
        assert_eq!(age_from_birthdate("2000-02-29", at(2023, 2, 28)), Some(22));
        assert_eq!(age_from_birthdate("2000-02-29", at(2023, 3, 1)), Some(23));
        assert_eq!(age_from_birthdate("2000-02-29", at(2024, 2, 29)), Some(24));
    }

    #[test]
    fn timestamp_birthdate_uses_calendar_date() {
        let birth = Utc.with_ymd_and_hms(2010, 9, 1, 23, 59, 0).unwrap();
        assert_eq!(age_from_timestamp(birth, at(2024, 8, 31)), Some(13));
        assert_eq!(age_from_timestamp(birth, at(2024, 9, 1)), Some(14));
    }
}
