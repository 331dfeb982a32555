//! Pure schedule arithmetic.
//!
//! `advance` is the only date math in the engine. It is deterministic and
//! never consults a clock: same `(date, frequency)` in, same date out.

use chrono::{Days, Months, NaiveDate};

use crate::recurrence::{Frequency, RecurrenceError};
use crate::Result;

/// Computes the next occurrence after `date` for the given frequency.
///
/// Monthly and yearly steps preserve the day-of-month where it exists and
/// clamp to the last valid day otherwise (Jan 31 + 1 month = Feb 28/29,
/// Feb 29 + 1 year = Feb 28 in non-leap years). The result is always
/// strictly greater than `date`.
pub fn advance(date: NaiveDate, frequency: Frequency) -> Result<NaiveDate> {
    let next = match frequency {
        Frequency::Daily => date.checked_add_days(Days::new(1)),
        Frequency::Weekly => date.checked_add_days(Days::new(7)),
        Frequency::Monthly => date.checked_add_months(Months::new(1)),
        Frequency::Yearly => date.checked_add_months(Months::new(12)),
    };
    next.ok_or_else(|| RecurrenceError::DateOverflow(date).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn daily_and_weekly_are_fixed_steps() {
        assert_eq!(advance(d(2024, 1, 15), Frequency::Daily).unwrap(), d(2024, 1, 16));
        assert_eq!(advance(d(2024, 12, 31), Frequency::Daily).unwrap(), d(2025, 1, 1));
        assert_eq!(advance(d(2024, 1, 15), Frequency::Weekly).unwrap(), d(2024, 1, 22));
        assert_eq!(advance(d(2024, 2, 26), Frequency::Weekly).unwrap(), d(2024, 3, 4));
    }

    #[test]
    fn monthly_preserves_day_of_month() {
        assert_eq!(advance(d(2024, 1, 15), Frequency::Monthly).unwrap(), d(2024, 2, 15));
        assert_eq!(advance(d(2024, 11, 30), Frequency::Monthly).unwrap(), d(2024, 12, 30));
    }

    #[test]
    fn monthly_clamps_to_last_day_of_short_months() {
        // Leap year February
        assert_eq!(advance(d(2024, 1, 31), Frequency::Monthly).unwrap(), d(2024, 2, 29));
        // Non-leap February
        assert_eq!(advance(d(2025, 1, 31), Frequency::Monthly).unwrap(), d(2025, 2, 28));
        // 31st into a 30-day month
        assert_eq!(advance(d(2024, 3, 31), Frequency::Monthly).unwrap(), d(2024, 4, 30));
    }

    #[test]
    fn yearly_clamps_leap_day() {
        assert_eq!(advance(d(2024, 2, 29), Frequency::Yearly).unwrap(), d(2025, 2, 28));
        assert_eq!(advance(d(2024, 3, 1), Frequency::Yearly).unwrap(), d(2025, 3, 1));
        // Leap to leap keeps the 29th
        assert_eq!(advance(d(2020, 2, 29), Frequency::Yearly).unwrap(), d(2021, 2, 28));
    }

    #[test]
    fn december_rolls_into_next_year() {
        assert_eq!(advance(d(2024, 12, 15), Frequency::Monthly).unwrap(), d(2025, 1, 15));
    }

    proptest! {
        #[test]
        fn advance_strictly_increases(
            year in 1990i32..2100,
            month in 1u32..=12,
            day in 1u32..=31,
            freq_idx in 0usize..4,
        ) {
            let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                return Ok(());
            };
            let frequency = [
                Frequency::Daily,
                Frequency::Weekly,
                Frequency::Monthly,
                Frequency::Yearly,
            ][freq_idx];
            let next = advance(date, frequency).unwrap();
            prop_assert!(next > date);
            // Deterministic: same input, same output
            prop_assert_eq!(next, advance(date, frequency).unwrap());
        }
    }
}
