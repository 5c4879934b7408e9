//! Quote of the day.
//!
//! A fixed, ordered set of quotes and a pure date → quote mapping. The same
//! local calendar day always picks the same quote.

mod quotes;

pub use quotes::QUOTES;

use chrono::NaiveDate;
use serde::Serialize;

use crate::clock::Clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

/// The full archive, in selection order.
pub fn archive() -> &'static [Quote] {
    QUOTES
}

/// Sum of the year, month and day components of the ISO date string.
///
/// `2024-05-07` hashes to `2024 + 5 + 7 = 2036`.
pub fn day_hash(date: NaiveDate) -> u32 {
    date.format("%Y-%m-%d")
        .to_string()
        .split('-')
        .filter_map(|part| part.parse::<u32>().ok())
        .sum()
}

/// Index into a set of `len` entries for `date`. `None` for an empty set.
pub fn daily_index(date: NaiveDate, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(day_hash(date) as usize % len)
}

/// Quote for a given calendar date.
pub fn quote_for(date: NaiveDate) -> &'static Quote {
    let idx = daily_index(date, QUOTES.len()).unwrap_or(0);
    &QUOTES[idx]
}

/// Quote for today in the clock's local timezone.
pub fn quote_of_the_day(clock: &dyn Clock) -> &'static Quote {
    quote_for(clock.today())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn hash_sums_date_components() {
        assert_eq!(day_hash(date(2024, 5, 7)), 2036);
        assert_eq!(day_hash(date(1999, 12, 31)), 2042);
    }

    #[test]
    fn index_wraps_modulo_len() {
        assert_eq!(daily_index(date(2024, 5, 7), 10), Some(6));
        assert_eq!(daily_index(date(2024, 5, 7), 0), None);
    }

    #[test]
    fn consecutive_days_usually_differ() {
        let a = quote_for(date(2024, 5, 7));
        let b = quote_for(date(2024, 5, 8));
        assert_ne!(a, b);
    }

    #[test]
    fn archive_is_non_empty_and_complete() {
        assert!(archive().len() > 1);
        assert!(archive().iter().all(|q| !q.text.is_empty() && !q.author.is_empty()));
    }

    proptest! {
        #[test]
        fn selection_is_a_pure_function_of_the_date(days in 0i64..200_000) {
            let d = date(1970, 1, 1) + chrono::Duration::days(days);
            prop_assert_eq!(quote_for(d), quote_for(d));
            let idx = daily_index(d, QUOTES.len()).unwrap();
            prop_assert!(idx < QUOTES.len());
            prop_assert_eq!(&QUOTES[idx], quote_for(d));
        }
    }
}
