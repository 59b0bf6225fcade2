//! Summary values for the KPI cards.
//!
//! Each summary is an independent pass over the full, unfiltered collection.

use time::Date;

/// The sum of `value` over the records that satisfy `predicate`.
pub fn sum_where<T>(
    records: &[T],
    predicate: impl Fn(&T) -> bool,
    value: impl Fn(&T) -> f64,
) -> f64 {
    records
        .iter()
        .filter(|record| predicate(record))
        .map(value)
        .sum()
}

/// The number of records that satisfy `predicate`.
pub fn count_where<T>(records: &[T], predicate: impl Fn(&T) -> bool) -> usize {
    records.iter().filter(|record| predicate(record)).count()
}

/// The ISO year-month prefix of `date`, e.g. "2025-11" for 2025-11-01.
pub fn month_prefix(date: Date) -> String {
    format!("{:04}-{:02}", date.year(), u8::from(date.month()))
}

/// Whether the ISO form of `date` starts with `prefix`.
///
/// This is a string prefix match rather than a calendar computation, so a
/// prefix of "2025-1" matches October, November and December.
pub fn in_month(date: Option<Date>, prefix: &str) -> bool {
    date.is_some_and(|date| date.to_string().starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::query::test_record::rows;

    use super::{count_where, in_month, month_prefix, sum_where};

    #[test]
    fn sums_matching_records() {
        let got = sum_where(&rows(), |row| row.kind == "paid", |row| row.score);

        assert_eq!(got, 15000.0);
    }

    #[test]
    fn counts_matching_records() {
        assert_eq!(count_where(&rows(), |row| row.kind == "overdue"), 1);
        assert_eq!(count_where(&rows(), |row| row.kind == "unknown"), 0);
    }

    #[test]
    fn partition_sums_add_up_to_total() {
        let records = rows();
        let total = sum_where(&records, |_| true, |row| row.score);

        let partitioned: f64 = ["paid", "pending", "overdue"]
            .iter()
            .map(|kind| sum_where(&records, |row| row.kind == *kind, |row| row.score))
            .sum();

        assert_eq!(partitioned, total);
    }

    #[test]
    fn formats_month_prefix_with_padding() {
        assert_eq!(month_prefix(date!(2025 - 03 - 09)), "2025-03");
        assert_eq!(month_prefix(date!(2025 - 11 - 30)), "2025-11");
    }

    #[test]
    fn matches_month_by_prefix() {
        assert!(in_month(Some(date!(2025 - 11 - 01)), "2025-11"));
        assert!(!in_month(Some(date!(2025 - 10 - 30)), "2025-11"));
        assert!(!in_month(None, "2025-11"));
    }
}
