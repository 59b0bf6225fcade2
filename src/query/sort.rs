//! Direction-aware sorting of records by a column.

use std::{borrow::Cow, cmp::Ordering};

use serde::{Deserialize, Serialize};

use super::{FieldValue, Record};

/// The order to sort rows in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Sort in order of increasing value.
    #[default]
    Asc,
    /// Sort in order of decreasing value.
    Desc,
}

impl SortDirection {
    pub fn reverse(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_query_value(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A sort on a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: Copy + PartialEq> Sort<F> {
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn ascending(field: F) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    /// The sort after clicking the header of the column `field`.
    ///
    /// Clicking the column that is already sorted flips the direction,
    /// clicking any other column sorts by it in ascending order.
    pub fn toggle(current: Option<Self>, field: F) -> Self {
        match current {
            Some(current) if current.field == field => {
                Self::new(field, current.direction.reverse())
            }
            _ => Self::ascending(field),
        }
    }
}

/// Compare two column values in ascending order.
///
/// Two numbers compare by their natural order. Everything else is compared as
/// case-folded text, with numbers written out and a missing value treated as
/// the empty string, so missing values sort before any non-empty text.
pub fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Number(a), FieldValue::Number(b)) => {
            a.partial_cmp(b).unwrap_or(Ordering::Equal)
        }
        _ => normalized_text(a).cmp(&normalized_text(b)),
    }
}

fn normalized_text<'a>(value: &'a FieldValue) -> Cow<'a, str> {
    match value {
        FieldValue::Text(text) => Cow::Owned(text.to_lowercase()),
        FieldValue::Number(number) => Cow::Owned(number.to_string()),
        FieldValue::Missing => Cow::Borrowed(""),
    }
}

/// Sort `rows` in place by `sort`.
///
/// The sort is stable: rows with equal values keep their relative order in
/// both directions.
pub fn sort_records<T: Record>(rows: &mut [&T], sort: Sort<T::Field>) {
    rows.sort_by(|a, b| compare_records(*a, *b, sort));
}

pub(super) fn compare_records<T: Record>(a: &T, b: &T, sort: Sort<T::Field>) -> Ordering {
    let ordering = compare_values(&a.field(sort.field), &b.field(sort.field));

    match sort.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use crate::query::{
        FieldValue,
        test_record::{Row, RowField, rows},
    };

    use super::{Sort, SortDirection, compare_values, sort_records};

    fn sorted_ids(sort: Sort<RowField>) -> Vec<u32> {
        let rows = rows();
        let mut refs: Vec<&Row> = rows.iter().collect();
        sort_records(&mut refs, sort);
        refs.iter().map(|row| row.id).collect()
    }

    #[test]
    fn sorts_text_ignoring_case() {
        let got = sorted_ids(Sort::ascending(RowField::Name));

        assert_eq!(got, vec![4, 1, 2, 3]);
    }

    #[test]
    fn sorts_numbers_naturally() {
        let got = sorted_ids(Sort::ascending(RowField::Score));

        // 1 and 4 have the same score and keep their original order.
        assert_eq!(got, vec![1, 4, 3, 2]);
    }

    #[test]
    fn descending_keeps_equal_rows_in_original_order() {
        let got = sorted_ids(Sort::new(RowField::Score, SortDirection::Desc));

        assert_eq!(got, vec![2, 3, 1, 4]);
    }

    #[test]
    fn missing_values_sort_as_empty_text() {
        let got = sorted_ids(Sort::ascending(RowField::Note));

        assert_eq!(got, vec![2, 4, 3, 1]);
    }

    #[test]
    fn descending_reverses_ascending_for_distinct_values() {
        let ascending = sorted_ids(Sort::ascending(RowField::Name));
        let mut descending = sorted_ids(Sort::new(RowField::Name, SortDirection::Desc));
        descending.reverse();

        assert_eq!(ascending, descending);
    }

    #[test]
    fn compares_mixed_values_as_text() {
        assert_eq!(
            compare_values(&FieldValue::Missing, &FieldValue::Number(1.0)),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&FieldValue::text("B"), &FieldValue::text("a")),
            Ordering::Greater
        );
    }

    #[test]
    fn toggling_same_column_flips_direction() {
        let current = Some(Sort::ascending(RowField::Name));

        let got = Sort::toggle(current, RowField::Name);

        assert_eq!(got, Sort::new(RowField::Name, SortDirection::Desc));
        assert_eq!(
            Sort::toggle(Some(got), RowField::Name),
            Sort::ascending(RowField::Name)
        );
    }

    #[test]
    fn toggling_other_column_sorts_ascending() {
        let current = Some(Sort::new(RowField::Name, SortDirection::Desc));

        let got = Sort::toggle(current, RowField::Score);

        assert_eq!(got, Sort::ascending(RowField::Score));
        assert_eq!(
            Sort::toggle(None, RowField::Kind),
            Sort::ascending(RowField::Kind)
        );
    }
}
