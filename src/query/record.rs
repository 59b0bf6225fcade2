use std::{borrow::Cow, fmt::Debug};

/// The value of a single column of a record, as seen by filters and sorting.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// A string value, e.g. a name, an enum label or an ISO date.
    Text(Cow<'a, str>),
    /// A numeric value, e.g. an amount of money.
    Number(f64),
    /// The record has no value for the column, e.g. an unpaid contribution
    /// has no payment date.
    Missing,
}

impl<'a> FieldValue<'a> {
    /// Shorthand for a borrowed text value.
    pub fn text(value: &'a str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }
}

/// A uniform row in one of the dashboard tables.
pub trait Record {
    /// The identifier used to target the record in mutations.
    type Id: PartialEq + Debug;

    /// The columns of the record that can be filtered on or sorted by.
    type Field: Copy + PartialEq + Debug;

    /// The record's identifier.
    fn id(&self) -> &Self::Id;

    /// The string fields that the free-text search looks in.
    fn search_fields(&self) -> Vec<&str>;

    /// The value of `field` for this record.
    fn field(&self, field: Self::Field) -> FieldValue<'_>;
}
