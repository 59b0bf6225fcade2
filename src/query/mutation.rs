//! Copy-on-write updates of a single record.

use super::Record;

/// The result of applying an [Action] to a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// Replace the record with an updated copy.
    Replace(T),
    /// Delete the record from the collection.
    Remove,
}

/// A user action that updates or removes one record.
pub trait Action<T> {
    fn apply(&self, record: &T) -> Outcome<T>;
}

/// Derive a new collection where the record identified by `id` has had
/// `action` applied and every other record is an unchanged copy.
///
/// An unknown `id` is not an error: the returned collection is equal to `records`.
pub fn apply_mutation<T, A>(records: &[T], id: &T::Id, action: &A) -> Vec<T>
where
    T: Record + Clone,
    A: Action<T> + ?Sized,
{
    records
        .iter()
        .filter_map(|record| {
            if record.id() != id {
                return Some(record.clone());
            }

            match action.apply(record) {
                Outcome::Replace(updated) => Some(updated),
                Outcome::Remove => None,
            }
        })
        .collect()
}
