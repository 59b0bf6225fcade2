//! The in-memory repository that backs each dashboard table.

use crate::query::{self, Action, Outcome, Record, TableQuery, ViewCache};

/// An owned collection of records with copy-on-write updates.
///
/// Every successful update replaces the whole collection and bumps the
/// version, which invalidates the cached table view.
#[derive(Debug)]
pub struct Repository<T: Record> {
    records: Vec<T>,
    version: u64,
    cache: ViewCache<T::Field>,
}

impl<T: Record + Clone> Repository<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records,
            version: 0,
            cache: ViewCache::default(),
        }
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn list(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply `action` to the record with `id`.
    ///
    /// Returns `false`, leaving the collection untouched, if no record has `id`.
    pub fn apply_mutation<A>(&mut self, id: &T::Id, action: &A) -> bool
    where
        A: Action<T> + ?Sized,
    {
        if self.get(id).is_none() {
            tracing::debug!("ignoring mutation for unknown record {id:?}");
            return false;
        }

        self.records = query::apply_mutation(&self.records, id, action);
        self.version += 1;

        true
    }

    /// Apply `action` to every record in the collection.
    pub fn apply_to_all<A>(&mut self, action: &A)
    where
        A: Action<T> + ?Sized,
    {
        self.records = self
            .records
            .iter()
            .filter_map(|record| match action.apply(record) {
                Outcome::Replace(updated) => Some(updated),
                Outcome::Remove => None,
            })
            .collect();
        self.version += 1;
    }

    pub fn clear(&mut self) {
        self.records = Vec::new();
        self.version += 1;
    }

    /// The records matching `query`, in display order.
    ///
    /// Repeated calls with an equal query against an unchanged collection
    /// reuse the previously composed rows.
    pub fn view(&mut self, query: &TableQuery<T::Field>) -> Vec<&T> {
        let indices = self
            .cache
            .get_or_compute(self.version, &self.records, query);

        indices.iter().map(|&index| &self.records[index]).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{
        Action, CategoryFilter, Outcome, Selection, TableQuery,
        test_record::{Row, RowField, rows},
    };

    use super::Repository;

    struct Delete;

    impl Action<Row> for Delete {
        fn apply(&self, _: &Row) -> Outcome<Row> {
            Outcome::Remove
        }
    }

    struct Shout;

    impl Action<Row> for Shout {
        fn apply(&self, record: &Row) -> Outcome<Row> {
            Outcome::Replace(Row {
                kind: "overdue",
                ..record.clone()
            })
        }
    }

    #[test]
    fn get_finds_record_by_id() {
        let repository = Repository::new(rows());

        assert_eq!(repository.get(&3).map(|row| row.name), Some("peter Omondi"));
        assert!(repository.get(&9).is_none());
    }

    #[test]
    fn mutation_bumps_version() {
        let mut repository = Repository::new(rows());

        let found = repository.apply_mutation(&1, &Delete);

        assert!(found);
        assert_eq!(repository.version(), 1);
        assert_eq!(repository.len(), 3);
    }

    #[test]
    fn unknown_id_leaves_repository_untouched() {
        let mut repository = Repository::new(rows());

        let found = repository.apply_mutation(&42, &Delete);

        assert!(!found);
        assert_eq!(repository.version(), 0);
        assert_eq!(repository.list(), rows().as_slice());
    }

    #[test]
    fn view_reflects_mutations() {
        let mut repository = Repository::new(rows());
        let query = TableQuery::default().with_filter(CategoryFilter::new(
            RowField::Kind,
            Selection::only("overdue"),
        ));
        let before: Vec<u32> = repository.view(&query).iter().map(|row| row.id).collect();

        repository.apply_mutation(&2, &Shout);
        let after: Vec<u32> = repository.view(&query).iter().map(|row| row.id).collect();

        assert_eq!(before, vec![4]);
        assert_eq!(after, vec![2, 4]);
    }

    #[test]
    fn apply_to_all_and_clear() {
        let mut repository = Repository::new(rows());

        repository.apply_to_all(&Shout);
        assert!(repository.list().iter().all(|row| row.kind == "overdue"));

        repository.clear();
        assert!(repository.is_empty());
        assert_eq!(repository.version(), 2);
    }
}
