//! Composes the displayed rows of a table from its source collection.

use super::{CategoryFilter, Record, SearchTerm, Sort, sort::compare_records};

/// The parameters that determine which rows a table displays and in what order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableQuery<F> {
    /// Free-text search over the records' search fields.
    pub search: SearchTerm,
    /// Categorical filters, all of which must match.
    pub filters: Vec<CategoryFilter<F>>,
    /// The column to sort by. Rows keep the collection order when `None`.
    pub sort: Option<Sort<F>>,
    /// The maximum number of rows to display.
    pub limit: Option<usize>,
}

impl<F> Default for TableQuery<F> {
    fn default() -> Self {
        Self {
            search: SearchTerm::default(),
            filters: Vec::new(),
            sort: None,
            limit: None,
        }
    }
}

impl<F: Copy + PartialEq> TableQuery<F> {
    pub fn new(search: &str) -> Self {
        Self {
            search: SearchTerm::new(search),
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, filter: CategoryFilter<F>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_sort(mut self, sort: Option<Sort<F>>) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Filter and sort `records` according to `query`.
///
/// Records are narrowed by the text search, then by each categorical filter,
/// then sorted if the query has a sort. Without a sort the rows keep the order
/// of `records`.
pub fn compose_view<'a, T: Record>(
    records: &'a [T],
    query: &TableQuery<T::Field>,
) -> Vec<&'a T> {
    compose_indices(records, query)
        .into_iter()
        .map(|index| &records[index])
        .collect()
}

fn compose_indices<T: Record>(records: &[T], query: &TableQuery<T::Field>) -> Vec<usize> {
    let mut rows: Vec<(usize, &T)> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| query.search.matches(*record))
        .filter(|(_, record)| query.filters.iter().all(|filter| filter.matches(*record)))
        .collect();

    if let Some(sort) = query.sort {
        rows.sort_by(|(_, a), (_, b)| compare_records(*a, *b, sort));
    }

    let limit = query.limit.unwrap_or(usize::MAX);

    rows.into_iter().take(limit).map(|(index, _)| index).collect()
}

/// Remembers the rows of the last composed view.
///
/// The view is recomputed only when the collection version or the query
/// differs from the previous call.
#[derive(Debug)]
pub struct ViewCache<F> {
    key: Option<(u64, TableQuery<F>)>,
    indices: Vec<usize>,
}

impl<F> Default for ViewCache<F> {
    fn default() -> Self {
        Self {
            key: None,
            indices: Vec::new(),
        }
    }
}

impl<F: Copy + PartialEq> ViewCache<F> {
    /// Whether a view for `version` and `query` is already cached.
    pub fn is_fresh(&self, version: u64, query: &TableQuery<F>) -> bool {
        matches!(&self.key, Some((cached_version, cached_query))
            if *cached_version == version && cached_query == query)
    }

    /// The indices into `records` of the rows of the view, computing them if
    /// the cache is stale.
    ///
    /// `version` must change whenever `records` changes.
    pub fn get_or_compute<T: Record<Field = F>>(
        &mut self,
        version: u64,
        records: &[T],
        query: &TableQuery<F>,
    ) -> &[usize] {
        if !self.is_fresh(version, query) {
            tracing::debug!("recomputing table view for collection version {version}");
            self.indices = compose_indices(records, query);
            self.key = Some((version, query.clone()));
        }

        &self.indices
    }
}
