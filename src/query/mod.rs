//! The table query engine shared by the dashboard pages.
//!
//! Every table in the dashboard is a view over an in-memory collection of
//! records: the rows are narrowed by a free-text search, then by zero or more
//! categorical filters, and finally (optionally) sorted by a column. This
//! module implements that pipeline once, generically over [Record], along with
//! the summary helpers used for the KPI cards and the copy-on-write mutation
//! applier used by the row actions.

mod aggregate;
mod filter;
mod mutation;
mod record;
mod sort;
mod view;

pub use aggregate::{count_where, in_month, month_prefix, sum_where};
pub use filter::{CategoryFilter, SearchTerm, Selection};
pub use mutation::{Action, Outcome, apply_mutation};
pub use record::{FieldValue, Record};
pub use sort::{Sort, SortDirection, compare_values, sort_records};
pub use view::{TableQuery, ViewCache, compose_view};
