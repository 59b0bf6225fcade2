//! Member contributions: the totals, the searchable table and the row actions.

mod actions;
mod contributions_page;
mod core;

pub use actions::{mark_contribution_paid_endpoint, remind_contribution_endpoint};
pub use contributions_page::{ContributionQuery, ContributionState, get_contributions_page};
pub use core::{
    Contribution, ContributionField, ContributionId, ContributionStatus, ContributionTotals,
    Cycle, MarkPaid, contribution_share, sample_contributions,
};
