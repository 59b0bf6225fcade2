use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use time::{Date, macros::date};

use crate::query::{
    Action, FieldValue, Outcome, Record, count_where, in_month, month_prefix, sum_where,
};

pub type ContributionId = u32;

/// How often a member is expected to contribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cycle {
    Monthly,
    Weekly,
}

impl Cycle {
    pub const ALL: [&'static str; 2] = ["Monthly", "Weekly"];

    pub fn as_str(self) -> &'static str {
        match self {
            Cycle::Monthly => "Monthly",
            Cycle::Weekly => "Weekly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionStatus {
    Paid,
    Pending,
    Overdue,
}

impl ContributionStatus {
    pub const ALL: [&'static str; 3] = ["paid", "pending", "overdue"];

    pub fn as_str(self) -> &'static str {
        match self {
            ContributionStatus::Paid => "paid",
            ContributionStatus::Pending => "pending",
            ContributionStatus::Overdue => "overdue",
        }
    }
}

/// A member's contribution for one cycle.
///
/// `balance` is what remains to be paid. It is not derived from `amount`.
#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    pub id: ContributionId,
    pub member: String,
    pub amount: f64,
    pub cycle: Cycle,
    pub status: ContributionStatus,
    pub date_paid: Option<Date>,
    pub balance: f64,
}

/// The sortable and filterable columns of the contributions table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionField {
    Member,
    Amount,
    Cycle,
    Status,
    DatePaid,
    Balance,
}

impl Record for Contribution {
    type Id = ContributionId;
    type Field = ContributionField;

    fn id(&self) -> &ContributionId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.member.as_str()]
    }

    fn field(&self, field: ContributionField) -> FieldValue<'_> {
        match field {
            ContributionField::Member => FieldValue::text(&self.member),
            ContributionField::Amount => FieldValue::Number(self.amount),
            ContributionField::Cycle => FieldValue::text(self.cycle.as_str()),
            ContributionField::Status => FieldValue::text(self.status.as_str()),
            ContributionField::DatePaid => self.date_paid.map_or(FieldValue::Missing, |date| {
                FieldValue::Text(Cow::Owned(date.to_string()))
            }),
            ContributionField::Balance => FieldValue::Number(self.balance),
        }
    }
}

/// Settle a contribution in full on `today`.
#[derive(Debug, Clone, Copy)]
pub struct MarkPaid {
    pub today: Date,
}

impl Action<Contribution> for MarkPaid {
    fn apply(&self, contribution: &Contribution) -> Outcome<Contribution> {
        Outcome::Replace(Contribution {
            status: ContributionStatus::Paid,
            date_paid: Some(self.today),
            balance: 0.0,
            ..contribution.clone()
        })
    }
}

/// The summary cards above the contributions table.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionTotals {
    /// The amount paid in the month of `today`.
    pub this_month: f64,
    pub all_time: f64,
    /// The number of pending contributions.
    pub pending: usize,
    /// The number of overdue contributions.
    pub overdue: usize,
}

impl ContributionTotals {
    pub fn new(contributions: &[Contribution], today: Date) -> Self {
        let month = month_prefix(today);

        Self {
            this_month: sum_where(
                contributions,
                |contribution| in_month(contribution.date_paid, &month),
                |contribution| contribution.amount,
            ),
            all_time: sum_where(contributions, |_| true, |contribution| contribution.amount),
            pending: count_where(contributions, |contribution| {
                contribution.status == ContributionStatus::Pending
            }),
            overdue: count_where(contributions, |contribution| {
                contribution.status == ContributionStatus::Overdue
            }),
        }
    }
}

/// The total amount per member, in order of each member's first contribution.
pub fn contribution_share(contributions: &[Contribution]) -> Vec<(&str, f64)> {
    let mut shares: Vec<(&str, f64)> = Vec::new();

    for contribution in contributions {
        match shares
            .iter_mut()
            .find(|(member, _)| *member == contribution.member)
        {
            Some((_, total)) => *total += contribution.amount,
            None => shares.push((contribution.member.as_str(), contribution.amount)),
        }
    }

    shares
}

pub fn sample_contributions() -> Vec<Contribution> {
    vec![
        Contribution {
            id: 1,
            member: "John Kamau".to_owned(),
            amount: 5000.0,
            cycle: Cycle::Monthly,
            status: ContributionStatus::Paid,
            date_paid: Some(date!(2025 - 11 - 01)),
            balance: 0.0,
        },
        Contribution {
            id: 2,
            member: "Mary Wanjiku".to_owned(),
            amount: 50000.0,
            cycle: Cycle::Monthly,
            status: ContributionStatus::Pending,
            date_paid: None,
            balance: 50000.0,
        },
        Contribution {
            id: 3,
            member: "Peter Omondi".to_owned(),
            amount: 10000.0,
            cycle: Cycle::Weekly,
            status: ContributionStatus::Paid,
            date_paid: Some(date!(2025 - 10 - 30)),
            balance: 0.0,
        },
        Contribution {
            id: 4,
            member: "Grace Achieng".to_owned(),
            amount: 3000.0,
            cycle: Cycle::Monthly,
            status: ContributionStatus::Overdue,
            date_paid: None,
            balance: 3000.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::query::{
        CategoryFilter, Selection, Sort, SortDirection, TableQuery, apply_mutation, compose_view,
        sum_where,
    };

    use super::{
        ContributionField, ContributionStatus, ContributionTotals, MarkPaid, contribution_share,
        sample_contributions,
    };

    #[test]
    fn sample_totals() {
        let totals = ContributionTotals::new(&sample_contributions(), date!(2025 - 11 - 15));

        assert_eq!(totals.pending, 1);
        assert_eq!(totals.overdue, 1);
        assert_eq!(totals.all_time, 68000.0);
        assert_eq!(totals.this_month, 5000.0);
    }

    #[test]
    fn this_month_follows_today() {
        let totals = ContributionTotals::new(&sample_contributions(), date!(2025 - 10 - 02));

        assert_eq!(totals.this_month, 10000.0);
    }

    #[test]
    fn status_partition_sums_to_total() {
        let contributions = sample_contributions();
        let total = sum_where(&contributions, |_| true, |c| c.amount);

        let partitioned: f64 = [
            ContributionStatus::Paid,
            ContributionStatus::Pending,
            ContributionStatus::Overdue,
        ]
        .into_iter()
        .map(|status| sum_where(&contributions, |c| c.status == status, |c| c.amount))
        .sum();

        assert_eq!(partitioned, total);
    }

    #[test]
    fn mark_paid_settles_contribution() {
        let today = date!(2025 - 11 - 20);

        let got = apply_mutation(&sample_contributions(), &2, &MarkPaid { today });

        let mary = &got[1];
        assert_eq!(mary.status, ContributionStatus::Paid);
        assert_eq!(mary.date_paid, Some(today));
        assert_eq!(mary.balance, 0.0);
        assert_eq!(got[0], sample_contributions()[0]);
    }

    #[test]
    fn mark_paid_is_idempotent() {
        let action = MarkPaid {
            today: date!(2025 - 11 - 20),
        };

        let once = apply_mutation(&sample_contributions(), &4, &action);
        let twice = apply_mutation(&once, &4, &action);

        assert_eq!(once, twice);
    }

    #[test]
    fn filter_by_status_and_sort_by_amount() {
        let contributions = sample_contributions();
        let query = TableQuery::default()
            .with_filter(CategoryFilter::new(
                ContributionField::Status,
                Selection::only("paid"),
            ))
            .with_sort(Some(Sort::new(ContributionField::Amount, SortDirection::Desc)));

        let ids: Vec<u32> = compose_view(&contributions, &query)
            .iter()
            .map(|c| c.id)
            .collect();

        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn unpaid_dates_sort_first() {
        let contributions = sample_contributions();
        let query =
            TableQuery::default().with_sort(Some(Sort::ascending(ContributionField::DatePaid)));

        let ids: Vec<u32> = compose_view(&contributions, &query)
            .iter()
            .map(|c| c.id)
            .collect();

        assert_eq!(ids, vec![2, 4, 3, 1]);
    }

    #[test]
    fn share_sums_per_member() {
        let mut contributions = sample_contributions();
        contributions[2].member = "John Kamau".to_owned();

        let shares = contribution_share(&contributions);

        assert_eq!(
            shares,
            vec![
                ("John Kamau", 15000.0),
                ("Mary Wanjiku", 50000.0),
                ("Grace Achieng", 3000.0)
            ]
        );
    }
}
