use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use time::{Date, macros::date};

use crate::{
    contribution::Cycle,
    query::{Action, FieldValue, Outcome, Record, count_where},
};

pub type MemberId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Member,
    Treasurer,
    Chairperson,
    Secretary,
}

impl Role {
    pub const ALL: [&'static str; 4] = ["Member", "Treasurer", "Chairperson", "Secretary"];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Member => "Member",
            Role::Treasurer => "Treasurer",
            Role::Chairperson => "Chairperson",
            Role::Secretary => "Secretary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Inactive,
    Invited,
}

impl MemberStatus {
    pub const ALL: [&'static str; 3] = ["active", "inactive", "invited"];

    pub fn as_str(self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
            MemberStatus::Invited => "invited",
        }
    }
}

/// A member of the chama.
///
/// The totals are kept on the member and are not summed from the
/// contribution and loan tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub phone: String,
    pub role: Role,
    pub contributions_total: f64,
    pub loans_total: f64,
    pub status: MemberStatus,
    pub join_date: Date,
    pub cycle: Cycle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberField {
    Name,
    Phone,
    Role,
    ContributionsTotal,
    LoansTotal,
    Status,
    JoinDate,
}

impl Record for Member {
    type Id = MemberId;
    type Field = MemberField;

    fn id(&self) -> &MemberId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.phone.as_str()]
    }

    fn field(&self, field: MemberField) -> FieldValue<'_> {
        match field {
            MemberField::Name => FieldValue::text(&self.name),
            MemberField::Phone => FieldValue::text(&self.phone),
            MemberField::Role => FieldValue::text(self.role.as_str()),
            MemberField::ContributionsTotal => FieldValue::Number(self.contributions_total),
            MemberField::LoansTotal => FieldValue::Number(self.loans_total),
            MemberField::Status => FieldValue::text(self.status.as_str()),
            MemberField::JoinDate => FieldValue::Text(Cow::Owned(self.join_date.to_string())),
        }
    }
}

/// Remove a member from the chama.
#[derive(Debug, Clone, Copy)]
pub struct RemoveMember;

impl Action<Member> for RemoveMember {
    fn apply(&self, _: &Member) -> Outcome<Member> {
        Outcome::Remove
    }
}

/// The summary cards above the members table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberTotals {
    pub total: usize,
    pub active: usize,
    pub invited: usize,
    /// Members with an outstanding loan total.
    pub in_loan_cycle: usize,
}

impl MemberTotals {
    pub fn new(members: &[Member]) -> Self {
        Self {
            total: members.len(),
            active: count_where(members, |member| member.status == MemberStatus::Active),
            invited: count_where(members, |member| member.status == MemberStatus::Invited),
            in_loan_cycle: count_where(members, |member| member.loans_total > 0.0),
        }
    }
}

pub fn sample_members() -> Vec<Member> {
    vec![
        Member {
            id: 1,
            name: "John Kamau".to_owned(),
            phone: "+254700111000".to_owned(),
            role: Role::Member,
            contributions_total: 75000.0,
            loans_total: 30000.0,
            status: MemberStatus::Active,
            join_date: date!(2022 - 03 - 01),
            cycle: Cycle::Monthly,
        },
        Member {
            id: 2,
            name: "Mary Wanjiku".to_owned(),
            phone: "+254700222000".to_owned(),
            role: Role::Treasurer,
            contributions_total: 120000.0,
            loans_total: 0.0,
            status: MemberStatus::Active,
            join_date: date!(2021 - 07 - 12),
            cycle: Cycle::Monthly,
        },
        Member {
            id: 3,
            name: "Peter Omondi".to_owned(),
            phone: "+254700333000".to_owned(),
            role: Role::Member,
            contributions_total: 30000.0,
            loans_total: 10000.0,
            status: MemberStatus::Inactive,
            join_date: date!(2023 - 01 - 10),
            cycle: Cycle::Weekly,
        },
        Member {
            id: 4,
            name: "Grace Achieng".to_owned(),
            phone: "+254700444000".to_owned(),
            role: Role::Member,
            contributions_total: 15000.0,
            loans_total: 0.0,
            status: MemberStatus::Invited,
            join_date: date!(2025 - 11 - 01),
            cycle: Cycle::Monthly,
        },
    ]
}

#[cfg(test)]
mod tests {
    use crate::query::{CategoryFilter, Selection, TableQuery, apply_mutation, compose_view};

    use super::{MemberField, MemberTotals, RemoveMember, sample_members};

    #[test]
    fn remove_keeps_remaining_order() {
        let members = sample_members();

        let got = apply_mutation(&members, &3, &RemoveMember);

        let ids: Vec<u32> = got.iter().map(|member| member.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    #[test]
    fn remove_unknown_member_is_noop() {
        let members = sample_members();

        let got = apply_mutation(&members, &9, &RemoveMember);

        assert_eq!(got, members);
    }

    #[test]
    fn search_matches_phone() {
        let members = sample_members();

        let got = compose_view(&members, &TableQuery::new("0333"));

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].name, "Peter Omondi");
    }

    #[test]
    fn role_and_status_filters_combine() {
        let members = sample_members();
        let query = TableQuery::default()
            .with_filter(CategoryFilter::new(
                MemberField::Role,
                Selection::only("Member"),
            ))
            .with_filter(CategoryFilter::new(
                MemberField::Status,
                Selection::only("active"),
            ));

        let ids: Vec<u32> = compose_view(&members, &query)
            .iter()
            .map(|member| member.id)
            .collect();

        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn sample_totals() {
        assert_eq!(
            MemberTotals::new(&sample_members()),
            MemberTotals {
                total: 4,
                active: 2,
                invited: 1,
                in_loan_cycle: 2,
            }
        );
    }
}
