//! The process-local data behind the dashboard.

use crate::{
    contribution::{Contribution, sample_contributions},
    loan::{Loan, sample_loans},
    member::{Member, sample_members},
    notification::{Notification, sample_notifications},
    repository::Repository,
};

/// The collections shown on the dashboard pages.
///
/// The collections are independent: nothing keeps a member's totals in step
/// with their contribution or loan rows.
#[derive(Debug)]
pub struct ChamaStore {
    pub contributions: Repository<Contribution>,
    pub loans: Repository<Loan>,
    pub members: Repository<Member>,
    pub notifications: Repository<Notification>,
}

impl ChamaStore {
    pub fn new(
        contributions: Vec<Contribution>,
        loans: Vec<Loan>,
        members: Vec<Member>,
        notifications: Vec<Notification>,
    ) -> Self {
        Self {
            contributions: Repository::new(contributions),
            loans: Repository::new(loans),
            members: Repository::new(members),
            notifications: Repository::new(notifications),
        }
    }

    /// A store seeded with the demo chama.
    pub fn with_sample_data() -> Self {
        Self::new(
            sample_contributions(),
            sample_loans(),
            sample_members(),
            sample_notifications(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::ChamaStore;

    #[test]
    fn sample_data_fills_every_table() {
        let store = ChamaStore::with_sample_data();

        assert_eq!(store.contributions.len(), 4);
        assert_eq!(store.loans.len(), 4);
        assert_eq!(store.members.len(), 4);
        assert_eq!(store.notifications.len(), 6);
    }
}
