use serde::{Deserialize, Serialize};

use crate::query::{Action, FieldValue, Outcome, Record, count_where};

pub type NotificationId = String;

/// The number of notifications shown per page of the feed.
pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Payment,
    Loan,
    Member,
    System,
    #[serde(rename = "AI")]
    Ai,
}

impl NotificationKind {
    pub const ALL: [&'static str; 5] = ["Payment", "Loan", "Member", "System", "AI"];

    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Payment => "Payment",
            NotificationKind::Loan => "Loan",
            NotificationKind::Member => "Member",
            NotificationKind::System => "System",
            NotificationKind::Ai => "AI",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationStatus {
    New,
    Read,
    High,
}

impl NotificationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationStatus::New => "New",
            NotificationStatus::Read => "Read",
            NotificationStatus::High => "High",
        }
    }
}

/// A button on a notification, e.g. "Approve".
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationAction {
    pub label: String,
    pub action_id: String,
}

impl NotificationAction {
    fn new(label: &str, action_id: &str) -> Self {
        Self {
            label: label.to_owned(),
            action_id: action_id.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// A human readable age such as "2 hours ago", shown as is.
    pub timestamp: String,
    pub status: NotificationStatus,
    pub actions: Vec<NotificationAction>,
}

impl Notification {
    /// The text the feed search is matched against.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationField {
    Kind,
    Title,
    Status,
}

impl Record for Notification {
    type Id = NotificationId;
    type Field = NotificationField;

    fn id(&self) -> &NotificationId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.message.as_str()]
    }

    fn field(&self, field: NotificationField) -> FieldValue<'_> {
        match field {
            NotificationField::Kind => FieldValue::text(self.kind.as_str()),
            NotificationField::Title => FieldValue::text(&self.title),
            NotificationField::Status => FieldValue::text(self.status.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MarkRead;

impl Action<Notification> for MarkRead {
    fn apply(&self, notification: &Notification) -> Outcome<Notification> {
        Outcome::Replace(Notification {
            status: NotificationStatus::Read,
            ..notification.clone()
        })
    }
}

/// The highlight cards above the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityCounts {
    /// Unread payment notifications.
    pub pending_contributions: usize,
    /// High priority loan notifications.
    pub overdue_loans: usize,
    /// Unread member notifications.
    pub join_requests: usize,
    /// Unread AI notifications.
    pub ai_alerts: usize,
}

impl PriorityCounts {
    pub fn new(notifications: &[Notification]) -> Self {
        let unread = |kind: NotificationKind| {
            count_where(notifications, |notification| {
                notification.kind == kind && notification.status != NotificationStatus::Read
            })
        };

        Self {
            pending_contributions: unread(NotificationKind::Payment),
            overdue_loans: count_where(notifications, |notification| {
                notification.kind == NotificationKind::Loan
                    && notification.status == NotificationStatus::High
            }),
            join_requests: unread(NotificationKind::Member),
            ai_alerts: unread(NotificationKind::Ai),
        }
    }
}

/// What to show the user after they click an action on a notification.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionReply {
    /// A short confirmation.
    Toast { title: String, description: String },
    /// Open the detail view of the notification.
    ShowDetails,
}

impl ActionReply {
    /// The reply for clicking `action_id` on `notification`.
    pub fn for_action(notification: &Notification, action_id: &str) -> Self {
        match action_id {
            "approve" => ActionReply::Toast {
                title: "Approved".to_owned(),
                description: format!("{} approved", notification.title),
            },
            "reject" => ActionReply::Toast {
                title: "Rejected".to_owned(),
                description: format!("{} rejected", notification.title),
            },
            "view" => ActionReply::ShowDetails,
            other => ActionReply::Toast {
                title: "Action".to_owned(),
                description: format!("Triggered {other}"),
            },
        }
    }
}

pub fn sample_notifications() -> Vec<Notification> {
    let notification = |id: &str,
                        kind: NotificationKind,
                        title: &str,
                        message: &str,
                        timestamp: &str,
                        status: NotificationStatus,
                        actions: Vec<NotificationAction>| Notification {
        id: id.to_owned(),
        kind,
        title: title.to_owned(),
        message: message.to_owned(),
        timestamp: timestamp.to_owned(),
        status,
        actions,
    };

    vec![
        notification(
            "n1",
            NotificationKind::Payment,
            "Payment Received",
            "John contributed KSh 5,000.",
            "2 hours ago",
            NotificationStatus::New,
            vec![NotificationAction::new("View", "view")],
        ),
        notification(
            "n2",
            NotificationKind::Loan,
            "Loan Request",
            "Mary requested a loan of KSh 20,000.",
            "10 minutes ago",
            NotificationStatus::New,
            vec![
                NotificationAction::new("Approve", "approve"),
                NotificationAction::new("Reject", "reject"),
            ],
        ),
        notification(
            "n3",
            NotificationKind::Loan,
            "Overdue Loan",
            "David's loan is overdue by 3 days.",
            "1 day ago",
            NotificationStatus::High,
            vec![NotificationAction::new("View Loan", "view_loan")],
        ),
        notification(
            "n4",
            NotificationKind::Member,
            "New Join Request",
            "3 people want to join your chama.",
            "3 days ago",
            NotificationStatus::New,
            vec![NotificationAction::new("Review", "review")],
        ),
        notification(
            "n5",
            NotificationKind::Ai,
            "AI Insight",
            "Your chama is trending 15% above average contribution this month.",
            "4 hours ago",
            NotificationStatus::New,
            Vec::new(),
        ),
        notification(
            "n6",
            NotificationKind::System,
            "Export Complete",
            "Loan Summary \u{2014} Feb 2025 exported by Admin.",
            "6 days ago",
            NotificationStatus::Read,
            Vec::new(),
        ),
    ]
}
