//! The notification feed, notification details and notification actions.

mod core;
mod notification_page;
mod notifications_page;

pub use core::{
    ActionReply, MarkRead, Notification, NotificationAction, NotificationField, NotificationId,
    NotificationKind, NotificationStatus, PAGE_SIZE, PriorityCounts, sample_notifications,
};
pub use notification_page::{get_notification_page, notification_action_endpoint};
pub use notifications_page::{
    NotificationQuery, NotificationState, clear_notifications_endpoint, get_notifications_page,
    mark_all_notifications_read_endpoint,
};
