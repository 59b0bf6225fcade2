//! The detail view of one notification and the per-notification actions.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    Error,
    alert::Alert,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_SMALL_STYLE, CARD_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, acknowledge_button, base,
        status_badge,
    },
    navigation::NavBar,
    notification::{
        core::{ActionReply, MarkRead, Notification, NotificationId},
        notifications_page::{
            NotificationState, notification_action_url, notification_card, status_tone,
        },
    },
};

fn notification_view(notification: &Notification) -> Markup {
    let nav_bar = NavBar::new(endpoints::NOTIFICATIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            a href=(endpoints::NOTIFICATIONS_VIEW) class=(LINK_STYLE) { "← All notifications" }

            article class=(CARD_STYLE) data-notification-id=(notification.id)
            {
                header class="flex items-center gap-2 mb-2"
                {
                    span class="text-xs uppercase text-gray-500" { (notification.kind.as_str()) }
                    h1 class="text-xl font-bold" { (notification.title) }
                    (status_badge(notification.status.as_str(), status_tone(notification.status)))
                }

                p class="text-sm text-gray-600 dark:text-gray-400 mb-4" { (notification.message) }
                div class="text-xs text-gray-500 mb-4" { (notification.timestamp) }

                div class="flex gap-2 justify-end"
                {
                    @for action in &notification.actions {
                        @if action.action_id != "view" {
                            button
                                type="button"
                                hx-post=(notification_action_url(&notification.id, &action.action_id))
                                hx-swap="none"
                                class=(BUTTON_SMALL_STYLE)
                            {
                                (action.label)
                            }
                        }
                    }

                    (acknowledge_button("export", "Export", BUTTON_SMALL_STYLE))
                }
            }
        }
    };

    base(&notification.title, &[], &content)
}

/// Renders the detail view of a notification and marks it as read.
pub async fn get_notification_page(
    State(state): State<NotificationState>,
    Path(notification_id): Path<NotificationId>,
) -> Result<Response, Error> {
    let mut store = state
        .store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    if !store
        .notifications
        .apply_mutation(&notification_id, &MarkRead)
    {
        return Err(Error::NotFound);
    }

    let notification = store
        .notifications
        .get(&notification_id)
        .ok_or(Error::NotFound)?;

    Ok(notification_view(notification).into_response())
}

/// Runs an action on a notification and marks it as read.
///
/// "view" redirects to the detail view, every other action responds with the
/// updated notification and a confirmation. Unknown notifications are ignored
/// with `204 No Content`.
pub async fn notification_action_endpoint(
    State(state): State<NotificationState>,
    Path((notification_id, action_id)): Path<(NotificationId, String)>,
) -> Response {
    let mut store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    let Some(reply) = store
        .notifications
        .get(&notification_id)
        .map(|notification| ActionReply::for_action(notification, &action_id))
    else {
        return StatusCode::NO_CONTENT.into_response();
    };

    store
        .notifications
        .apply_mutation(&notification_id, &MarkRead);

    match reply {
        ActionReply::ShowDetails => (
            HxRedirect(format_endpoint(
                endpoints::NOTIFICATION_VIEW,
                &notification_id,
            )),
            StatusCode::OK,
        )
            .into_response(),
        ActionReply::Toast { title, description } => {
            let Some(notification) = store.notifications.get(&notification_id) else {
                return StatusCode::NO_CONTENT.into_response();
            };

            let alert = Alert::Success {
                message: title,
                details: description,
            };

            html! {
                (notification_card(notification))
                (alert.into_html())
            }
            .into_response()
        }
    }
}
