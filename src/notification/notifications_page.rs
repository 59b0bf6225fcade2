//! The notification feed with its filters, priority cards and bulk actions.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    alert::Alert,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_SECONDARY_STYLE, BUTTON_SMALL_STYLE, CARD_STYLE,
        FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, Tone, base, kpi_card,
        status_badge,
    },
    navigation::NavBar,
    notification::core::{
        MarkRead, Notification, NotificationField, NotificationKind, NotificationStatus, PAGE_SIZE,
        PriorityCounts,
    },
    query::{CategoryFilter, SearchTerm, Selection, TableQuery},
    repository::Repository,
    store::ChamaStore,
    table::{SelectFilter, TABLE_SECTION_ID, query_url},
};

/// The ID of the filter form, included in the bulk action requests so the
/// re-rendered feed keeps the current filters.
const FILTER_FORM_ID: &str = "notification-filters";

/// The state needed for the notification pages and actions.
#[derive(Debug, Clone)]
pub struct NotificationState {
    pub store: Arc<Mutex<ChamaStore>>,
}

impl FromRef<AppState> for NotificationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// The query parameters of the notification feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationQuery {
    pub search: String,
    pub kind: Selection,
    /// Show only system notifications, ignoring `kind`.
    pub system_only: bool,
    /// The number of pages of [PAGE_SIZE] notifications to show.
    pub page: usize,
}

impl Default for NotificationQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            kind: Selection::All,
            system_only: false,
            page: 1,
        }
    }
}

impl NotificationQuery {
    fn to_table_query(&self) -> TableQuery<NotificationField> {
        let kind = if self.system_only {
            Selection::only(NotificationKind::System.as_str())
        } else {
            self.kind.clone()
        };

        TableQuery::default().with_filter(CategoryFilter::new(NotificationField::Kind, kind))
    }

    fn limit(&self) -> usize {
        self.page.max(1).saturating_mul(PAGE_SIZE)
    }
}

/// The notifications shown for `query` and whether the feed has more pages.
///
/// The search runs over the title and message joined by a space, so a search
/// may span the two.
pub(super) fn feed<'a>(
    notifications: &'a mut Repository<Notification>,
    query: &NotificationQuery,
) -> (Vec<&'a Notification>, bool) {
    let limit = query.limit();
    let has_more = limit < notifications.len();
    let search = SearchTerm::new(&query.search);

    let shown = notifications
        .view(&query.to_table_query())
        .into_iter()
        .filter(|notification| search.matches_any([notification.search_text().as_str()]))
        .take(limit)
        .collect();

    (shown, has_more)
}

pub(super) fn status_tone(status: NotificationStatus) -> Tone {
    match status {
        NotificationStatus::New => Tone::Positive,
        NotificationStatus::Read => Tone::Neutral,
        NotificationStatus::High => Tone::Negative,
    }
}

/// A notification in the feed, also returned by the notification actions.
pub(super) fn notification_card(notification: &Notification) -> Markup {
    let details_url = format_endpoint(endpoints::NOTIFICATION_VIEW, &notification.id);
    let border = if notification.status == NotificationStatus::High {
        "border-2 border-red-300"
    } else {
        ""
    };

    html! {
        article
            class={(CARD_STYLE) " " (border)}
            data-notification-id=(notification.id)
            data-status=(notification.status.as_str())
        {
            div class="flex items-start justify-between gap-4"
            {
                div
                {
                    div class="flex items-center gap-2"
                    {
                        span class="text-xs uppercase text-gray-500" { (notification.kind.as_str()) }
                        h3 class="font-medium" { (notification.title) }
                        (status_badge(notification.status.as_str(), status_tone(notification.status)))
                    }

                    p class="text-sm text-gray-600 dark:text-gray-400" { (notification.message) }
                    div class="text-xs text-gray-500 mt-2" { (notification.timestamp) }
                }

                div class="flex flex-col items-end gap-2"
                {
                    @for action in &notification.actions {
                        button
                            type="button"
                            hx-post=(notification_action_url(&notification.id, &action.action_id))
                            hx-target="closest article"
                            hx-swap="outerHTML"
                            class=(BUTTON_SMALL_STYLE)
                        {
                            (action.label)
                        }
                    }

                    a href=(details_url) class=(LINK_STYLE) { "Details" }
                }
            }
        }
    }
}

pub(super) fn notification_action_url(notification_id: &str, action_id: &str) -> String {
    format_endpoint(
        &format_endpoint(endpoints::NOTIFICATION_ACTION, notification_id),
        action_id,
    )
}

/// The priority cards and the feed, swapped as one section whenever the
/// filters change or a bulk action runs.
fn feed_section(
    counts: &PriorityCounts,
    notifications: &[&Notification],
    has_more: bool,
    query: &NotificationQuery,
) -> Markup {
    let target = format!("#{TABLE_SECTION_ID}");
    let load_more_url = query_url(
        endpoints::NOTIFICATIONS_VIEW,
        &NotificationQuery {
            page: query.page.max(1) + 1,
            ..query.clone()
        },
    );

    html! {
        section id=(TABLE_SECTION_ID) class="flex flex-col gap-6"
        {
            div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4"
            {
                (kpi_card(
                    "Pending Contributions",
                    &format!("{} members", counts.pending_contributions),
                    None,
                ))
                (kpi_card("Loan Overdue Alerts", &format!("{} overdue", counts.overdue_loans), None))
                (kpi_card("New Join Requests", &counts.join_requests.to_string(), None))
                (kpi_card("AI Risk Alerts", &counts.ai_alerts.to_string(), None))
            }

            div class="space-y-3" data-feed
            {
                @for notification in notifications {
                    (notification_card(notification))
                }

                @if notifications.is_empty() {
                    p class="text-center text-sm text-gray-500 dark:text-gray-400"
                    {
                        "No notifications."
                    }
                }
            }

            @if has_more {
                div class="flex justify-center"
                {
                    a
                        href=(load_more_url)
                        hx-get=(load_more_url)
                        hx-target=(target)
                        hx-select=(target)
                        hx-swap="outerHTML"
                        hx-push-url="true"
                        class=(BUTTON_SECONDARY_STYLE)
                    {
                        "Load more"
                    }
                }
            }
        }
    }
}

fn filter_form(query: &NotificationQuery) -> Markup {
    let target = format!("#{TABLE_SECTION_ID}");

    html! {
        form
            id=(FILTER_FORM_ID)
            action=(endpoints::NOTIFICATIONS_VIEW)
            method="get"
            role="search"
            hx-get=(endpoints::NOTIFICATIONS_VIEW)
            hx-trigger="input changed delay:300ms from:input[name='search'], change"
            hx-target=(target)
            hx-select=(target)
            hx-swap="outerHTML"
            hx-push-url="true"
            class="flex flex-wrap items-end gap-4"
        {
            (SelectFilter {
                name: "kind",
                label: "Type",
                options: &NotificationKind::ALL,
                selected: &query.kind,
            }.into_html())

            label class="flex flex-col grow text-xs font-medium text-gray-500 dark:text-gray-400"
            {
                "Search"

                input
                    type="search"
                    name="search"
                    value=(query.search)
                    placeholder="Search notifications..."
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            label class="flex items-center gap-2 text-sm"
            {
                input type="checkbox" name="system_only" value="true" checked[query.system_only];
                "Show system notifications only"
            }

            noscript
            {
                button type="submit" class="px-4 py-2 rounded bg-emerald-600 text-white" { "Apply" }
            }
        }
    }
}

fn notifications_view(
    counts: &PriorityCounts,
    notifications: &[&Notification],
    has_more: bool,
    query: &NotificationQuery,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::NOTIFICATIONS_VIEW).into_html();
    let target = format!("#{TABLE_SECTION_ID}");
    let include = format!("#{FILTER_FORM_ID}");

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            header class="flex items-start justify-between flex-wrap gap-4"
            {
                div
                {
                    h1 class="text-xl font-bold" { "Notifications" }
                    p class="text-sm text-gray-500 dark:text-gray-400"
                    {
                        "Filter and manage platform notifications."
                    }
                }

                div class="flex items-center gap-2"
                {
                    button
                        type="button"
                        hx-post=(endpoints::MARK_ALL_NOTIFICATIONS_READ)
                        hx-include=(include)
                        hx-target=(target)
                        hx-swap="outerHTML"
                        class=(BUTTON_SMALL_STYLE)
                    {
                        "Mark all as read"
                    }

                    button
                        type="button"
                        hx-post=(endpoints::CLEAR_NOTIFICATIONS)
                        hx-include=(include)
                        hx-target=(target)
                        hx-swap="outerHTML"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Clear"
                    }
                }
            }

            (filter_form(query))

            (feed_section(counts, notifications, has_more, query))
        }
    };

    base("Notifications", &[], &content)
}

/// Renders the notification feed for the filters in `query`.
pub async fn get_notifications_page(
    State(state): State<NotificationState>,
    Query(query): Query<NotificationQuery>,
) -> Result<Response, Error> {
    let mut store = state
        .store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let counts = PriorityCounts::new(store.notifications.list());
    let (notifications, has_more) = feed(&mut store.notifications, &query);

    Ok(notifications_view(&counts, &notifications, has_more, &query).into_response())
}

/// Marks every notification as read and responds with the updated feed.
pub async fn mark_all_notifications_read_endpoint(
    State(state): State<NotificationState>,
    Form(query): Form<NotificationQuery>,
) -> Response {
    bulk_update(state, &query, "Marked all as read", |notifications| {
        notifications.apply_to_all(&MarkRead)
    })
}

/// Removes every notification and responds with the empty feed.
pub async fn clear_notifications_endpoint(
    State(state): State<NotificationState>,
    Form(query): Form<NotificationQuery>,
) -> Response {
    bulk_update(state, &query, "Cleared notifications", Repository::clear)
}

fn bulk_update(
    state: NotificationState,
    query: &NotificationQuery,
    message: &str,
    update: impl FnOnce(&mut Repository<Notification>),
) -> Response {
    let mut store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    update(&mut store.notifications);

    let counts = PriorityCounts::new(store.notifications.list());
    let (notifications, has_more) = feed(&mut store.notifications, query);
    let alert = Alert::SuccessSimple {
        message: message.to_owned(),
    };

    html! {
        (feed_section(&counts, &notifications, has_more, query))
        (alert.into_html())
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Form,
        extract::{Query, State},
    };
    use scraper::{Html, Selector};

    use crate::{
        notification::core::{Notification, NotificationStatus, sample_notifications},
        query::Selection,
        repository::Repository,
        store::ChamaStore,
        test_utils::{assert_status_ok, assert_valid_html, parse_html_document, parse_html_fragment},
    };

    use super::{
        NotificationQuery, NotificationState, clear_notifications_endpoint, feed,
        get_notifications_page, mark_all_notifications_read_endpoint,
    };

    fn state() -> NotificationState {
        NotificationState {
            store: Arc::new(Mutex::new(ChamaStore::with_sample_data())),
        }
    }

    fn ids(notifications: &[&Notification]) -> Vec<String> {
        notifications
            .iter()
            .map(|notification| notification.id.clone())
            .collect()
    }

    fn card_ids(html: &Html) -> Vec<String> {
        html.select(&Selector::parse("article[data-notification-id]").unwrap())
            .map(|card| {
                card.value()
                    .attr("data-notification-id")
                    .unwrap_or_default()
                    .to_owned()
            })
            .collect()
    }

    #[test]
    fn kind_filter_selects_one_kind() {
        let mut notifications = Repository::new(sample_notifications());
        let query = NotificationQuery {
            kind: Selection::only("Loan"),
            ..Default::default()
        };

        let (got, has_more) = feed(&mut notifications, &query);

        assert_eq!(ids(&got), vec!["n2", "n3"]);
        assert!(!has_more);
    }

    #[test]
    fn system_only_overrides_kind_filter() {
        let mut notifications = Repository::new(sample_notifications());
        let query = NotificationQuery {
            kind: Selection::only("Loan"),
            system_only: true,
            ..Default::default()
        };

        let (got, _) = feed(&mut notifications, &query);

        assert_eq!(ids(&got), vec!["n6"]);
    }

    #[test]
    fn search_spans_title_and_message() {
        let mut notifications = Repository::new(sample_notifications());
        let query = NotificationQuery {
            search: "request mary".to_owned(),
            ..Default::default()
        };

        let (got, _) = feed(&mut notifications, &query);

        assert_eq!(ids(&got), vec!["n2"]);
    }

    #[test]
    fn pages_hold_ten_notifications() {
        let many = (0..25)
            .map(|index| Notification {
                id: format!("x{index}"),
                ..sample_notifications()[0].clone()
            })
            .collect();
        let mut notifications = Repository::new(many);

        let (first, has_more) = feed(&mut notifications, &NotificationQuery::default());
        assert_eq!(first.len(), 10);
        assert!(has_more);

        let third_page = NotificationQuery {
            page: 3,
            ..Default::default()
        };
        let (all, has_more) = feed(&mut notifications, &third_page);
        assert_eq!(all.len(), 25);
        assert!(!has_more);
    }

    #[tokio::test]
    async fn page_shows_feed_and_counts() {
        let response = get_notifications_page(State(state()), Query(NotificationQuery::default()))
            .await
            .expect("could not render notifications page");

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(card_ids(&html), vec!["n1", "n2", "n3", "n4", "n5", "n6"]);
        assert!(
            html.select(&Selector::parse("a[hx-get*='page=2']").unwrap())
                .next()
                .is_none(),
            "six notifications fit on one page"
        );
    }

    #[tokio::test]
    async fn mark_all_read_updates_every_notification() {
        let state = state();

        let response =
            mark_all_notifications_read_endpoint(State(state.clone()), Form(NotificationQuery::default()))
                .await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        let statuses: Vec<&str> = html
            .select(&Selector::parse("article[data-status]").unwrap())
            .map(|card| card.value().attr("data-status").unwrap_or_default())
            .collect();
        assert!(statuses.iter().all(|status| *status == "Read"), "got {statuses:?}");
        assert!(
            state
                .store
                .lock()
                .unwrap()
                .notifications
                .list()
                .iter()
                .all(|notification| notification.status == NotificationStatus::Read)
        );
    }

    #[tokio::test]
    async fn clear_empties_feed() {
        let state = state();

        let response =
            clear_notifications_endpoint(State(state.clone()), Form(NotificationQuery::default()))
                .await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert!(card_ids(&html).is_empty());
        assert!(state.store.lock().unwrap().notifications.is_empty());
    }
}
