//! The overview page shown after signing in.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    contribution::ContributionTotals,
    endpoints,
    html::{
        BUTTON_SECONDARY_STYLE, CARD_STYLE, PAGE_CONTAINER_STYLE, Tone, acknowledge_button, base,
        format_currency, kpi_card, link, status_badge,
    },
    loan::LoanTotals,
    member::MemberTotals,
    navigation::NavBar,
    notification::NotificationStatus,
    query::count_where,
    store::ChamaStore,
    timezone::local_today,
};

/// The state needed for the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub store: Arc<Mutex<ChamaStore>>,
    /// The local timezone as a canonical timezone name, e.g. "Africa/Nairobi".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The headline figures, each taken from one of the store's collections.
#[derive(Debug, Clone, PartialEq)]
struct DashboardSummary {
    contributions: ContributionTotals,
    loans: LoanTotals,
    members: MemberTotals,
    unread_notifications: usize,
}

impl DashboardSummary {
    fn new(store: &ChamaStore, today: time::Date) -> Self {
        Self {
            contributions: ContributionTotals::new(store.contributions.list(), today),
            loans: LoanTotals::new(store.loans.list()),
            members: MemberTotals::new(store.members.list()),
            unread_notifications: count_where(store.notifications.list(), |notification| {
                notification.status != NotificationStatus::Read
            }),
        }
    }
}

struct Activity {
    member: &'static str,
    action: &'static str,
    amount: f64,
    completed: bool,
    time: &'static str,
}

const RECENT_ACTIVITY: [Activity; 4] = [
    Activity {
        member: "John Kamau",
        action: "Contribution",
        amount: 5_000.0,
        completed: true,
        time: "2 hours ago",
    },
    Activity {
        member: "Mary Wanjiku",
        action: "Loan Request",
        amount: 50_000.0,
        completed: false,
        time: "5 hours ago",
    },
    Activity {
        member: "Peter Omondi",
        action: "Loan Repayment",
        amount: 10_000.0,
        completed: true,
        time: "1 day ago",
    },
    Activity {
        member: "Grace Achieng",
        action: "Contribution",
        amount: 3_000.0,
        completed: false,
        time: "1 day ago",
    },
];

fn recent_activity_view() -> Markup {
    html! {
        section class=(CARD_STYLE) id="recent-activity"
        {
            h2 class="font-semibold mb-3" { "Recent Activity" }

            ul class="flex flex-col divide-y divide-gray-200 dark:divide-gray-700"
            {
                @for activity in &RECENT_ACTIVITY {
                    @let (status, tone) = if activity.completed {
                        ("completed", Tone::Positive)
                    } else {
                        ("pending", Tone::Warning)
                    };

                    li class="flex justify-between items-center py-3"
                    {
                        div
                        {
                            p class="font-medium" { (activity.member) }
                            p class="text-xs text-gray-500" { (activity.action) " · " (activity.time) }
                        }

                        div class="flex items-center gap-3"
                        {
                            span class="text-sm font-semibold tabular-nums" { (format_currency(activity.amount)) }
                            (status_badge(status, tone))
                        }
                    }
                }
            }
        }
    }
}

fn dashboard_view(summary: &DashboardSummary) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let active_members = format!("{} of {} members", summary.members.active, summary.members.total);
    let pending = format!(
        "{} pending, {} overdue",
        summary.contributions.pending, summary.contributions.overdue
    );

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            header class="flex justify-between flex-wrap items-end gap-2"
            {
                h1 class="text-xl font-bold" { "Dashboard" }
                (acknowledge_button("send_reminders", "Send reminders", BUTTON_SECONDARY_STYLE))
            }

            section class="grid grid-cols-2 lg:grid-cols-4 gap-4"
            {
                (kpi_card("Total contributions", &format_currency(summary.contributions.all_time), Some(&pending)))
                (kpi_card("Outstanding loans", &format_currency(summary.loans.active_outstanding), Some(&format!("{} overdue", format_currency(summary.loans.overdue)))))
                (kpi_card("Active members", &summary.members.active.to_string(), Some(&active_members)))
                (kpi_card("Unread notifications", &summary.unread_notifications.to_string(), None))
            }

            div class="grid grid-cols-1 lg:grid-cols-3 gap-6"
            {
                div class="lg:col-span-2" { (recent_activity_view()) }

                section class=(CARD_STYLE)
                {
                    h2 class="font-semibold mb-3" { "Quick Actions" }

                    ul class="flex flex-col gap-2 text-sm"
                    {
                        li { (link(endpoints::CONTRIBUTIONS_VIEW, "Record a contribution")) }
                        li { (link(endpoints::LOANS_VIEW, "Review loans")) }
                        li { (link(endpoints::MEMBERS_VIEW, "Manage members")) }
                        li { (link(endpoints::INSIGHTS_VIEW, "See AI insights")) }
                    }
                }
            }
        }
    };

    base("Dashboard", &[], &content)
}

/// Display a page with an overview of the chama.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    let store = state
        .store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let summary = DashboardSummary::new(&store, today);

    Ok(dashboard_view(&summary).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use scraper::Selector;

    use crate::{
        Error,
        html::format_currency,
        store::ChamaStore,
        test_utils::{assert_status_ok, assert_valid_html, parse_html_document},
    };

    use super::{DashboardState, get_dashboard_page};

    fn state(local_timezone: &str) -> DashboardState {
        DashboardState {
            store: Arc::new(Mutex::new(ChamaStore::with_sample_data())),
            local_timezone: local_timezone.to_owned(),
        }
    }

    #[tokio::test]
    async fn kpis_come_from_the_store() {
        let response = get_dashboard_page(State(state("Africa/Nairobi")))
            .await
            .expect("could not render dashboard");

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let kpi = |title: &str| {
            let selector = format!("[data-kpi='{title}'] [data-kpi-value]");
            html.select(&Selector::parse(&selector).unwrap())
                .next()
                .unwrap_or_else(|| panic!("no KPI card titled {title}"))
                .text()
                .collect::<String>()
        };

        assert_eq!(kpi("Total contributions"), format_currency(68_000.0));
        assert_eq!(kpi("Outstanding loans"), format_currency(52_000.0));
        assert_eq!(kpi("Active members"), "2");

        let activity = html
            .select(&Selector::parse("#recent-activity li").unwrap())
            .count();
        assert_eq!(activity, 4);
    }

    #[tokio::test]
    async fn invalid_timezone_is_an_error() {
        let result = get_dashboard_page(State(state("Middle/Nowhere"))).await;

        assert_eq!(result.err(), Some(Error::InvalidTimezoneError("Middle/Nowhere".to_owned())));
    }
}
