//! The row actions of the contributions table.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    Error,
    alert::Alert,
    contribution::{
        contributions_page::{ContributionState, contribution_row},
        core::{ContributionId, MarkPaid},
    },
    timezone::local_today,
};

/// Marks a contribution as paid today and responds with the updated row and an alert.
///
/// Unknown contributions are ignored with `204 No Content` so HTMX leaves the page as is.
pub async fn mark_contribution_paid_endpoint(
    State(state): State<ContributionState>,
    Path(contribution_id): Path<ContributionId>,
) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let mut store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    if !store
        .contributions
        .apply_mutation(&contribution_id, &MarkPaid { today })
    {
        return StatusCode::NO_CONTENT.into_response();
    }

    let Some(contribution) = store.contributions.get(&contribution_id) else {
        return StatusCode::NO_CONTENT.into_response();
    };

    let alert = Alert::SuccessSimple {
        message: format!("Marked {}'s contribution as paid", contribution.member),
    };

    html! {
        (contribution_row(contribution))
        (alert.into_html())
    }
    .into_response()
}

/// Acknowledges a payment reminder. No reminder is actually sent.
pub async fn remind_contribution_endpoint(
    State(state): State<ContributionState>,
    Path(contribution_id): Path<ContributionId>,
) -> Response {
    let store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    match store.contributions.get(&contribution_id) {
        Some(contribution) => {
            tracing::info!("reminder requested for contribution {contribution_id}");

            Alert::SuccessSimple {
                message: format!("Reminder sent to {}", contribution.member),
            }
            .into_response()
        }
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use scraper::Selector;

    use crate::{
        contribution::{ContributionState, ContributionStatus},
        store::ChamaStore,
        test_utils::{assert_status_ok, parse_html_fragment, parse_table_row_fragment},
    };

    use super::{mark_contribution_paid_endpoint, remind_contribution_endpoint};

    fn state() -> ContributionState {
        ContributionState {
            store: Arc::new(Mutex::new(ChamaStore::with_sample_data())),
            local_timezone: "Africa/Nairobi".to_owned(),
        }
    }

    #[tokio::test]
    async fn mark_paid_updates_store_and_returns_row() {
        let state = state();

        let response = mark_contribution_paid_endpoint(State(state.clone()), Path(2)).await;

        assert_status_ok(&response);
        let html = parse_table_row_fragment(response).await;
        let row = html
            .select(&Selector::parse("tr[data-contribution-id='2']").unwrap())
            .next()
            .expect("no updated row");
        assert!(row.text().collect::<String>().contains("paid"));
        assert!(
            html.select(&Selector::parse("[data-alert='success']").unwrap())
                .next()
                .is_some()
        );

        let store = state.store.lock().unwrap();
        let mary = store.contributions.get(&2).unwrap();
        assert_eq!(mary.status, ContributionStatus::Paid);
        assert_eq!(mary.balance, 0.0);
        assert!(mary.date_paid.is_some());
    }

    #[tokio::test]
    async fn mark_paid_ignores_unknown_contribution() {
        let state = state();

        let response = mark_contribution_paid_endpoint(State(state.clone()), Path(99)).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(state.store.lock().unwrap().contributions.version(), 0);
    }

    #[tokio::test]
    async fn remind_names_member() {
        let response = remind_contribution_endpoint(State(state()), Path(4)).await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Reminder sent to Grace Achieng"), "got {text}");
    }

    #[tokio::test]
    async fn remind_ignores_unknown_contribution() {
        let response = remind_contribution_endpoint(State(state()), Path(99)).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
