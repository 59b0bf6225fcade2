//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    acknowledge::acknowledge_endpoint,
    auth::{
        auth_guard, get_sign_in_page, get_sign_out, get_sign_up_page, post_sign_in, post_sign_up,
        sign_up_endpoint, token_endpoint,
    },
    contribution::{
        get_contributions_page, mark_contribution_paid_endpoint, remind_contribution_endpoint,
    },
    dashboard::get_dashboard_page,
    endpoints,
    insights::get_insights_page,
    internal_server_error::get_internal_server_error_page,
    landing::get_landing_page,
    loan::{get_loan_page, get_loans_page, record_loan_payment_endpoint, remind_loan_endpoint},
    member::{delete_member_endpoint, get_members_page, remind_member_endpoint},
    not_found::get_404_not_found,
    notification::{
        clear_notifications_endpoint, get_notification_page, get_notifications_page,
        mark_all_notifications_read_endpoint, notification_action_endpoint,
    },
    profit_sharing::get_profit_sharing_page,
    reports::get_reports_page,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::ROOT, get(get_landing_page))
        .route(endpoints::SIGN_IN_VIEW, get(get_sign_in_page))
        .route(endpoints::SIGN_UP_VIEW, get(get_sign_up_page))
        .route(endpoints::SIGN_IN_FORM, post(post_sign_in))
        .route(endpoints::SIGN_UP_FORM, post(post_sign_up))
        .route(endpoints::TOKEN_API, post(token_endpoint))
        .route(endpoints::SIGN_UP_API, post(sign_up_endpoint))
        .route(endpoints::SIGN_OUT, get(get_sign_out))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    // The guard answers HTMX requests with HX-Redirect, so the API routes can share it.
    let protected_routes = Router::new()
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::CONTRIBUTIONS_VIEW, get(get_contributions_page))
        .route(endpoints::LOANS_VIEW, get(get_loans_page))
        .route(endpoints::LOAN_VIEW, get(get_loan_page))
        .route(endpoints::MEMBERS_VIEW, get(get_members_page))
        .route(endpoints::NOTIFICATIONS_VIEW, get(get_notifications_page))
        .route(endpoints::NOTIFICATION_VIEW, get(get_notification_page))
        .route(endpoints::REPORTS_VIEW, get(get_reports_page))
        .route(endpoints::PROFIT_SHARING_VIEW, get(get_profit_sharing_page))
        .route(endpoints::INSIGHTS_VIEW, get(get_insights_page))
        .route(
            endpoints::MARK_CONTRIBUTION_PAID,
            post(mark_contribution_paid_endpoint),
        )
        .route(
            endpoints::REMIND_CONTRIBUTION,
            post(remind_contribution_endpoint),
        )
        .route(
            endpoints::RECORD_LOAN_PAYMENT,
            post(record_loan_payment_endpoint),
        )
        .route(endpoints::REMIND_LOAN, post(remind_loan_endpoint))
        .route(endpoints::DELETE_MEMBER, delete(delete_member_endpoint))
        .route(endpoints::REMIND_MEMBER, post(remind_member_endpoint))
        .route(
            endpoints::NOTIFICATION_ACTION,
            post(notification_action_endpoint),
        )
        .route(
            endpoints::MARK_ALL_NOTIFICATIONS_READ,
            post(mark_all_notifications_read_endpoint),
        )
        .route(
            endpoints::CLEAR_NOTIFICATIONS,
            post(clear_notifications_endpoint),
        )
        .route(endpoints::ACKNOWLEDGE, post(acknowledge_endpoint))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
