//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/loans/{loan_id}', use [format_endpoint].

use std::fmt::Display;

/// The public landing page.
pub const ROOT: &str = "/";
/// The overview page for signed in users.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for tracking member contributions.
pub const CONTRIBUTIONS_VIEW: &str = "/contributions";
/// The page for tracking loans.
pub const LOANS_VIEW: &str = "/loans";
/// The page for a single loan.
pub const LOAN_VIEW: &str = "/loans/{loan_id}";
/// The page for managing members.
pub const MEMBERS_VIEW: &str = "/members";
/// The notification centre.
pub const NOTIFICATIONS_VIEW: &str = "/notifications";
/// The detail view of a single notification.
pub const NOTIFICATION_VIEW: &str = "/notifications/{notification_id}";
/// The report centre.
pub const REPORTS_VIEW: &str = "/reports";
/// The profit sharing page.
pub const PROFIT_SHARING_VIEW: &str = "/profit_sharing";
/// The AI insights page.
pub const INSIGHTS_VIEW: &str = "/insights";
/// The route for getting the sign-in page.
pub const SIGN_IN_VIEW: &str = "/sign_in";
/// The route for getting the sign-up page.
pub const SIGN_UP_VIEW: &str = "/sign_up";
/// The route for the client to sign out the current user.
pub const SIGN_OUT: &str = "/sign_out";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for exchanging credentials for a token pair.
pub const TOKEN_API: &str = "/api/token/";
/// The route for creating an account.
pub const SIGN_UP_API: &str = "/api/auth/signup/";
/// The route for submitting the sign-in form.
pub const SIGN_IN_FORM: &str = "/api/sign_in";
/// The route for submitting the sign-up form.
pub const SIGN_UP_FORM: &str = "/api/sign_up";
/// The route to mark a contribution as paid.
pub const MARK_CONTRIBUTION_PAID: &str = "/api/contributions/{contribution_id}/mark_paid";
/// The route to remind a member about a contribution.
pub const REMIND_CONTRIBUTION: &str = "/api/contributions/{contribution_id}/remind";
/// The route to record a loan repayment.
pub const RECORD_LOAN_PAYMENT: &str = "/api/loans/{loan_id}/record_payment";
/// The route to remind a borrower about a loan.
pub const REMIND_LOAN: &str = "/api/loans/{loan_id}/remind";
/// The route to remove a member.
pub const DELETE_MEMBER: &str = "/api/members/{member_id}";
/// The route to remind a member.
pub const REMIND_MEMBER: &str = "/api/members/{member_id}/remind";
/// The route to trigger one of a notification's actions.
pub const NOTIFICATION_ACTION: &str = "/api/notifications/{notification_id}/actions/{action_id}";
/// The route to mark every notification as read.
pub const MARK_ALL_NOTIFICATIONS_READ: &str = "/api/notifications/mark_all_read";
/// The route to clear every notification.
pub const CLEAR_NOTIFICATIONS: &str = "/api/notifications/clear";
/// The route for actions that only show an acknowledgment.
pub const ACKNOWLEDGE: &str = "/api/acknowledge/{action}";

/// Replace the first parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/loans/{loan_id}', '{loan_id}' is the parameter.
///
/// Paths with several parameters are filled in by calling this function once
/// per parameter, left to right.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: impl Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |end| param_start + end + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
