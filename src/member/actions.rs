//! The row actions of the members table.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    alert::Alert,
    member::{
        core::{MemberId, RemoveMember},
        members_page::MemberState,
    },
};

/// A route handler for removing a member, responds with an alert.
///
/// Unknown members are ignored with `204 No Content`, which also stops HTMX
/// from removing the row.
pub async fn delete_member_endpoint(
    State(state): State<MemberState>,
    Path(member_id): Path<MemberId>,
) -> Response {
    let mut store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    let Some(name) = store
        .members
        .get(&member_id)
        .map(|member| member.name.clone())
    else {
        return StatusCode::NO_CONTENT.into_response();
    };

    store.members.apply_mutation(&member_id, &RemoveMember);
    tracing::info!("removed member {member_id}");

    // The status code has to be 200 OK or HTMX will not delete the table row.
    Alert::SuccessSimple {
        message: format!("Removed {name} from the chama"),
    }
    .into_response()
}

/// Acknowledges a reminder to a member. No reminder is actually sent.
pub async fn remind_member_endpoint(
    State(state): State<MemberState>,
    Path(member_id): Path<MemberId>,
) -> Response {
    let store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    match store.members.get(&member_id) {
        Some(member) => Alert::SuccessSimple {
            message: format!("Reminder sent to {}", member.name),
        }
        .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
