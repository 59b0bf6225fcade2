//! The row actions of the loans table.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    Error,
    alert::Alert,
    html::format_currency,
    loan::{
        core::{LoanId, LoanStatus, RecordPayment},
        loans_page::{LoanState, loan_row},
    },
};

/// Records one instalment against a loan and responds with the updated row and an alert.
///
/// Unknown loans are ignored with `204 No Content`.
pub async fn record_loan_payment_endpoint(
    State(state): State<LoanState>,
    Path(loan_id): Path<LoanId>,
) -> Response {
    let mut store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    if !store.loans.apply_mutation(&loan_id, &RecordPayment) {
        return StatusCode::NO_CONTENT.into_response();
    }

    let Some(loan) = store.loans.get(&loan_id) else {
        return StatusCode::NO_CONTENT.into_response();
    };

    let alert = if loan.status == LoanStatus::Completed {
        Alert::Success {
            message: "Loan repaid".to_owned(),
            details: format!("{} has paid off their loan.", loan.borrower),
        }
    } else {
        Alert::Success {
            message: "Payment recorded".to_owned(),
            details: format!(
                "{} has {} left to pay.",
                loan.borrower,
                format_currency(loan.balance)
            ),
        }
    };

    html! {
        (loan_row(loan))
        (alert.into_html())
    }
    .into_response()
}

/// Acknowledges a repayment reminder. No reminder is actually sent.
pub async fn remind_loan_endpoint(
    State(state): State<LoanState>,
    Path(loan_id): Path<LoanId>,
) -> Response {
    let store = match state.store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    match store.loans.get(&loan_id) {
        Some(loan) => Alert::SuccessSimple {
            message: format!("Reminder sent to {}", loan.borrower),
        }
        .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
