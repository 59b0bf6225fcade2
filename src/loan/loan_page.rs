//! The detail page of a single loan.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_SECONDARY_STYLE, CARD_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base,
        format_currency, status_badge,
    },
    loan::{
        core::{Loan, LoanId, LoanStatus},
        loans_page::{LoanState, progress_bar, status_tone},
    },
    navigation::NavBar,
};

fn loan_view(loan: &Loan) -> Markup {
    let nav_bar = NavBar::new(endpoints::LOANS_VIEW).into_html();
    let record_payment_url = format_endpoint(endpoints::RECORD_LOAN_PAYMENT, loan.id);
    let paid = loan.amount - loan.balance;

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            a href=(endpoints::LOANS_VIEW) class=(LINK_STYLE) { "← All loans" }

            header class="flex justify-between flex-wrap items-center gap-4"
            {
                h1 class="text-xl font-bold" { "Loan for " (loan.borrower) }
                (status_badge(loan.status.as_str(), status_tone(loan.status)))
            }

            section class=(CARD_STYLE)
            {
                dl class="grid grid-cols-2 gap-4 text-sm"
                {
                    dt class="text-gray-500 dark:text-gray-400" { "Amount" }
                    dd data-field="amount" { (format_currency(loan.amount)) }

                    dt class="text-gray-500 dark:text-gray-400" { "Outstanding balance" }
                    dd data-field="balance" { (format_currency(loan.balance)) }

                    dt class="text-gray-500 dark:text-gray-400" { "Repaid so far" }
                    dd data-field="paid" { (format_currency(paid.max(0.0))) }

                    dt class="text-gray-500 dark:text-gray-400" { "Issued" }
                    dd { time datetime=(loan.issued) { (loan.issued) } }

                    dt class="text-gray-500 dark:text-gray-400" { "Due" }
                    dd { time datetime=(loan.due) { (loan.due) } }

                    dt class="text-gray-500 dark:text-gray-400" { "Progress" }
                    dd { (progress_bar(loan.progress)) }
                }
            }

            @if loan.status != LoanStatus::Completed {
                div
                {
                    button
                        type="button"
                        hx-post=(record_payment_url)
                        hx-swap="none"
                        class=(BUTTON_SECONDARY_STYLE)
                    {
                        "Record payment"
                    }
                }
            }
        }
    };

    base(&format!("Loan for {}", loan.borrower), &[], &content)
}

/// Renders the detail page for one loan, or the 404 page if there is no such loan.
pub async fn get_loan_page(
    State(state): State<LoanState>,
    Path(loan_id): Path<LoanId>,
) -> Result<Response, Error> {
    let store = state
        .store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let loan = store.loans.get(&loan_id).ok_or(Error::NotFound)?;

    Ok(loan_view(loan).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use scraper::Selector;

    use crate::{
        Error,
        html::format_currency,
        loan::loans_page::LoanState,
        store::ChamaStore,
        test_utils::{assert_status_ok, assert_valid_html, parse_html_document},
    };

    use super::get_loan_page;

    fn state() -> LoanState {
        LoanState {
            store: Arc::new(Mutex::new(ChamaStore::with_sample_data())),
        }
    }

    #[tokio::test]
    async fn shows_loan_details() {
        let response = get_loan_page(State(state()), Path(1))
            .await
            .expect("could not render loan page");

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let balance = html
            .select(&Selector::parse("dd[data-field='balance']").unwrap())
            .next()
            .expect("no balance")
            .text()
            .collect::<String>();
        assert_eq!(balance, format_currency(20000.0));
        let paid = html
            .select(&Selector::parse("dd[data-field='paid']").unwrap())
            .next()
            .expect("no repaid amount")
            .text()
            .collect::<String>();
        assert_eq!(paid, format_currency(30000.0));
    }

    #[tokio::test]
    async fn unknown_loan_is_not_found() {
        let result = get_loan_page(State(state()), Path(42)).await;

        assert_eq!(result.err(), Some(Error::NotFound));
    }
}
