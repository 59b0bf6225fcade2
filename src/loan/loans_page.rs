//! Displays the loan totals and the searchable loans table.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_SMALL_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, Tone, base, format_currency, kpi_card, status_badge,
    },
    loan::core::{Loan, LoanField, LoanStatus, LoanTotals},
    navigation::NavBar,
    query::{CategoryFilter, Selection, Sort, SortDirection, TableQuery},
    store::ChamaStore,
    table::{
        SelectFilter, TABLE_SECTION_ID, current_sort, empty_row, filter_form, query_url,
        sort_parameters, sortable_header,
    },
};

/// The state needed for the loan pages and their actions.
#[derive(Debug, Clone)]
pub struct LoanState {
    pub store: Arc<Mutex<ChamaStore>>,
}

impl FromRef<AppState> for LoanState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// The query parameters of the loans page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanQuery {
    pub search: String,
    pub status: Selection,
    pub sort: Option<LoanField>,
    pub direction: SortDirection,
}

impl LoanQuery {
    fn current_sort(&self) -> Option<Sort<LoanField>> {
        current_sort(self.sort, self.direction)
    }

    pub fn to_table_query(&self) -> TableQuery<LoanField> {
        TableQuery::new(&self.search)
            .with_filter(CategoryFilter::new(LoanField::Status, self.status.clone()))
            .with_sort(self.current_sort())
    }

    fn sort_url(&self, field: LoanField) -> String {
        let sort = Sort::toggle(self.current_sort(), field);

        query_url(
            endpoints::LOANS_VIEW,
            &Self {
                sort: Some(sort.field),
                direction: sort.direction,
                ..self.clone()
            },
        )
    }
}

pub(super) fn status_tone(status: LoanStatus) -> Tone {
    match status {
        LoanStatus::Active => Tone::Neutral,
        LoanStatus::Completed => Tone::Positive,
        LoanStatus::Overdue => Tone::Negative,
    }
}

pub(super) fn progress_bar(progress: u8) -> Markup {
    html! {
        div class="flex items-center gap-2"
        {
            div
                class="w-24 h-2 rounded-full bg-gray-200 dark:bg-gray-700"
                role="progressbar"
                aria-valuemin="0"
                aria-valuemax="100"
                aria-valuenow=(progress)
            {
                div class="h-2 rounded-full bg-emerald-600" style={"width: " (progress) "%"} {}
            }

            span class="text-xs tabular-nums" { (progress) "%" }
        }
    }
}

/// A row of the loans table, also returned by the record-payment action.
pub(super) fn loan_row(loan: &Loan) -> Markup {
    let loan_url = format_endpoint(endpoints::LOAN_VIEW, loan.id);
    let record_payment_url = format_endpoint(endpoints::RECORD_LOAN_PAYMENT, loan.id);
    let remind_url = format_endpoint(endpoints::REMIND_LOAN, loan.id);

    html! {
        tr class=(TABLE_ROW_STYLE) data-loan-id=(loan.id)
        {
            th
                scope="row"
                class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
            {
                a href=(loan_url) class=(LINK_STYLE) { (loan.borrower) }
            }

            td class="px-6 py-4 text-right tabular-nums" { (format_currency(loan.amount)) }
            td class=(TABLE_CELL_STYLE) { time datetime=(loan.issued) { (loan.issued) } }
            td class=(TABLE_CELL_STYLE) { time datetime=(loan.due) { (loan.due) } }
            td class="px-6 py-4 text-right tabular-nums" { (format_currency(loan.balance)) }
            td class=(TABLE_CELL_STYLE) { (progress_bar(loan.progress)) }
            td class=(TABLE_CELL_STYLE) { (status_badge(loan.status.as_str(), status_tone(loan.status))) }

            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-2"
                {
                    @if loan.status != LoanStatus::Completed {
                        button
                            type="button"
                            hx-post=(record_payment_url)
                            hx-target="closest tr"
                            hx-swap="outerHTML"
                            class=(BUTTON_SMALL_STYLE)
                        {
                            "Record payment"
                        }

                        button
                            type="button"
                            hx-post=(remind_url)
                            hx-swap="none"
                            class=(BUTTON_SMALL_STYLE)
                        {
                            "Remind"
                        }
                    }
                }
            }
        }
    }
}

fn loans_view(totals: &LoanTotals, loans: &[&Loan], query: &LoanQuery) -> Markup {
    let nav_bar = NavBar::new(endpoints::LOANS_VIEW).into_html();
    let current_sort = query.current_sort();
    let header =
        |label: &str, field: LoanField| sortable_header(label, field, current_sort, &query.sort_url(field));

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold" { "Loans" }

            section class="grid grid-cols-2 lg:grid-cols-4 gap-4"
            {
                (kpi_card("Total issued", &format_currency(totals.total_issued), None))
                (kpi_card("Active outstanding", &format_currency(totals.active_outstanding), None))
                (kpi_card("Repaid", &format_currency(totals.repaid), Some("completed loans")))
                (kpi_card("Overdue", &format_currency(totals.overdue), Some("balance past due")))
            }

            (filter_form(
                endpoints::LOANS_VIEW,
                &query.search,
                "Search by borrower",
                vec![SelectFilter {
                    name: "status",
                    label: "Status",
                    options: &LoanStatus::ALL,
                    selected: &query.status,
                }],
                &sort_parameters(current_sort),
            ))

            section id=(TABLE_SECTION_ID) class="w-full overflow-x-auto dark:bg-gray-800"
            {
                table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            (header("Borrower", LoanField::Borrower))
                            (header("Amount", LoanField::Amount))
                            (header("Issued", LoanField::Issued))
                            (header("Due", LoanField::Due))
                            (header("Balance", LoanField::Balance))
                            (header("Progress", LoanField::Progress))
                            (header("Status", LoanField::Status))
                            th scope="col" class="px-6 py-3" { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for loan in loans {
                            (loan_row(loan))
                        }

                        @if loans.is_empty() {
                            (empty_row(8, "No loans match your search."))
                        }
                    }
                }
            }
        }
    };

    base("Loans", &[], &content)
}

/// Renders the loans page for the search, filter and sort in `query`.
pub async fn get_loans_page(
    State(state): State<LoanState>,
    Query(query): Query<LoanQuery>,
) -> Result<Response, Error> {
    let mut store = state
        .store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let totals = LoanTotals::new(store.loans.list());
    let loans = store.loans.view(&query.to_table_query());

    Ok(loans_view(&totals, &loans, &query).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use scraper::{Html, Selector};

    use crate::{
        loan::core::LoanField,
        query::{Selection, SortDirection},
        store::ChamaStore,
        test_utils::{assert_status_ok, assert_valid_html, parse_html_document},
    };

    use super::{LoanQuery, LoanState, get_loans_page};

    async fn render(query: LoanQuery) -> Html {
        let state = LoanState {
            store: Arc::new(Mutex::new(ChamaStore::with_sample_data())),
        };

        let response = get_loans_page(State(state), Query(query))
            .await
            .expect("could not render loans page");
        assert_status_ok(&response);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        html
    }

    fn loan_ids(html: &Html) -> Vec<String> {
        html.select(&Selector::parse("tbody tr[data-loan-id]").unwrap())
            .map(|row| row.value().attr("data-loan-id").unwrap_or_default().to_owned())
            .collect()
    }

    #[tokio::test]
    async fn renders_every_loan() {
        let html = render(LoanQuery::default()).await;

        assert_eq!(loan_ids(&html), vec!["1", "2", "3", "4"]);
    }

    #[tokio::test]
    async fn sorts_by_balance_descending() {
        let html = render(LoanQuery {
            sort: Some(LoanField::Balance),
            direction: SortDirection::Desc,
            ..Default::default()
        })
        .await;

        assert_eq!(loan_ids(&html), vec!["4", "1", "3", "2"]);
    }

    #[tokio::test]
    async fn filters_by_status() {
        let html = render(LoanQuery {
            status: Selection::only("overdue"),
            ..Default::default()
        })
        .await;

        assert_eq!(loan_ids(&html), vec!["3"]);
    }

    #[tokio::test]
    async fn completed_loans_have_no_actions() {
        let html = render(LoanQuery::default()).await;

        let record_buttons = html
            .select(&Selector::parse("button[hx-post$='record_payment']").unwrap())
            .count();

        assert_eq!(record_buttons, 3);
    }

    #[tokio::test]
    async fn borrower_links_to_detail_page() {
        let html = render(LoanQuery::default()).await;

        let link = html
            .select(&Selector::parse("tr[data-loan-id='3'] th a").unwrap())
            .next()
            .expect("no borrower link");

        assert_eq!(link.value().attr("href"), Some("/loans/3"));
    }
}
