//! Displays the contribution totals and the searchable contributions table.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    contribution::core::{
        Contribution, ContributionField, ContributionStatus, ContributionTotals,
        contribution_share,
    },
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_SMALL_STYLE, CARD_STYLE, EMPTY_CELL, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, Tone, base, format_currency, kpi_card, status_badge,
    },
    navigation::NavBar,
    query::{CategoryFilter, Selection, Sort, SortDirection, TableQuery},
    store::ChamaStore,
    table::{
        SelectFilter, TABLE_SECTION_ID, current_sort, empty_row, filter_form, query_url,
        sort_parameters, sortable_header,
    },
    timezone::local_today,
};

/// The state needed for the contributions page and its row actions.
#[derive(Debug, Clone)]
pub struct ContributionState {
    pub store: Arc<Mutex<ChamaStore>>,
    /// The canonical timezone used to decide what "today" and "this month" are.
    pub local_timezone: String,
}

impl FromRef<AppState> for ContributionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters of the contributions page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributionQuery {
    pub search: String,
    pub status: Selection,
    pub sort: Option<ContributionField>,
    pub direction: SortDirection,
}

impl ContributionQuery {
    fn current_sort(&self) -> Option<Sort<ContributionField>> {
        current_sort(self.sort, self.direction)
    }

    pub fn to_table_query(&self) -> TableQuery<ContributionField> {
        TableQuery::new(&self.search)
            .with_filter(CategoryFilter::new(
                ContributionField::Status,
                self.status.clone(),
            ))
            .with_sort(self.current_sort())
    }

    /// The page URL after clicking the header of `field`.
    fn sort_url(&self, field: ContributionField) -> String {
        let sort = Sort::toggle(self.current_sort(), field);

        query_url(
            endpoints::CONTRIBUTIONS_VIEW,
            &Self {
                sort: Some(sort.field),
                direction: sort.direction,
                ..self.clone()
            },
        )
    }
}

fn status_tone(status: ContributionStatus) -> Tone {
    match status {
        ContributionStatus::Paid => Tone::Positive,
        ContributionStatus::Pending => Tone::Warning,
        ContributionStatus::Overdue => Tone::Negative,
    }
}

/// A row of the contributions table.
///
/// Also returned on its own by the row actions so HTMX can swap it in place.
pub(super) fn contribution_row(contribution: &Contribution) -> Markup {
    let mark_paid_url = format_endpoint(endpoints::MARK_CONTRIBUTION_PAID, contribution.id);
    let remind_url = format_endpoint(endpoints::REMIND_CONTRIBUTION, contribution.id);
    let is_paid = contribution.status == ContributionStatus::Paid;

    html! {
        tr class=(TABLE_ROW_STYLE) data-contribution-id=(contribution.id)
        {
            th
                scope="row"
                class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
            {
                (contribution.member)
            }

            td class="px-6 py-4 text-right tabular-nums" { (format_currency(contribution.amount)) }

            td class=(TABLE_CELL_STYLE) { (contribution.cycle.as_str()) }

            td class=(TABLE_CELL_STYLE)
            {
                (status_badge(contribution.status.as_str(), status_tone(contribution.status)))
            }

            td class=(TABLE_CELL_STYLE)
            {
                @match contribution.date_paid {
                    Some(date) => {
                        time datetime=(date) { (date) }
                    }
                    None => { (EMPTY_CELL) }
                }
            }

            td class="px-6 py-4 text-right tabular-nums"
            {
                @if contribution.balance == 0.0 {
                    (EMPTY_CELL)
                } @else {
                    (format_currency(contribution.balance))
                }
            }

            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-2"
                {
                    @if !is_paid {
                        button
                            type="button"
                            hx-post=(mark_paid_url)
                            hx-target="closest tr"
                            hx-swap="outerHTML"
                            class=(BUTTON_SMALL_STYLE)
                        {
                            "Mark paid"
                        }
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

fn contributions_view(
    totals: &ContributionTotals,
    contributions: &[&Contribution],
    shares: &[(String, f64)],
    query: &ContributionQuery,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::CONTRIBUTIONS_VIEW).into_html();
    let current_sort = query.current_sort();
    let header = |label: &str, field: ContributionField| {
        sortable_header(label, field, current_sort, &query.sort_url(field))
    };

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            header class="flex justify-between flex-wrap items-end"
            {
                h1 class="text-xl font-bold" { "Contributions" }
            }

            section class="grid grid-cols-2 lg:grid-cols-4 gap-4"
            {
                (kpi_card("This month", &format_currency(totals.this_month), None))
                (kpi_card("All time", &format_currency(totals.all_time), None))
                (kpi_card("Pending", &totals.pending.to_string(), Some("contributions awaiting payment")))
                (kpi_card("Overdue", &totals.overdue.to_string(), Some("contributions past due")))
            }

            (filter_form(
                endpoints::CONTRIBUTIONS_VIEW,
                &query.search,
                "Search by member",
                vec![SelectFilter {
                    name: "status",
                    label: "Status",
                    options: &ContributionStatus::ALL,
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
                            (header("Member", ContributionField::Member))
                            (header("Amount", ContributionField::Amount))
                            (header("Cycle", ContributionField::Cycle))
                            (header("Status", ContributionField::Status))
                            (header("Date paid", ContributionField::DatePaid))
                            (header("Balance", ContributionField::Balance))
                            th scope="col" class="px-6 py-3" { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for contribution in contributions {
                            (contribution_row(contribution))
                        }

                        @if contributions.is_empty() {
                            (empty_row(7, "No contributions match your search."))
                        }
                    }
                }
            }

            section class=(CARD_STYLE)
            {
                h2 class="text-lg font-semibold mb-2" { "Contribution share" }

                ul class="space-y-1 text-sm" data-contribution-share
                {
                    @for (member, amount) in shares {
                        li class="flex justify-between"
                        {
                            span { (member) }
                            span class="tabular-nums" { (format_currency(*amount)) }
                        }
                    }
                }
            }
        }
    };

    base("Contributions", &[], &content)
}

/// Renders the contributions page for the search, filter and sort in `query`.
pub async fn get_contributions_page(
    State(state): State<ContributionState>,
    Query(query): Query<ContributionQuery>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    let mut store = state
        .store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let totals = ContributionTotals::new(store.contributions.list(), today);
    let shares: Vec<(String, f64)> = contribution_share(store.contributions.list())
        .into_iter()
        .map(|(member, amount)| (member.to_owned(), amount))
        .collect();
    let contributions = store.contributions.view(&query.to_table_query());

    Ok(contributions_view(&totals, &contributions, &shares, &query).into_response())
}
