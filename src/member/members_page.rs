//! Displays the member totals and the searchable members table.

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
        BUTTON_DELETE_STYLE, BUTTON_SMALL_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, Tone, acknowledge_button, base, format_currency, kpi_card,
        status_badge,
    },
    member::core::{Member, MemberField, MemberStatus, MemberTotals, Role},
    navigation::NavBar,
    query::{CategoryFilter, Selection, Sort, SortDirection, TableQuery},
    store::ChamaStore,
    table::{
        SelectFilter, TABLE_SECTION_ID, current_sort, empty_row, filter_form, query_url,
        sort_parameters, sortable_header,
    },
};

/// The state needed for the members page and its row actions.
#[derive(Debug, Clone)]
pub struct MemberState {
    pub store: Arc<Mutex<ChamaStore>>,
}

impl FromRef<AppState> for MemberState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// The query parameters of the members page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberQuery {
    pub search: String,
    pub role: Selection,
    pub status: Selection,
    pub sort: Option<MemberField>,
    pub direction: SortDirection,
}

impl MemberQuery {
    fn current_sort(&self) -> Option<Sort<MemberField>> {
        current_sort(self.sort, self.direction)
    }

    pub fn to_table_query(&self) -> TableQuery<MemberField> {
        TableQuery::new(&self.search)
            .with_filter(CategoryFilter::new(MemberField::Role, self.role.clone()))
            .with_filter(CategoryFilter::new(MemberField::Status, self.status.clone()))
            .with_sort(self.current_sort())
    }

    fn sort_url(&self, field: MemberField) -> String {
        let sort = Sort::toggle(self.current_sort(), field);

        query_url(
            endpoints::MEMBERS_VIEW,
            &Self {
                sort: Some(sort.field),
                direction: sort.direction,
                ..self.clone()
            },
        )
    }
}

fn status_tone(status: MemberStatus) -> Tone {
    match status {
        MemberStatus::Active => Tone::Positive,
        MemberStatus::Inactive => Tone::Neutral,
        MemberStatus::Invited => Tone::Warning,
    }
}

fn member_row(member: &Member) -> Markup {
    let delete_url = format_endpoint(endpoints::DELETE_MEMBER, member.id);
    let remind_url = format_endpoint(endpoints::REMIND_MEMBER, member.id);
    let confirm_message = format!(
        "Are you sure you want to remove {} from the chama? This cannot be undone.",
        member.name
    );

    html! {
        tr class=(TABLE_ROW_STYLE) data-member-id=(member.id)
        {
            th
                scope="row"
                class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
            {
                (member.name)
            }

            td class=(TABLE_CELL_STYLE) { (member.phone) }
            td class=(TABLE_CELL_STYLE) { (member.role.as_str()) }
            td class="px-6 py-4 text-right tabular-nums" { (format_currency(member.contributions_total)) }
            td class="px-6 py-4 text-right tabular-nums" { (format_currency(member.loans_total)) }
            td class=(TABLE_CELL_STYLE) { (status_badge(member.status.as_str(), status_tone(member.status))) }
            td class=(TABLE_CELL_STYLE) { time datetime=(member.join_date) { (member.join_date) } }
            td class=(TABLE_CELL_STYLE) { (member.cycle.as_str()) }

            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-2"
                {
                    button
                        type="button"
                        hx-post=(remind_url)
                        hx-swap="none"
                        class=(BUTTON_SMALL_STYLE)
                    {
                        "Remind"
                    }

                    button
                        type="button"
                        hx-delete=(delete_url)
                        hx-confirm=(confirm_message)
                        hx-target="closest tr"
                        hx-swap="delete"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Remove"
                    }
                }
            }
        }
    }
}

fn members_view(totals: &MemberTotals, members: &[&Member], query: &MemberQuery) -> Markup {
    let nav_bar = NavBar::new(endpoints::MEMBERS_VIEW).into_html();
    let current_sort = query.current_sort();
    let header = |label: &str, field: MemberField| {
        sortable_header(label, field, current_sort, &query.sort_url(field))
    };

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            header class="flex justify-between flex-wrap items-end"
            {
                h1 class="text-xl font-bold" { "Members" }

                (acknowledge_button("invite_member", "Invite member", BUTTON_SMALL_STYLE))
            }

            section class="grid grid-cols-2 lg:grid-cols-4 gap-4"
            {
                (kpi_card("Total members", &totals.total.to_string(), None))
                (kpi_card("Active", &totals.active.to_string(), None))
                (kpi_card("Invited", &totals.invited.to_string(), Some("awaiting sign-up")))
                (kpi_card("In loan cycle", &totals.in_loan_cycle.to_string(), Some("members with loans")))
            }

            (filter_form(
                endpoints::MEMBERS_VIEW,
                &query.search,
                "Search by name or phone",
                vec![
                    SelectFilter {
                        name: "role",
                        label: "Role",
                        options: &Role::ALL,
                        selected: &query.role,
                    },
                    SelectFilter {
                        name: "status",
                        label: "Status",
                        options: &MemberStatus::ALL,
                        selected: &query.status,
                    },
                ],
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
                            (header("Name", MemberField::Name))
                            (header("Phone", MemberField::Phone))
                            (header("Role", MemberField::Role))
                            (header("Contributions", MemberField::ContributionsTotal))
                            (header("Loans", MemberField::LoansTotal))
                            (header("Status", MemberField::Status))
                            (header("Joined", MemberField::JoinDate))
                            th scope="col" class="px-6 py-3" { "Cycle" }
                            th scope="col" class="px-6 py-3" { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for member in members {
                            (member_row(member))
                        }

                        @if members.is_empty() {
                            (empty_row(9, "No members match your search."))
                        }
                    }
                }
            }
        }
    };

    base("Members", &[], &content)
}

/// Renders the members page for the search, filters and sort in `query`.
pub async fn get_members_page(
    State(state): State<MemberState>,
    Query(query): Query<MemberQuery>,
) -> Result<Response, Error> {
    let mut store = state
        .store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let totals = MemberTotals::new(store.members.list());
    let members = store.members.view(&query.to_table_query());

    Ok(members_view(&totals, &members, &query).into_response())
}
