//! The report centre: report tiles, the KPI summary and recently generated reports.

use axum::{
    extract::Query,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::{Date, macros::date};

use crate::{
    endpoints,
    html::{
        BUTTON_SECONDARY_STYLE, BUTTON_SMALL_STYLE, CARD_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, acknowledge_button, base,
        format_currency, kpi_card,
    },
    navigation::NavBar,
    query::{SearchTerm, Selection},
    table::{SelectFilter, TABLE_SECTION_ID, filter_form},
};

/// The categories offered in the category drop-down.
pub const REPORT_CATEGORIES: [&str; 5] =
    ["Contributions", "Loans", "Members", "Profit Sharing", "Expenses"];

/// A kind of report that can be generated.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTile {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
}

pub fn report_tiles() -> Vec<ReportTile> {
    let tile = |id, title, description, category| ReportTile {
        id,
        title,
        description,
        category,
    };

    vec![
        tile("contrib", "Contributions report", "Overview of member contributions", "Financial Reports"),
        tile("withdrawals", "Withdrawals report", "Withdrawals & payouts", "Financial Reports"),
        tile("cashflow", "Cash flow report", "Inflow and outflow over time", "Financial Reports"),
        tile("members_list", "Member list report", "All member profiles & stats", "Member Reports"),
        tile("active_loans", "Active loans", "Currently active loans", "Loans Reports"),
        tile("cycles", "Cycle distribution summary", "Profit sharing cycles", "Profit Sharing Reports"),
        tile("audit_logs", "System logs", "Compliance and audit trails", "Compliance / Audit Reports"),
    ]
}

/// A report that has already been generated.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentReport {
    pub name: &'static str,
    pub date: Date,
    pub format: &'static str,
    pub generated_by: &'static str,
}

pub fn recent_reports() -> Vec<RecentReport> {
    vec![
        RecentReport {
            name: "Loan Summary — Feb 2025",
            date: date!(2025 - 02 - 18),
            format: "PDF",
            generated_by: "Admin",
        },
        RecentReport {
            name: "Top Contributors — Jun 2025",
            date: date!(2025 - 06 - 03),
            format: "CSV",
            generated_by: "Finance",
        },
        RecentReport {
            name: "Profit Distribution — Q2 2025",
            date: date!(2025 - 07 - 12),
            format: "PDF",
            generated_by: "Admin",
        },
    ]
}

/// The headline figures of the report centre.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub contributions: f64,
    pub payouts: f64,
    pub outstanding_loans: f64,
    pub profit: f64,
    pub new_members: u32,
}

impl Default for ReportSummary {
    fn default() -> Self {
        Self {
            contributions: 312_000.0,
            payouts: 155_000.0,
            outstanding_loans: 72_000.0,
            profit: 48_500.0,
            new_members: 24,
        }
    }
}

const CONTRIBUTIONS_OVER_TIME: [(&str, f64); 6] = [
    ("Jan", 50_000.0),
    ("Feb", 62_000.0),
    ("Mar", 72_000.0),
    ("Apr", 81_000.0),
    ("May", 90_000.0),
    ("Jun", 110_000.0),
];

/// The query parameters of the reports page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportQuery {
    pub search: String,
    pub category: Selection,
}

/// The tiles whose category contains the selected category and whose title
/// contains the search text.
///
/// The category is matched as a substring, so "Loans" selects the
/// "Loans Reports" tiles.
pub fn filter_tiles<'a>(tiles: &'a [ReportTile], query: &ReportQuery) -> Vec<&'a ReportTile> {
    let search = SearchTerm::new(&query.search);

    tiles
        .iter()
        .filter(|tile| match &query.category {
            Selection::All => true,
            Selection::Only(category) => tile.category.contains(category.as_str()),
        })
        .filter(|tile| search.matches_any([tile.title]))
        .collect()
}

/// Horizontal bars scaled against the largest value.
pub fn bar_list(values: &[(&str, f64)]) -> Markup {
    let max = values
        .iter()
        .map(|(_, value)| *value)
        .fold(0.0_f64, f64::max);

    html! {
        ul class="flex flex-col gap-2"
        {
            @for (label, value) in values {
                @let width = if max > 0.0 { value / max * 100.0 } else { 0.0 };

                li class="flex items-center gap-3 text-sm" data-bar=(label)
                {
                    span class="w-12 shrink-0 text-gray-500" { (label) }

                    div class="grow h-3 rounded bg-gray-100 dark:bg-gray-700"
                    {
                        div
                            class="h-3 rounded bg-emerald-500"
                            style={"width: " (format!("{width:.1}")) "%"}
                        {}
                    }

                    span class="w-28 shrink-0 text-right tabular-nums" { (format_currency(*value)) }
                }
            }
        }
    }
}

fn tile_card(tile: &ReportTile) -> Markup {
    html! {
        article class=(CARD_STYLE) data-report-id=(tile.id)
        {
            p class="text-xs uppercase text-gray-500" { (tile.category) }
            h3 class="font-semibold" { (tile.title) }
            p class="text-sm text-gray-600 dark:text-gray-400 mb-3" { (tile.description) }

            div class="flex gap-2"
            {
                (acknowledge_button("generate_report", "Generate", BUTTON_SMALL_STYLE))
                (acknowledge_button("schedule", "Schedule", BUTTON_SMALL_STYLE))
            }
        }
    }
}

fn reports_view(summary: &ReportSummary, tiles: &[&ReportTile], query: &ReportQuery) -> Markup {
    let nav_bar = NavBar::new(endpoints::REPORTS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            header class="flex justify-between flex-wrap items-end gap-2"
            {
                div
                {
                    h1 class="text-xl font-bold" { "Reports" }
                    p class="text-sm text-gray-500" { "Generate, preview and schedule reports across the platform." }
                }

                div class="flex gap-2"
                {
                    (acknowledge_button("export", "Export all", BUTTON_SECONDARY_STYLE))
                    (acknowledge_button("print", "Print", BUTTON_SECONDARY_STYLE))
                }
            }

            section class="grid grid-cols-2 lg:grid-cols-5 gap-4"
            {
                (kpi_card("Contributions", &format_currency(summary.contributions), None))
                (kpi_card("Payouts", &format_currency(summary.payouts), None))
                (kpi_card("Outstanding loans", &format_currency(summary.outstanding_loans), None))
                (kpi_card("Profit", &format_currency(summary.profit), None))
                (kpi_card("New members", &summary.new_members.to_string(), None))
            }

            (filter_form(
                endpoints::REPORTS_VIEW,
                &query.search,
                "Search reports",
                vec![SelectFilter {
                    name: "category",
                    label: "Category",
                    options: &REPORT_CATEGORIES,
                    selected: &query.category,
                }],
                &[],
            ))

            section id=(TABLE_SECTION_ID) class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4"
            {
                @for tile in tiles {
                    (tile_card(tile))
                }

                @if tiles.is_empty() {
                    p class="text-sm text-gray-500" { "No reports match your filters." }
                }
            }

            div class="grid grid-cols-1 lg:grid-cols-2 gap-6"
            {
                section class=(CARD_STYLE)
                {
                    h2 class="font-semibold mb-3" { "Contributions over time" }
                    (bar_list(&CONTRIBUTIONS_OVER_TIME))
                }

                section class=(CARD_STYLE)
                {
                    h2 class="font-semibold mb-3" { "Recent reports" }

                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class="px-6 py-3" { "Name" }
                                th scope="col" class="px-6 py-3" { "Date" }
                                th scope="col" class="px-6 py-3" { "Format" }
                                th scope="col" class="px-6 py-3" { "By" }
                                th scope="col" class="px-6 py-3" { span class="sr-only" { "Download" } }
                            }
                        }

                        tbody
                        {
                            @for report in recent_reports() {
                                tr class=(TABLE_ROW_STYLE) data-recent-report
                                {
                                    td class=(TABLE_CELL_STYLE) { (report.name) }
                                    td class=(TABLE_CELL_STYLE) { time datetime=(report.date) { (report.date) } }
                                    td class=(TABLE_CELL_STYLE) { (report.format) }
                                    td class=(TABLE_CELL_STYLE) { (report.generated_by) }
                                    td class=(TABLE_CELL_STYLE)
                                    {
                                        (acknowledge_button("download_report", "Download", BUTTON_SMALL_STYLE))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Reports", &[], &content)
}

/// Renders the reports page with the tiles matching `query`.
pub async fn get_reports_page(Query(query): Query<ReportQuery>) -> Response {
    let tiles = report_tiles();
    let filtered = filter_tiles(&tiles, &query);

    reports_view(&ReportSummary::default(), &filtered, &query).into_response()
}

#[cfg(test)]
mod tests {
    use axum::extract::Query;
    use scraper::{Html, Selector};

    use crate::{
        query::Selection,
        test_utils::{assert_status_ok, assert_valid_html, parse_html_document},
    };

    use super::{ReportQuery, filter_tiles, get_reports_page, report_tiles};

    fn tile_ids(query: &ReportQuery) -> Vec<&'static str> {
        let tiles = report_tiles();
        filter_tiles(&tiles, query)
            .into_iter()
            .map(|tile| tile.id)
            .collect()
    }

    #[test]
    fn all_category_shows_every_tile() {
        assert_eq!(tile_ids(&ReportQuery::default()).len(), 7);
    }

    #[test]
    fn category_matches_by_containment() {
        let ids = tile_ids(&ReportQuery {
            category: Selection::only("Loans"),
            ..Default::default()
        });

        assert_eq!(ids, vec!["active_loans"]);
    }

    #[test]
    fn category_without_tiles_is_empty() {
        let ids = tile_ids(&ReportQuery {
            category: Selection::only("Contributions"),
            ..Default::default()
        });

        assert!(ids.is_empty(), "got {ids:?}");
    }

    #[test]
    fn search_is_case_insensitive_on_title() {
        let ids = tile_ids(&ReportQuery {
            search: "REPORT".to_owned(),
            ..Default::default()
        });

        assert_eq!(ids, vec!["contrib", "withdrawals", "cashflow", "members_list"]);
    }

    #[test]
    fn search_narrows_selected_category() {
        let ids = tile_ids(&ReportQuery {
            search: "flow".to_owned(),
            category: Selection::only("Financial"),
        });

        assert_eq!(ids, vec!["cashflow"]);
    }

    async fn render(query: ReportQuery) -> Html {
        let response = get_reports_page(Query(query)).await;
        assert_status_ok(&response);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        html
    }

    #[tokio::test]
    async fn page_lists_filtered_tiles_and_recent_reports() {
        let html = render(ReportQuery {
            category: Selection::only("Financial"),
            ..Default::default()
        })
        .await;

        let tiles = html
            .select(&Selector::parse("article[data-report-id]").unwrap())
            .count();
        assert_eq!(tiles, 3);

        let recent = html
            .select(&Selector::parse("tr[data-recent-report]").unwrap())
            .count();
        assert_eq!(recent, 3);

        let bars = html.select(&Selector::parse("[data-bar]").unwrap()).count();
        assert_eq!(bars, 6);
    }

    #[tokio::test]
    async fn generate_buttons_post_to_acknowledge() {
        let html = render(ReportQuery::default()).await;

        let button = html
            .select(&Selector::parse("article[data-report-id='cycles'] button").unwrap())
            .next()
            .expect("no generate button");

        assert_eq!(
            button.value().attr("hx-post"),
            Some("/api/acknowledge/generate_report")
        );
    }
}
