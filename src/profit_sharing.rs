//! The profit pool, how it is shared out and what each member has earned.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};
use time::{Date, macros::date};

use crate::{
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, Tone, acknowledge_button, base,
        format_currency, kpi_card, status_badge,
    },
    navigation::NavBar,
    reports::bar_list,
};

const TOTAL_PROFIT: f64 = 1_254_000.0;

/// How the profit pool is split between the parties.
const DISTRIBUTION: [(&str, f64); 3] = [
    ("Members", 820_000.0),
    ("Investors", 350_000.0),
    ("Platform", 84_000.0),
];

const PROFIT_GROWTH: [(&str, f64); 6] = [
    ("Q1 2024", 600_000.0),
    ("Q2 2024", 700_000.0),
    ("Q3 2024", 820_000.0),
    ("Q4 2024", 900_000.0),
    ("Q1 2025", 1_050_000.0),
    ("Q2 2025", 1_254_000.0),
];

/// One party's portion of the distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct Share<'a> {
    pub name: &'a str,
    pub value: f64,
    /// The share of the total as a percentage rounded to two decimal places.
    pub percentage: f64,
}

/// Attach to each share its percentage of the total, rounded to two decimals.
///
/// A zero total gives every share 0%.
pub fn share_percentages<'a>(shares: &[(&'a str, f64)]) -> Vec<Share<'a>> {
    let total: f64 = shares.iter().map(|(_, value)| value).sum();

    shares
        .iter()
        .map(|&(name, value)| Share {
            name,
            value,
            percentage: if total > 0.0 {
                (value / total * 10_000.0).round() / 100.0
            } else {
                0.0
            },
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoutStatus {
    Paid,
    Pending,
}

impl PayoutStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PayoutStatus::Paid => "Paid",
            PayoutStatus::Pending => "Pending",
        }
    }
}

/// A member's earnings from the current distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberProfit {
    pub name: &'static str,
    pub contribution: f64,
    pub profit_percentage: f64,
    pub earned: f64,
    pub status: PayoutStatus,
}

pub fn member_profits() -> Vec<MemberProfit> {
    let profit = |name, contribution, profit_percentage, earned, status| MemberProfit {
        name,
        contribution,
        profit_percentage,
        earned,
        status,
    };

    vec![
        profit("Faith K.", 25_000.0, 4.2, 6_200.0, PayoutStatus::Paid),
        profit("John Kamau", 50_000.0, 8.4, 12_600.0, PayoutStatus::Pending),
        profit("Mary W.", 75_000.0, 12.6, 18_900.0, PayoutStatus::Paid),
        profit("Peter O.", 15_000.0, 2.5, 3_750.0, PayoutStatus::Pending),
    ]
}

/// A completed distribution cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionCycle {
    pub cycle: &'static str,
    pub distributed: f64,
    pub date: Date,
}

pub fn distribution_timeline() -> Vec<DistributionCycle> {
    vec![
        DistributionCycle {
            cycle: "Jan–Mar 2025",
            distributed: 800_000.0,
            date: date!(2025 - 04 - 10),
        },
        DistributionCycle {
            cycle: "Apr–Jun 2025",
            distributed: 920_000.0,
            date: date!(2025 - 07 - 12),
        },
        DistributionCycle {
            cycle: "Jul–Sep 2025",
            distributed: 1_100_000.0,
            date: date!(2025 - 10 - 08),
        },
    ]
}

fn distribute_button() -> Markup {
    html! {
        button
            type="button"
            hx-post=(format_endpoint(endpoints::ACKNOWLEDGE, "distribute_profit"))
            hx-confirm="Distribute the profit pool to members, investors and the platform now?"
            hx-swap="none"
            class=(BUTTON_PRIMARY_STYLE)
        {
            "Distribute Profit"
        }
    }
}

fn profit_sharing_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::PROFIT_SHARING_VIEW).into_html();
    let shares = share_percentages(&DISTRIBUTION);

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            header class="flex justify-between flex-wrap items-end gap-2"
            {
                div
                {
                    h1 class="text-xl font-bold" { "Profit Sharing" }
                    p class="text-sm text-gray-500" { "Overview of profit pool and distribution" }
                }

                div class="flex gap-2"
                {
                    (acknowledge_button("download_report", "Download Report", BUTTON_SECONDARY_STYLE))
                    div { (distribute_button()) }
                }
            }

            section class="grid grid-cols-1 md:grid-cols-4 gap-4"
            {
                (kpi_card("Profit pool", &format_currency(TOTAL_PROFIT), Some("available for distribution")))

                @for share in &shares {
                    (kpi_card(share.name, &format_currency(share.value), Some(&format!("{}% of the pool", share.percentage))))
                }
            }

            div class="grid grid-cols-1 lg:grid-cols-2 gap-6"
            {
                section class=(CARD_STYLE)
                {
                    h2 class="font-semibold mb-3" { "Profit Growth" }
                    (bar_list(&PROFIT_GROWTH))
                }

                section class=(CARD_STYLE)
                {
                    h2 class="font-semibold mb-3" { "Distribution Timeline" }

                    ol class="flex flex-col gap-3"
                    {
                        @for cycle in distribution_timeline() {
                            li class="flex justify-between text-sm" data-cycle=(cycle.cycle)
                            {
                                div
                                {
                                    p class="font-medium" { (cycle.cycle) }
                                    time class="text-xs text-gray-500" datetime=(cycle.date) { (cycle.date) }
                                }

                                span class="tabular-nums" { (format_currency(cycle.distributed)) }
                            }
                        }
                    }
                }
            }

            section id="member-profits" class="w-full overflow-x-auto"
            {
                h2 class="font-semibold mb-3" { "Member Profit Breakdown" }

                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class="px-6 py-3" { "Member" }
                            th scope="col" class="px-6 py-3 text-right" { "Contribution" }
                            th scope="col" class="px-6 py-3 text-right" { "Profit %" }
                            th scope="col" class="px-6 py-3 text-right" { "Earned" }
                            th scope="col" class="px-6 py-3" { "Status" }
                        }
                    }

                    tbody
                    {
                        @for member in member_profits() {
                            @let tone = match member.status {
                                PayoutStatus::Paid => Tone::Positive,
                                PayoutStatus::Pending => Tone::Warning,
                            };

                            tr class=(TABLE_ROW_STYLE)
                            {
                                th scope="row" class="px-6 py-4 font-medium text-gray-900 dark:text-white" { (member.name) }
                                td class="px-6 py-4 text-right tabular-nums" { (format_currency(member.contribution)) }
                                td class="px-6 py-4 text-right tabular-nums" { (member.profit_percentage) "%" }
                                td class="px-6 py-4 text-right tabular-nums" { (format_currency(member.earned)) }
                                td class=(TABLE_CELL_STYLE) { (status_badge(member.status.as_str(), tone)) }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Profit Sharing", &[], &content)
}

pub async fn get_profit_sharing_page() -> Response {
    profit_sharing_view().into_response()
}

#[cfg(test)]
mod tests {
    use scraper::Selector;

    use crate::test_utils::{assert_status_ok, assert_valid_html, parse_html_document};

    use super::{DISTRIBUTION, get_profit_sharing_page, share_percentages};

    #[test]
    fn percentages_are_rounded_to_two_decimals() {
        let percentages: Vec<f64> = share_percentages(&DISTRIBUTION)
            .into_iter()
            .map(|share| share.percentage)
            .collect();

        assert_eq!(percentages, vec![65.39, 27.91, 6.7]);
    }

    #[test]
    fn zero_total_gives_zero_percentages() {
        let shares = share_percentages(&[("Members", 0.0), ("Platform", 0.0)]);

        assert!(shares.iter().all(|share| share.percentage == 0.0));
    }

    #[tokio::test]
    async fn page_shows_members_timeline_and_distribute_button() {
        let response = get_profit_sharing_page().await;

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let rows = html
            .select(&Selector::parse("#member-profits tbody tr").unwrap())
            .count();
        assert_eq!(rows, 4);

        let cycles = html.select(&Selector::parse("[data-cycle]").unwrap()).count();
        assert_eq!(cycles, 3);

        let distribute = html
            .select(&Selector::parse("button[hx-confirm]").unwrap())
            .next()
            .expect("no distribute button");
        assert_eq!(
            distribute.value().attr("hx-post"),
            Some("/api/acknowledge/distribute_profit")
        );
    }
}
