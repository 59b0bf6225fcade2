//! The AI insights page.
//!
//! The figures are fixed predictions; nothing here is computed from the store.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{
        BUTTON_SECONDARY_STYLE, BUTTON_SMALL_STYLE, CARD_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, Tone, acknowledge_button, base,
        format_currency, status_badge,
    },
    navigation::NavBar,
    reports::bar_list,
};

struct InsightCard {
    title: &'static str,
    value: &'static str,
    badge: &'static str,
    tone: Tone,
    note: &'static str,
}

const INSIGHT_CARDS: [InsightCard; 4] = [
    InsightCard {
        title: "Risk Level (This Month)",
        value: "High",
        badge: "Confidence 78%",
        tone: Tone::Negative,
        note: "Based on loan repayments and contribution delays",
    },
    InsightCard {
        title: "Projected Balance (30d)",
        value: "KES 420,000",
        badge: "Confidence 92%",
        tone: Tone::Neutral,
        note: "Estimate uses contribution patterns and scheduled loans",
    },
    InsightCard {
        title: "Member Stability Score",
        value: "78",
        badge: "Confidence 85%",
        tone: Tone::Positive,
        note: "Aggregate health score of member participation",
    },
    InsightCard {
        title: "AI Warnings",
        value: "3 Likely Late",
        badge: "Action Recommended",
        tone: Tone::Warning,
        note: "Members likely to miss payments this week",
    },
];

/// Month, actual balance, projected balance.
const PROJECTED_VS_ACTUAL: [(&str, f64, f64); 6] = [
    ("Jun", 25_000.0, 24_000.0),
    ("Jul", 28_000.0, 27_000.0),
    ("Aug", 32_000.0, 31_000.0),
    ("Sep", 36_000.0, 35_000.0),
    ("Oct", 42_000.0, 40_000.0),
    ("Nov", 50_000.0, 48_000.0),
];

const PREDICTED_CONTRIBUTIONS: [(&str, f64); 4] = [
    ("Dec", 52_000.0),
    ("Jan", 54_000.0),
    ("Feb", 56_000.0),
    ("Mar", 58_000.0),
];

const BEHAVIOURAL_INSIGHTS: [(&str, &str); 2] = [
    (
        "John has paid late 3 times",
        "Recommend sending early reminders to John for the next cycle.",
    ),
    (
        "Mary consistently contributes early",
        "Consider recognizing Mary in the next meeting to encourage others.",
    ),
];

/// Title, description, severity.
const ANOMALIES: [(&str, &str, &str, Tone); 2] = [
    (
        "Sudden decrease in contributions",
        "Observed a 20% drop vs last month",
        "Critical",
        Tone::Negative,
    ),
    (
        "Member inactivity detected",
        "2 members stopped contributing",
        "Info",
        Tone::Neutral,
    ),
];

fn insight_card(card: &InsightCard) -> Markup {
    html! {
        div class=(CARD_STYLE) data-insight=(card.title)
        {
            div class="flex items-start justify-between gap-2"
            {
                div
                {
                    h3 class="text-sm font-medium text-gray-500 dark:text-gray-400" { (card.title) }
                    div class="text-2xl font-bold" { (card.value) }
                }

                (status_badge(card.badge, card.tone))
            }

            p class="mt-2 text-xs text-gray-500 dark:text-gray-400" { (card.note) }
        }
    }
}

fn insights_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::INSIGHTS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            header class="flex justify-between flex-wrap items-end gap-2"
            {
                div
                {
                    h1 class="text-xl font-bold" { "AI Insights" }
                    p class="text-sm text-gray-500" { "Smart, actionable predictions for your chama" }
                }

                (acknowledge_button("download_report", "Download Report", BUTTON_SECONDARY_STYLE))
            }

            section class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4"
            {
                @for card in &INSIGHT_CARDS {
                    (insight_card(card))
                }
            }

            div class="grid grid-cols-1 lg:grid-cols-2 gap-6"
            {
                section class=(CARD_STYLE)
                {
                    h2 class="font-semibold mb-3" { "Projected vs Actual Balance" }

                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class="px-6 py-3" { "Month" }
                                th scope="col" class="px-6 py-3 text-right" { "Actual" }
                                th scope="col" class="px-6 py-3 text-right" { "Projected" }
                            }
                        }

                        tbody
                        {
                            @for (month, actual, projected) in PROJECTED_VS_ACTUAL {
                                tr class=(TABLE_ROW_STYLE)
                                {
                                    td class=(TABLE_CELL_STYLE) { (month) }
                                    td class="px-6 py-4 text-right tabular-nums" { (format_currency(actual)) }
                                    td class="px-6 py-4 text-right tabular-nums" { (format_currency(projected)) }
                                }
                            }
                        }
                    }
                }

                section class=(CARD_STYLE) id="predicted-contributions"
                {
                    h2 class="font-semibold mb-3" { "Predicted Monthly Contributions" }
                    (bar_list(&PREDICTED_CONTRIBUTIONS))
                }
            }

            div class="grid grid-cols-1 lg:grid-cols-2 gap-6"
            {
                section class=(CARD_STYLE)
                {
                    h2 class="font-semibold mb-3" { "Behavioral Insights" }

                    ul class="flex flex-col gap-4"
                    {
                        @for (title, recommendation) in BEHAVIOURAL_INSIGHTS {
                            li data-behaviour
                            {
                                h3 class="font-semibold" { (title) }
                                p class="text-sm text-gray-500" { (recommendation) }
                            }
                        }
                    }
                }

                section class=(CARD_STYLE)
                {
                    h2 class="font-semibold mb-3" { "Anomaly Detection" }

                    ul class="flex flex-col gap-4"
                    {
                        @for (title, description, severity, tone) in ANOMALIES {
                            li class="flex justify-between gap-2" data-anomaly
                            {
                                div
                                {
                                    h3 class="font-semibold" { (title) }
                                    p class="text-sm text-gray-500" { (description) }
                                }

                                (status_badge(severity, tone))
                            }
                        }
                    }
                }
            }

            section class=(CARD_STYLE)
            {
                h2 class="font-semibold mb-3" { "Recommended Actions" }

                div class="flex justify-between items-center gap-2"
                {
                    p class="text-sm" { "Send reminders to the 3 members likely to pay late." }
                    (acknowledge_button("send_reminders", "Send", BUTTON_SMALL_STYLE))
                }
            }
        }
    };

    base("AI Insights", &[], &content)
}

pub async fn get_insights_page() -> Response {
    insights_view().into_response()
}
