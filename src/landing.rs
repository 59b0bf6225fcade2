//! The public landing page.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{BUTTON_SECONDARY_STYLE, CARD_STYLE, base},
};

const PRIMARY_LINK_STYLE: &str = "inline-flex items-center justify-center px-5 py-3 \
    text-base font-medium text-white rounded-lg bg-emerald-600 hover:bg-emerald-700";

const HERO_STATS: [(&str, &str); 3] = [
    ("10,000+", "Active Members"),
    ("KSh 50M+", "Managed Monthly"),
    ("99.9%", "Uptime"),
];

const STEPS: [(&str, &str); 4] = [
    (
        "Create Your Chama",
        "Set up your group in minutes. Invite members via phone number and define your contribution schedule.",
    ),
    (
        "Automate Contributions",
        "Members contribute via M-Pesa automatically. No manual tracking, no missed payments.",
    ),
    (
        "Access Instant Loans",
        "Need quick cash? Get approved loans based on your contribution history, instantly.",
    ),
    (
        "Grow Together",
        "Track profits, share dividends, and watch your community wealth grow with AI insights.",
    ),
];

const FEATURES: [(&str, &str); 6] = [
    (
        "Automated Contributions",
        "Set it and forget it. Contributions happen automatically via M-Pesa on your schedule.",
    ),
    (
        "Instant Loans",
        "Get emergency funds in seconds. No paperwork, no waiting. Approval is based on your history.",
    ),
    (
        "Transparent Accounting",
        "Every shilling tracked. Real-time reports show exactly where your money is and how it's growing.",
    ),
    (
        "AI-Powered Insights",
        "Smart predictions help your group make better financial decisions and maximize returns.",
    ),
    (
        "Profit Sharing Made Easy",
        "Automatically calculate and distribute dividends. Fair, transparent, and effortless.",
    ),
    (
        "Secure M-Pesa Integration",
        "Bank-level security with M-Pesa. Your money is protected every step of the way.",
    ),
];

/// Name, role, quote.
const TESTIMONIALS: [(&str, &str, &str); 6] = [
    (
        "Grace Wanjiku",
        "Chairlady, Pamoja Women's Chama",
        "Before Chama AI, we spent hours every meeting just reconciling contributions. Now it's automatic and transparent. Our members trust the system completely.",
    ),
    (
        "John Kamau",
        "Treasurer, Umoja Youth Group",
        "The instant loan feature saved me during an emergency. I got approved in 2 minutes based on my contribution history. Incredible!",
    ),
    (
        "Faith Njeri",
        "Secretary, Tumaini Savings Circle",
        "The AI insights helped us identify the best investment opportunities. We've grown our group savings by 40% in just six months.",
    ),
    (
        "Daniel Omondi",
        "Member, Harambee Traders Chama",
        "As a busy trader, I love the M-Pesa automation. My contributions happen on time, every time, without me lifting a finger.",
    ),
    (
        "Alice Muthoni",
        "Chairperson, Maisha Bora Group",
        "The transparent accounting ended all the disputes we used to have. Everyone can see where every shilling goes. Pure peace of mind.",
    ),
    (
        "Peter Mwangi",
        "Organizer, Vijana Pamoja",
        "We started with 10 members. Now we're 50 strong, and Chama AI handles everything seamlessly. Couldn't have scaled without it.",
    ),
];

const CTA_POINTS: [&str; 3] = [
    "Free forever for small groups",
    "No credit card required",
    "Setup in 5 minutes",
];

fn header() -> Markup {
    html! {
        nav class="bg-white border-gray-200 dark:bg-gray-900"
        {
            div class="max-w-screen-xl flex items-center justify-between mx-auto p-4"
            {
                a href=(endpoints::ROOT) class="flex items-center gap-3"
                {
                    img src="/static/favicon-32x32.png" alt="Chama AI Logo" class="h-8";
                    span class="text-2xl font-semibold dark:text-white" { "Chama AI" }
                }

                div class="flex gap-2"
                {
                    a href=(endpoints::SIGN_IN_VIEW) class=(BUTTON_SECONDARY_STYLE) { "Sign in" }
                    a href=(endpoints::SIGN_UP_VIEW) class=(PRIMARY_LINK_STYLE) { "Get Started" }
                }
            }
        }
    }
}

fn hero() -> Markup {
    html! {
        section id="hero" class="px-6 py-16 mx-auto max-w-screen-xl"
        {
            span class="px-4 py-2 rounded-full text-sm font-semibold bg-emerald-100 text-emerald-800"
            {
                "Join 1,000+ Chamas Already Growing"
            }

            h1 class="mt-6 text-4xl md:text-6xl font-extrabold leading-tight text-gray-900 dark:text-white"
            {
                "Your Chama,"
                br;
                span class="text-emerald-600" { "Smarter & Stronger" }
            }

            p class="mt-6 text-lg text-gray-500 dark:text-gray-400 max-w-xl"
            {
                "Transform your table banking group with AI-powered automation. \
                Track contributions, get instant loans, and grow together with the trust of M-Pesa."
            }

            div class="mt-8 flex gap-4"
            {
                a href=(endpoints::SIGN_UP_VIEW) class=(PRIMARY_LINK_STYLE) { "Get Started Free" }
                a href=(endpoints::SIGN_IN_VIEW) class=(BUTTON_SECONDARY_STYLE) { "Sign in" }
            }

            dl class="mt-10 flex gap-8"
            {
                @for (value, label) in HERO_STATS {
                    div
                    {
                        dt class="text-sm text-gray-500" { (label) }
                        dd class="text-2xl font-bold text-gray-900 dark:text-white" { (value) }
                    }
                }
            }
        }
    }
}

fn how_it_works() -> Markup {
    html! {
        section id="how-it-works" class="px-6 py-16 mx-auto max-w-screen-xl"
        {
            h2 class="text-3xl font-bold mb-8 text-gray-900 dark:text-white" { "How It Works" }

            ol class="grid grid-cols-1 md:grid-cols-4 gap-6"
            {
                @for (step, (title, description)) in STEPS.iter().enumerate() {
                    li class=(CARD_STYLE)
                    {
                        span class="text-emerald-600 font-bold" { (step + 1) }
                        h3 class="font-semibold text-gray-900 dark:text-white" { (title) }
                        p class="text-sm text-gray-500 dark:text-gray-400" { (description) }
                    }
                }
            }
        }
    }
}

fn features() -> Markup {
    html! {
        section id="features" class="px-6 py-16 mx-auto max-w-screen-xl"
        {
            h2 class="text-3xl font-bold mb-8 text-gray-900 dark:text-white" { "Everything Your Chama Needs" }

            div class="grid grid-cols-1 md:grid-cols-3 gap-6"
            {
                @for (title, description) in FEATURES {
                    article class=(CARD_STYLE)
                    {
                        h3 class="font-semibold text-gray-900 dark:text-white" { (title) }
                        p class="text-sm text-gray-500 dark:text-gray-400" { (description) }
                    }
                }
            }
        }
    }
}

fn testimonials() -> Markup {
    html! {
        section id="testimonials" class="px-6 py-16 mx-auto max-w-screen-xl"
        {
            h2 class="text-3xl font-bold mb-8 text-gray-900 dark:text-white" { "Loved by Chamas Across Kenya" }

            div class="grid grid-cols-1 md:grid-cols-3 gap-6"
            {
                @for (name, role, quote) in TESTIMONIALS {
                    figure class=(CARD_STYLE)
                    {
                        blockquote class="text-sm text-gray-600 dark:text-gray-300" { p { (quote) } }

                        figcaption class="mt-4"
                        {
                            p class="font-semibold text-gray-900 dark:text-white" { (name) }
                            p class="text-xs text-gray-500" { (role) }
                        }
                    }
                }
            }
        }
    }
}

fn call_to_action() -> Markup {
    html! {
        section id="call-to-action" class="px-6 py-16 mx-auto max-w-screen-xl text-center"
        {
            h2 class="text-3xl font-bold text-gray-900 dark:text-white" { "Ready to grow your chama?" }

            a href=(endpoints::SIGN_UP_VIEW) class={"mt-6 " (PRIMARY_LINK_STYLE)} { "Start Free Today" }

            ul class="mt-6 flex justify-center gap-6 text-sm text-gray-500"
            {
                @for point in CTA_POINTS {
                    li { (point) }
                }
            }
        }
    }
}

fn landing_view() -> Markup {
    let content = html! {
        (header())

        main
        {
            (hero())
            (how_it_works())
            (features())
            (testimonials())
            (call_to_action())
        }

        footer class="py-8 text-center text-sm text-gray-500"
        {
            "© Chama AI"
        }
    };

    base("Your Chama, Smarter & Stronger", &[], &content)
}

pub async fn get_landing_page() -> Response {
    landing_view().into_response()
}
