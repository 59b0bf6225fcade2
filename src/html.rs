use maud::{DOCTYPE, Markup, PreEscaped, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

use crate::endpoints::{self, format_endpoint};

// Link styles
pub const LINK_STYLE: &str = "text-emerald-700 hover:text-emerald-600 \
    dark:text-emerald-400 dark:hover:text-emerald-300 underline";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-emerald-600 \
    dark:bg-emerald-600 disabled:bg-emerald-800 hover:enabled:bg-emerald-700 \
    hover:enabled:dark:bg-emerald-700 text-white rounded";

pub const BUTTON_SECONDARY_STYLE: &str = "py-2 px-4 text-sm font-medium \
    text-gray-900 bg-white rounded border border-gray-200 hover:bg-gray-100 \
    hover:text-emerald-700 focus:z-10 dark:bg-gray-800 dark:text-gray-300 \
    dark:border-gray-600 dark:hover:text-white dark:hover:bg-gray-700";

pub const BUTTON_SMALL_STYLE: &str = "px-3 py-1 text-xs font-medium rounded \
    border border-gray-300 bg-white text-gray-700 hover:bg-gray-100 \
    dark:bg-gray-800 dark:border-gray-600 dark:text-gray-200 \
    dark:hover:bg-gray-700";

pub const BUTTON_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline bg-transparent \
    border-none cursor-pointer";

// Form styles
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-emerald-600 focus:border-emerald-600 \
    focus:dark:border-emerald-500 focus:dark:ring-emerald-500";
pub const FORM_SELECT_STYLE: &str = "p-2.5 rounded text-sm text-gray-900 \
    dark:text-white bg-gray-50 dark:bg-gray-700 border border-gray-300 \
    dark:border-gray-600";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Card styles
pub const CARD_STYLE: &str = "rounded-lg border border-gray-200 bg-white p-4 \
    shadow-sm dark:border-gray-700 dark:bg-gray-800";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col gap-6 px-6 py-8 mx-auto lg:py-5 max-w-6xl text-gray-900 dark:text-white";

pub enum HeadElement {
    Style(PreEscaped<String>),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Chama AI" }
                link rel="icon" type="image/png" href="/static/favicon-32x32.png" sizes="32x32";
                link href="/static/main.css" rel="stylesheet";

                script src="/static/htmx-2.0.8-min.js" integrity="sha384-/TgkGk7p307TH7EXJDuUlgG3Ce1UVolAOFopFekQkkXihi5u/6OCvVKyz1W+idaz" {}
                script src="/static/htmx-ext-response-targets-2.0.4.js" integrity="sha384-T41oglUPvXLGBVyRdZsVRxNWnOOqCynaPubjUVjxhsjFTKrFJGEMm3/0KGmNQ+Pg" {}

                style
                {
                    r#"
                    #indicator.htmx-indicator {
                        display: none;
                    }

                    #indicator.htmx-request .htmx-indicator {
                        display: inline;
                    }

                    #indicator.htmx-request.htmx-indicator {
                        display: inline;
                    }
                    "#
                }

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::Style(text) => style { (text) }
                    }
                }
            }

            body
                hx-ext="response-targets"
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)

                // Alert container for out-of-band swaps
                div
                    id="alert-container"
                    class="hidden w-full max-w-md px-4"
                    style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {}
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-emerald-600 dark:text-emerald-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-emerald-600
                            hover:bg-emerald-800 focus:ring-4 focus:outline-hidden
                            focus:ring-emerald-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-emerald-900 my-4"
                    {
                        "Back to Homepage"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}

/// The card that wraps the sign-in and sign-up forms.
pub fn auth_card(form_title: &str, subtitle: &str, form: &Markup) -> Markup {
    html! {
        div class="flex flex-col items-center justify-center px-6 py-8 mx-auto"
        {
            a href="/" class="flex items-center mb-6 text-2xl font-semibold text-gray-900 dark:text-white"
            {
                img class="w-8 h-8 mr-2" src="/static/favicon-32x32.png" alt="logo";
                "Chama AI"
            }

            div class="w-full bg-white rounded-lg shadow dark:border md:mt-0 sm:max-w-md xl:p-0 dark:bg-gray-800 dark:border-gray-700"
            {
                div class="p-6 space-y-4 md:space-y-6 sm:p-8"
                {
                    h1 class="text-xl font-bold leading-tight tracking-tight text-gray-900 md:text-2xl dark:text-white"
                    {
                        (form_title)
                    }

                    p class="text-sm text-gray-500 dark:text-gray-400" { (subtitle) }

                    (form)
                }
            }
        }
    }
}

/// A labelled text input with an optional inline error.
pub fn text_input(
    name: &str,
    label: &str,
    type_: &str,
    value: &str,
    required: bool,
    error_message: Option<&str>,
) -> Markup {
    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            input
                type=(type_)
                name=(name)
                id=(name)
                class=(FORM_TEXT_INPUT_STYLE)
                value=(value)
                required[required];

            @if let Some(error_message) = error_message
            {
                p class="text-red-500 text-sm" { (error_message) }
            }
        }
    }
}

pub fn loading_spinner() -> Markup {
    // Spinner SVG adapted from https://flowbite.com/docs/components/spinner/
    html! {
        svg
            aria-hidden="true"
            role="status"
            class="inline text-white w-4 h-4 me-2 mb-1 animate-spin"
            viewBox="0 0 100 101"
            fill="none"
            xmlns="http://www.w3.org/2000/svg"
        {
            path
                d="M100 50.5908C100 78.2051 77.6142 100.591 50 100.591C22.3858 100.591 0 78.2051 0 50.5908C0 22.9766 22.3858 0.59082 50 0.59082C77.6142 0.59082 100 22.9766 100 50.5908ZM9.08144 50.5908C9.08144 73.1895 27.4013 91.5094 50 91.5094C72.5987 91.5094 90.9186 73.1895 90.9186 50.5908C90.9186 27.9921 72.5987 9.67226 50 9.67226C27.4013 9.67226 9.08144 27.9921 9.08144 50.5908Z"
                fill="#E5E7EB" {}
            path
                d="M93.9676 39.0409C96.393 38.4038 97.8624 35.9116 97.0079 33.5539C95.2932 28.8227 92.871 24.3692 89.8167 20.348C85.8452 15.1192 80.8826 10.7238 75.2124 7.41289C69.5422 4.10194 63.2754 1.94025 56.7698 1.05124C51.7666 0.367541 46.6976 0.446843 41.7345 1.27873C39.2613 1.69328 37.813 4.19778 38.4501 6.62326C39.0873 9.04874 41.5694 10.4717 44.0505 10.1071C47.8511 9.54855 51.7191 9.52689 55.5402 10.0491C60.8642 10.7766 65.9928 12.5457 70.6331 15.2552C75.2735 17.9648 79.3347 21.5619 82.5849 25.841C84.9175 28.9121 86.7997 32.2913 88.1811 35.8758C89.083 38.2158 91.5421 39.6781 93.9676 39.0409Z"
                fill="currentColor" {}
        }
    }
}

/// A KPI card with a title, a headline value and an optional footnote.
pub fn kpi_card(title: &str, value: &str, footnote: Option<&str>) -> Markup {
    html! {
        div class=(CARD_STYLE) data-kpi=(title)
        {
            h3 class="text-sm font-medium text-gray-500 dark:text-gray-400" { (title) }
            div class="mt-1 text-2xl font-bold tabular-nums" data-kpi-value { (value) }

            @if let Some(footnote) = footnote {
                p class="mt-2 text-xs text-gray-500 dark:text-gray-400" { (footnote) }
            }
        }
    }
}

/// The colour of a [status_badge].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Neutral,
    Warning,
    Negative,
}

pub fn status_badge(label: &str, tone: Tone) -> Markup {
    let colours = match tone {
        Tone::Positive => "text-emerald-800 bg-emerald-100 dark:bg-emerald-900 dark:text-emerald-300",
        Tone::Neutral => "text-gray-800 bg-gray-100 dark:bg-gray-700 dark:text-gray-300",
        Tone::Warning => "text-amber-800 bg-amber-100 dark:bg-amber-900 dark:text-amber-300",
        Tone::Negative => "text-red-800 bg-red-100 dark:bg-red-900 dark:text-red-300",
    };

    html! {
        span class={"inline-flex items-center px-2.5 py-0.5 text-xs font-semibold rounded-full " (colours)}
        {
            (label)
        }
    }
}

/// Format `number` as Kenyan shillings rounded to the nearest shilling, e.g. "KES 5,000".
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("KES ")
            .map(|formatter| formatter.precision(Precision::Decimals(0)))
            .unwrap_or_else(|error| {
                tracing::error!("could not create currency formatter: {error}");
                Formatter::new()
            })
    });

    let number = number.round();

    if number < 0.0 {
        format!("-{}", positive_fmt.fmt_string(number.abs()))
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "KES 0".to_owned()
    }
}

/// A button for an action that is only acknowledged, see [crate::acknowledge].
pub fn acknowledge_button(action: &str, label: &str, style: &str) -> Markup {
    html! {
        button
            type="button"
            hx-post=(format_endpoint(endpoints::ACKNOWLEDGE, action))
            hx-swap="none"
            class=(style)
        {
            (label)
        }
    }
}

/// The text shown in a table cell that has no value.
pub const EMPTY_CELL: &str = "—";

/// A link with coloured text for use in a <p> tag.
pub fn link(url: &str, text: &str) -> Markup {
    html! (
        a href=(url) class=(LINK_STYLE)
        {
          (text)
        }
    )
}

#[cfg(test)]
mod tests {
    use super::{Tone, format_currency, status_badge};

    #[test]
    fn formats_zero_and_negative_amounts() {
        assert_eq!(format_currency(0.0), "KES 0");
        assert_eq!(format_currency(0.4), "KES 0");
        assert_eq!(format_currency(-250.0), format!("-{}", format_currency(250.0)));
    }

    #[test]
    fn formats_with_prefix() {
        let got = format_currency(5000.0);

        assert!(got.starts_with("KES "), "got {got}");
        assert!(got.ends_with("000"), "got {got}");
    }

    #[test]
    fn badge_contains_label() {
        let markup = status_badge("overdue", Tone::Negative).into_string();

        assert!(markup.contains("overdue"));
        assert!(markup.contains("bg-red-100"));
    }
}
