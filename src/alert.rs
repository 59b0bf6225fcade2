//! Alert system for displaying success and error messages to users.
//!
//! Alerts are swapped out-of-band into the `#alert-container` element that
//! [base](crate::html::base) places on every page, so they can accompany any
//! other HTMX response, e.g. a re-rendered table row.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// A dismissable alert message.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Success { message: String, details: String },
    SuccessSimple { message: String },
    Error { message: String, details: String },
    ErrorSimple { message: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (is_success, message, details) = match self {
            Alert::Success { message, details } => (true, message, Some(details)),
            Alert::SuccessSimple { message } => (true, message, None),
            Alert::Error { message, details } => (false, message, Some(details)),
            Alert::ErrorSimple { message } => (false, message, None),
        };

        let style = if is_success {
            "flex items-start gap-3 p-4 mb-4 text-sm rounded-lg shadow \
            text-emerald-800 bg-emerald-50 dark:bg-gray-800 dark:text-emerald-400"
        } else {
            "flex items-start gap-3 p-4 mb-4 text-sm rounded-lg shadow \
            text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400"
        };

        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div
                    role="alert"
                    class=(style)
                    data-alert=(if is_success { "success" } else { "error" })
                {
                    div class="flex-1"
                    {
                        p class="font-semibold" { (message) }

                        @if let Some(details) = details.filter(|details| !details.is_empty()) {
                            p class="mt-1" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="font-bold"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
