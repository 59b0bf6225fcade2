//! This file defines the templates and a convenience function for creating the navigation bar.

use maud::{Markup, html};

use crate::endpoints;

/// Template for a link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_desktop_html(self) -> Markup {
        let style = if self.is_current {
            "block py-2 px-3 text-white bg-emerald-700 rounded-sm lg:bg-transparent
        lg:text-emerald-700 lg:p-0 dark:text-white lg:dark:text-emerald-400"
        } else {
            "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100
        lg:hover:bg-transparent lg:border-0 lg:hover:text-emerald-700 lg:p-0
        dark:text-white lg:dark:hover:text-emerald-400 dark:hover:bg-gray-700
        dark:hover:text-white lg:dark:hover:bg-transparent"
        };

        html!(
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                (self.title)
            }
        )
    }
}

/// The dashboard pages shown in the bottom bar on small screens, the rest
/// live under "More".
const PRIMARY_MOBILE_LINKS: [&str; 3] = [
    endpoints::DASHBOARD_VIEW,
    endpoints::CONTRIBUTIONS_VIEW,
    endpoints::LOANS_VIEW,
];

fn is_primary_mobile_link(url: &str) -> bool {
    PRIMARY_MOBILE_LINKS.iter().any(|primary| *primary == url)
}

pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let pages = [
            (endpoints::DASHBOARD_VIEW, "Dashboard"),
            (endpoints::CONTRIBUTIONS_VIEW, "Contributions"),
            (endpoints::LOANS_VIEW, "Loans"),
            (endpoints::MEMBERS_VIEW, "Members"),
            (endpoints::PROFIT_SHARING_VIEW, "Profit Sharing"),
            (endpoints::REPORTS_VIEW, "Reports"),
            (endpoints::NOTIFICATIONS_VIEW, "Notifications"),
            (endpoints::INSIGHTS_VIEW, "AI Insights"),
        ];

        let mut links: Vec<Link<'_>> = pages
            .into_iter()
            .map(|(url, title)| Link {
                url,
                title,
                is_current: active_endpoint == url,
            })
            .collect();

        links.push(Link {
            url: endpoints::SIGN_OUT,
            title: "Sign out",
            is_current: false,
        });

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        let links = self.links;
        let more_is_active = links
            .iter()
            .any(|link| link.is_current && !is_primary_mobile_link(link.url));
        let bottom_link_class = |is_current: bool| -> &'static str {
            if is_current {
                "flex w-full min-w-0 items-center justify-center rounded-lg \
                bg-emerald-50 px-2.5 py-2 text-xs font-semibold leading-tight \
                text-emerald-700 shadow-sm sm:px-4 sm:text-sm \
                dark:bg-emerald-900/30 dark:text-emerald-200"
            } else {
                "flex w-full min-w-0 items-center justify-center rounded-lg \
                px-2.5 py-2 text-xs font-semibold leading-tight text-gray-600 \
                sm:px-4 sm:text-sm \
                hover:bg-emerald-50/70 hover:text-emerald-700 dark:text-gray-300 \
                dark:hover:bg-emerald-900/20 dark:hover:text-emerald-200"
            }
        };
        let more_item_class = |is_current: bool| -> &'static str {
            if is_current {
                "block rounded-lg bg-emerald-50 px-3 py-2 text-emerald-700 \
                dark:bg-emerald-900/30 dark:text-emerald-200"
            } else {
                "block rounded-lg px-3 py-2 text-gray-700 hover:bg-gray-100 \
                hover:text-emerald-700 dark:text-gray-200 dark:hover:bg-gray-800/80 \
                dark:hover:text-emerald-200"
            }
        };

        // Template adapted from https://flowbite.com/docs/components/navbar/#default-navbar
        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900"
            {
                div
                    class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a
                        href=(endpoints::DASHBOARD_VIEW)
                        class="flex items-center space-x-3 rtl:space-x-reverse"
                    {
                        img
                            src="/static/favicon-32x32.png"
                            alt="Chama AI Logo"
                            class="h-8"
                        ;

                        span
                            class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                        {
                            "Chama AI"
                        }
                    }

                    div class="hidden w-full lg:block lg:w-auto"
                    {
                        ul
                            class="font-medium flex flex-col p-4 lg:p-0 mt-4
                            border border-gray-100 rounded bg-gray-50
                            lg:flex-row lg:space-x-6 rtl:space-x-reverse lg:mt-0
                            lg:border-0 lg:bg-white dark:bg-gray-800
                            lg:dark:bg-gray-900 dark:border-gray-700"
                        {
                            @for link in links.clone().into_iter() {
                                li { (link.into_desktop_html()) }
                            }
                        }
                    }
                }
            }

            nav class="fixed inset-x-0 bottom-0 z-40 lg:hidden"
            {
                div class="mx-auto max-w-screen-xl px-4 pb-4"
                {
                    ul
                        class="grid grid-cols-4 gap-2 px-4 py-3 rounded-xl border
                        border-gray-200 bg-white/95 shadow-lg backdrop-blur
                        dark:border-gray-700 dark:bg-gray-900/95"
                        aria-label="Primary"
                    {
                        @for link in links.iter().filter(|link| is_primary_mobile_link(link.url)) {
                            li class="min-w-0" {
                                a href=(link.url) class=(bottom_link_class(link.is_current))
                                {
                                    span class="truncate" { (link.title) }
                                }
                            }
                        }

                        li class="min-w-0" {
                            details class="group relative"
                            {
                                summary class=(bottom_link_class(more_is_active))
                                {
                                    span class="truncate" { "More" }
                                }

                                ul
                                    class="absolute bottom-full right-0 mb-3 w-44 flex flex-col
                                    gap-1 rounded-xl border border-gray-200 bg-white/95 p-2
                                    text-sm font-medium shadow-xl dark:border-gray-700
                                    dark:bg-gray-900/95"
                                {
                                    @for link in links.iter().filter(|link| !is_primary_mobile_link(link.url)) {
                                        li {
                                            a href=(link.url) class=(more_item_class(link.is_current))
                                            {
                                                (link.title)
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        )
    }
}

#[cfg(test)]
mod nav_bar_tests {
    use std::collections::HashMap;

    use crate::{endpoints, navigation::NavBar};

    #[test]
    fn set_active_endpoint() {
        let mut cases = HashMap::new();
        cases.insert(endpoints::DASHBOARD_VIEW, true);
        cases.insert(endpoints::CONTRIBUTIONS_VIEW, true);
        cases.insert(endpoints::LOANS_VIEW, true);
        cases.insert(endpoints::MEMBERS_VIEW, true);
        cases.insert(endpoints::PROFIT_SHARING_VIEW, true);
        cases.insert(endpoints::REPORTS_VIEW, true);
        cases.insert(endpoints::NOTIFICATIONS_VIEW, true);
        cases.insert(endpoints::INSIGHTS_VIEW, true);

        cases.insert(endpoints::ROOT, false);
        cases.insert(endpoints::SIGN_IN_VIEW, false);
        cases.insert(endpoints::SIGN_OUT, false);
        cases.insert(endpoints::TOKEN_API, false);
        cases.insert(endpoints::INTERNAL_ERROR_VIEW, false);

        for (endpoint, should_be_active) in cases {
            let nav_bar = NavBar::new(endpoint);

            assert_link_active(nav_bar, endpoint, should_be_active);
        }
    }

    #[track_caller]
    fn assert_link_active(nav_bar: NavBar<'_>, endpoint: &str, should_be_active: bool) {
        let get_active_string = |is_active: bool| -> &str {
            if is_active {
                "active (true)"
            } else {
                "inactive (false)"
            }
        };

        for link in nav_bar.links {
            if link.url == endpoint {
                assert_eq!(
                    link.is_current,
                    should_be_active,
                    "Link for current page should be {} but got {}",
                    get_active_string(should_be_active),
                    get_active_string(link.is_current),
                )
            } else {
                assert!(
                    !link.is_current,
                    "Link for inactive page should {} but got {}",
                    get_active_string(false),
                    get_active_string(link.is_current)
                )
            }
        }
    }
}
