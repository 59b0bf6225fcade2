//! Markup shared by the searchable, sortable dashboard tables.
//!
//! Each table page renders its rows inside an element with the ID
//! [TABLE_SECTION_ID]. The search form and the column headers request the same
//! page with new query parameters and HTMX swaps in just that section.

use maud::{Markup, html};
use serde::Serialize;

use crate::{
    html::{FORM_SELECT_STYLE, FORM_TEXT_INPUT_STYLE},
    query::{Selection, Sort, SortDirection},
};

/// The ID of the element that is replaced when the table query changes.
pub const TABLE_SECTION_ID: &str = "table-section";

/// Build a URL for `path` with `query` encoded as the query string.
pub fn query_url<Q: Serialize>(path: &str, query: &Q) -> String {
    match serde_urlencoded::to_string(query) {
        Ok(query_string) if query_string.is_empty() => path.to_owned(),
        Ok(query_string) => format!("{path}?{query_string}"),
        Err(error) => {
            tracing::error!("could not encode table query for {path}: {error}");
            path.to_owned()
        }
    }
}

/// The active sort given the raw `sort` and `direction` query parameters.
pub fn current_sort<F: Copy + PartialEq>(
    field: Option<F>,
    direction: SortDirection,
) -> Option<Sort<F>> {
    field.map(|field| Sort::new(field, direction))
}

/// The hidden `sort` and `direction` inputs that carry the current sort
/// through a search, empty when the table is unsorted.
pub fn sort_parameters<F: Serialize>(sort: Option<Sort<F>>) -> Vec<(&'static str, String)> {
    let Some(sort) = sort else {
        return Vec::new();
    };

    match serde_json::to_value(&sort.field) {
        Ok(serde_json::Value::String(field)) => vec![
            ("sort", field),
            ("direction", sort.direction.as_query_value().to_owned()),
        ],
        Ok(value) => {
            tracing::error!("sort field serialized to {value}, expected a string");
            Vec::new()
        }
        Err(error) => {
            tracing::error!("could not serialize sort field: {error}");
            Vec::new()
        }
    }
}

/// A drop-down that selects the value of a categorical filter.
pub struct SelectFilter<'a> {
    /// The query parameter name.
    pub name: &'a str,
    pub label: &'a str,
    /// The values to choose from, not including the "All" option.
    pub options: &'a [&'a str],
    pub selected: &'a Selection,
}

impl SelectFilter<'_> {
    pub fn into_html(self) -> Markup {
        html! {
            label class="flex flex-col text-xs font-medium text-gray-500 dark:text-gray-400"
            {
                (self.label)

                select name=(self.name) class=(FORM_SELECT_STYLE)
                {
                    option value=(Selection::ALL) selected[*self.selected == Selection::All]
                    {
                        "All"
                    }

                    @for option in self.options {
                        option value=(option) selected[self.selected.is_selected(option)]
                        {
                            (option)
                        }
                    }
                }
            }
        }
    }
}

/// The form with the search box and filter drop-downs for a table.
///
/// The current sort is carried in hidden inputs so that searching does not
/// reset the column order.
pub fn filter_form(
    path: &str,
    search: &str,
    search_placeholder: &str,
    selects: Vec<SelectFilter<'_>>,
    hidden: &[(&str, String)],
) -> Markup {
    let target = format!("#{TABLE_SECTION_ID}");

    html! {
        form
            action=(path)
            method="get"
            role="search"
            hx-get=(path)
            hx-trigger="input changed delay:300ms from:input[name='search'], change"
            hx-target=(target)
            hx-select=(target)
            hx-swap="outerHTML"
            hx-push-url="true"
            class="flex flex-wrap items-end gap-4"
        {
            label class="flex flex-col grow text-xs font-medium text-gray-500 dark:text-gray-400"
            {
                "Search"

                input
                    type="search"
                    name="search"
                    value=(search)
                    placeholder=(search_placeholder)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @for select in selects {
                (select.into_html())
            }

            @for (name, value) in hidden {
                @if !value.is_empty() {
                    input type="hidden" name=(name) value=(value);
                }
            }

            noscript
            {
                button type="submit" class="px-4 py-2 rounded bg-emerald-600 text-white" { "Apply" }
            }
        }
    }
}

/// A column header that sorts the table when clicked.
///
/// `url` should request the page with the sort toggled for this column, see
/// [Sort::toggle].
pub fn sortable_header<F: Copy + PartialEq>(
    label: &str,
    field: F,
    current: Option<Sort<F>>,
    url: &str,
) -> Markup {
    let target = format!("#{TABLE_SECTION_ID}");
    let direction = current
        .filter(|sort| sort.field == field)
        .map(|sort| sort.direction);
    let (indicator, aria_sort) = match direction {
        Some(SortDirection::Asc) => ("▲", "ascending"),
        Some(SortDirection::Desc) => ("▼", "descending"),
        None => ("", "none"),
    };

    html! {
        th scope="col" class="px-6 py-3" aria-sort=(aria_sort)
        {
            a
                href=(url)
                hx-get=(url)
                hx-target=(target)
                hx-select=(target)
                hx-swap="outerHTML"
                hx-push-url="true"
                class="inline-flex items-center gap-1 hover:underline"
            {
                (label)

                @if !indicator.is_empty() {
                    span aria-hidden="true" { (indicator) }
                }
            }
        }
    }
}

/// A table row spanning every column that explains why the table is empty.
pub fn empty_row(colspan: usize, message: &str) -> Markup {
    html! {
        tr
        {
            td
                colspan=(colspan)
                class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
            {
                (message)
            }
        }
    }
}
