//! The text matcher and categorical filters.

use serde::{Deserialize, Serialize};

use super::{FieldValue, Record};

/// A case-folded search string.
///
/// A record matches if the search string is a substring of any of the
/// record's [search fields](Record::search_fields), ignoring case. There is no
/// tokenization or fuzzy matching. The empty search matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches<T: Record>(&self, record: &T) -> bool {
        self.is_empty() || self.matches_any(record.search_fields())
    }

    /// Check the search term against arbitrary strings.
    ///
    /// Used by tables whose searchable text is not a field of the record,
    /// e.g. the concatenated title and message of a notification.
    pub fn matches_any<'a>(&self, haystacks: impl IntoIterator<Item = &'a str>) -> bool {
        self.is_empty()
            || haystacks
                .into_iter()
                .any(|haystack| haystack.to_lowercase().contains(&self.0))
    }
}

/// The value selected for a categorical filter.
///
/// Parsed from query strings, where the sentinel "all" (in any case) or an
/// empty value means the filter is not applied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    /// No filter applied.
    #[default]
    All,
    /// Only records whose field equals this value exactly.
    Only(String),
}

impl Selection {
    /// The query string value for [Selection::All].
    pub const ALL: &'static str = "all";

    pub fn only(value: &str) -> Self {
        Self::Only(value.to_owned())
    }

    pub fn as_query_value(&self) -> &str {
        match self {
            Selection::All => Self::ALL,
            Selection::Only(value) => value,
        }
    }

    /// Whether `value` is the selected option, used to mark `<option>` elements.
    pub fn is_selected(&self, value: &str) -> bool {
        match self {
            Selection::All => value.eq_ignore_ascii_case(Self::ALL),
            Selection::Only(selected) => selected == value,
        }
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        if value.is_empty() || value.eq_ignore_ascii_case(Self::ALL) {
            Selection::All
        } else {
            Selection::Only(value)
        }
    }
}

impl From<Selection> for String {
    fn from(value: Selection) -> Self {
        value.as_query_value().to_owned()
    }
}

/// An equality filter on one column of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFilter<F> {
    pub field: F,
    pub selection: Selection,
}

impl<F: Copy> CategoryFilter<F> {
    pub fn new(field: F, selection: Selection) -> Self {
        Self { field, selection }
    }

    /// Case-sensitive equality against the selected value, or `true` for [Selection::All].
    pub fn matches<T: Record<Field = F>>(&self, record: &T) -> bool {
        let Selection::Only(selected) = &self.selection else {
            return true;
        };

        match record.field(self.field) {
            FieldValue::Text(value) => value == selected.as_str(),
            FieldValue::Number(value) => value.to_string() == *selected,
            FieldValue::Missing => false,
        }
    }
}
