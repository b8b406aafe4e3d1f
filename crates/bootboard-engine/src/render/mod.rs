//! Field renderers.
//!
//! Every field has three separate pure projections: a comparable sort key,
//! a plain filter string and display markup. Sorting and filtering only
//! ever see the first two.

pub mod badge;
pub mod field;
pub mod markup;
pub mod text;
pub mod time;

pub use badge::BadgeCategory;
pub use field::Field;
pub use markup::Markup;

use std::cmp::Ordering;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Comparable value for ordering (also used for type detection).
    Sort,
    /// Plain text matched by the search filter.
    Filter,
    /// Visual output.
    Display,
}

impl RenderMode {
    pub const ALL: [RenderMode; 3] = [RenderMode::Sort, RenderMode::Filter, RenderMode::Display];
}

/// Comparable cell value. Missing values order before everything else.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum SortKey {
    Null,
    Timestamp(i64),
    Text(String),
}

impl SortKey {
    pub fn text(value: Option<&str>) -> Self {
        match value {
            Some(v) => SortKey::Text(v.to_string()),
            None => SortKey::Null,
        }
    }

    /// Table ordering: text compares case-insensitively, with the exact
    /// value breaking ties between keys that differ only in case.
    pub fn cmp_caseless(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase))
                .then_with(|| a.cmp(b)),
            _ => self.cmp(other),
        }
    }
}

/// Output of [`Field::render`], one variant per [`RenderMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Key(SortKey),
    Text(String),
    Markup(Markup),
}
