use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Wire value of the `sort_order` parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            SortOrder::Ascending => "1",
            SortOrder::Descending => "-1",
        }
    }
}

/// Look-back window of a query, in days, or everything the server holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    Days(u32),
    Max,
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateRange::Days(days) => write!(f, "{}", days),
            DateRange::Max => write!(f, "max"),
        }
    }
}

impl FromStr for DateRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("max") {
            return Ok(DateRange::Max);
        }
        trimmed
            .parse::<u32>()
            .map(DateRange::Days)
            .map_err(|_| Error::InvalidDateRange(s.to_string()))
    }
}

impl Serialize for DateRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            DateRange::Days(days) => serializer.serialize_u32(*days),
            DateRange::Max => serializer.serialize_str("max"),
        }
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Days(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Days(days) => Ok(DateRange::Days(days)),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Immutable description of one aggregation run.
///
/// Only `skip` varies between the requests of a run; it lives on
/// [`PageRequest`], never here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySpec {
    pub sort: String,
    pub sort_order: SortOrder,
    pub date_range: Option<DateRange>,
    pub limit: u64,
    pub status: Option<String>,
    pub fields: Vec<String>,
}

impl QuerySpec {
    pub fn new(sort: impl Into<String>, limit: u64) -> Result<Self> {
        if limit == 0 {
            return Err(Error::InvalidQuery("limit must be greater than 0".into()));
        }
        Ok(Self {
            sort: sort.into(),
            sort_order: SortOrder::Descending,
            date_range: None,
            limit,
            status: None,
            fields: Vec::new(),
        })
    }

    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }

    pub fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Request for the page starting at `skip`.
    pub fn page(&self, skip: u64) -> PageRequest<'_> {
        PageRequest { spec: self, skip }
    }
}

/// A [`QuerySpec`] pinned to one `skip` offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<'a> {
    pub spec: &'a QuerySpec,
    pub skip: u64,
}

impl PageRequest<'_> {
    pub fn limit(&self) -> u64 {
        self.spec.limit
    }

    /// Query-string pairs in wire order, with one `field` pair per
    /// projected field.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let spec = self.spec;
        let mut pairs = vec![
            ("sort", spec.sort.clone()),
            ("sort_order", spec.sort_order.as_param().to_string()),
        ];
        if let Some(range) = spec.date_range {
            pairs.push(("date_range", range.to_string()));
        }
        pairs.push(("limit", spec.limit.to_string()));
        pairs.push(("skip", self.skip.to_string()));
        if let Some(status) = &spec.status {
            pairs.push(("status", status.clone()));
        }
        for field in &spec.fields {
            pairs.push(("field", field.clone()));
        }
        pairs
    }
}
