//! Common types used throughout paged-table
//!
//! This module contains the table state model shared by the codec, the
//! fetch coordinator, the controller and the mock endpoint.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Filter name to filter value.
///
/// Values are strings end to end: the query string carries no type
/// information, so `"1"` and `1` are the same filter. Empty values are
/// never stored.
pub type Filters = BTreeMap<String, String>;

// ============================================================================
// Sorting
// ============================================================================

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Wire name of the direction
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Parse a wire direction; anything but `desc` is ascending
    pub fn parse_lenient(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

/// Sort key and direction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sort {
    pub key: String,
    pub direction: SortDirection,
}

impl Sort {
    /// Create an ascending sort
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Create a descending sort
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parse `<key>:<direction>` leniently.
    ///
    /// A missing or unknown direction means ascending. An empty key yields
    /// `None`.
    pub fn parse_lenient(value: &str) -> Option<Self> {
        let (key, direction) = match value.split_once(':') {
            Some((key, direction)) => (key, SortDirection::parse_lenient(direction)),
            None => (value, SortDirection::Asc),
        };
        if key.is_empty() {
            return None;
        }
        Some(Self {
            key: key.to_string(),
            direction,
        })
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.direction.as_str())
    }
}

impl FromStr for Sort {
    type Err = Error;

    /// Strict parse used for user input: direction must be `asc` or `desc`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidSort {
            value: s.to_string(),
        };
        let (key, direction) = s.split_once(':').ok_or_else(invalid)?;
        if key.is_empty() {
            return Err(invalid());
        }
        let direction = match direction {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Err(invalid()),
        };
        Ok(Self {
            key: key.to_string(),
            direction,
        })
    }
}

// ============================================================================
// Table State
// ============================================================================

/// Everything that describes which subset of rows is shown and in what order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    /// 1-based page number
    pub page: u32,
    pub page_size: u32,
    /// Free-text search term
    pub query: String,
    pub sort: Option<Sort>,
    pub filters: Filters,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            query: String::new(),
            sort: None,
            filters: Filters::new(),
        }
    }
}

impl TableState {
    /// Create a state on page 1 with the given page size
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    /// Set or remove a filter; an empty value removes it
    pub fn put_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            self.filters.remove(&key);
        } else {
            self.filters.insert(key, value);
        }
    }
}

// ============================================================================
// Query Results
// ============================================================================

/// One page of items plus the total across the whole filtered set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> QueryResult<T> {
    /// Create an empty result
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

impl<T> From<PageResponse<T>> for QueryResult<T> {
    fn from(response: PageResponse<T>) -> Self {
        Self {
            items: response.items,
            total: response.total,
        }
    }
}

/// Response body of the query endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

// ============================================================================
// Rows
// ============================================================================

/// A row of the mock user dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub company: String,
    pub status: String,
    /// ISO-8601 UTC timestamp, e.g. `2024-01-01T00:00:00.000Z`
    pub created_at: String,
}

impl Row {
    /// Look up a field by its wire name
    pub fn field(&self, key: &str) -> Option<JsonValue> {
        let value = match key {
            "id" => JsonValue::from(self.id),
            "name" => JsonValue::from(self.name.as_str()),
            "email" => JsonValue::from(self.email.as_str()),
            "company" => JsonValue::from(self.company.as_str()),
            "status" => JsonValue::from(self.status.as_str()),
            "createdAt" => JsonValue::from(self.created_at.as_str()),
            _ => return None,
        };
        Some(value)
    }
}
