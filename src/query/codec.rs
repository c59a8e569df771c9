//! Encoding and decoding of [`TableState`] query strings

use crate::types::{Filters, Sort, TableState};
use regex::Regex;
use std::sync::LazyLock;
use url::form_urlencoded;

/// Matches bracketed filter keys: filters[<name>]
static FILTER_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^filters\[(.+)\]$").unwrap());

pub const PAGE_PARAM: &str = "page";
pub const PAGE_SIZE_PARAM: &str = "pageSize";
pub const QUERY_PARAM: &str = "q";
pub const SORT_PARAM: &str = "sort";

/// Build the wire key for a filter name
pub fn filter_key(name: &str) -> String {
    format!("filters[{name}]")
}

/// Extract the filter name from a wire key, if it is a filter key
pub fn filter_name(key: &str) -> Option<&str> {
    FILTER_KEY_REGEX
        .captures(key)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Flatten a state into ordered query pairs
pub fn to_pairs(state: &TableState) -> Vec<(String, String)> {
    let mut pairs = vec![
        (PAGE_PARAM.to_string(), state.page.to_string()),
        (PAGE_SIZE_PARAM.to_string(), state.page_size.to_string()),
    ];

    if !state.query.is_empty() {
        pairs.push((QUERY_PARAM.to_string(), state.query.clone()));
    }

    if let Some(ref sort) = state.sort {
        pairs.push((SORT_PARAM.to_string(), sort.to_string()));
    }

    for (name, value) in &state.filters {
        if !value.is_empty() {
            pairs.push((filter_key(name), value.clone()));
        }
    }

    pairs
}

/// Encode a state as an `application/x-www-form-urlencoded` query string
pub fn encode(state: &TableState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in to_pairs(state) {
        serializer.append_pair(&key, &value);
    }
    serializer.finish()
}

/// Decode a query string, falling back per field on missing or bad values.
///
/// Unknown keys are ignored. A leading `?` is accepted.
pub fn decode(query: &str, fallback: &TableState) -> TableState {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut page = None;
    let mut page_size = None;
    let mut search = String::new();
    let mut sort = None;
    let mut filters = Filters::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match &*key {
            PAGE_PARAM => page = parse_positive(&value),
            PAGE_SIZE_PARAM => page_size = parse_positive(&value),
            QUERY_PARAM => search = value.into_owned(),
            SORT_PARAM => sort = Sort::parse_lenient(&value),
            other => {
                if let Some(name) = filter_name(other) {
                    if value.is_empty() {
                        filters.remove(name);
                    } else {
                        filters.insert(name.to_string(), value.into_owned());
                    }
                }
            }
        }
    }

    TableState {
        page: page.unwrap_or(fallback.page),
        page_size: page_size.unwrap_or(fallback.page_size),
        query: search,
        sort,
        filters,
    }
}

fn parse_positive(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|n| *n >= 1)
}
