//! Search, filter, sort and paginate over in-memory rows

use crate::query;
use crate::types::{Filters, JsonValue, PageResponse, Row, Sort, SortDirection};
use std::cmp::Ordering;
use url::form_urlencoded;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Parameters the endpoint understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointQuery {
    pub page: u32,
    pub page_size: u32,
    pub q: String,
    pub sort: Option<Sort>,
    pub filters: Filters,
}

impl Default for EndpointQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            q: String::new(),
            sort: None,
            filters: Filters::new(),
        }
    }
}

impl EndpointQuery {
    /// Parse a raw query string.
    ///
    /// `page` defaults to 1 and is at least 1. `pageSize` defaults to 10 and
    /// is clamped to `1..=100`. Zero and unparsable numbers use the default.
    pub fn from_query_str(raw: &str) -> Self {
        let mut parsed = Self::default();

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            match &*key {
                "page" => {
                    parsed.page = parse_nonzero(&value).map_or(1, |n| clamp_u32(n, 1, u32::MAX));
                }
                "pageSize" => {
                    parsed.page_size = parse_nonzero(&value)
                        .map_or(DEFAULT_PAGE_SIZE, |n| clamp_u32(n, 1, MAX_PAGE_SIZE));
                }
                "q" => parsed.q = value.into_owned(),
                "sort" => parsed.sort = Sort::parse_lenient(&value),
                other => {
                    if let Some(name) = query::filter_name(other) {
                        if !value.is_empty() {
                            parsed.filters.insert(name.to_string(), value.into_owned());
                        }
                    }
                }
            }
        }

        parsed
    }
}

fn parse_nonzero(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok().filter(|n| *n != 0)
}

fn clamp_u32(value: i64, min: u32, max: u32) -> u32 {
    value.clamp(i64::from(min), i64::from(max)) as u32
}

/// Apply search and filters, then sort, then cut out the requested page
pub fn run_query(rows: &[Row], query: &EndpointQuery) -> PageResponse<Row> {
    let needle = query.q.to_lowercase();

    let mut matched: Vec<&Row> = rows
        .iter()
        .filter(|row| matches_search(row, &needle))
        .filter(|row| matches_filters(row, &query.filters))
        .collect();

    if let Some(ref sort) = query.sort {
        matched.sort_by(|a, b| {
            let ordering = compare_values(a.field(&sort.key), b.field(&sort.key));
            match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    let total = matched.len() as u64;
    let start = (query.page as usize)
        .saturating_sub(1)
        .saturating_mul(query.page_size as usize);
    let items = matched
        .into_iter()
        .skip(start)
        .take(query.page_size as usize)
        .cloned()
        .collect();

    PageResponse {
        items,
        total,
        page: query.page,
        page_size: query.page_size,
    }
}

fn matches_search(row: &Row, needle: &str) -> bool {
    needle.is_empty()
        || row.name.to_lowercase().contains(needle)
        || row.email.to_lowercase().contains(needle)
        || row.company.to_lowercase().contains(needle)
}

fn matches_filters(row: &Row, filters: &Filters) -> bool {
    filters.iter().all(|(name, value)| match name.as_str() {
        "status" => row.status == *value,
        "company" => row.company == *value,
        "createdAtFrom" => row.created_at.as_str() >= value.as_str(),
        "createdAtTo" => row.created_at.as_str() <= value.as_str(),
        _ => true,
    })
}

/// Untyped comparison: strings with strings, numbers with numbers.
///
/// Anything else, including a field the row does not have, compares equal,
/// so the stable sort leaves those rows in input order.
fn compare_values(a: Option<JsonValue>, b: Option<JsonValue>) -> Ordering {
    match (a, b) {
        (Some(JsonValue::String(a)), Some(JsonValue::String(b))) => a.cmp(&b),
        (Some(JsonValue::Number(a)), Some(JsonValue::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}
