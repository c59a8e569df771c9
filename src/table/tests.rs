//! Tests for the paginated table controller

use super::*;
use crate::http::{HttpClient, HttpClientConfig};
use crate::types::Sort;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

type Table = PaginatedTable<Value, MemoryLocation>;

/// Echoes the requested page and search term; page 2 answers slowly
fn echo(req: &Request) -> ResponseTemplate {
    let pairs: HashMap<String, String> = req.url.query_pairs().into_owned().collect();
    let page: u32 = pairs.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let total = if pairs.contains_key("filters[status]") {
        30
    } else {
        95
    };
    let delay = if page == 2 {
        Duration::from_millis(300)
    } else {
        Duration::ZERO
    };

    ResponseTemplate::new(200)
        .set_body_json(json!({
            "items": [{"page": page, "q": pairs.get("q")}],
            "total": total,
            "page": page,
            "pageSize": 10
        }))
        .set_delay(delay)
}

async fn echo_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(echo)
        .mount(&server)
        .await;
    server
}

fn table_for(server: &MockServer, location: &str) -> Table {
    let config = HttpClientConfig::builder().base_url(server.uri()).build();
    let client = HttpClient::with_config(config).unwrap();
    let options = TableOptions {
        debounce: Duration::from_millis(30),
        ..TableOptions::default()
    };
    PaginatedTable::new(options, client, "/api/users", MemoryLocation::new(location))
}

async fn sent_queries(server: &MockServer) -> Vec<HashMap<String, String>> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|req| req.url.query_pairs().into_owned().collect())
        .collect()
}

// ============================================================================
// Construction
// ============================================================================

#[tokio::test]
async fn test_initial_state_from_location() {
    let server = echo_server().await;
    let mut table = table_for(
        &server,
        "?page=3&pageSize=20&q=acme&sort=name:desc&filters[status]=active",
    );

    assert!(table.loading());
    assert_eq!(table.state().page, 3);
    assert_eq!(table.state().page_size, 20);
    assert_eq!(table.state().query, "acme");
    assert_eq!(table.state().sort, Some(Sort::desc("name")));
    assert_eq!(table.debounced_query(), "acme");

    table.settle().await;
    assert!(!table.loading());
    assert_eq!(table.total(), 30);
    assert_eq!(table.rows(), &[json!({"page": 3, "q": "acme"})]);

    let sent = sent_queries(&server).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].get("filters[status]"), Some(&"active".to_string()));
}

#[tokio::test]
async fn test_unknown_page_size_is_normalized() {
    let server = echo_server().await;
    let mut table = table_for(&server, "page=2&pageSize=15");

    assert_eq!(table.state().page_size, 10);
    assert_eq!(table.location().current(), "page=2&pageSize=10");
    table.settle().await;
}

#[tokio::test]
async fn test_malformed_location_falls_back() {
    let server = echo_server().await;
    let mut table = table_for(&server, "page=abc&pageSize=&sort=name&theme=dark");

    assert_eq!(table.state().page, 1);
    assert_eq!(table.state().page_size, 10);
    assert_eq!(table.state().sort, Some(Sort::asc("name")));
    assert_eq!(table.location().current(), "page=1&pageSize=10&sort=name%3Aasc");
    table.settle().await;
    assert!(table.error().is_none());
}

// ============================================================================
// Setters
// ============================================================================

#[tokio::test]
async fn test_set_query_resets_page_and_debounces() {
    let server = echo_server().await;
    let mut table = table_for(&server, "page=4&pageSize=10");
    table.settle().await;

    table.set_query("a");
    table.set_query("an");
    table.set_query("ana");

    assert_eq!(table.state().page, 1);
    assert_eq!(table.input_query(), "ana");
    assert_eq!(table.debounced_query(), "");
    assert_eq!(table.location().current(), "page=1&pageSize=10&q=ana");

    let events = table.settle().await;
    assert!(events
        .iter()
        .any(|e| matches!(e, TableEvent::QuerySettled { query, .. } if query == "ana")));
    assert_eq!(table.debounced_query(), "ana");
    assert_eq!(table.rows(), &[json!({"page": 1, "q": "ana"})]);

    let with_query: Vec<_> = sent_queries(&server)
        .await
        .into_iter()
        .filter_map(|q| q.get("q").cloned())
        .collect();
    assert_eq!(with_query, vec!["ana".to_string()]);
}

#[tokio::test]
async fn test_set_query_loads_first_page_before_debounce() {
    let server = echo_server().await;
    let config = HttpClientConfig::builder().base_url(server.uri()).build();
    let client = HttpClient::with_config(config).unwrap();
    let options = TableOptions {
        debounce: Duration::from_millis(500),
        ..TableOptions::default()
    };
    let mut table: Table =
        PaginatedTable::new(options, client, "/api/users", MemoryLocation::new("page=4"));
    table.settle().await;

    table.set_query("ana");
    assert_eq!(table.state().page, 1);
    assert!(table.loading());

    let event = table.tick().await;
    assert!(matches!(event, TableEvent::Loaded { .. }));
    assert_eq!(table.rows(), &[json!({"page": 1, "q": null})]);

    let sent = sent_queries(&server).await;
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].get("page"), Some(&"1".to_string()));
    assert_eq!(sent[1].get("q"), None);

    table.settle().await;
    assert_eq!(table.rows(), &[json!({"page": 1, "q": "ana"})]);
}

#[tokio::test]
async fn test_set_query_on_first_page_waits_for_debounce() {
    let server = echo_server().await;
    let mut table = table_for(&server, "");
    table.settle().await;

    table.set_query("ana");
    assert!(!table.loading());
    assert!(table.is_busy());
    assert_eq!(sent_queries(&server).await.len(), 1);
    table.settle().await;
}

#[tokio::test]
async fn test_set_filter_resets_page() {
    let server = echo_server().await;
    let mut table = table_for(&server, "");
    table.set_page(3);
    table.settle().await;
    assert_eq!(table.total(), 95);

    table.set_filter("status", "active");
    assert_eq!(table.state().page, 1);
    table.settle().await;
    assert_eq!(table.total(), 30);

    table.set_filter("status", "");
    assert!(table.state().filters.is_empty());
    table.settle().await;
    assert_eq!(table.total(), 95);
}

#[tokio::test]
async fn test_clear_filters_is_idempotent() {
    let server = echo_server().await;
    let mut table = table_for(&server, "filters[status]=active&filters[company]=Acme");
    table.settle().await;

    table.clear_filters();
    assert!(table.state().filters.is_empty());
    table.settle().await;

    let history = table.location().history().len();
    let sent = sent_queries(&server).await.len();

    table.clear_filters();
    assert!(table.state().filters.is_empty());
    assert!(!table.is_busy());
    assert_eq!(table.location().history().len(), history);
    assert_eq!(sent_queries(&server).await.len(), sent);
}

#[tokio::test]
async fn test_set_page_size() {
    let server = echo_server().await;
    let mut table = table_for(&server, "page=2");
    table.settle().await;

    let err = table.set_page_size(15).unwrap_err();
    assert!(matches!(err, crate::error::Error::InvalidPageSize { size: 15, .. }));
    assert_eq!(table.state().page_size, 10);
    assert!(!table.is_busy());

    table.set_page_size(50).unwrap();
    assert_eq!(table.state().page_size, 50);
    assert_eq!(table.state().page, 2);
    assert_eq!(table.location().current(), "page=2&pageSize=50");
    table.settle().await;
}

#[tokio::test]
async fn test_set_page_zero_clamps_to_one() {
    let server = echo_server().await;
    let mut table = table_for(&server, "page=5");
    table.set_page(0);
    assert_eq!(table.state().page, 1);
    table.settle().await;
}

#[tokio::test]
async fn test_set_sort() {
    let server = echo_server().await;
    let mut table = table_for(&server, "");
    table.set_sort(Some(Sort::desc("createdAt")));
    assert_eq!(
        table.location().current(),
        "page=1&pageSize=10&sort=createdAt%3Adesc"
    );
    table.settle().await;

    table.set_sort(None);
    assert_eq!(table.location().current(), "page=1&pageSize=10");
    table.settle().await;
}

#[tokio::test]
async fn test_set_sort_with_empty_key_clears_sort() {
    let server = echo_server().await;
    let mut table = table_for(&server, "sort=name:asc");
    table.settle().await;

    table.set_sort(Some(Sort::desc("")));
    assert_eq!(table.state().sort, None);
    assert_eq!(table.location().current(), "page=1&pageSize=10");
    table.settle().await;

    let sent = sent_queries(&server).await;
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].get("sort"), None);
}

// ============================================================================
// Fetch Coordination
// ============================================================================

#[tokio::test]
async fn test_latest_page_wins() {
    let server = echo_server().await;
    let mut table = table_for(&server, "");
    table.settle().await;

    // Page 2 answers after 300ms, page 3 immediately
    table.set_page(2);
    table.set_page(3);
    table.settle().await;

    assert_eq!(table.state().page, 3);
    assert_eq!(table.rows(), &[json!({"page": 3, "q": null})]);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(!table.is_busy());
    assert_eq!(table.rows(), &[json!({"page": 3, "q": null})]);
}

#[tokio::test]
async fn test_error_renders_single_row() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(echo)
        .mount(&server)
        .await;

    let mut table: PaginatedTable<crate::types::Row, MemoryLocation> = {
        let config = HttpClientConfig::builder().base_url(server.uri()).build();
        let client = HttpClient::with_config(config).unwrap();
        PaginatedTable::new(
            TableOptions::default(),
            client,
            "/api/users",
            MemoryLocation::default(),
        )
    };

    let events = table.settle().await;
    assert!(matches!(events.last(), Some(TableEvent::Failed { .. })));
    assert!(table.rows().is_empty());
    assert_eq!(table.total(), 0);
    assert!(table.render().contains("| Error: HTTP 500: boom"));

    table.refresh();
    assert!(table.error().is_none());
    assert!(table.render().contains("Loading…"));
}

#[tokio::test]
async fn test_refresh_recovers_after_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(echo)
        .mount(&server)
        .await;

    let mut table = table_for(&server, "");
    table.settle().await;
    assert!(table.error().is_some());

    let id = table.refresh();
    let events = table.settle().await;
    assert_eq!(events, vec![TableEvent::Loaded { id, total: 95 }]);
    assert!(table.error().is_none());
    assert_eq!(table.rows().len(), 1);
}

// ============================================================================
// Pager
// ============================================================================

#[tokio::test]
async fn test_page_buttons_follow_total() {
    let server = echo_server().await;
    let mut table = table_for(&server, "page=5");
    table.settle().await;

    assert_eq!(table.total_pages(), 10);
    assert_eq!(
        table.page_buttons(7),
        vec![
            PageButton::Page(1),
            PageButton::Ellipsis,
            PageButton::Page(4),
            PageButton::Page(5),
            PageButton::Page(6),
            PageButton::Ellipsis,
            PageButton::Page(10)
        ]
    );
}

#[tokio::test]
async fn test_total_pages_without_result() {
    let server = MockServer::start().await;
    let table = table_for(&server, "");
    assert_eq!(table.total_pages(), 1);
    assert_eq!(table.page_buttons(7), vec![PageButton::Page(1)]);
}
