//! Mock query endpoint
//!
//! Serves a generated user dataset over HTTP with the same query-string
//! convention the table writes:
//!
//! ```text
//! GET /api/users?page=1&pageSize=10&q=acme&sort=name:asc&filters[status]=active
//! -> {"items": [...], "total": 167, "page": 1, "pageSize": 10}
//! ```
//!
//! Search and filters run before sorting; sorting runs before pagination.

mod dataset;
mod engine;
mod server;

pub use dataset::{generate_rows, COMPANIES, STATUSES};
pub use engine::{run_query, EndpointQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use server::{router, serve, serve_on, Dataset, EndpointConfig, USERS_PATH};
