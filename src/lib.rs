//! # paged-table
//!
//! A paginated, filterable, searchable data table whose state lives in a
//! URL query string, plus the mock endpoint it queries.
//!
//! ## Features
//!
//! - **URL-synced state**: page, page size, search, sort and filters
//!   round-trip through a flat query string
//! - **Debounced search**: the search term is sent only once typing stops
//! - **Latest-wins fetching**: superseded requests are aborted and their
//!   responses ignored
//! - **Pager compaction**: `1 … 4 [5] 6 … 10`
//! - **Mock endpoint**: axum server over a generated dataset
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use paged_table::http::{HttpClient, HttpClientConfig};
//! use paged_table::table::{MemoryLocation, PaginatedTable, TableOptions};
//! use paged_table::types::Row;
//!
//! #[tokio::main]
//! async fn main() -> paged_table::Result<()> {
//!     let client = HttpClient::with_config(
//!         HttpClientConfig::builder().base_url("http://127.0.0.1:8080").build(),
//!     )?;
//!     let mut table: PaginatedTable<Row, _> = PaginatedTable::new(
//!         TableOptions::default(),
//!         client,
//!         "/api/users",
//!         MemoryLocation::new("page=1&filters[status]=active"),
//!     );
//!
//!     table.set_query("analytica");
//!     table.settle().await;
//!     print!("{}", table.render());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       PaginatedTable                         │
//! │  set_page  set_page_size  set_query  set_sort  set_filter    │
//! │  clear_filters  refresh  page_buttons  tick  settle          │
//! └──────────────────────────────────────────────────────────────┘
//!        │               │                │               │
//! ┌──────┴─────┬─────────┴─────┬──────────┴─────┬─────────┴─────┐
//! │   query    │   debounce    │     fetch      │   Location    │
//! │ encode     │ trailing      │ request ids    │ address bar   │
//! │ decode     │ cancel-safe   │ abort + drop   │ mirror        │
//! └────────────┴───────────────┴────────────────┴───────────────┘
//!                                      │ HTTP GET
//!                        ┌─────────────┴─────────────┐
//!                        │  endpoint (axum, mock)    │
//!                        │  search → filter → sort   │
//!                        │  → paginate               │
//!                        └───────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Table state and wire types
pub mod types;

/// Query string codec
pub mod query;

/// Trailing debounce
pub mod debounce;

/// HTTP client with optional rate limiting
pub mod http;

/// Latest-wins fetch coordination
pub mod fetch;

/// Paginated table controller, pager and rendering
pub mod table;

/// Mock query endpoint
pub mod endpoint;

/// Application configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use table::{Location, MemoryLocation, PaginatedTable, TableOptions};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
