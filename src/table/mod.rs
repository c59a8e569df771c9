//! Paginated table state
//!
//! [`PaginatedTable`] composes the query codec, the debouncer and the fetch
//! coordinator into one stateful unit:
//!
//! ```text
//! set_page / set_filter / ...  ──> state ──> Location::replace(encode(state))
//!                                     │
//! set_query ──> Debouncer ──settle────┴──> FetchCoordinator::begin
//!                                                 │
//! tick() <── Completion (latest id only) <────────┘
//! ```
//!
//! Changing the search term or any filter sends the table back to page 1.

mod controller;
mod location;
mod pager;
mod render;

pub use controller::{PaginatedTable, TableEvent, TableOptions};
pub use location::{Location, MemoryLocation};
pub use pager::{format_buttons, page_buttons, PageButton};
pub use render::{render_table, TableRow};

#[cfg(test)]
mod tests;
