//! Paginated table controller
//!
//! Owns the table state and keeps three things in step with it: the
//! [`Location`] mirror, the debounced search term and the current fetch.

use super::location::Location;
use super::pager::{page_buttons, PageButton};
use super::render::{render_table, TableRow};
use crate::debounce::Debouncer;
use crate::error::{Error, Result};
use crate::fetch::{Applied, FetchCoordinator};
use crate::http::HttpClient;
use crate::query;
use crate::types::{Sort, TableState};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Tunables for a [`PaginatedTable`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Page size used when the location carries none or an unknown one
    pub default_page_size: u32,
    /// Page sizes the table accepts
    pub page_size_options: Vec<u32>,
    /// Delay before a search term is sent
    pub debounce: Duration,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            page_size_options: vec![10, 20, 50, 100],
            debounce: Duration::from_millis(300),
        }
    }
}

/// Something the event loop did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// The search term settled and a fetch was issued for it
    QuerySettled { query: String, id: u64 },
    /// The current fetch succeeded
    Loaded { id: u64, total: u64 },
    /// The current fetch failed
    Failed { id: u64, message: String },
    /// A superseded fetch finished and was ignored
    Discarded { id: u64 },
}

impl From<Applied> for TableEvent {
    fn from(applied: Applied) -> Self {
        match applied {
            Applied::Loaded { id, total } => TableEvent::Loaded { id, total },
            Applied::Failed { id, message } => TableEvent::Failed { id, message },
            Applied::Stale { id } => TableEvent::Discarded { id },
        }
    }
}

/// Stateful table bound to one endpoint and one location
pub struct PaginatedTable<T, L> {
    options: TableOptions,
    state: TableState,
    debounced_query: String,
    debouncer: Debouncer<String>,
    fetch: FetchCoordinator<T>,
    location: L,
}

impl<T, L> PaginatedTable<T, L>
where
    T: DeserializeOwned + Send + 'static,
    L: Location,
{
    /// Restore state from `location` and issue the first fetch.
    ///
    /// Bad values in the location fall back to defaults field by field; a
    /// page size outside `page_size_options` becomes the default. The
    /// normalized state is written back before fetching.
    pub fn new(options: TableOptions, client: HttpClient, endpoint: &str, location: L) -> Self {
        let fallback = TableState::with_page_size(options.default_page_size);
        let mut state = query::decode(&location.current(), &fallback);
        if !options.page_size_options.contains(&state.page_size) {
            debug!(
                page_size = state.page_size,
                "Unknown page size in location, using default"
            );
            state.page_size = options.default_page_size;
        }

        let mut table = Self {
            debouncer: Debouncer::new(options.debounce),
            debounced_query: state.query.clone(),
            fetch: FetchCoordinator::new(client, endpoint),
            options,
            state,
            location,
        };
        table.commit();
        table
    }

    /// Go to `page`; zero is treated as 1
    pub fn set_page(&mut self, page: u32) {
        let page = page.max(1);
        if page == self.state.page {
            return;
        }
        self.state.page = page;
        self.commit();
    }

    /// Change the page size; only sizes from `page_size_options` are accepted
    pub fn set_page_size(&mut self, page_size: u32) -> Result<()> {
        if !self.options.page_size_options.contains(&page_size) {
            return Err(Error::invalid_page_size(
                page_size,
                &self.options.page_size_options,
            ));
        }
        if page_size != self.state.page_size {
            self.state.page_size = page_size;
            self.commit();
        }
        Ok(())
    }

    /// Update the search term and go back to page 1.
    ///
    /// The location is updated at once; the fetch waits for the debounce.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.state.query && self.state.page == 1 {
            return;
        }
        let page_changed = self.state.page != 1;
        self.state.query = query.clone();
        self.state.page = 1;
        self.write_location();
        // Page 1 loads now with the previous term; the new term follows the debounce
        if page_changed {
            self.fetch.begin(&self.fetch_params());
        }
        self.debouncer.push(query);
    }

    /// Set or clear the sort; an empty key clears it
    pub fn set_sort(&mut self, sort: Option<Sort>) {
        let sort = sort.filter(|sort| !sort.key.is_empty());
        if sort == self.state.sort {
            return;
        }
        self.state.sort = sort;
        self.commit();
    }

    /// Set a filter (an empty value removes it) and go back to page 1
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        let unchanged = match self.state.filters.get(&key) {
            Some(current) => *current == value,
            None => value.is_empty(),
        };
        if unchanged && self.state.page == 1 {
            return;
        }
        self.state.put_filter(key, value);
        self.state.page = 1;
        self.commit();
    }

    /// Remove every filter and go back to page 1
    pub fn clear_filters(&mut self) {
        if self.state.filters.is_empty() && self.state.page == 1 {
            return;
        }
        self.state.filters.clear();
        self.state.page = 1;
        self.commit();
    }

    /// Fetch the current parameters again
    pub fn refresh(&mut self) -> u64 {
        self.fetch.begin(&self.fetch_params())
    }

    /// Wait for the next debounce or fetch completion and handle it.
    ///
    /// Never resolves when neither is pending; see [`Self::is_busy`].
    pub async fn tick(&mut self) -> TableEvent {
        tokio::select! {
            query = self.debouncer.next() => {
                self.debounced_query.clone_from(&query);
                let id = self.fetch.begin(&self.fetch_params());
                TableEvent::QuerySettled { query, id }
            }
            completion = self.fetch.next_completion() => {
                self.fetch.apply(completion).into()
            }
        }
    }

    /// Tick until no debounce or fetch is pending
    pub async fn settle(&mut self) -> Vec<TableEvent> {
        let mut events = Vec::new();
        while self.is_busy() {
            events.push(self.tick().await);
        }
        events
    }

    /// Mirror the state into the location, then fetch it
    fn commit(&mut self) {
        self.write_location();
        self.fetch.begin(&self.fetch_params());
    }
}

impl<T, L> PaginatedTable<T, L>
where
    L: Location,
{
    /// Whether a search term is waiting or a fetch is in flight
    pub fn is_busy(&self) -> bool {
        self.debouncer.is_pending() || self.fetch.loading()
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Search term as typed, before debouncing
    pub fn input_query(&self) -> &str {
        &self.state.query
    }

    /// Search term the last fetch was issued with
    pub fn debounced_query(&self) -> &str {
        &self.debounced_query
    }

    /// Rows of the current page; empty while nothing is loaded or on error
    pub fn rows(&self) -> &[T] {
        self.fetch
            .result()
            .map_or(&[][..], |result| result.items.as_slice())
    }

    /// Row count across the whole filtered set
    pub fn total(&self) -> u64 {
        self.fetch.result().map_or(0, |result| result.total)
    }

    /// Number of pages for the current total, at least 1
    pub fn total_pages(&self) -> u32 {
        let page_size = u64::from(self.state.page_size.max(1));
        let pages = self.total().div_ceil(page_size).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Compacted pager for the current page
    pub fn page_buttons(&self, max: usize) -> Vec<PageButton> {
        page_buttons(self.state.page, self.total_pages(), max)
    }

    pub fn loading(&self) -> bool {
        self.fetch.loading()
    }

    pub fn error(&self) -> Option<&Error> {
        self.fetch.error()
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    fn fetch_params(&self) -> TableState {
        TableState {
            query: self.debounced_query.clone(),
            ..self.state.clone()
        }
    }

    fn write_location(&mut self) {
        self.location.replace(&query::encode(&self.state));
    }
}

impl<T, L> PaginatedTable<T, L>
where
    T: TableRow,
    L: Location,
{
    /// Draw the current page as a text table
    pub fn render(&self) -> String {
        let error = self.error().map(ToString::to_string);
        render_table(self.rows(), error.as_deref(), self.loading())
    }
}

impl<T, L: std::fmt::Debug> std::fmt::Debug for PaginatedTable<T, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedTable")
            .field("state", &self.state)
            .field("debounced_query", &self.debounced_query)
            .field("fetch", &self.fetch)
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}
