//! Pager compaction
//!
//! Turns a page count into the short list of buttons a pager shows: first
//! and last page, the neighbours of the current page, and an ellipsis for
//! every skipped run.

use serde::{Serialize, Serializer};
use std::fmt;

/// One entry of a compacted pager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButton {
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PageButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageButton::Page(page) => write!(f, "{page}"),
            PageButton::Ellipsis => f.write_str("…"),
        }
    }
}

impl Serialize for PageButton {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageButton::Page(page) => serializer.serialize_u32(*page),
            PageButton::Ellipsis => serializer.serialize_str("…"),
        }
    }
}

/// Compact `1..=total_pages` around `current`.
///
/// With `total_pages <= max` every page is listed. A zero page count is
/// treated as a single page.
pub fn page_buttons(current: u32, total_pages: u32, max: usize) -> Vec<PageButton> {
    let total_pages = total_pages.max(1);
    if total_pages as usize <= max {
        return (1..=total_pages).map(PageButton::Page).collect();
    }

    let current = current.clamp(1, total_pages);
    let mut pages = vec![
        1,
        current.saturating_sub(1),
        current,
        current.saturating_add(1),
        total_pages,
    ];
    pages.retain(|page| (1..=total_pages).contains(page));
    pages.sort_unstable();
    pages.dedup();

    let mut buttons = Vec::with_capacity(pages.len() * 2);
    let mut previous: Option<u32> = None;
    for page in pages {
        if previous.is_some_and(|prev| page - prev > 1) {
            buttons.push(PageButton::Ellipsis);
        }
        buttons.push(PageButton::Page(page));
        previous = Some(page);
    }
    buttons
}

/// Render buttons as a single line, e.g. `1 … 4 [5] 6 … 10`
pub fn format_buttons(buttons: &[PageButton], current: u32) -> String {
    buttons
        .iter()
        .map(|button| match button {
            PageButton::Page(page) if *page == current => format!("[{page}]"),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
