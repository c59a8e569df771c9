//! Plain-text table rendering

use crate::types::Row;

/// A value that can be drawn as one table row
pub trait TableRow {
    /// Column headers
    fn headers() -> &'static [&'static str];

    /// Cell text, one per header
    fn cells(&self) -> Vec<String>;
}

impl TableRow for Row {
    fn headers() -> &'static [&'static str] {
        &["id", "name", "email", "company", "status", "createdAt"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.company.clone(),
            self.status.clone(),
            self.created_at.clone(),
        ]
    }
}

/// Draw `rows` as a boxed text table.
///
/// An error replaces the data with a single row spanning every column; so
/// does an empty page, with a loading or no-results notice.
pub fn render_table<T: TableRow>(rows: &[T], error: Option<&str>, loading: bool) -> String {
    let headers = T::headers();
    let cells: Vec<Vec<String>> = if error.is_some() {
        Vec::new()
    } else {
        rows.iter().map(T::cells).collect()
    };

    let notice = match (error, cells.is_empty(), loading) {
        (Some(message), _, _) => Some(format!("Error: {message}")),
        (None, true, true) => Some("Loading…".to_string()),
        (None, true, false) => Some("No results".to_string()),
        (None, false, _) => None,
    };

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    // Width between the outer borders
    let mut inner = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
    if let Some(ref notice) = notice {
        let needed = notice.chars().count();
        if needed > inner {
            if let Some(last) = widths.last_mut() {
                *last += needed - inner;
            }
            inner = needed;
        }
    }

    let separator = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );

    let mut out = String::new();
    out.push_str(&separator);
    out.push('\n');
    out.push_str(&format_line(headers.iter().map(|h| (*h).to_string()), &widths));
    out.push_str(&separator);
    out.push('\n');

    match notice {
        Some(notice) => {
            out.push_str(&format!("| {notice:<inner$} |\n"));
        }
        None => {
            for row in cells {
                out.push_str(&format_line(row.into_iter(), &widths));
            }
        }
    }

    out.push_str(&separator);
    out.push('\n');
    out
}

fn format_line(cells: impl Iterator<Item = String>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    format!("| {} |\n", padded.join(" | "))
}
