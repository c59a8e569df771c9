//! Deterministic mock dataset

use crate::types::Row;
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};

/// Statuses rows cycle through
pub const STATUSES: [&str; 3] = ["active", "inactive", "pending"];

/// Companies rows cycle through
pub const COMPANIES: [&str; 5] = ["Acme", "Globex", "Initech", "Analytica", "Umbrella"];

const FIRST_NAMES: [&str; 8] = [
    "Ada", "Grace", "Alan", "Linus", "Barbara", "Ken", "Margaret", "Dennis",
];

const LAST_NAMES: [&str; 7] = [
    "Lovelace", "Hopper", "Turing", "Torvalds", "Liskov", "Thompson", "Hamilton",
];

/// 2024-06-01T00:00:00Z, the newest `createdAt`
const NEWEST_CREATED_AT: i64 = 1_717_200_000;

/// Generate `count` rows; row `n` is created `n` days before the newest
pub fn generate_rows(count: usize) -> Vec<Row> {
    let newest = DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(NEWEST_CREATED_AT);

    (0..count)
        .map(|i| {
            let first = FIRST_NAMES[i % FIRST_NAMES.len()];
            let last = LAST_NAMES[i % LAST_NAMES.len()];
            let id = i as u32 + 1;
            let created_at = newest - TimeDelta::days(i as i64);

            Row {
                id,
                name: format!("{first} {last}"),
                email: format!(
                    "{}.{}{id}@example.com",
                    first.to_lowercase(),
                    last.to_lowercase()
                ),
                company: COMPANIES[i % COMPANIES.len()].to_string(),
                status: STATUSES[i % STATUSES.len()].to_string(),
                created_at: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            }
        })
        .collect()
}
