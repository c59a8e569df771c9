//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::AppConfig;
use crate::endpoint;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::table::{format_buttons, page_buttons, Location, MemoryLocation, PaginatedTable};
use crate::types::{Row, Sort};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Parse `name=value` into a filter pair
pub fn parse_filter(value: &str) -> Result<(String, String)> {
    match value.split_once('=') {
        Some((name, filter)) if !name.is_empty() => Ok((name.to_string(), filter.to_string())),
        _ => Err(Error::InvalidFilter {
            value: value.to_string(),
        }),
    }
}

/// Table changes requested on the command line
#[derive(Debug)]
struct QueryArgs<'a> {
    url: &'a str,
    base_url: Option<&'a str>,
    page: Option<u32>,
    page_size: Option<u32>,
    q: Option<&'a str>,
    sort: Option<&'a str>,
    filters: &'a [String],
    clear_filters: bool,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;

        match &self.cli.command {
            Commands::Serve {
                port,
                rows,
                latency_ms,
            } => {
                let mut endpoint_config = config.endpoint_config();
                if let Some(port) = port {
                    endpoint_config.port = *port;
                }
                if let Some(rows) = rows {
                    endpoint_config.rows = *rows;
                }
                if let Some(latency_ms) = latency_ms {
                    endpoint_config.latency = Duration::from_millis(*latency_ms);
                }
                endpoint::serve(&endpoint_config).await
            }
            Commands::Query {
                url,
                base_url,
                page,
                page_size,
                q,
                sort,
                filters,
                clear_filters,
            } => {
                let args = QueryArgs {
                    url,
                    base_url: base_url.as_deref(),
                    page: *page,
                    page_size: *page_size,
                    q: q.as_deref(),
                    sort: sort.as_deref(),
                    filters,
                    clear_filters: *clear_filters,
                };
                self.query(&config, args).await
            }
            Commands::Pager {
                current,
                total,
                max,
            } => self.pager(&config, *current, *total, *max),
        }
    }

    /// Load the config file, or defaults when none was given
    fn load_config(&self) -> Result<AppConfig> {
        match &self.cli.config {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                AppConfig::load(path)
            }
            None => Ok(AppConfig::default()),
        }
    }

    async fn query(&self, config: &AppConfig, args: QueryArgs<'_>) -> Result<()> {
        // Validate user input before anything is sent
        let sort = args.sort.map(str::parse::<Sort>).transpose()?;
        let filters = args
            .filters
            .iter()
            .map(|f| parse_filter(f))
            .collect::<Result<Vec<_>>>()?;

        let mut http_config = config.http_client_config();
        if let Some(base_url) = args.base_url {
            url::Url::parse(base_url)?;
            http_config.base_url = Some(base_url.to_string());
        }
        let client = HttpClient::with_config(http_config)?;

        let mut table: PaginatedTable<Row, MemoryLocation> = PaginatedTable::new(
            config.table_options(),
            client,
            &config.endpoint.path,
            MemoryLocation::new(args.url),
        );

        if args.clear_filters {
            table.clear_filters();
        }
        for (name, value) in filters {
            table.set_filter(name, value);
        }
        if let Some(sort) = sort {
            table.set_sort(Some(sort));
        }
        if let Some(page_size) = args.page_size {
            table.set_page_size(page_size)?;
        }
        if let Some(q) = args.q {
            table.set_query(q);
        }
        // Last, since search and filters reset the page
        if let Some(page) = args.page {
            table.set_page(page);
        }

        let events = table.settle().await;
        debug!(?events, "Table settled");

        let max_buttons = config.table.max_page_buttons;
        match self.cli.format {
            OutputFormat::Pretty => {
                print!("{}", table.render());
                println!(
                    "Page {} of {} ({} rows)",
                    table.state().page,
                    table.total_pages(),
                    table.total()
                );
                println!(
                    "{}",
                    format_buttons(&table.page_buttons(max_buttons), table.state().page)
                );
                println!("?{}", table.location().current());
            }
            OutputFormat::Json => {
                let output = json!({
                    "location": table.location().current(),
                    "page": table.state().page,
                    "pageSize": table.state().page_size,
                    "total": table.total(),
                    "totalPages": table.total_pages(),
                    "items": table.rows(),
                    "pager": table.page_buttons(max_buttons),
                    "error": table.error().map(ToString::to_string),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }

        Ok(())
    }

    fn pager(&self, config: &AppConfig, current: u32, total: u32, max: Option<usize>) -> Result<()> {
        let max = max.unwrap_or(config.table.max_page_buttons);
        let buttons = page_buttons(current, total, max);

        match self.cli.format {
            OutputFormat::Pretty => println!("{}", format_buttons(&buttons, current)),
            OutputFormat::Json => println!("{}", serde_json::to_string(&buttons)?),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("status=active").unwrap(),
            ("status".to_string(), "active".to_string())
        );
        assert_eq!(
            parse_filter("createdAtFrom=2024-01-01T00:00:00.000Z").unwrap(),
            (
                "createdAtFrom".to_string(),
                "2024-01-01T00:00:00.000Z".to_string()
            )
        );
        assert_eq!(
            parse_filter("status=").unwrap(),
            ("status".to_string(), String::new())
        );
        assert!(parse_filter("status").is_err());
        assert!(parse_filter("=active").is_err());
    }

    #[test]
    fn test_cli_parses_query_command() {
        let cli = Cli::parse_from([
            "paged-table",
            "--format",
            "json",
            "query",
            "--url",
            "page=2",
            "--filter",
            "status=active",
            "--filter",
            "company=Acme",
            "-q",
            "ana",
        ]);

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Query {
                url, filters, q, ..
            } => {
                assert_eq!(url, "page=2");
                assert_eq!(filters, vec!["status=active", "company=Acme"]);
                assert_eq!(q.as_deref(), Some("ana"));
            }
            other => panic!("Expected Query, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parses_pager_command() {
        let cli = Cli::parse_from(["paged-table", "pager", "--current", "5", "--total", "10"]);
        assert!(matches!(
            cli.command,
            Commands::Pager {
                current: 5,
                total: 10,
                max: None
            }
        ));
    }

    #[tokio::test]
    async fn test_query_rejects_bad_sort_before_fetching() {
        let cli = Cli::parse_from(["paged-table", "query", "--sort", "name"]);
        let err = Runner::new(cli).run().await.unwrap_err();
        assert!(matches!(err, Error::InvalidSort { .. }));
    }
}
