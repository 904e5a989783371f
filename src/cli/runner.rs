//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::{load_config, ClientConfig};
use crate::error::{Error, Result};
use crate::http::{with_query, ServiceClient};
use crate::pagination::{
    Fetcher, LinkedPage, MarkedPage, Page, Pager, SinglePage, LIMIT_PARAM,
};
use crate::types::PaginationKind;
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Arguments of the `list` command
#[derive(Debug, Clone)]
pub struct ListArgs {
    pub path: String,
    pub strategy: PaginationKind,
    pub items_key: String,
    pub links_key: Option<String>,
    pub marker_field: String,
    pub limit: Option<u32>,
    pub headers: Vec<(String, String)>,
    pub max_pages: Option<usize>,
}

/// Totals reported after a listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListSummary {
    pub pages: usize,
    pub items: usize,
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
        match &self.cli.command {
            Commands::List {
                path,
                strategy,
                items_key,
                links_key,
                marker_field,
                limit,
                headers,
                max_pages,
            } => {
                let args = ListArgs {
                    path: path.clone(),
                    strategy: *strategy,
                    items_key: items_key.clone(),
                    links_key: links_key.clone(),
                    marker_field: marker_field.clone(),
                    limit: *limit,
                    headers: headers.clone(),
                    max_pages: *max_pages,
                };

                let client = Arc::new(self.build_client()?);
                let stdout = std::io::stdout();
                let mut out = stdout.lock();
                list(&client, &args, &mut out).await?;
                Ok(())
            }
        }
    }

    /// Resolve the client configuration from the config file and flags
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => load_config(path)?,
            None => {
                let endpoint = self.cli.endpoint.as_ref().ok_or_else(|| {
                    Error::config("No endpoint given (use --endpoint or --config)")
                })?;
                ClientConfig::new(endpoint)
            }
        };

        if let Some(endpoint) = &self.cli.endpoint {
            config.endpoint.clone_from(endpoint);
        }
        if let Some(service_type) = &self.cli.service_type {
            config.service_type = Some(service_type.clone());
        }
        if let Some(version) = &self.cli.microversion {
            config.microversion = Some(version.clone());
        }

        config.validate()?;
        Ok(config)
    }

    fn build_client(&self) -> Result<ServiceClient> {
        self.client_config()?.build_client()
    }
}

/// List a collection, writing each item as one JSON line to `out`
pub async fn list<W: Write>(
    client: &Arc<ServiceClient>,
    args: &ListArgs,
    out: &mut W,
) -> Result<ListSummary> {
    if args.max_pages == Some(0) {
        info!("Page limit is 0, nothing to list");
        return Ok(ListSummary::default());
    }

    let mut url = client.service_url(&[args.path.as_str()])?;
    if let Some(limit) = args.limit {
        url = with_query(url, &[(LIMIT_PARAM.to_string(), limit.to_string())]);
    }

    let fetcher: Arc<dyn Fetcher> = client.clone();
    let items_key = args.items_key.clone();
    let started = Instant::now();

    let summary = match args.strategy {
        PaginationKind::Single => {
            let pager = Pager::new(fetcher, url, move |r| SinglePage::new(r, items_key.clone()));
            drain(with_args(pager, args), args.max_pages, out).await?
        }
        PaginationKind::Linked => {
            let links_key = args
                .links_key
                .clone()
                .unwrap_or_else(|| format!("{}_links", args.items_key));
            let pager = Pager::new(fetcher, url, move |r| {
                LinkedPage::new(r, items_key.clone(), links_key.clone())
            });
            drain(with_args(pager, args), args.max_pages, out).await?
        }
        PaginationKind::Marked => {
            let marker_field = args.marker_field.clone();
            let pager = Pager::new(fetcher, url, move |r| {
                MarkedPage::with_marker_field(r, items_key.clone(), marker_field.clone())
            });
            drain(with_args(pager, args), args.max_pages, out).await?
        }
    };

    info!(
        "Listed {} items from {} pages in {:?}",
        summary.items,
        summary.pages,
        started.elapsed()
    );
    Ok(summary)
}

fn with_args<P: Page>(pager: Pager<P>, args: &ListArgs) -> Pager<P> {
    args.headers
        .iter()
        .fold(pager, |pager, (name, value)| pager.with_header(name, value))
}

async fn drain<P: Page, W: Write>(
    pager: Pager<P>,
    max_pages: Option<usize>,
    out: &mut W,
) -> Result<ListSummary> {
    let mut summary = ListSummary::default();

    pager
        .each_page(|page| {
            for item in page.items()? {
                writeln!(out, "{}", serde_json::to_string(item)?)?;
                summary.items += 1;
            }
            summary.pages += 1;
            Ok(max_pages.map_or(true, |max| summary.pages < max))
        })
        .await?;

    out.flush()?;
    Ok(summary)
}
