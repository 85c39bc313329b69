// src/run.rs
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::catalog::{ensure_catalog, load_catalog, resolve};
use crate::config::Settings;
use crate::error::ParserError;
use crate::export::export;
use crate::http::Transport;
use crate::listing::{ListingPlan, PageFetcher, StopReason, collect};
use crate::sales::SalesEnricher;

/// What the user asked for: a whole category, or a keyword search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunRequest {
    /// Category name, or its storefront URL with or without the site origin.
    Category { input: String },
    Search { keyword: String },
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub run_date: NaiveDate,
    pub enrich_sales: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            run_date: Local::now().date_naive(),
            enrich_sales: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    CategoryNotFound { input: String },
    Exported {
        path: PathBuf,
        records: usize,
        stop: StopReason,
    },
}

pub async fn run<T: Transport>(
    transport: &T,
    settings: &Settings,
    request: &RunRequest,
    options: &RunOptions,
) -> Result<RunOutcome, ParserError> {
    let (plan, stem) = match request {
        RunRequest::Category { input } => {
            let cache = ensure_catalog(transport, &settings.catalog, options.run_date).await?;
            let catalog = load_catalog(&cache);
            let Some(category) = resolve(&catalog, &settings.site.base_url, input) else {
                info!(input = %input, "category not found");
                return Ok(RunOutcome::CategoryNotFound {
                    input: input.clone(),
                });
            };
            info!("found category: {}", category.name);
            (
                ListingPlan::category(&settings.listing, category),
                category.name.clone(),
            )
        }
        RunRequest::Search { keyword } => {
            (ListingPlan::search(&settings.listing, keyword), keyword.clone())
        }
    };

    let fetcher = PageFetcher::new(transport, &settings.site.base_url)
        .with_diagnostics(&settings.output.diagnostics_path);
    let collection = collect(&fetcher, &plan).await;
    info!(
        records = collection.records.len(),
        pages = collection.pages_requested,
        stop = ?collection.stop,
        "collection finished"
    );

    let mut records = collection.records;
    if options.enrich_sales {
        SalesEnricher::new(transport, &settings.sales.base_url)
            .enrich(&mut records)
            .await?;
    }

    let path = export(&settings.output.dir, &stem, options.run_date, &records)?;
    info!("data saved to {}", path.display());

    Ok(RunOutcome::Exported {
        path,
        records: records.len(),
        stop: collection.stop,
    })
}
