// src/listing/collector.rs
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::page::{FetchError, PageFetcher};
use super::plan::ListingPlan;
use super::record::ProductRecord;
use crate::http::Transport;

/// Why paging stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// This page came back without products.
    Exhausted { page: u32 },
    /// Every page up to the cap had products.
    CapReached,
    /// Network failure or non-2xx on this page; treated as end of results.
    TransportFailed { page: u32 },
    /// This page could not be decoded; treated as end of results.
    Malformed { page: u32 },
}

#[derive(Debug)]
pub struct Collection {
    /// Page order, then order within the page. Duplicates across pages are kept.
    pub records: Vec<ProductRecord>,
    pub pages_requested: u32,
    pub stop: StopReason,
}

/// Walk pages `1..=plan.max_pages`, accumulating records until the first empty
/// page or failed fetch. Never issues more than `max_pages` requests.
pub async fn collect<T: Transport>(fetcher: &PageFetcher<'_, T>, plan: &ListingPlan) -> Collection {
    let mut records = Vec::new();
    let mut pages_requested = 0;

    for page in 1..=plan.max_pages {
        info!("loading products from page {page}");
        let url = plan.page_url(page);
        debug!(%url, "listing request");
        pages_requested += 1;

        let stop = match fetcher.fetch_page(&url).await {
            Ok(p) if p.is_empty() => {
                info!("product loading complete");
                Some(StopReason::Exhausted { page })
            }
            Ok(p) => {
                info!("added products: {}", p.records.len());
                records.extend(p.records);
                None
            }
            Err(FetchError::Transport(e)) => {
                warn!("request error: {e}");
                Some(StopReason::TransportFailed { page })
            }
            Err(e @ FetchError::MalformedPage { .. }) => {
                warn!("{e}");
                Some(StopReason::Malformed { page })
            }
        };

        if let Some(stop) = stop {
            return Collection {
                records,
                pages_requested,
                stop,
            };
        }

        if !plan.pacing.is_zero() && page < plan.max_pages {
            sleep(plan.pacing).await;
        }
    }

    Collection {
        records,
        pages_requested,
        stop: StopReason::CapReached,
    }
}
