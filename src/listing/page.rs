// src/listing/page.rs
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use super::record::{ProductRecord, RawProduct};
use crate::http::{Transport, TransportError};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("malformed listing page {url}: {source}")]
    MalformedPage {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct ListingResponse {
    #[serde(default)]
    data: Option<ListingData>,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    products: Option<Vec<RawProduct>>,
}

/// Records from one listing page.
#[derive(Debug, Default)]
pub struct Page {
    pub records: Vec<ProductRecord>,
}

impl Page {
    /// An empty products list and a missing `data`/`products` key both mean "no more results".
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub fn parse_page(body: &str, site_base: &str) -> Result<Page, serde_json::Error> {
    let response: ListingResponse = serde_json::from_str(body)?;
    let records = response
        .data
        .and_then(|d| d.products)
        .unwrap_or_default()
        .into_iter()
        .map(|raw| ProductRecord::from_raw(raw, site_base))
        .collect();
    Ok(Page { records })
}

pub struct PageFetcher<'a, T> {
    transport: &'a T,
    site_base: &'a str,
    diagnostics: Option<&'a Path>,
}

impl<'a, T: Transport> PageFetcher<'a, T> {
    pub fn new(transport: &'a T, site_base: &'a str) -> Self {
        Self {
            transport,
            site_base,
            diagnostics: None,
        }
    }

    /// Dump the raw body of unparseable pages to `path`.
    pub fn with_diagnostics(mut self, path: &'a Path) -> Self {
        self.diagnostics = Some(path);
        self
    }

    pub async fn fetch_page(&self, url: &str) -> Result<Page, FetchError> {
        let body = self.transport.get_text(url).await?;
        parse_page(&body, self.site_base).map_err(|source| {
            self.dump_body(&body);
            FetchError::MalformedPage {
                url: url.to_string(),
                source,
            }
        })
    }

    fn dump_body(&self, body: &str) {
        let Some(path) = self.diagnostics else { return };
        if let Err(e) = fs::write(path, body) {
            warn!(path = %path.display(), "could not save malformed response: {e}");
        } else {
            warn!(path = %path.display(), "malformed response saved");
        }
    }
}
