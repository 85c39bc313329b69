// src/sales.rs
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::http::{Transport, TransportError};
use crate::listing::{ProductRecord, SoldCount};

#[derive(Debug, Error)]
pub enum SalesError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("unexpected sales response for product {id}: {source}")]
    Json {
        id: u64,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct OrderQuantity {
    qnt: u64,
}

/// Result of one sales lookup that the enricher can absorb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalesLookup {
    Count(u64),
    /// Connecting to the sales endpoint timed out.
    Timeout,
}

impl From<SalesLookup> for SoldCount {
    fn from(lookup: SalesLookup) -> Self {
        match lookup {
            SalesLookup::Count(n) => SoldCount::Count(n),
            SalesLookup::Timeout => SoldCount::NoData,
        }
    }
}

pub struct SalesEnricher<'a, T> {
    transport: &'a T,
    base_url: &'a str,
}

impl<'a, T: Transport> SalesEnricher<'a, T> {
    pub fn new(transport: &'a T, base_url: &'a str) -> Self {
        Self { transport, base_url }
    }

    pub fn lookup_url(&self, id: u64) -> String {
        format!("{}/by-nm/?nm={}", self.base_url.trim_end_matches('/'), id)
    }

    /// Units sold for `id`: the first entry's `qnt`, or 0 when the list is empty.
    /// Only a connect timeout is absorbed; anything else is an error.
    pub async fn lookup(&self, id: u64) -> Result<SalesLookup, SalesError> {
        let body = match self.transport.get_text(&self.lookup_url(id)).await {
            Ok(body) => body,
            Err(TransportError::ConnectTimeout { .. }) => return Ok(SalesLookup::Timeout),
            Err(e) => return Err(e.into()),
        };

        let entries: Vec<OrderQuantity> =
            serde_json::from_str(&body).map_err(|source| SalesError::Json { id, source })?;
        Ok(SalesLookup::Count(entries.first().map_or(0, |e| e.qnt)))
    }

    /// Set `sold` on every record, in place and in order.
    ///
    /// A timed-out lookup records `SoldCount::NoData` and moves on; any other
    /// failure stops the pass and is returned.
    pub async fn enrich(&self, records: &mut [ProductRecord]) -> Result<(), SalesError> {
        let total = records.len();
        for (index, record) in records.iter_mut().enumerate() {
            let lookup = self.lookup(record.id).await?;
            if lookup == SalesLookup::Timeout {
                warn!(id = record.id, "sales lookup timed out");
            }
            record.sold = Some(lookup.into());
            info!("cards collected: {} of {}", index + 1, total);
        }
        Ok(())
    }
}
