//! Crate-level error for a whole parser run.

use thiserror::Error;

use crate::catalog::CacheError;
use crate::export::ExportError;
use crate::sales::SalesError;

/// Failures that end a run. Empty catalogs, truncated paging and timed-out
/// sales lookups degrade instead and never show up here.
#[derive(Debug, Error)]
pub enum ParserError {
    #[error(transparent)]
    Catalog(#[from] CacheError),
    #[error(transparent)]
    Sales(#[from] SalesError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
