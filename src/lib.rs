// src/lib.rs
//! Wildberries listing parser: resolve a category or keyword, page through the
//! listing endpoint, look up sales per product and export a CSV.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod http;
pub mod listing;
pub mod logging;
pub mod run;
pub mod sales;

#[cfg(test)]
mod testing;

pub use error::ParserError;
pub use http::{ClientError, HttpClient, Transport, TransportError};
pub use run::{RunOptions, RunOutcome, RunRequest, run};
