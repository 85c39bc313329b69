// src/listing/mod.rs
pub mod collector;
pub mod page;
pub mod plan;
pub mod record;

pub use collector::{Collection, StopReason, collect};
pub use page::{FetchError, Page, PageFetcher};
pub use plan::ListingPlan;
pub use record::{COLUMNS, ProductRecord, SoldCount};
