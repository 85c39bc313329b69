// src/catalog/mod.rs
pub mod cache;
pub mod resolver;
pub mod tree;

pub use cache::{CacheError, ensure_catalog, load_catalog};
pub use resolver::resolve;
pub use tree::{CatalogParseError, CategoryDescriptor, flatten};
