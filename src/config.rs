//! Layered settings: built-in defaults, an optional TOML file, then `WB_SCRAPE__*` env vars.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

const CONFIG_FILE: &str = "wb_scrape";
const ENV_PREFIX: &str = "WB_SCRAPE";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Build(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub site: SiteSettings,
    pub catalog: CatalogSettings,
    pub listing: ListingSettings,
    pub sales: SalesSettings,
    pub http: HttpSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteSettings {
    /// Storefront origin; stripped from category URLs and used for product links.
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogSettings {
    pub menu_url: String,
    pub cache_path: PathBuf,
    pub refresh: RefreshPolicy,
}

/// When an existing catalog cache file gets downloaded again.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    /// Refresh when the file was last modified before the run date.
    #[default]
    Stale,
    /// Refresh only when the file's modification date is after the run date.
    FutureOnly,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListingSettings {
    pub catalog_base: String,
    pub search_base: String,
    pub currency: String,
    pub dest: i64,
    pub sort: String,
    pub spp: u32,
    pub category_max_pages: u32,
    pub search_max_pages: u32,
    pub category_pacing_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SalesSettings {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpSettings {
    pub user_agent: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputSettings {
    pub dir: PathBuf,
    /// Raw body of a listing response that failed to parse lands here.
    pub diagnostics_path: PathBuf,
}

/// Load settings, reading `explicit` instead of `./wb_scrape.toml` when given.
pub fn load(explicit: Option<&Path>) -> Result<Settings, SettingsError> {
    let file = match explicit {
        Some(path) => File::from(path).required(true),
        None => File::with_name(CONFIG_FILE).required(false),
    };

    let cfg = defaults()?
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?
        .try_deserialize()?;
    Ok(cfg)
}

/// Built-in defaults only; no file or environment lookups.
pub fn load_defaults() -> Result<Settings, SettingsError> {
    Ok(defaults()?.build()?.try_deserialize()?)
}

fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, SettingsError> {
    let builder = Config::builder()
        .set_default("site.base_url", "https://www.wildberries.ru")?
        .set_default(
            "catalog.menu_url",
            "https://static-basket-01.wb.ru/vol0/data/main-menu-ru-ru-v2.json",
        )?
        .set_default("catalog.cache_path", "wb_catalogue.json")?
        .set_default("catalog.refresh", "stale")?
        .set_default("listing.catalog_base", "https://catalog.wb.ru")?
        .set_default("listing.search_base", "https://search.wb.ru")?
        .set_default("listing.currency", "rub")?
        .set_default("listing.dest", -1_257_786_i64)?
        .set_default("listing.sort", "popular")?
        .set_default("listing.spp", 24_i64)?
        .set_default("listing.category_max_pages", 9_i64)?
        .set_default("listing.search_max_pages", 100_i64)?
        .set_default("listing.category_pacing_ms", 1_000_i64)?
        .set_default("sales.base_url", "https://product-order-qnt.wildberries.ru")?
        .set_default("http.user_agent", "Chrome/51.0.2704.103 Safari/537.36")?
        .set_default("http.timeout_secs", 30_i64)?
        .set_default("http.connect_timeout_secs", 10_i64)?
        .set_default("output.dir", ".")?
        .set_default("output.diagnostics_path", "error_response.html")?;
    Ok(builder)
}
