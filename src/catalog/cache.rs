// src/catalog/cache.rs
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use super::tree::{CatalogParseError, CategoryDescriptor, parse_catalog};
use crate::config::{CatalogSettings, RefreshPolicy};
use crate::http::{Transport, TransportError};

#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("catalog download is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write catalog cache {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Decide whether a cache file last modified on `modified` must be downloaded again.
/// `None` means there is no usable file.
pub fn needs_refresh(policy: RefreshPolicy, modified: Option<NaiveDate>, run_date: NaiveDate) -> bool {
    match (modified, policy) {
        (None, _) => true,
        (Some(day), RefreshPolicy::Stale) => day < run_date,
        (Some(day), RefreshPolicy::FutureOnly) => day > run_date,
    }
}

fn modified_date(path: &Path) -> Option<NaiveDate> {
    let mtime = fs::metadata(path).and_then(|m| m.modified()).ok()?;
    Some(DateTime::<Local>::from(mtime).date_naive())
}

/// Make sure the catalog cache exists and is fresh; returns its path.
pub async fn ensure_catalog<T: Transport>(
    transport: &T,
    settings: &CatalogSettings,
    run_date: NaiveDate,
) -> Result<PathBuf, CacheError> {
    let path = settings.cache_path.clone();
    let modified = modified_date(&path);

    if !needs_refresh(settings.refresh, modified, run_date) {
        info!(path = %path.display(), "catalog cache is current");
        return Ok(path);
    }

    info!(url = %settings.menu_url, "downloading catalog");
    let body = transport.get_text(&settings.menu_url).await?;
    let menu: Value = serde_json::from_str(&body)?;
    let pretty = serde_json::to_string_pretty(&menu)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| CacheError::Write {
            path: path.clone(),
            source,
        })?;
    }
    fs::write(&path, pretty).map_err(|source| CacheError::Write {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), "catalog saved");
    Ok(path)
}

pub fn read_catalog(path: &Path) -> Result<Vec<CategoryDescriptor>, CatalogParseError> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogParseError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_catalog(&raw)
}

/// Read the flattened catalog, degrading to an empty list when the file is unusable.
pub fn load_catalog(path: &Path) -> Vec<CategoryDescriptor> {
    match read_catalog(path) {
        Ok(list) => {
            info!(categories = list.len(), "catalog loaded");
            list
        }
        Err(e) => {
            warn!("error reading catalog: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn settings(dir: &Path, refresh: RefreshPolicy) -> CatalogSettings {
        CatalogSettings {
            menu_url: "http://menu.test/main-menu.json".into(),
            cache_path: dir.join("nested").join("catalogue.json"),
            refresh,
        }
    }

    #[test]
    fn stale_policy_refreshes_older_files_only() {
        let today = day(2024, 5, 10);
        assert!(needs_refresh(RefreshPolicy::Stale, None, today));
        assert!(needs_refresh(RefreshPolicy::Stale, Some(day(2024, 5, 9)), today));
        assert!(!needs_refresh(RefreshPolicy::Stale, Some(today), today));
        assert!(!needs_refresh(RefreshPolicy::Stale, Some(day(2024, 5, 11)), today));
    }

    #[test]
    fn future_only_policy_keeps_old_files() {
        let today = day(2024, 5, 10);
        assert!(needs_refresh(RefreshPolicy::FutureOnly, None, today));
        assert!(!needs_refresh(RefreshPolicy::FutureOnly, Some(day(2020, 1, 1)), today));
        assert!(!needs_refresh(RefreshPolicy::FutureOnly, Some(today), today));
        assert!(needs_refresh(RefreshPolicy::FutureOnly, Some(day(2024, 5, 11)), today));
    }

    #[tokio::test]
    async fn missing_cache_is_downloaded_and_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path(), RefreshPolicy::Stale);
        let transport = ScriptedTransport::new().ok(
            &settings.menu_url,
            r#"[{"name":"Обувь","url":"/shoes","shard":"s","query":"q"}]"#,
        );

        let path = ensure_catalog(&transport, &settings, day(2024, 5, 10)).await.unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n  {"));
        assert!(written.contains("Обувь"));
        assert_eq!(transport.requests(), [settings.menu_url.clone()]);
        assert_eq!(load_catalog(&path)[0].name, "Обувь");
    }

    #[tokio::test]
    async fn fresh_cache_is_not_downloaded() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path(), RefreshPolicy::Stale);
        fs::create_dir_all(settings.cache_path.parent().unwrap()).unwrap();
        fs::write(&settings.cache_path, "[]").unwrap();
        let transport = ScriptedTransport::new();

        let today = Local::now().date_naive();
        ensure_catalog(&transport, &settings, today).await.unwrap();
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn malformed_download_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path(), RefreshPolicy::Stale);
        let transport = ScriptedTransport::new().ok(&settings.menu_url, "not json");

        let err = ensure_catalog(&transport, &settings, day(2024, 5, 10)).await.unwrap_err();
        assert!(matches!(err, CacheError::Json(_)));
        assert!(!settings.cache_path.exists());
    }

    #[test]
    fn unreadable_catalog_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ truncated").unwrap();
        assert!(load_catalog(&path).is_empty());
        assert!(load_catalog(&dir.path().join("missing.json")).is_empty());
    }
}
