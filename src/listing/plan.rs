// src/listing/plan.rs
use std::time::Duration;

use crate::catalog::CategoryDescriptor;
use crate::config::ListingSettings;

const PAGE_SLOT: &str = "{page}";

/// Where and how far to page: a URL template with a `{page}` slot, a hard page
/// cap and the pause taken after each page that produced records.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPlan {
    pub template: String,
    pub max_pages: u32,
    pub pacing: Duration,
}

impl ListingPlan {
    pub fn category(settings: &ListingSettings, category: &CategoryDescriptor) -> Self {
        let template = format!(
            "{}/catalog/{}/catalog?appType=1&{}&curr={}&dest={}&page={PAGE_SLOT}&sort={}&spp={}",
            settings.catalog_base.trim_end_matches('/'),
            category.shard,
            category.query,
            settings.currency,
            settings.dest,
            settings.sort,
            settings.spp,
        );
        Self {
            template,
            max_pages: settings.category_max_pages,
            pacing: Duration::from_millis(settings.category_pacing_ms),
        }
    }

    pub fn search(settings: &ListingSettings, keyword: &str) -> Self {
        let template = format!(
            "{}/exactmatch/ru/common/v4/search?appType=1&curr={}&dest={}&page={PAGE_SLOT}&query={}&resultset=catalog&sort={}&spp={}&suppressSpellcheck=false",
            settings.search_base.trim_end_matches('/'),
            settings.currency,
            settings.dest,
            encode_keyword(keyword),
            settings.sort,
            settings.spp,
        );
        Self {
            template,
            max_pages: settings.search_max_pages,
            pacing: Duration::ZERO,
        }
    }

    pub fn page_url(&self, page: u32) -> String {
        self.template.replace(PAGE_SLOT, &page.to_string())
    }
}

/// Collapse runs of whitespace to single spaces, then percent-encode.
pub fn encode_keyword(keyword: &str) -> String {
    let words: Vec<&str> = keyword.split_whitespace().collect();
    urlencoding::encode(&words.join(" ")).into_owned()
}
