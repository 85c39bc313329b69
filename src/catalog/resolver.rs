// src/catalog/resolver.rs
use super::tree::CategoryDescriptor;

/// Find the first category matching `input` by URL or by name.
///
/// The URL comparison uses whatever follows the last occurrence of `site_prefix`
/// in `input`, so both `https://site/catalog/shoes` and `/catalog/shoes` hit.
/// The name comparison uses the raw input.
pub fn resolve<'a>(
    catalog: &'a [CategoryDescriptor],
    site_prefix: &str,
    input: &str,
) -> Option<&'a CategoryDescriptor> {
    let path = strip_site_prefix(input, site_prefix);
    catalog.iter().find(|c| c.url == path || c.name == input)
}

fn strip_site_prefix<'a>(input: &'a str, prefix: &str) -> &'a str {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return input;
    }
    input.rsplit(prefix).next().unwrap_or(input)
}
