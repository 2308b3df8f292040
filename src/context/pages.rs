//! Per-page annotation.
//!
//! Gives each page of the site its view counts, looked up by the URL the
//! generator saves it under.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::SiteContext;

/// A page as exported by the generator: a slug plus arbitrary metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub slug: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl PageRecord {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            fields: Map::new(),
        }
    }

    /// Value of a placeholder field as it appears in a URL.
    fn field(&self, name: &str) -> Option<String> {
        if name == "slug" {
            return Some(self.slug.clone());
        }
        match self.fields.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }
}

/// A page with its counts attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedPage {
    #[serde(flatten)]
    pub page: PageRecord,
    pub url: String,
    pub pageview: u64,
    pub popular_pageview: u64,
}

/// URL of `page` under a save-as pattern such as `posts/{slug}.html`.
///
/// Placeholders the page has no scalar value for are left verbatim.
pub fn page_url(pattern: &str, page: &PageRecord) -> String {
    let mut url = String::with_capacity(pattern.len() + 1);
    url.push('/');

    let mut rest = pattern.trim_start_matches('/');
    while let Some(open) = rest.find('{') {
        url.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            url.push_str(&rest[open..]);
            return url;
        };
        let name = &after[..close];
        match page.field(name) {
            Some(value) => url.push_str(&value),
            None => {
                log::debug!("Page {} has no value for {{{}}}", page.slug, name);
                url.push('{');
                url.push_str(name);
                url.push('}');
            }
        }
        rest = &after[close + 1..];
    }
    url.push_str(rest);
    url
}

/// Attaches `pageview` and `popular_pageview` to every page.
pub fn annotate_pages(
    pages: Vec<PageRecord>,
    pattern: &str,
    context: &SiteContext,
) -> Vec<AnnotatedPage> {
    pages
        .into_iter()
        .map(|page| {
            let url = page_url(pattern, &page);
            AnnotatedPage {
                pageview: context.page_view_for(&url),
                popular_pageview: context.popular_page_view_for(&url),
                url,
                page,
            }
        })
        .collect()
}

/// Reads a JSON array of pages.
pub async fn load_pages(path: &Path) -> Result<Vec<PageRecord>> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read pages file {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse pages file {}", path.display()))
}
