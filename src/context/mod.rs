//! Template context publishing.
//!
//! The analytics pass returns plain data; this module turns it into the
//! JSON document the site generator's templates read, and merges it into an
//! existing context file without disturbing keys owned by other plugins.

mod pages;

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use pages::{annotate_pages, load_pages, page_url, AnnotatedPage, PageRecord};

use crate::aggregate::{AggregateResult, CanonicalViewTable};
use crate::config::{PAGES_KEY, TOTAL_NUM_USERS_KEY, TOTAL_PAGE_VIEW_KEY};

/// Values published for templates.
///
/// Totals are `None` when the analytics pass failed; templates must treat a
/// missing `total_page_view` as "no data".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_page_view: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_num_users: Option<u64>,
    #[serde(default)]
    pub page_view: CanonicalViewTable,
    #[serde(default)]
    pub popular_page_view: CanonicalViewTable,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<AnnotatedPage>,
}

impl SiteContext {
    pub fn from_result(result: AggregateResult) -> Self {
        let mut context = Self::default();
        context.publish(result);
        context
    }

    /// Replaces the aggregates with a new pass's result.
    pub fn publish(&mut self, result: AggregateResult) {
        self.total_page_view = Some(result.total_page_view);
        self.total_num_users = Some(result.total_num_users);
        self.page_view = result.page_view;
        self.popular_page_view = result.popular_page_view;
    }

    /// Whether a successful pass was published.
    pub fn has_aggregates(&self) -> bool {
        self.total_page_view.is_some()
    }

    /// Long-window count for a page URL, 0 when unknown.
    pub fn page_view_for(&self, url: &str) -> u64 {
        self.page_view.count_for(url)
    }

    /// Popular-window count for a page URL, 0 when unknown.
    pub fn popular_page_view_for(&self, url: &str) -> u64 {
        self.popular_page_view.count_for(url)
    }

    /// Writes this context's keys into `target`.
    ///
    /// Totals absent from this context are removed from `target` so a stale
    /// value from an earlier build is never shown. Other keys are untouched.
    pub fn merge_into(&self, target: &mut Map<String, Value>) -> Result<()> {
        let Value::Object(own) = serde_json::to_value(self).context("Failed to serialize context")?
        else {
            bail!("Context did not serialize to a JSON object");
        };

        for key in [TOTAL_PAGE_VIEW_KEY, TOTAL_NUM_USERS_KEY, PAGES_KEY] {
            target.remove(key);
        }
        target.extend(own);
        Ok(())
    }

    /// Merges this context into the JSON object stored at `path`.
    ///
    /// A missing file is created; an existing file must hold a JSON object.
    pub async fn merge_into_file(&self, path: &Path) -> Result<()> {
        let mut document = match tokio::fs::read_to_string(path).await {
            Ok(existing) if existing.trim().is_empty() => Map::new(),
            Ok(existing) => match serde_json::from_str::<Value>(&existing)
                .with_context(|| format!("Failed to parse context file {}", path.display()))?
            {
                Value::Object(map) => map,
                _ => bail!("Context file {} is not a JSON object", path.display()),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read context file {}", path.display()))
            }
        };

        self.merge_into(&mut document)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let rendered = serde_json::to_string_pretty(&Value::Object(document))
            .context("Failed to render context")?;
        tokio::fs::write(path, rendered + "\n")
            .await
            .with_context(|| format!("Failed to write context file {}", path.display()))?;

        log::info!("Wrote analytics context to {}", path.display());
        Ok(())
    }
}
