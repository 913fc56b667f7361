//! Locating daily pages in a container by date tag.
//!
//! Daily pages are child pages whose titles carry a `YYYY-MM-DD` date tag
//! (e.g. "Daily Journal - 2026-08-31"). Matching is by substring, not
//! equality, so the fixed title prefix never has to be parsed off.
//!
//! The prior-page search scans outward from yesterday up to the lookback
//! window, so migration always pulls from the nearest available page and
//! skips gaps like weekends or missed days. No hit inside the window is an
//! expected outcome, not an error.

use crate::journal::block::{date_tag, Block, BlockKind, PageRef};
use crate::journal::fetch::TreeFetcher;
use crate::store::BlockStore;
use anyhow::Result;
use chrono::NaiveDate;

pub struct PageLocator<'a> {
    store: &'a dyn BlockStore,
    lookback_days: u32,
}

impl<'a> PageLocator<'a> {
    pub fn new(store: &'a dyn BlockStore, lookback_days: u32) -> Self {
        Self {
            store,
            lookback_days,
        }
    }

    /// Find the page in `container_id` whose title carries today's date tag.
    pub async fn find_today_page(
        &self,
        container_id: &str,
        today: NaiveDate,
    ) -> Result<Option<PageRef>> {
        let pages = self.list_pages(container_id).await?;
        Ok(find_page_for_tag(&pages, &date_tag(today)))
    }

    /// Find the nearest prior daily page within the lookback window,
    /// preferring the closest day. `None` means no migration source.
    pub async fn find_most_recent_prior_page(
        &self,
        container_id: &str,
        today: NaiveDate,
    ) -> Result<Option<PageRef>> {
        let pages = self.list_pages(container_id).await?;
        for days_back in 1..=i64::from(self.lookback_days) {
            let target = today - chrono::Duration::days(days_back);
            if let Some(page) = find_page_for_tag(&pages, &date_tag(target)) {
                return Ok(Some(page));
            }
        }
        Ok(None)
    }

    /// Flat listing of the container's immediate child pages.
    async fn list_pages(&self, container_id: &str) -> Result<Vec<PageRef>> {
        let blocks = TreeFetcher::new(self.store)
            .fetch_children(container_id)
            .await?;
        Ok(blocks.iter().filter_map(page_ref).collect())
    }
}

fn page_ref(block: &Block) -> Option<PageRef> {
    match &block.kind {
        BlockKind::ChildPage { title } => Some(PageRef {
            id: block.id.clone(),
            title: title.clone(),
        }),
        _ => None,
    }
}

/// First page whose title contains the date tag as a substring.
fn find_page_for_tag(pages: &[PageRef], tag: &str) -> Option<PageRef> {
    pages.iter().find(|p| p.title.contains(tag)).cloned()
}

// ── Tests ───────────────────────────────────────────────────────
