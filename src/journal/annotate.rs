//! "Last Updated:" marker stamping.
//!
//! Pages that want a freshness stamp carry a paragraph starting with the
//! literal `Last Updated:` — provisioned by whoever authored the page,
//! never created here. Stamping rewrites that paragraph's rich text to the
//! prefix plus a freshly formatted timestamp, lightly italicized. A page
//! without a marker is left alone.

use crate::journal::block::{Annotations, Block, BlockKind, RichTextSpan};
use crate::journal::fetch::TreeFetcher;
use crate::store::BlockStore;
use anyhow::Result;
use chrono::{Local, NaiveDateTime};

/// Literal prefix identifying the marker paragraph.
pub const MARKER_PREFIX: &str = "Last Updated:";

pub struct AnnotationUpdater<'a> {
    store: &'a dyn BlockStore,
}

impl<'a> AnnotationUpdater<'a> {
    pub fn new(store: &'a dyn BlockStore) -> Self {
        Self { store }
    }

    /// Stamp the marker paragraph under `root_id` with the current local
    /// time. Returns whether a marker was found and rewritten.
    pub async fn stamp_last_updated(&self, root_id: &str) -> Result<bool> {
        self.stamp_at(root_id, Local::now().naive_local()).await
    }

    /// Stamp with an explicit timestamp.
    pub async fn stamp_at(&self, root_id: &str, now: NaiveDateTime) -> Result<bool> {
        let blocks = TreeFetcher::new(self.store)
            .fetch_children(root_id)
            .await?;
        let Some(marker) = blocks.iter().find(|b| is_marker(b)) else {
            return Ok(false);
        };
        let span = RichTextSpan {
            content: format!("{MARKER_PREFIX} {}", now.format("%b %-d, %Y, %H:%M:%S")),
            annotations: Some(Annotations::italic()),
        };
        self.store.update_block(&marker.id, &[span]).await?;
        Ok(true)
    }
}

/// A paragraph whose first span starts with the marker prefix.
fn is_marker(block: &Block) -> bool {
    matches!(block.kind, BlockKind::Paragraph { .. })
        && block
            .leading_text()
            .is_some_and(|text| text.starts_with(MARKER_PREFIX))
}

// ── Tests ───────────────────────────────────────────────────────
