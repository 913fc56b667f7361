//! Deletion of completed tasks throughout a fetched tree.
//!
//! Pre-order walk: a checked to-do is deleted with a single call and its
//! subtree is never visited — the store removes descendants implicitly,
//! and touching them after the parent is gone would be a use-after-delete.
//! Everything else is descended into. A block the store flags as having
//! children that were not pre-fetched is fetched on demand before
//! recursing; unfetched subtrees are never silently skipped.
//!
//! Policy: the first failed delete propagates and aborts the walk. A
//! partially pruned tree is safe to re-run — the walk is idempotent over
//! what remains.

use crate::journal::block::Block;
use crate::journal::fetch::TreeFetcher;
use crate::store::BlockStore;
use anyhow::{Context, Result};
use std::future::Future;
use std::pin::Pin;

pub struct TaskPruner<'a> {
    store: &'a dyn BlockStore,
}

impl<'a> TaskPruner<'a> {
    pub fn new(store: &'a dyn BlockStore) -> Self {
        Self { store }
    }

    /// Delete every checked to-do in the tree. Returns how many blocks
    /// were deleted (descendants of deleted blocks are not counted).
    pub async fn prune(&self, blocks: &[Block]) -> Result<usize> {
        self.prune_walk(blocks).await
    }

    fn prune_walk<'b>(
        &'b self,
        blocks: &'b [Block],
    ) -> Pin<Box<dyn Future<Output = Result<usize>> + Send + 'b>> {
        Box::pin(async move {
            let mut deleted = 0;
            for block in blocks {
                if block.is_done_todo() {
                    self.store
                        .delete_block(&block.id)
                        .await
                        .with_context(|| format!("deleting completed task {}", block.id))?;
                    deleted += 1;
                    // The store drops the subtree with its parent.
                    continue;
                }
                if !block.children.is_empty() {
                    deleted += self.prune_walk(&block.children).await?;
                } else if block.has_children {
                    let children = TreeFetcher::new(self.store)
                        .fetch_children(&block.id)
                        .await?;
                    deleted += self.prune_walk(&children).await?;
                }
            }
            Ok(deleted)
        })
    }
}

// ── Tests ───────────────────────────────────────────────────────
