//! Paginated, optionally recursive retrieval of a block's subtree.
//!
//! The store caps how many children one listing call returns and hands
//! back a continuation cursor; `fetch_children` loops until the cursor is
//! exhausted, so callers always see the complete child list regardless of
//! the store's page size. `fetch_tree` additionally descends into every
//! block the store flags as having children, parent before children,
//! siblings in listing order, one request at a time.
//!
//! Any failed listing aborts the whole fetch; there is no partial-result
//! fallback.

use crate::journal::block::Block;
use crate::store::BlockStore;
use anyhow::Result;
use std::future::Future;
use std::pin::Pin;

pub struct TreeFetcher<'a> {
    store: &'a dyn BlockStore,
}

impl<'a> TreeFetcher<'a> {
    pub fn new(store: &'a dyn BlockStore) -> Self {
        Self { store }
    }

    /// Fetch all direct children of `root_id`, following pagination
    /// cursors until the listing is complete.
    pub async fn fetch_children(&self, root_id: &str) -> Result<Vec<Block>> {
        let mut blocks = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let listing = self.store.list_children(root_id, cursor.as_deref()).await?;
            blocks.extend(listing.blocks);
            match listing.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }
        Ok(blocks)
    }

    /// Fetch the children of `root_id`; with `recursive`, also fetch the
    /// subtree of every block that has children and attach it.
    pub async fn fetch_tree(&self, root_id: &str, recursive: bool) -> Result<Vec<Block>> {
        if recursive {
            self.fetch_subtree(root_id).await
        } else {
            self.fetch_children(root_id).await
        }
    }

    // Recursive async needs a boxed future; the tree is finite and
    // acyclic by construction, so depth alone terminates the recursion.
    fn fetch_subtree<'b>(
        &'b self,
        root_id: &'b str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Block>>> + Send + 'b>> {
        Box::pin(async move {
            let mut blocks = self.fetch_children(root_id).await?;
            for block in &mut blocks {
                if block.has_children {
                    block.children = self.fetch_subtree(&block.id).await?;
                }
            }
            Ok(blocks)
        })
    }
}

// ── Tests ───────────────────────────────────────────────────────
