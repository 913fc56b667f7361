//! BlockStore port — the five remote operations the automation consumes.
//!
//! The remote document store is reached only through this trait, so the
//! traversal and diff logic can run against an in-memory double in tests
//! and against the HTTP client (`journal::notion::NotionStore`) in
//! production. Everything behind the trait — auth, transport, rate
//! limits — is the store's problem.

use crate::journal::block::{Block, PageRef, RichTextSpan};
use anyhow::Result;
use async_trait::async_trait;

/// One page of a child listing plus the continuation cursor, if any.
pub struct ChildListing {
    pub blocks: Vec<Block>,
    pub next_cursor: Option<String>,
}

/// Remote operations on page and block resources.
///
/// All calls are request/response and awaited sequentially by callers;
/// no operation here retries on failure.
#[async_trait]
pub trait BlockStore: Send + Sync {
    /// List one page of a block's direct children. Pass the cursor from
    /// the previous listing to continue; `None` starts from the beginning.
    async fn list_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
    ) -> Result<ChildListing>;

    /// Create a child page under `parent_id` with the given title.
    async fn create_page(&self, parent_id: &str, title: &str) -> Result<PageRef>;

    /// Append new blocks under `block_id`. Returns the created blocks,
    /// with the ids the store assigned — callers attaching nested
    /// children need those ids.
    async fn append_children(&self, block_id: &str, blocks: &[Block]) -> Result<Vec<Block>>;

    /// Delete a block. The store removes its descendants implicitly.
    async fn delete_block(&self, block_id: &str) -> Result<()>;

    /// Replace a block's rich text in place.
    async fn update_block(&self, block_id: &str, rich_text: &[RichTextSpan]) -> Result<()>;
}
