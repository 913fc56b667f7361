//! In-memory `BlockStore` double for tests.
//!
//! Holds a flat map of parent id to child blocks, serves listings in
//! configurable page sizes to exercise pagination, and records every
//! mutating call so tests can assert on what was sent to the store.

use crate::journal::block::{Block, BlockKind, PageRef, RichTextSpan};
use crate::store::{BlockStore, ChildListing};
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

struct Inner {
    children: HashMap<String, Vec<Block>>,
    deleted: Vec<String>,
    updated: Vec<(String, Vec<RichTextSpan>)>,
    created_pages: Vec<PageRef>,
    fail_delete: Option<String>,
    next_id: u64,
}

pub struct MockStore {
    inner: Mutex<Inner>,
    page_size: usize,
}

impl MockStore {
    pub fn new() -> Self {
        Self::with_page_size(100)
    }

    /// A store that returns listings in pages of `page_size` blocks.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                children: HashMap::new(),
                deleted: Vec::new(),
                updated: Vec::new(),
                created_pages: Vec::new(),
                fail_delete: None,
                next_id: 0,
            }),
            page_size,
        }
    }

    /// Seed the children of a parent block.
    pub fn insert(&self, parent_id: &str, blocks: Vec<Block>) {
        let mut inner = self.inner.lock().unwrap();
        inner.children.insert(parent_id.to_string(), blocks);
    }

    /// Make the next delete of `block_id` fail.
    pub fn fail_delete_of(&self, block_id: &str) {
        self.inner.lock().unwrap().fail_delete = Some(block_id.to_string());
    }

    pub fn children_of(&self, parent_id: &str) -> Vec<Block> {
        self.inner
            .lock()
            .unwrap()
            .children
            .get(parent_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        self.inner.lock().unwrap().deleted.clone()
    }

    pub fn updates(&self) -> Vec<(String, Vec<RichTextSpan>)> {
        self.inner.lock().unwrap().updated.clone()
    }

    pub fn created_pages(&self) -> Vec<PageRef> {
        self.inner.lock().unwrap().created_pages.clone()
    }
}

#[async_trait]
impl BlockStore for MockStore {
    async fn list_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
    ) -> Result<ChildListing> {
        let inner = self.inner.lock().unwrap();
        let all = inner
            .children
            .get(block_id)
            .cloned()
            .unwrap_or_default();
        let start: usize = cursor.map(|c| c.parse().unwrap_or(0)).unwrap_or(0);
        let end = (start + self.page_size).min(all.len());
        let next_cursor = if end < all.len() {
            Some(end.to_string())
        } else {
            None
        };
        Ok(ChildListing {
            blocks: all[start..end].to_vec(),
            next_cursor,
        })
    }

    async fn create_page(&self, parent_id: &str, title: &str) -> Result<PageRef> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = format!("page-{}", inner.next_id);
        let page_block = Block {
            id: id.clone(),
            kind: BlockKind::ChildPage {
                title: title.to_string(),
            },
            has_children: false,
            children: Vec::new(),
        };
        inner
            .children
            .entry(parent_id.to_string())
            .or_default()
            .push(page_block);
        let page = PageRef {
            id,
            title: title.to_string(),
        };
        inner.created_pages.push(page.clone());
        Ok(page)
    }

    async fn append_children(&self, block_id: &str, blocks: &[Block]) -> Result<Vec<Block>> {
        let mut inner = self.inner.lock().unwrap();
        let mut created = Vec::with_capacity(blocks.len());
        for block in blocks {
            inner.next_id += 1;
            let mut stored = block.clone();
            stored.id = format!("new-{}", inner.next_id);
            stored.children = Vec::new();
            inner
                .children
                .entry(block_id.to_string())
                .or_default()
                .push(stored.clone());
            created.push(stored);
        }
        Ok(created)
    }

    async fn delete_block(&self, block_id: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_delete.as_deref() == Some(block_id) {
            bail!("store returned HTTP 500 deleting {block_id}");
        }
        for siblings in inner.children.values_mut() {
            siblings.retain(|b| b.id != block_id);
        }
        inner.children.remove(block_id);
        inner.deleted.push(block_id.to_string());
        Ok(())
    }

    async fn update_block(&self, block_id: &str, rich_text: &[RichTextSpan]) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        for siblings in inner.children.values_mut() {
            for block in siblings.iter_mut() {
                if block.id == block_id {
                    match &mut block.kind {
                        BlockKind::Todo { rich_text: rt, .. }
                        | BlockKind::Paragraph { rich_text: rt } => {
                            *rt = rich_text.to_vec();
                        }
                        _ => {}
                    }
                }
            }
        }
        inner
            .updated
            .push((block_id.to_string(), rich_text.to_vec()));
        Ok(())
    }
}

// ── Fixture builders ────────────────────────────────────────────

/// An unchecked or checked to-do block with a single plain span.
pub fn todo(id: &str, text: &str, checked: bool) -> Block {
    Block {
        id: id.to_string(),
        kind: BlockKind::Todo {
            rich_text: vec![RichTextSpan::plain(text)],
            checked,
        },
        has_children: false,
        children: Vec::new(),
    }
}

/// A to-do block flagged as having children in the store.
pub fn todo_with_children(id: &str, text: &str, checked: bool) -> Block {
    let mut block = todo(id, text, checked);
    block.has_children = true;
    block
}

/// A paragraph block with a single plain span.
pub fn paragraph(id: &str, text: &str) -> Block {
    Block {
        id: id.to_string(),
        kind: BlockKind::Paragraph {
            rich_text: vec![RichTextSpan::plain(text)],
        },
        has_children: false,
        children: Vec::new(),
    }
}

/// A child-page block as it appears in a container listing.
pub fn child_page(id: &str, title: &str) -> Block {
    Block {
        id: id.to_string(),
        kind: BlockKind::ChildPage {
            title: title.to_string(),
        },
        has_children: true,
        children: Vec::new(),
    }
}
