//! Notion block API implementation of the `BlockStore` port.
//!
//! Wraps the REST endpoints this automation consumes — child listing,
//! page creation, block append/update/delete — with bearer auth, the
//! versioned API header, and a 10s timeout. Non-2xx responses surface as
//! errors carrying the status and body; nothing is retried here.
//!
//! Wire mapping lives in this module: the rest of the crate only ever
//! sees `Block` values, never the store's JSON shapes.

use crate::config::DaybookConfig;
use crate::journal::block::{Annotations, Block, BlockKind, PageRef, RichTextSpan};
use crate::store::{BlockStore, ChildListing};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

pub struct NotionStore {
    client: Client,
    base_url: String,
    api_token: String,
    api_version: String,
}

#[derive(Deserialize)]
struct ListChildrenResponse {
    #[serde(default)]
    results: Vec<Value>,
    #[serde(default)]
    next_cursor: Option<String>,
}

#[derive(Deserialize)]
struct CreatePageResponse {
    #[serde(default)]
    id: String,
}

impl NotionStore {
    /// Build a store client from the config and a resolved API token.
    pub fn new(config: &DaybookConfig, api_token: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
            api_version: config.api_version.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.url(path))
            .bearer_auth(&self.api_token)
            .header("Notion-Version", &self.api_version)
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("block store returned HTTP {status}: {body}");
        }
        Ok(resp)
    }
}

#[async_trait]
impl BlockStore for NotionStore {
    async fn list_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
    ) -> Result<ChildListing> {
        let mut req = self
            .request(reqwest::Method::GET, &format!("/blocks/{block_id}/children"))
            .query(&[("page_size", "100")]);
        if let Some(cursor) = cursor {
            req = req.query(&[("start_cursor", cursor)]);
        }
        let resp = req.send().await.context("block store request failed")?;
        let resp = Self::check(resp).await?;

        let listing: ListChildrenResponse = resp
            .json()
            .await
            .context("Failed to parse child listing response")?;
        Ok(ChildListing {
            blocks: listing.results.iter().map(block_from_json).collect(),
            next_cursor: listing.next_cursor,
        })
    }

    async fn create_page(&self, parent_id: &str, title: &str) -> Result<PageRef> {
        let resp = self
            .request(reqwest::Method::POST, "/pages")
            .json(&json!({
                "parent": { "page_id": parent_id },
                "properties": {
                    "title": [{ "text": { "content": title } }],
                },
            }))
            .send()
            .await
            .context("block store request failed")?;
        let resp = Self::check(resp).await?;

        let created: CreatePageResponse = resp
            .json()
            .await
            .context("Failed to parse page creation response")?;
        Ok(PageRef {
            id: created.id,
            title: title.to_string(),
        })
    }

    async fn append_children(&self, block_id: &str, blocks: &[Block]) -> Result<Vec<Block>> {
        let children: Vec<Value> = blocks.iter().filter_map(block_to_json).collect();
        let resp = self
            .request(reqwest::Method::PATCH, &format!("/blocks/{block_id}/children"))
            .json(&json!({ "children": children }))
            .send()
            .await
            .context("block store request failed")?;
        let resp = Self::check(resp).await?;

        let listing: ListChildrenResponse = resp
            .json()
            .await
            .context("Failed to parse append response")?;
        Ok(listing.results.iter().map(block_from_json).collect())
    }

    async fn delete_block(&self, block_id: &str) -> Result<()> {
        let resp = self
            .request(reqwest::Method::DELETE, &format!("/blocks/{block_id}"))
            .send()
            .await
            .context("block store request failed")?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn update_block(&self, block_id: &str, rich_text: &[RichTextSpan]) -> Result<()> {
        // Only marker paragraphs are ever rewritten in place.
        let resp = self
            .request(reqwest::Method::PATCH, &format!("/blocks/{block_id}"))
            .json(&json!({
                "paragraph": { "rich_text": rich_text_to_json(rich_text) },
            }))
            .send()
            .await
            .context("block store request failed")?;
        Self::check(resp).await?;
        Ok(())
    }
}

// ── Wire mapping ────────────────────────────────────────────────

/// Map one block object from the store's JSON into the local model.
/// Unknown block types collapse to `Other` but keep their id and
/// child flag, so a walk can still traverse through them.
fn block_from_json(v: &Value) -> Block {
    let id = v
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let has_children = v
        .get("has_children")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let kind = match v.get("type").and_then(Value::as_str) {
        Some("to_do") => BlockKind::Todo {
            rich_text: spans_from_json(v.get("to_do").and_then(|t| t.get("rich_text"))),
            checked: v
                .get("to_do")
                .and_then(|t| t.get("checked"))
                .and_then(Value::as_bool)
                .unwrap_or(false),
        },
        Some("paragraph") => BlockKind::Paragraph {
            rich_text: spans_from_json(v.get("paragraph").and_then(|p| p.get("rich_text"))),
        },
        Some("child_page") => BlockKind::ChildPage {
            title: v
                .get("child_page")
                .and_then(|p| p.get("title"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        },
        _ => BlockKind::Other,
    };
    Block {
        id,
        kind,
        has_children,
        children: Vec::new(),
    }
}

fn spans_from_json(v: Option<&Value>) -> Vec<RichTextSpan> {
    let Some(items) = v.and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| {
            let content = item
                .get("plain_text")
                .and_then(Value::as_str)
                .or_else(|| {
                    item.get("text")
                        .and_then(|t| t.get("content"))
                        .and_then(Value::as_str)
                })
                .unwrap_or_default()
                .to_string();
            let annotations = item
                .get("annotations")
                .and_then(|a| serde_json::from_value::<Annotations>(a.clone()).ok());
            RichTextSpan {
                content,
                annotations,
            }
        })
        .collect()
}

fn rich_text_to_json(spans: &[RichTextSpan]) -> Value {
    Value::Array(
        spans
            .iter()
            .map(|span| {
                let mut obj = json!({
                    "type": "text",
                    "text": { "content": span.content },
                });
                if let Some(ann) = &span.annotations {
                    obj["annotations"] = serde_json::to_value(ann).unwrap_or(Value::Null);
                }
                obj
            })
            .collect(),
    )
}

/// Map a local block to the store's append payload. Only the kinds this
/// automation creates (to-dos, paragraphs) are expressible.
fn block_to_json(block: &Block) -> Option<Value> {
    match &block.kind {
        BlockKind::Todo { rich_text, checked } => Some(json!({
            "object": "block",
            "type": "to_do",
            "to_do": {
                "rich_text": rich_text_to_json(rich_text),
                "checked": checked,
            },
        })),
        BlockKind::Paragraph { rich_text } => Some(json!({
            "object": "block",
            "type": "paragraph",
            "paragraph": { "rich_text": rich_text_to_json(rich_text) },
        })),
        _ => None,
    }
}

// ── Tests ───────────────────────────────────────────────────────
