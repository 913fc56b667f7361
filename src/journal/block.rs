//! Block tree data model.
//!
//! A `Block` is one node in the remote document tree, materialized locally
//! as an owned value. The store returns flat pages of blocks; `TreeFetcher`
//! assembles them into a tree by filling each block's `children`.
//!
//! Only the kinds this automation cares about are modeled as structured
//! variants (to-do items, paragraphs, child pages); everything else is
//! carried as `Other` so it survives a walk without being interpreted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date tag used in daily page titles, e.g. `2026-08-31`.
pub fn date_tag(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ── Rich text ───────────────────────────────────────────────────

/// Styling flags on a rich-text span, mirroring the store's annotation
/// object. All default to off.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotations {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub code: bool,
}

impl Annotations {
    /// Italic-only styling, used for the "Last Updated:" marker.
    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Default::default()
        }
    }
}

/// One span of rich text: plain content plus optional styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichTextSpan {
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
}

impl RichTextSpan {
    /// A plain, unstyled span.
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            annotations: None,
        }
    }
}

// ── Block ───────────────────────────────────────────────────────

/// Discriminated block payload. Kinds outside this workflow collapse
/// to `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockKind {
    Todo {
        rich_text: Vec<RichTextSpan>,
        checked: bool,
    },
    Paragraph {
        rich_text: Vec<RichTextSpan>,
    },
    ChildPage {
        title: String,
    },
    Other,
}

/// A node in the document tree.
///
/// `children` is empty until a fetcher fills it; `has_children` is the
/// store's own flag and remains meaningful even when `children` is empty
/// (an unfetched subtree).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    pub kind: BlockKind,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub children: Vec<Block>,
}

impl Block {
    /// A new unchecked to-do block with no id yet (for appends).
    pub fn new_todo(rich_text: Vec<RichTextSpan>) -> Self {
        Self {
            id: String::new(),
            kind: BlockKind::Todo {
                rich_text,
                checked: false,
            },
            has_children: false,
            children: Vec::new(),
        }
    }

    /// Whether this is a to-do item, checked or not.
    pub fn is_todo(&self) -> bool {
        matches!(self.kind, BlockKind::Todo { .. })
    }

    /// Whether this is an unchecked to-do item.
    pub fn is_open_todo(&self) -> bool {
        matches!(self.kind, BlockKind::Todo { checked: false, .. })
    }

    /// Whether this is a checked to-do item.
    pub fn is_done_todo(&self) -> bool {
        matches!(self.kind, BlockKind::Todo { checked: true, .. })
    }

    /// The block's rich-text spans, if its kind carries any.
    pub fn rich_text(&self) -> Option<&[RichTextSpan]> {
        match &self.kind {
            BlockKind::Todo { rich_text, .. } | BlockKind::Paragraph { rich_text } => {
                Some(rich_text)
            }
            _ => None,
        }
    }

    /// Content of the first rich-text span, if present.
    pub fn leading_text(&self) -> Option<&str> {
        self.rich_text()
            .and_then(|spans| spans.first())
            .map(|span| span.content.as_str())
    }
}

// ── PageRef ─────────────────────────────────────────────────────

/// A child page seen while listing a container. Not persisted locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRef {
    pub id: String,
    pub title: String,
}

// ── Tests ───────────────────────────────────────────────────────
