//! Daily-journal block-tree synchronization.
//!
//! Daily pages live as child pages of one parent container, titled with a
//! `YYYY-MM-DD` date tag. This module owns everything between the
//! `BlockStore` port and the two workflows:
//!
//! - `block` — the owned block-tree model (to-dos, paragraphs, child
//!   pages) and rich-text spans.
//! - `fetch` — paginated child listing and recursive tree retrieval;
//!   the only place continuation cursors are handled.
//! - `locate` — today-page discovery and the bounded lookback search for
//!   the nearest prior daily page.
//! - `migrate` — duplicate-aware carry-over of unfinished tasks,
//!   nested sub-tasks included, everything reopened on arrival.
//! - `prune` — recursive deletion of completed tasks, never descending
//!   into anything already deleted.
//! - `annotate` — rewriting the pre-provisioned "Last Updated:" marker
//!   paragraph with a fresh timestamp.
//! - `notion` — the reqwest implementation of the port against the
//!   Notion block API.
//! - `daily` — the two composed workflows (ensure + migrate; prune +
//!   stamp), which are independent and individually re-runnable.
//!
//! Fetching (I/O) is kept apart from walking (pure traversal): migrate
//! and prune operate on trees that are already in memory and only go
//! back to the store to apply changes or pull subtrees they are about
//! to walk.

pub mod annotate;
pub mod block;
pub mod daily;
pub mod fetch;
#[cfg(test)]
pub mod fixtures;
pub mod locate;
pub mod migrate;
pub mod notion;
pub mod prune;
