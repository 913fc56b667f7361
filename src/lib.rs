//! Daybook — daily-journal page automation for a Notion-style block store.
//!
//! Two workflows, both stateless passes over a remote block tree:
//!
//! 1. **Daily**: find or create the page titled with today's date tag
//!    under a parent container, then carry over every unfinished
//!    checklist item from the most recent prior daily page (within a
//!    bounded lookback window), nested sub-items included, skipping
//!    tasks already present.
//! 2. **Cleanup**: delete every completed checklist item in a subtree
//!    and rewrite its "Last Updated:" marker paragraph.
//!
//! The remote store is reached only through the [`store::BlockStore`]
//! port, so the traversal, diff, and prune logic runs unchanged against
//! an in-memory double in tests.

pub mod config;
pub mod journal;
pub mod store;
