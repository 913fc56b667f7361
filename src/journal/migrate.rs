//! Duplicate-aware migration of unfinished tasks between daily pages.
//!
//! Planning is pure: given the already-fetched source and destination
//! trees, pick the top-level unchecked to-dos that are not already present
//! at the destination. Applying is I/O: append each picked task and its
//! nested to-do subtree under the destination page, one call per node,
//! in the source's pre-order.
//!
//! Duplicate detection is a named, swappable rule. The default,
//! `same_leading_text`, compares only the first rich-text span's content
//! for exact equality — deliberately shallow, so a task renamed in any
//! span past the first still counts as the same task. Nested sub-tasks
//! bypass the duplicate check entirely; they travel with their root.
//!
//! Every migrated node is reopened: `checked` is forced to `false` at
//! every depth, even if the source was inconsistently part-checked.

use crate::journal::block::Block;
use crate::store::BlockStore;
use anyhow::Result;
use std::future::Future;
use std::pin::Pin;

/// Comparison rule deciding whether a source task already exists at the
/// destination.
pub type DuplicateRule = fn(&Block, &Block) -> bool;

/// Exact equality of the first rich-text span's content. Blocks with no
/// spans never match anything.
pub fn same_leading_text(a: &Block, b: &Block) -> bool {
    match (a.leading_text(), b.leading_text()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// What a migration run did.
#[derive(Debug, Default, PartialEq)]
pub struct MigrationReport {
    /// Blocks appended to the destination (all depths).
    pub migrated: usize,
    /// Top-level tasks skipped because they already exist at the destination.
    pub skipped_duplicates: usize,
    /// Top-level tasks skipped because they carry no rich text to compare.
    pub skipped_empty: usize,
}

pub struct TaskMigrator<'a> {
    store: &'a dyn BlockStore,
    matcher: DuplicateRule,
}

impl<'a> TaskMigrator<'a> {
    pub fn new(store: &'a dyn BlockStore) -> Self {
        Self {
            store,
            matcher: same_leading_text,
        }
    }

    /// Swap the duplicate rule (e.g. for full rich-text equality).
    pub fn with_matcher(store: &'a dyn BlockStore, matcher: DuplicateRule) -> Self {
        Self { store, matcher }
    }

    /// Pure planning step: the top-level source tasks that should be
    /// copied, in source order.
    fn plan<'t>(
        &self,
        source: &'t [Block],
        destination: &[Block],
        report: &mut MigrationReport,
    ) -> Vec<&'t Block> {
        let existing: Vec<&Block> = destination.iter().filter(|b| b.is_todo()).collect();
        let mut roots = Vec::new();
        for task in source.iter().filter(|b| b.is_open_todo()) {
            let Some(text) = task.leading_text() else {
                report.skipped_empty += 1;
                continue;
            };
            if existing.iter().any(|&dest| (self.matcher)(task, dest)) {
                eprintln!("[daybook] Task \"{text}\" already exists in today's page");
                report.skipped_duplicates += 1;
                continue;
            }
            roots.push(task);
        }
        roots
    }

    /// Copy every non-duplicate unfinished task (and its nested to-do
    /// subtree) from `source` into the destination page.
    pub async fn migrate(
        &self,
        source: &[Block],
        destination: &[Block],
        destination_id: &str,
    ) -> Result<MigrationReport> {
        let mut report = MigrationReport::default();
        let roots = self.plan(source, destination, &mut report);
        for task in roots {
            report.migrated += self.copy_subtree(destination_id, task).await?;
        }
        Ok(report)
    }

    // One append call per node, parent before children. Boxed for the
    // recursive async call.
    fn copy_subtree<'b>(
        &'b self,
        parent_id: &'b str,
        task: &'b Block,
    ) -> Pin<Box<dyn Future<Output = Result<usize>> + Send + 'b>> {
        Box::pin(async move {
            let rich_text = task.rich_text().unwrap_or_default().to_vec();
            let created = self
                .store
                .append_children(parent_id, &[Block::new_todo(rich_text)])
                .await?;
            let mut copied = 1;
            if let Some(created_task) = created.first() {
                for child in task.children.iter().filter(|c| c.is_todo()) {
                    copied += self.copy_subtree(&created_task.id, child).await?;
                }
            }
            Ok(copied)
        })
    }
}

// ── Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::block::{BlockKind, RichTextSpan};
    use crate::journal::fixtures::{paragraph, todo, MockStore};

    fn texts_of(blocks: &[Block]) -> Vec<String> {
        blocks
            .iter()
            .filter_map(|b| b.leading_text().map(str::to_string))
            .collect()
    }

    #[tokio::test]
    async fn migrates_missing_open_task_as_unchecked() {
        let store = MockStore::new();
        let source = vec![todo("s1", "Call Alice", false)];
        let destination = vec![todo("d1", "Buy milk", false)];

        let report = TaskMigrator::new(&store)
            .migrate(&source, &destination, "today")
            .await
            .unwrap();

        assert_eq!(report.migrated, 1);
        let appended = store.children_of("today");
        assert_eq!(texts_of(&appended), vec!["Call Alice"]);
        assert!(appended[0].is_open_todo());
    }

    #[tokio::test]
    async fn skips_task_already_present_at_destination() {
        let store = MockStore::new();
        let source = vec![
            todo("s1", "Buy milk", false),
            todo("s2", "Call Alice", false),
        ];
        let destination = vec![todo("d1", "Buy milk", false)];

        let report = TaskMigrator::new(&store)
            .migrate(&source, &destination, "today")
            .await
            .unwrap();

        assert_eq!(report.migrated, 1);
        assert_eq!(report.skipped_duplicates, 1);
        assert_eq!(texts_of(&store.children_of("today")), vec!["Call Alice"]);
    }

    #[tokio::test]
    async fn completed_source_tasks_are_not_migration_roots() {
        let store = MockStore::new();
        let source = vec![todo("s1", "Done already", true)];

        let report = TaskMigrator::new(&store)
            .migrate(&source, &[], "today")
            .await
            .unwrap();

        assert_eq!(report.migrated, 0);
        assert!(store.children_of("today").is_empty());
    }

    #[tokio::test]
    async fn nested_subtasks_travel_with_their_root() {
        let store = MockStore::new();
        let mut root = todo("s1", "Project", false);
        root.has_children = true;
        root.children = vec![todo("s2", "Step one", false), todo("s3", "Step two", false)];

        let report = TaskMigrator::new(&store)
            .migrate(&[root], &[], "today")
            .await
            .unwrap();

        assert_eq!(report.migrated, 3);
        let top = store.children_of("today");
        assert_eq!(texts_of(&top), vec!["Project"]);
        let nested = store.children_of(&top[0].id);
        assert_eq!(texts_of(&nested), vec!["Step one", "Step two"]);
    }

    #[tokio::test]
    async fn nested_subtasks_bypass_the_duplicate_check() {
        // "Step one" already exists at the destination top level, but a
        // nested copy still travels with its root.
        let store = MockStore::new();
        let mut root = todo("s1", "Project", false);
        root.has_children = true;
        root.children = vec![todo("s2", "Step one", false)];
        let destination = vec![todo("d1", "Step one", false)];

        let report = TaskMigrator::new(&store)
            .migrate(&[root], &destination, "today")
            .await
            .unwrap();

        assert_eq!(report.migrated, 2);
        let top = store.children_of("today");
        assert_eq!(texts_of(&store.children_of(&top[0].id)), vec!["Step one"]);
    }

    #[tokio::test]
    async fn checked_nested_subtasks_are_reopened() {
        let store = MockStore::new();
        let mut root = todo("s1", "Project", false);
        root.has_children = true;
        root.children = vec![todo("s2", "Half done", true)];

        TaskMigrator::new(&store)
            .migrate(&[root], &[], "today")
            .await
            .unwrap();

        let top = store.children_of("today");
        let nested = store.children_of(&top[0].id);
        assert!(nested[0].is_open_todo());
    }

    #[tokio::test]
    async fn non_todo_children_are_not_copied() {
        let store = MockStore::new();
        let mut root = todo("s1", "Project", false);
        root.has_children = true;
        root.children = vec![paragraph("s2", "a note"), todo("s3", "Step", false)];

        let report = TaskMigrator::new(&store)
            .migrate(&[root], &[], "today")
            .await
            .unwrap();

        assert_eq!(report.migrated, 2);
        let top = store.children_of("today");
        assert_eq!(texts_of(&store.children_of(&top[0].id)), vec!["Step"]);
    }

    #[tokio::test]
    async fn task_with_no_spans_is_skipped() {
        let store = MockStore::new();
        let source = vec![Block {
            id: "s1".to_string(),
            kind: BlockKind::Todo {
                rich_text: Vec::new(),
                checked: false,
            },
            has_children: false,
            children: Vec::new(),
        }];

        let report = TaskMigrator::new(&store)
            .migrate(&source, &[], "today")
            .await
            .unwrap();

        assert_eq!(report.migrated, 0);
        assert_eq!(report.skipped_empty, 1);
    }

    #[tokio::test]
    async fn full_span_sequence_is_preserved() {
        let store = MockStore::new();
        let source = vec![Block {
            id: "s1".to_string(),
            kind: BlockKind::Todo {
                rich_text: vec![
                    RichTextSpan::plain("Review "),
                    RichTextSpan::plain("the draft"),
                ],
                checked: false,
            },
            has_children: false,
            children: Vec::new(),
        }];

        TaskMigrator::new(&store)
            .migrate(&source, &[], "today")
            .await
            .unwrap();

        let appended = store.children_of("today");
        assert_eq!(appended[0].rich_text().unwrap().len(), 2);
    }

    #[test]
    fn same_leading_text_compares_first_span_only() {
        let a = Block {
            id: "a".to_string(),
            kind: BlockKind::Todo {
                rich_text: vec![RichTextSpan::plain("same"), RichTextSpan::plain("tail A")],
                checked: false,
            },
            has_children: false,
            children: Vec::new(),
        };
        let b = Block {
            id: "b".to_string(),
            kind: BlockKind::Todo {
                rich_text: vec![RichTextSpan::plain("same"), RichTextSpan::plain("tail B")],
                checked: true,
            },
            has_children: false,
            children: Vec::new(),
        };
        assert!(same_leading_text(&a, &b));
    }

    #[test]
    fn same_leading_text_never_matches_spanless_blocks() {
        let empty = Block {
            id: "e".to_string(),
            kind: BlockKind::Todo {
                rich_text: Vec::new(),
                checked: false,
            },
            has_children: false,
            children: Vec::new(),
        };
        assert!(!same_leading_text(&empty, &empty.clone()));
    }
}
