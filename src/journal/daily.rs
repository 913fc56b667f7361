//! The two automation workflows, composed from the journal components.
//!
//! `run_daily` ensures today's page exists under the parent container and
//! then migrates unfinished tasks from the nearest prior daily page.
//! `run_cleanup` prunes completed tasks from a subtree and refreshes its
//! "Last Updated:" marker. The two are independent: neither reads state
//! the other writes, and a failure mid-cleanup never blocks a later
//! daily run.
//!
//! Idempotency is structural, not transactional — the existence check
//! precedes page creation, and the duplicate check precedes every
//! top-level migration, so re-running either workflow is safe.

use crate::config::DaybookConfig;
use crate::journal::annotate::AnnotationUpdater;
use crate::journal::block::{date_tag, PageRef};
use crate::journal::fetch::TreeFetcher;
use crate::journal::locate::PageLocator;
use crate::journal::migrate::{MigrationReport, TaskMigrator};
use crate::journal::prune::TaskPruner;
use crate::store::BlockStore;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};

/// What a daily run did.
#[derive(Debug, PartialEq)]
pub struct DailySummary {
    pub page_created: bool,
    /// `None` when no prior page existed within the lookback window.
    pub migration: Option<MigrationReport>,
}

/// What a cleanup run did.
#[derive(Debug, PartialEq)]
pub struct CleanupSummary {
    pub deleted: usize,
    pub stamped: bool,
}

pub struct DailyAutomation<'a> {
    store: &'a dyn BlockStore,
    parent_page_id: String,
    lookback_days: u32,
    title_prefix: String,
}

impl<'a> DailyAutomation<'a> {
    pub fn new(
        store: &'a dyn BlockStore,
        config: &DaybookConfig,
        parent_page_id: impl Into<String>,
    ) -> Self {
        Self {
            store,
            parent_page_id: parent_page_id.into(),
            lookback_days: config.lookback_days,
            title_prefix: config.title_prefix.clone(),
        }
    }

    /// Ensure today's page exists, then migrate unfinished tasks into it.
    pub async fn run_daily(&self) -> Result<DailySummary> {
        self.run_daily_for(Local::now().date_naive()).await
    }

    /// Daily workflow with an explicit "today".
    pub async fn run_daily_for(&self, today: NaiveDate) -> Result<DailySummary> {
        let locator = PageLocator::new(self.store, self.lookback_days);

        let (today_page, page_created) = match locator
            .find_today_page(&self.parent_page_id, today)
            .await?
        {
            Some(page) => {
                eprintln!("[daybook] Daily page already exists");
                (page, false)
            }
            None => {
                let title = format!("{}{}", self.title_prefix, date_tag(today));
                let page = self
                    .store
                    .create_page(&self.parent_page_id, &title)
                    .await
                    .context("creating today's daily page")?;
                eprintln!("[daybook] Daily page created: {title}");
                (page, true)
            }
        };

        let migration = self.migrate_into(&today_page, today).await?;
        Ok(DailySummary {
            page_created,
            migration,
        })
    }

    /// Migrate unfinished tasks from the nearest prior page, if any.
    async fn migrate_into(
        &self,
        today_page: &PageRef,
        today: NaiveDate,
    ) -> Result<Option<MigrationReport>> {
        let locator = PageLocator::new(self.store, self.lookback_days);
        let Some(prior) = locator
            .find_most_recent_prior_page(&self.parent_page_id, today)
            .await?
        else {
            eprintln!(
                "[daybook] No previous page found within the last {} days, skipping task migration",
                self.lookback_days
            );
            return Ok(None);
        };

        let fetcher = TreeFetcher::new(self.store);
        let source = fetcher.fetch_tree(&prior.id, true).await?;
        // Duplicate checks only look at the destination's top level.
        let destination = fetcher.fetch_children(&today_page.id).await?;

        let report = TaskMigrator::new(self.store)
            .migrate(&source, &destination, &today_page.id)
            .await?;
        eprintln!(
            "[daybook] Migrated {} block(s) from \"{}\" ({} duplicate(s) skipped)",
            report.migrated, prior.title, report.skipped_duplicates
        );
        Ok(Some(report))
    }

    /// Prune completed tasks under `root_id` and refresh its marker.
    pub async fn run_cleanup(&self, root_id: &str) -> Result<CleanupSummary> {
        self.run_cleanup_at(root_id, Local::now().naive_local()).await
    }

    /// Cleanup workflow with an explicit timestamp.
    pub async fn run_cleanup_at(
        &self,
        root_id: &str,
        now: NaiveDateTime,
    ) -> Result<CleanupSummary> {
        let tree = TreeFetcher::new(self.store).fetch_tree(root_id, true).await?;
        let deleted = TaskPruner::new(self.store).prune(&tree).await?;
        let stamped = AnnotationUpdater::new(self.store)
            .stamp_at(root_id, now)
            .await?;
        eprintln!(
            "[daybook] Cleanup removed {deleted} completed task(s){}",
            if stamped { ", marker stamped" } else { "" }
        );
        Ok(CleanupSummary { deleted, stamped })
    }
}

// ── Tests ───────────────────────────────────────────────────────
