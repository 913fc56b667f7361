//! Daybook binary: config resolution and workflow dispatch.
//!
//! `daybook daily` (the default) ensures today's journal page exists and
//! migrates unfinished tasks into it. `daybook cleanup [page-id]` prunes
//! completed tasks under the given page (the configured parent container
//! when omitted) and refreshes its "Last Updated:" marker.

use anyhow::{bail, Result};
use daybook::config;
use daybook::journal::daily::DailyAutomation;
use daybook::journal::notion::NotionStore;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let workspace = std::env::var("DAYBOOK_WORKSPACE").unwrap_or_else(|_| ".".to_string());
    let config = config::load_config(Path::new(&workspace));

    let Some(token) = config.resolve_api_token() else {
        bail!("no API token: set DAYBOOK_API_TOKEN or api_token in config.toml");
    };
    let Some(parent) = config.resolve_parent_page_id() else {
        bail!("no parent page id: set DAYBOOK_PARENT_PAGE or parent_page_id in config.toml");
    };

    let store = NotionStore::new(&config, &token);
    let automation = DailyAutomation::new(&store, &config, parent.clone());

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("daily") => {
            let summary = automation.run_daily().await?;
            eprintln!(
                "[daybook] Daily run complete ({})",
                if summary.page_created {
                    "page created"
                } else {
                    "page existed"
                }
            );
        }
        Some("cleanup") => {
            let root = args.get(1).cloned().unwrap_or(parent);
            automation.run_cleanup(&root).await?;
        }
        Some(other) => {
            bail!("unknown command `{other}` (expected `daily` or `cleanup`)");
        }
    }

    Ok(())
}
