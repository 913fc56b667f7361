//! Configuration for the daybook automation, from `[daybook]` in config.toml.
//!
//! The API token and parent page id can come from the config file or from
//! the `DAYBOOK_API_TOKEN` / `DAYBOOK_PARENT_PAGE` environment variables;
//! the config file wins when both are set.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the daybook automation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaybookConfig {
    /// API token for the block store. Can also be set via DAYBOOK_API_TOKEN.
    #[serde(default)]
    pub api_token: String,
    /// Id of the container page holding the daily journal pages.
    /// Can also be set via DAYBOOK_PARENT_PAGE.
    #[serde(default)]
    pub parent_page_id: String,
    /// Base URL for the block store API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API version header sent with every request.
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// How many days back to search for a prior daily page.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    /// Prefix for daily page titles; the date tag is appended to it.
    #[serde(default = "default_title_prefix")]
    pub title_prefix: String,
}

fn default_base_url() -> String {
    "https://api.notion.com/v1".to_string()
}

fn default_api_version() -> String {
    "2022-06-28".to_string()
}

fn default_lookback_days() -> u32 {
    7
}

fn default_title_prefix() -> String {
    "Daily Journal - ".to_string()
}

impl Default for DaybookConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            parent_page_id: String::new(),
            base_url: default_base_url(),
            api_version: default_api_version(),
            lookback_days: default_lookback_days(),
            title_prefix: default_title_prefix(),
        }
    }
}

impl DaybookConfig {
    /// Resolve the API token from the config or the environment.
    pub fn resolve_api_token(&self) -> Option<String> {
        if !self.api_token.is_empty() {
            Some(self.api_token.clone())
        } else {
            std::env::var("DAYBOOK_API_TOKEN").ok()
        }
    }

    /// Resolve the parent page id from the config or the environment.
    pub fn resolve_parent_page_id(&self) -> Option<String> {
        if !self.parent_page_id.is_empty() {
            Some(self.parent_page_id.clone())
        } else {
            std::env::var("DAYBOOK_PARENT_PAGE").ok()
        }
    }

    /// Check whether the automation has everything it needs to run.
    pub fn is_usable(&self) -> bool {
        self.resolve_api_token().is_some() && self.resolve_parent_page_id().is_some()
    }
}

/// Parse the `[daybook]` section out of a full config.toml string.
/// Missing section or fields fall back to defaults.
pub fn parse_config(toml_str: &str) -> Result<DaybookConfig, toml::de::Error> {
    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(default)]
        daybook: Option<DaybookConfig>,
    }

    let wrapper: Wrapper = toml::from_str(toml_str)?;
    Ok(wrapper.daybook.unwrap_or_default())
}

/// Load the configuration from `config.toml` in the given workspace.
/// Returns defaults if no config file is found or it fails to parse.
pub fn load_config(workspace: &Path) -> DaybookConfig {
    if let Ok(content) = std::fs::read_to_string(workspace.join("config.toml")) {
        if let Ok(config) = parse_config(&content) {
            return config;
        }
    }
    DaybookConfig::default()
}

// ── Tests ───────────────────────────────────────────────────────
