//! Bake configuration (`bake.toml`).

use std::path::{Path, PathBuf};

use serde::Deserialize;

use masonry_types::{BoardError, Result};

/// Name of the optional config file looked up in the bake directory.
pub const CONFIG_FILE: &str = "bake.toml";

/// Which files a bake reads and writes, relative to the bake directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BakeConfig {
    /// Markdown content plan.
    pub plan: PathBuf,
    /// HTML page rewritten in place.
    pub page: PathBuf,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            plan: PathBuf::from("content.md"),
            page: PathBuf::from("index.html"),
        }
    }
}

impl BakeConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        if config.plan.as_os_str().is_empty() || config.page.as_os_str().is_empty() {
            return Err(BoardError::Config("plan and page must be non-empty".into()));
        }
        Ok(config)
    }

    /// Load `path` if it exists, otherwise the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.is_file() {
            log::debug!("No bake config at '{}'", path.display());
            return Ok(Self::default());
        }
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    pub fn plan_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.plan)
    }

    pub fn page_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.page)
    }
}
