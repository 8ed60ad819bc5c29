//! Campaign configuration loader.

use std::path::Path;

use campaign_core::CampaignConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`CampaignConfig`] from TOML files. Missing keys keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<CampaignConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CampaignConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}
