//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use campaign_core::{
    CampaignConfig, ItemDefinition, ItemsSnapshot, OracleSnapshot, ResearchSnapshot,
    SpeciesDefinition, SpeciesSnapshot,
};

use crate::loaders::{ConfigLoader, ItemLoader, LoadResult, ResearchLoader, SpeciesLoader};

/// Content factory that loads all campaign content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── research.toml   (optional)
/// ├── species.ron
/// └── items.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The data directory shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    pub fn load_config(&self) -> LoadResult<CampaignConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    pub fn load_species(&self) -> LoadResult<Vec<SpeciesDefinition>> {
        SpeciesLoader::load(&self.data_dir.join("species.ron"))
    }

    pub fn load_items(&self) -> LoadResult<Vec<ItemDefinition>> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Completed research, empty when `research.toml` is absent.
    pub fn load_research(&self) -> LoadResult<ResearchSnapshot> {
        let path = self.data_dir.join("research.toml");
        if !path.exists() {
            return Ok(ResearchSnapshot::new());
        }
        ResearchLoader::load(&path)
    }

    /// Loads every catalog into one oracle bundle.
    pub fn load_oracles(&self) -> LoadResult<OracleSnapshot> {
        Ok(OracleSnapshot::new(
            SpeciesSnapshot::new(self.load_species()?),
            ItemsSnapshot::new(self.load_items()?),
            self.load_research()?,
            self.load_config()?,
        ))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_core::{ItemOracle, SpeciesOracle};

    #[test]
    fn factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn bundled_content_loads() {
        let oracles = ContentFactory::bundled().load_oracles().unwrap();
        let taman = oracles.species.resolve("taman").unwrap();
        assert!(oracles.species.is_alien(taman));
        assert!(oracles.items.antimatter().is_some());
        assert!(oracles.items.resolve("medikit").is_some());
    }

    #[test]
    fn missing_research_file_is_empty() {
        let dir = std::env::temp_dir().join("campaign-content-no-research");
        let factory = ContentFactory::new(dir);
        assert_eq!(factory.load_research().unwrap(), ResearchSnapshot::new());
    }
}
