//! Species catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use campaign_core::{SpeciesDefinition, SpeciesId, SpeciesTraits};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One species as written in `species.ron`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesSpec {
    pub key: String,
    #[serde(default)]
    pub alien: bool,
    #[serde(default)]
    pub robot: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesCatalog {
    pub species: Vec<SpeciesSpec>,
}

pub struct SpeciesLoader;

impl SpeciesLoader {
    /// Load the species catalog from a RON file.
    ///
    /// Ids are assigned in file order, so alien species keep the global alien
    /// index older saves were written with as long as the file is only appended to.
    pub fn load(path: &Path) -> LoadResult<Vec<SpeciesDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<SpeciesDefinition>> {
        let catalog: SpeciesCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse species catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        catalog
            .species
            .into_iter()
            .enumerate()
            .map(|(index, spec)| {
                if !seen.insert(spec.key.clone()) {
                    anyhow::bail!("Duplicate species key '{}'", spec.key);
                }
                let id = u16::try_from(index)
                    .map_err(|_| anyhow::anyhow!("Species catalog exceeds {} entries", u16::MAX))?;
                let mut traits = SpeciesTraits::empty();
                traits.set(SpeciesTraits::ALIEN, spec.alien);
                traits.set(SpeciesTraits::ROBOT, spec.robot);
                Ok(SpeciesDefinition::new(SpeciesId(id), spec.key, traits))
            })
            .collect()
    }
}
