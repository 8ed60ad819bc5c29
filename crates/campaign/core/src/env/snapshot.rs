//! In-memory oracle implementations backed by plain data.
//!
//! Content loaders produce these snapshots and the runtime serves them to the
//! engine. Tests build them inline.

use std::collections::BTreeSet;

use super::{
    CampaignEnv, ConfigOracle, ItemDefinition, ItemOracle, ResearchOracle, SpeciesDefinition,
    SpeciesOracle, SpeciesTraits,
};
use crate::config::CampaignConfig;
use crate::state::{ItemId, SpeciesId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Species catalog held as a flat list in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpeciesSnapshot {
    pub species: Vec<SpeciesDefinition>,
}

impl SpeciesSnapshot {
    pub fn new(species: Vec<SpeciesDefinition>) -> Self {
        Self { species }
    }
}

impl SpeciesOracle for SpeciesSnapshot {
    fn resolve(&self, key: &str) -> Option<SpeciesId> {
        self.species.iter().find(|def| def.key == key).map(|def| def.id)
    }

    fn definition(&self, species: SpeciesId) -> Option<SpeciesDefinition> {
        self.species.iter().find(|def| def.id == species).cloned()
    }

    fn aliens(&self) -> Vec<SpeciesId> {
        self.species
            .iter()
            .filter(|def| def.traits.contains(SpeciesTraits::ALIEN))
            .map(|def| def.id)
            .collect()
    }
}

/// Item catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemsSnapshot {
    pub items: Vec<ItemDefinition>,
}

impl ItemsSnapshot {
    pub fn new(items: Vec<ItemDefinition>) -> Self {
        Self { items }
    }
}

impl ItemOracle for ItemsSnapshot {
    fn definition(&self, item: ItemId) -> Option<ItemDefinition> {
        self.items.iter().find(|def| def.id == item).cloned()
    }

    fn resolve(&self, key: &str) -> Option<ItemId> {
        self.items.iter().find(|def| def.key == key).map(|def| def.id)
    }

    fn antimatter(&self) -> Option<ItemId> {
        self.items.iter().find(|def| def.antimatter).map(|def| def.id)
    }
}

/// Technologies researched so far.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResearchSnapshot {
    pub researched: BTreeSet<String>,
}

impl ResearchSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_researched<I, S>(techs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            researched: techs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn mark_researched(&mut self, tech: impl Into<String>) -> bool {
        self.researched.insert(tech.into())
    }
}

impl ResearchOracle for ResearchSnapshot {
    fn is_researched(&self, tech: &str) -> bool {
        self.researched.contains(tech)
    }
}

/// Complete bundle of oracle data for one campaign.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OracleSnapshot {
    pub species: SpeciesSnapshot,
    pub items: ItemsSnapshot,
    pub research: ResearchSnapshot,
    pub config: CampaignConfig,
}

impl OracleSnapshot {
    pub fn new(
        species: SpeciesSnapshot,
        items: ItemsSnapshot,
        research: ResearchSnapshot,
        config: CampaignConfig,
    ) -> Self {
        Self {
            species,
            items,
            research,
            config,
        }
    }

    /// Borrows every oracle in this bundle as a [`CampaignEnv`].
    pub fn env(&self) -> CampaignEnv<'_> {
        let species: &dyn SpeciesOracle = &self.species;
        let research: &dyn ResearchOracle = &self.research;
        let items: &dyn ItemOracle = &self.items;
        let config: &dyn ConfigOracle = &self.config;
        CampaignEnv::with_all(species, research, items, config)
    }
}
