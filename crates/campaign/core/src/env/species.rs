use bitflags::bitflags;

use crate::state::SpeciesId;

bitflags! {
    /// Static traits of a species definition.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SpeciesTraits: u8 {
        /// Counts towards the global alien index used by legacy saves.
        const ALIEN = 1 << 0;
        /// Needs no breathing apparatus to be held alive.
        const ROBOT = 1 << 1;
    }
}

/// Read-only species catalog. Owned by content, never by this crate.
pub trait SpeciesOracle: Send + Sync {
    /// Interned id for a species key, `None` when unknown.
    fn resolve(&self, key: &str) -> Option<SpeciesId>;

    fn definition(&self, species: SpeciesId) -> Option<SpeciesDefinition>;

    /// All alien species in catalog order.
    ///
    /// The position in this list is the "global alien index" under which
    /// legacy saves stored their flat alive/dead arrays.
    fn aliens(&self) -> Vec<SpeciesId>;

    fn is_alien(&self, species: SpeciesId) -> bool {
        self.definition(species)
            .is_some_and(|def| def.traits.contains(SpeciesTraits::ALIEN))
    }

    fn is_robot(&self, species: SpeciesId) -> bool {
        self.definition(species)
            .is_some_and(|def| def.traits.contains(SpeciesTraits::ROBOT))
    }

    fn key(&self, species: SpeciesId) -> Option<String> {
        self.definition(species).map(|def| def.key)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeciesDefinition {
    pub id: SpeciesId,
    /// Stable key used in saves and console commands.
    pub key: String,
    pub traits: SpeciesTraits,
}

impl SpeciesDefinition {
    pub fn new(id: SpeciesId, key: impl Into<String>, traits: SpeciesTraits) -> Self {
        Self {
            id,
            key: key.into(),
            traits,
        }
    }
}
