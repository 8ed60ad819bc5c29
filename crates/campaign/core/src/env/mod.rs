//! Traits describing read-only campaign data.
//!
//! Oracles expose the species catalog, research status, item definitions and
//! tunables. The [`Env`] aggregate bundles them so the engine can apply the
//! rules without hard coupling to concrete implementations.
mod config;
mod error;
mod items;
mod research;
mod snapshot;
mod species;

pub use config::ConfigOracle;
pub use error::OracleError;
pub use items::{ItemDefinition, ItemOracle};
pub use research::ResearchOracle;
pub use snapshot::{ItemsSnapshot, OracleSnapshot, ResearchSnapshot, SpeciesSnapshot};
pub use species::{SpeciesDefinition, SpeciesOracle, SpeciesTraits};

use crate::state::SpeciesId;

/// Aggregates read-only oracles required by the engine.
pub struct Env<'a, S, R, I, C>
where
    S: SpeciesOracle + ?Sized,
    R: ResearchOracle + ?Sized,
    I: ItemOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    species: Option<&'a S>,
    research: Option<&'a R>,
    items: Option<&'a I>,
    config: Option<&'a C>,
}

impl<S, R, I, C> Clone for Env<'_, S, R, I, C>
where
    S: SpeciesOracle + ?Sized,
    R: ResearchOracle + ?Sized,
    I: ItemOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, R, I, C> Copy for Env<'_, S, R, I, C>
where
    S: SpeciesOracle + ?Sized,
    R: ResearchOracle + ?Sized,
    I: ItemOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
}

pub type CampaignEnv<'a> = Env<
    'a,
    dyn SpeciesOracle + 'a,
    dyn ResearchOracle + 'a,
    dyn ItemOracle + 'a,
    dyn ConfigOracle + 'a,
>;

impl<'a, S, R, I, C> Env<'a, S, R, I, C>
where
    S: SpeciesOracle + ?Sized,
    R: ResearchOracle + ?Sized,
    I: ItemOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    pub fn new(
        species: Option<&'a S>,
        research: Option<&'a R>,
        items: Option<&'a I>,
        config: Option<&'a C>,
    ) -> Self {
        Self {
            species,
            research,
            items,
            config,
        }
    }

    pub fn with_all(species: &'a S, research: &'a R, items: &'a I, config: &'a C) -> Self {
        Self::new(Some(species), Some(research), Some(items), Some(config))
    }

    /// # Errors
    ///
    /// Returns `OracleError::SpeciesNotAvailable` if no species oracle was provided.
    pub fn species(&self) -> Result<&'a S, OracleError> {
        self.species.ok_or(OracleError::SpeciesNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::ResearchNotAvailable` if no research oracle was provided.
    pub fn research(&self) -> Result<&'a R, OracleError> {
        self.research.ok_or(OracleError::ResearchNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::ItemsNotAvailable` if no item oracle was provided.
    pub fn items(&self) -> Result<&'a I, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::ConfigNotAvailable` if no config oracle was provided.
    pub fn config(&self) -> Result<&'a C, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }

    /// Whether live specimens of `species` can be held right now.
    ///
    /// Robots need no breathing apparatus; everything else requires the
    /// breathing technology to be researched. Evaluated at admission time.
    ///
    /// # Errors
    ///
    /// Fails when the species, research or config oracle is missing.
    pub fn is_life_supported(&self, species: SpeciesId) -> Result<bool, OracleError> {
        if self.species()?.is_robot(species) {
            return Ok(true);
        }
        let tech = self.config()?.breathing_tech();
        Ok(self.research()?.is_researched(tech))
    }
}
