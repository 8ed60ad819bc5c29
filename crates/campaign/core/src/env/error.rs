//! Oracle access errors.

use crate::error::{CampaignError, ErrorSeverity};
use crate::state::{ItemId, SpeciesId};

/// Errors that occur when accessing oracle data.
///
/// Missing oracles are fatal since the engine cannot apply the rules without
/// them; unknown ids are validation errors on the caller's input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("SpeciesOracle not available")]
    SpeciesNotAvailable,

    #[error("ResearchOracle not available")]
    ResearchNotAvailable,

    #[error("ItemOracle not available")]
    ItemsNotAvailable,

    #[error("ConfigOracle not available")]
    ConfigNotAvailable,

    #[error("species {0} not found")]
    SpeciesNotFound(SpeciesId),

    #[error("item {0} not found")]
    ItemNotFound(ItemId),
}

impl CampaignError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            SpeciesNotAvailable | ResearchNotAvailable | ItemsNotAvailable
            | ConfigNotAvailable => ErrorSeverity::Fatal,

            SpeciesNotFound(_) | ItemNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            SpeciesNotAvailable => "ORACLE_SPECIES_NOT_AVAILABLE",
            ResearchNotAvailable => "ORACLE_RESEARCH_NOT_AVAILABLE",
            ItemsNotAvailable => "ORACLE_ITEMS_NOT_AVAILABLE",
            ConfigNotAvailable => "ORACLE_CONFIG_NOT_AVAILABLE",
            SpeciesNotFound(_) => "ORACLE_SPECIES_NOT_FOUND",
            ItemNotFound(_) => "ORACLE_ITEM_NOT_FOUND",
        }
    }
}
