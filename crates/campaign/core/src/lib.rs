//! Deterministic campaign rules for alien containment, cargo and transfers.
//!
//! `campaign-core` owns the bookkeeping that moves captured specimens, items,
//! personnel and aircraft between bases. It performs no I/O: static data comes
//! in through the oracles in [`env`], and every mutation of [`CampaignState`]
//! flows through [`engine::CampaignEngine`], which reports what happened as
//! [`CampaignEvent`]s for the runtime to publish.
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use config::CampaignConfig;
pub use engine::{
    CampaignEngine, CampaignEvent, CampaignTrigger, CapacityOverflow, MessageCategory,
    SettleReport, StopReason, TickReport, TransferError, TransferOutcome,
};
pub use env::{
    CampaignEnv, ConfigOracle, Env, ItemDefinition, ItemOracle, ItemsSnapshot, OracleError,
    OracleSnapshot, ResearchOracle, ResearchSnapshot, SpeciesDefinition, SpeciesOracle,
    SpeciesSnapshot, SpeciesTraits,
};
pub use error::{CampaignError, ErrorSeverity};
pub use state::{
    Admission, Aircraft, AircraftId, AircraftSize, AircraftStatus, AlienCargo, AlienCargoEntry,
    AlienContainment, Base, BaseId, BodyState, BuildingFlags, CampaignDate, CampaignState,
    CampaignStats, Capacity, CapacityKind, CapacityLedger, CargoError, ContainmentError,
    ContainmentMut, Employee, EmployeeId, EmployeeKind, GeoPosition, ItemId, SpeciesId,
    StorageError, Transfer, TransferId, TransferPayload, TransferRoster,
};
