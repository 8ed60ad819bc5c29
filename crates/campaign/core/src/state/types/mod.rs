//! Plain data types that make up the campaign state.
mod aircraft;
mod base;
mod capacity;
mod cargo;
mod containment;
mod date;
mod employee;
mod geo;
mod ids;
mod stats;
mod transfer;

pub use aircraft::{Aircraft, AircraftSize, AircraftStatus};
pub use base::{Base, BuildingFlags, StorageError};
pub use capacity::{Capacity, CapacityKind, CapacityLedger};
pub use cargo::{AlienCargo, AlienCargoEntry, BodyState, CargoError};
pub use containment::{Admission, AlienContainment, ContainmentError, ContainmentMut};
pub use date::CampaignDate;
pub use employee::{Employee, EmployeeKind};
pub use geo::GeoPosition;
pub use ids::{AircraftId, BaseId, EmployeeId, ItemId, SpeciesId, TransferId};
pub use stats::CampaignStats;
pub use transfer::{Transfer, TransferPayload, TransferRoster};
