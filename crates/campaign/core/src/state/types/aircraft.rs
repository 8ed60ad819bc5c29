use std::collections::BTreeSet;

use crate::state::{AircraftId, AlienCargo, BaseId, CapacityKind, EmployeeId, GeoPosition};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AircraftSize {
    Small,
    Big,
}

impl AircraftSize {
    /// Hangar capacity an aircraft of this size occupies.
    pub const fn hangar(self) -> CapacityKind {
        match self {
            Self::Small => CapacityKind::SmallAircraft,
            Self::Big => CapacityKind::BigAircraft,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AircraftStatus {
    /// Parked in its homebase hangar.
    Home,
    Mission,
    Returning,
    /// Carried by a pending transfer.
    Transfer,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aircraft {
    pub id: AircraftId,
    pub name: String,
    pub size: AircraftSize,
    pub homebase: BaseId,
    pub status: AircraftStatus,
    pub position: Option<GeoPosition>,
    pub pilot: Option<EmployeeId>,
    pub crew: BTreeSet<EmployeeId>,
    /// Specimens collected on the battlefield and not yet settled.
    pub alien_cargo: Option<AlienCargo>,
}

impl Aircraft {
    pub fn new(id: AircraftId, name: impl Into<String>, size: AircraftSize, homebase: BaseId) -> Self {
        Self {
            id,
            name: name.into(),
            size,
            homebase,
            status: AircraftStatus::Home,
            position: None,
            pilot: None,
            crew: BTreeSet::new(),
            alien_cargo: None,
        }
    }

    pub fn is_home(&self) -> bool {
        self.status == AircraftStatus::Home
    }

    pub fn carries(&self, employee: EmployeeId) -> bool {
        self.pilot == Some(employee) || self.crew.contains(&employee)
    }

    /// Drops `employee` from the pilot seat or the crew.
    pub fn remove_employee(&mut self, employee: EmployeeId) -> bool {
        if self.pilot == Some(employee) {
            self.pilot = None;
            return true;
        }
        self.crew.remove(&employee)
    }
}
