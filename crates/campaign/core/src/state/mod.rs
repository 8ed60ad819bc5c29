//! Campaign state owned by the runtime and mutated through the engine.
//!
//! [`CampaignState`] replaces ambient globals: every base, employee, aircraft
//! and pending transfer lives here, addressed by stable ids.
mod types;

pub use types::*;

use std::collections::BTreeMap;

/// Complete mutable state of the containment, cargo and transfer subsystem.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CampaignState {
    pub date: CampaignDate,
    /// Arena of bases indexed by [`BaseId`]. Lost bases stay with `founded == false`.
    pub bases: Vec<Base>,
    pub employees: BTreeMap<EmployeeId, Employee>,
    pub aircraft: BTreeMap<AircraftId, Aircraft>,
    pub transfers: TransferRoster,
    pub stats: CampaignStats,
    /// Set once the "aliens need breathing apparatus" mail went out.
    /// Persisted with the containment records, not with the state.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub breathing_mail_sent: bool,
    /// Game time is halted until the player resolves a blocking condition.
    pub time_stopped: bool,
}

impl CampaignState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Founds a new base and returns its id.
    pub fn found_base(&mut self, name: impl Into<String>, position: Option<GeoPosition>) -> BaseId {
        let id = BaseId(self.bases.len() as u16);
        self.bases.push(Base::new(id, name, position));
        id
    }

    /// Any base, founded or lost.
    pub fn base(&self, id: BaseId) -> Option<&Base> {
        self.bases.get(usize::from(id.0))
    }

    pub fn base_mut(&mut self, id: BaseId) -> Option<&mut Base> {
        self.bases.get_mut(usize::from(id.0))
    }

    /// A base that still exists.
    pub fn founded_base(&self, id: BaseId) -> Option<&Base> {
        self.base(id).filter(|base| base.founded)
    }

    pub fn founded_base_mut(&mut self, id: BaseId) -> Option<&mut Base> {
        self.base_mut(id).filter(|base| base.founded)
    }

    pub fn founded_bases(&self) -> impl Iterator<Item = &Base> + '_ {
        self.bases.iter().filter(|base| base.founded)
    }

    pub fn hire(&mut self, employee: Employee) {
        if let Some(base) = employee.base.and_then(|id| self.founded_base_mut(id)) {
            base.capacities.add_current(CapacityKind::Employees, 1);
        }
        self.employees.insert(employee.id, employee);
    }

    /// Registers an aircraft parked at its homebase, occupying a hangar slot.
    pub fn add_aircraft(&mut self, aircraft: Aircraft) {
        let hangar = aircraft.size.hangar();
        if let Some(base) = self.founded_base_mut(aircraft.homebase) {
            base.capacities.add_current(hangar, 1);
        }
        self.aircraft.insert(aircraft.id, aircraft);
    }
}
