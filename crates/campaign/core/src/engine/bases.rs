//! Base lifecycle: buildings, attacks and loss.

use super::{CampaignEngine, MessageCategory, StopReason};
use crate::env::CampaignEnv;
use crate::state::{Aircraft, AircraftId, AircraftStatus, BaseId, BuildingFlags, ContainmentError};

impl CampaignEngine<'_> {
    /// A building finished construction and adds `capacity` to its ledger entry.
    ///
    /// Containment buildings also create the base containment.
    ///
    /// # Errors
    ///
    /// Fails for unknown bases or, for containment buildings, a missing config oracle.
    pub fn complete_building(
        &mut self,
        env: &CampaignEnv<'_>,
        base_id: BaseId,
        building: BuildingFlags,
        capacity: u32,
    ) -> Result<(), ContainmentError> {
        if building == BuildingFlags::ALIEN_CONTAINMENT {
            self.complete_containment_building(env, base_id, capacity)?;
            return Ok(());
        }
        let base = self
            .state
            .founded_base_mut(base_id)
            .ok_or(ContainmentError::UnknownBase(base_id))?;
        base.buildings.insert(building);
        if let Some(kind) = building.capacity() {
            base.capacities
                .add_max(kind, i32::try_from(capacity).unwrap_or(i32::MAX));
        }
        Ok(())
    }

    /// Marks a base as under attack and stops time. Containment stays usable.
    pub fn begin_base_attack(&mut self, base_id: BaseId) -> bool {
        let Some(base) = self.state.founded_base_mut(base_id) else {
            return false;
        };
        base.under_attack = true;
        self.stop_time(StopReason::BaseAttack(base_id));
        true
    }

    pub fn end_base_attack(&mut self, base_id: BaseId) -> bool {
        match self.state.founded_base_mut(base_id) {
            Some(base) => {
                base.under_attack = false;
                true
            }
            None => false,
        }
    }

    /// The base is lost. Its containment is destroyed after a truncation pass,
    /// its staff is discharged and parked aircraft are destroyed. Transfers
    /// heading here are lost when they arrive.
    pub fn lose_base(&mut self, base_id: BaseId) -> bool {
        let Some(name) = self.state.founded_base(base_id).map(|base| base.name.clone()) else {
            return false;
        };
        match self.destroy_containment(base_id) {
            Ok(remains) if !remains.is_empty() => self.notify(
                MessageCategory::Containment,
                format!("{} dead aliens were lost with {name}.", remains.dead()),
            ),
            Ok(_) | Err(ContainmentError::NoContainment(_)) => {}
            Err(err) => self.notify(
                MessageCategory::Standard,
                format!("Alien Containment of {name} could not be cleared: {err}"),
            ),
        }
        for employee in self.state.employees.values_mut() {
            if employee.base == Some(base_id) && !employee.in_transfer {
                employee.discharge();
            }
        }
        let parked: Vec<_> = self
            .state
            .aircraft
            .values()
            .filter(|craft| craft.homebase == base_id && craft.status != AircraftStatus::Transfer)
            .map(|craft| craft.id)
            .collect();
        for aircraft in parked {
            self.destroy_aircraft(aircraft);
        }
        if let Some(base) = self.state.base_mut(base_id) {
            base.founded = false;
            base.under_attack = false;
        }
        self.notify(MessageCategory::Standard, format!("{name} has been lost."));
        true
    }

    /// Destroys an aircraft and prunes it from pending transfers.
    pub fn destroy_aircraft(&mut self, aircraft: AircraftId) -> Option<Aircraft> {
        let craft = self.remove_aircraft_record(aircraft)?;
        self.notify_aircraft_removed(aircraft);
        Some(craft)
    }
}
