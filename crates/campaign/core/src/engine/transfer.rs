//! Transfer lifecycle: start, in-flight bookkeeping and resolution.
//!
//! Starting a transfer validates the whole payload first and only then debits
//! the source, so a rejected start leaves every base untouched. Resolution
//! removes the transfer from the roster before unloading; whatever cannot be
//! unloaded is lost with a notification.

use std::collections::BTreeMap;

use super::containment::Intake;
use super::{CampaignEngine, CampaignEvent, MessageCategory, TransferError};
use crate::config::CampaignConfig;
use crate::env::{CampaignEnv, ConfigOracle, ItemDefinition, ItemOracle};
use crate::state::{
    Aircraft, AircraftId, AircraftStatus, BaseId, BodyState, BuildingFlags, CapacityKind,
    ContainmentError, GeoPosition, ItemId, Transfer, TransferId, TransferPayload,
};

const DESTINATION_LOST: &str = "The destination base no longer exists! Transfer cargo was lost, personnel has been discharged.";

/// Result of resolving one transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferOutcome {
    pub id: TransferId,
    pub destination: BaseId,
    /// False when the destination no longer existed and everything was lost.
    pub delivered: bool,
}

impl CampaignEngine<'_> {
    /// Starts a base-to-base transfer and debits the payload from `source`.
    ///
    /// Returns `Ok(None)` for an empty payload; no transfer is created and
    /// nothing is debited.
    ///
    /// # Errors
    ///
    /// Any invalid or unavailable part of the payload rejects the whole
    /// transfer before anything is debited.
    pub fn start_transfer(
        &mut self,
        env: &CampaignEnv<'_>,
        source: BaseId,
        destination: BaseId,
        payload: TransferPayload,
    ) -> Result<Option<TransferId>, TransferError> {
        let src = self
            .state
            .founded_base(source)
            .ok_or(TransferError::UnknownBase(source))?;
        let dst = self
            .state
            .founded_base(destination)
            .ok_or(TransferError::UnknownBase(destination))?;
        if source == destination {
            return Err(TransferError::SameBase(source));
        }
        if payload.is_empty() {
            return Ok(None);
        }

        let items = self.validate_items(env, source, &payload)?;
        self.validate_employees(source, &payload)?;
        self.validate_aliens(source, &payload)?;
        self.validate_aircraft(source, &payload)?;

        let days = travel_days(env, src.position, dst.position)?;
        let arrival = self.state.date.add_days(days);
        let destination_name = dst.name.clone();

        self.debit_items(source, &items)?;
        self.debit_employees(source, &payload);
        self.debit_aliens(source, &payload)?;
        self.dispatch_aircraft(source, destination, &payload);

        let id = self
            .state
            .transfers
            .push(Some(source), destination, arrival, payload);
        self.emit(CampaignEvent::TransferStarted {
            id,
            destination,
            arrival,
        });
        self.notify(
            MessageCategory::TransferStarted,
            format!("Transport mission started, cargo is being transported to {destination_name}"),
        );
        Ok(Some(id))
    }

    /// Ships the alien cargo an aircraft recovered on a mission to `destination`.
    ///
    /// The aircraft position stands in for the source. Returns `Ok(None)` when
    /// the aircraft carries no aliens.
    ///
    /// # Errors
    ///
    /// Fails for unknown aircraft or destinations.
    pub fn start_transfer_from_mission(
        &mut self,
        env: &CampaignEnv<'_>,
        aircraft: AircraftId,
        destination: BaseId,
    ) -> Result<Option<TransferId>, TransferError> {
        let craft = self
            .state
            .aircraft
            .get(&aircraft)
            .ok_or(TransferError::UnknownAircraft(aircraft))?;
        let dst = self
            .state
            .founded_base(destination)
            .ok_or(TransferError::UnknownBase(destination))?;
        let cargo = match craft.alien_cargo.as_ref() {
            Some(cargo) if !cargo.is_empty() => cargo.clone(),
            _ => return Ok(None),
        };

        let days = travel_days(env, craft.position, dst.position)?;
        let arrival = self.state.date.add_days(days);
        let destination_name = dst.name.clone();

        if let Some(craft) = self.state.aircraft.get_mut(&aircraft) {
            craft.alien_cargo = None;
        }
        let payload = TransferPayload::new().with_aliens(cargo);
        let id = self.state.transfers.push(None, destination, arrival, payload);
        self.emit(CampaignEvent::TransferStarted {
            id,
            destination,
            arrival,
        });
        self.notify(
            MessageCategory::TransferStarted,
            format!("Transport mission started, cargo is being transported to {destination_name}"),
        );
        Ok(Some(id))
    }

    /// Resolves the first due transfer, if any. At most one per call.
    ///
    /// # Errors
    ///
    /// Fails before touching the roster when a required oracle is missing.
    pub fn run_transfers(
        &mut self,
        env: &CampaignEnv<'_>,
    ) -> Result<Option<TransferOutcome>, TransferError> {
        env.species()?;
        env.research()?;
        env.items()?;
        env.config()?;

        let Some(id) = self.state.transfers.first_due(self.state.date) else {
            return Ok(None);
        };
        let Some(transfer) = self.state.transfers.take(id) else {
            return Ok(None);
        };
        Ok(Some(self.resolve(env, transfer)))
    }

    /// Removes a destroyed aircraft from every in-flight payload.
    pub fn notify_aircraft_removed(&mut self, aircraft: AircraftId) -> usize {
        self.state.transfers.prune_aircraft(aircraft)
    }

    fn resolve(&mut self, env: &CampaignEnv<'_>, transfer: Transfer) -> TransferOutcome {
        let Transfer {
            id,
            source,
            destination,
            payload,
            ..
        } = transfer;

        let Some(name) = self
            .state
            .founded_base(destination)
            .map(|base| base.name.clone())
        else {
            self.discard(payload);
            self.notify(MessageCategory::TransferLost, DESTINATION_LOST);
            self.emit(CampaignEvent::TransferResolved {
                id,
                destination,
                delivered: false,
            });
            return TransferOutcome {
                id,
                destination,
                delivered: false,
            };
        };

        self.notify(
            MessageCategory::TransferCompleted,
            format!("Transport mission ended, unloading cargo in {name}"),
        );
        self.unload_items(env, destination, &name, &payload.items);
        self.unload_employees(destination, &name, &payload);
        if let Some(aliens) = payload.aliens.as_ref().filter(|cargo| !cargo.is_empty()) {
            let intake = if source.is_some() {
                Intake::Delivery
            } else {
                Intake::Capture
            };
            match self.admit_cargo(env, destination, aliens, intake) {
                Ok(_) => {}
                Err(ContainmentError::NoContainment(_)) => self.notify(
                    MessageCategory::CargoLost,
                    format!("{name} does not have Alien Containment, Aliens are removed!"),
                ),
                Err(err) => self.notify(
                    MessageCategory::CargoLost,
                    format!("{name} could not take the alien cargo ({err}), Aliens are removed!"),
                ),
            }
        }
        self.unload_aircraft(destination, &name, &payload.aircraft);

        self.emit(CampaignEvent::TransferResolved {
            id,
            destination,
            delivered: true,
        });
        TransferOutcome {
            id,
            destination,
            delivered: true,
        }
    }

    fn discard(&mut self, payload: TransferPayload) {
        for employee in payload.employee_ids() {
            if let Some(employee) = self.state.employees.get_mut(&employee) {
                employee.discharge();
            }
        }
        for aircraft in &payload.aircraft {
            self.remove_aircraft_record(*aircraft);
        }
    }

    fn validate_items(
        &self,
        env: &CampaignEnv<'_>,
        source: BaseId,
        payload: &TransferPayload,
    ) -> Result<Vec<(ItemDefinition, u32)>, TransferError> {
        if payload.items.values().all(|amount| *amount == 0) {
            return Ok(Vec::new());
        }
        let oracle = env.items()?;
        let base = self
            .state
            .founded_base(source)
            .ok_or(TransferError::UnknownBase(source))?;
        let mut items = Vec::with_capacity(payload.items.len());
        for (&item, &amount) in payload.items.iter().filter(|(_, amount)| **amount > 0) {
            let definition = oracle
                .definition(item)
                .ok_or(TransferError::UnknownItem(item))?;
            let present = base.item_count(item);
            if present < amount {
                return Err(TransferError::InsufficientItems {
                    base: source,
                    item,
                    present,
                    requested: amount,
                });
            }
            items.push((definition, amount));
        }
        Ok(items)
    }

    fn validate_employees(
        &self,
        source: BaseId,
        payload: &TransferPayload,
    ) -> Result<(), TransferError> {
        for (&listed, ids) in &payload.employees {
            for &id in ids {
                let employee = self
                    .state
                    .employees
                    .get(&id)
                    .ok_or(TransferError::UnknownEmployee(id))?;
                if employee.kind != listed {
                    return Err(TransferError::EmployeeKindMismatch {
                        employee: id,
                        listed,
                        actual: employee.kind,
                    });
                }
                if !employee.is_available_at(source) {
                    return Err(TransferError::EmployeeUnavailable {
                        employee: id,
                        base: source,
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_aliens(&self, source: BaseId, payload: &TransferPayload) -> Result<(), TransferError> {
        let Some(aliens) = payload.aliens.as_ref().filter(|cargo| !cargo.is_empty()) else {
            return Ok(());
        };
        let containment = self
            .state
            .founded_base(source)
            .and_then(|base| base.containment.as_ref())
            .ok_or(ContainmentError::NoContainment(source))?;
        for entry in aliens.iter() {
            let checks = [
                (BodyState::Alive, containment.alive_of(entry.species), entry.alive),
                (BodyState::Dead, containment.dead_of(entry.species), entry.dead),
            ];
            for (state, present, requested) in checks {
                if present < requested {
                    return Err(TransferError::InsufficientAliens {
                        base: source,
                        species: entry.species,
                        state,
                        present,
                        requested,
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_aircraft(
        &self,
        source: BaseId,
        payload: &TransferPayload,
    ) -> Result<(), TransferError> {
        for &id in &payload.aircraft {
            let craft = self
                .state
                .aircraft
                .get(&id)
                .ok_or(TransferError::UnknownAircraft(id))?;
            if craft.homebase != source || !craft.is_home() {
                return Err(TransferError::AircraftUnavailable {
                    aircraft: id,
                    base: source,
                });
            }
        }
        Ok(())
    }

    fn debit_items(
        &mut self,
        source: BaseId,
        items: &[(ItemDefinition, u32)],
    ) -> Result<(), TransferError> {
        let base = self
            .state
            .founded_base_mut(source)
            .ok_or(TransferError::UnknownBase(source))?;
        for (definition, amount) in items {
            let delta = i32::try_from(*amount).unwrap_or(i32::MAX);
            base.add_item(definition, -delta)
                .map_err(|err| TransferError::InsufficientItems {
                    base: err.base,
                    item: err.item,
                    present: err.present,
                    requested: err.requested,
                })?;
        }
        Ok(())
    }

    fn debit_employees(&mut self, source: BaseId, payload: &TransferPayload) {
        let mut moved: i32 = 0;
        for id in payload.employee_ids() {
            let Some(employee) = self.state.employees.get_mut(&id) else {
                continue;
            };
            employee.assigned = false;
            employee.in_transfer = true;
            moved += 1;
            let Some(craft_id) = employee.aircraft else {
                continue;
            };
            if !payload.aircraft.contains(&craft_id) {
                employee.aircraft = None;
                if let Some(craft) = self.state.aircraft.get_mut(&craft_id) {
                    craft.remove_employee(id);
                }
            }
        }
        if let Some(base) = self.state.founded_base_mut(source) {
            base.capacities.add_current(CapacityKind::Employees, -moved);
        }
    }

    fn debit_aliens(&mut self, source: BaseId, payload: &TransferPayload) -> Result<(), TransferError> {
        let Some(aliens) = payload.aliens.as_ref() else {
            return Ok(());
        };
        let mut view = self
            .state
            .founded_base_mut(source)
            .and_then(|base| base.containment_mut())
            .ok_or(ContainmentError::NoContainment(source))?;
        for entry in aliens.iter() {
            let alive = i32::try_from(entry.alive).unwrap_or(i32::MAX);
            let dead = i32::try_from(entry.dead).unwrap_or(i32::MAX);
            view.add(entry.species, -alive, -dead, true)?;
        }
        Ok(())
    }

    fn dispatch_aircraft(&mut self, source: BaseId, destination: BaseId, payload: &TransferPayload) {
        for &id in &payload.aircraft {
            let Some(craft) = self.state.aircraft.get_mut(&id) else {
                continue;
            };
            craft.status = AircraftStatus::Transfer;
            craft.homebase = destination;
            let hangar = craft.size.hangar();

            let mut dropped = Vec::new();
            if let Some(pilot) = craft.pilot.filter(|pilot| !payload.has_employee(*pilot)) {
                craft.pilot = None;
                dropped.push(pilot);
            }
            craft.crew.retain(|member| {
                let keep = payload.has_employee(*member);
                if !keep {
                    dropped.push(*member);
                }
                keep
            });
            for member in dropped {
                if let Some(employee) = self.state.employees.get_mut(&member) {
                    employee.aircraft = None;
                }
            }

            if let Some(base) = self.state.founded_base_mut(source) {
                base.capacities.add_current(hangar, -1);
            }
            if let Some(base) = self.state.founded_base_mut(destination) {
                base.capacities.add_current(hangar, 1);
            }
        }
    }

    fn unload_items(
        &mut self,
        env: &CampaignEnv<'_>,
        destination: BaseId,
        name: &str,
        items: &BTreeMap<ItemId, u32>,
    ) {
        let Ok(oracle) = env.items() else {
            return;
        };
        let mut storage_missing = false;
        let mut antimatter_missing = false;
        for (&item, &amount) in items.iter().filter(|(_, amount)| **amount > 0) {
            let Some(definition) = oracle.definition(item) else {
                self.notify(
                    MessageCategory::CargoLost,
                    format!("{amount} pieces of unknown {item} could not be unloaded in {name}"),
                );
                continue;
            };
            let Some(base) = self.state.founded_base_mut(destination) else {
                return;
            };
            let accepted = if definition.antimatter {
                base.has(BuildingFlags::ANTIMATTER)
            } else if definition.stored_in_base {
                base.has(BuildingFlags::STORAGE)
            } else {
                true
            };
            if accepted {
                let delta = i32::try_from(amount).unwrap_or(i32::MAX);
                if let Err(err) = base.add_item(&definition, delta) {
                    self.notify(
                        MessageCategory::CargoLost,
                        format!("{name} could not store the delivered items: {err}"),
                    );
                }
            } else if definition.antimatter {
                antimatter_missing = true;
            } else {
                storage_missing = true;
            }
        }
        if antimatter_missing {
            self.notify(
                MessageCategory::CargoLost,
                format!("{name} does not have Antimatter Storage, antimatter are removed!"),
            );
        }
        if storage_missing {
            self.notify(
                MessageCategory::CargoLost,
                format!("{name} does not have Storage, items are removed!"),
            );
        }
    }

    fn unload_employees(&mut self, destination: BaseId, name: &str, payload: &TransferPayload) {
        let housed = self
            .state
            .founded_base(destination)
            .is_some_and(|base| base.has(BuildingFlags::LIVING_QUARTERS));
        let mut arrived: i32 = 0;
        let mut unhired = false;
        for id in payload.employee_ids() {
            let Some(employee) = self.state.employees.get_mut(&id) else {
                continue;
            };
            if housed {
                employee.base = Some(destination);
                employee.in_transfer = false;
                arrived += 1;
            } else {
                if let Some(craft) = employee
                    .aircraft
                    .and_then(|craft| self.state.aircraft.get_mut(&craft))
                {
                    craft.remove_employee(id);
                }
                employee.discharge();
                unhired = true;
            }
        }
        if arrived > 0 {
            if let Some(base) = self.state.founded_base_mut(destination) {
                base.capacities.add_current(CapacityKind::Employees, arrived);
            }
        }
        if unhired {
            self.notify(
                MessageCategory::CargoLost,
                format!("{name} does not have Living Quarters, employees got unhired!"),
            );
        }
    }

    fn unload_aircraft(&mut self, destination: BaseId, name: &str, aircraft: &[AircraftId]) {
        for &id in aircraft {
            let Some(hangar) = self.state.aircraft.get(&id).map(|craft| craft.size.hangar()) else {
                continue;
            };
            let Some(base) = self.state.founded_base(destination) else {
                return;
            };
            let has_space = !base.capacities.get(hangar).is_exceeded();
            let position = base.position;
            if has_space {
                if let Some(craft) = self.state.aircraft.get_mut(&id) {
                    craft.status = AircraftStatus::Home;
                    craft.position = position;
                }
            } else {
                self.remove_aircraft_record(id);
                self.notify(
                    MessageCategory::CargoLost,
                    format!("{name} does not have enough free space. Aircraft is lost!"),
                );
            }
        }
    }

    /// Drops an aircraft from the campaign, releasing its hangar slot and crew.
    pub(crate) fn remove_aircraft_record(&mut self, aircraft: AircraftId) -> Option<Aircraft> {
        let craft = self.state.aircraft.remove(&aircraft)?;
        if let Some(base) = self.state.founded_base_mut(craft.homebase) {
            base.capacities.add_current(craft.size.hangar(), -1);
        }
        for member in craft.pilot.iter().chain(craft.crew.iter()) {
            if let Some(employee) = self.state.employees.get_mut(member) {
                employee.aircraft = None;
            }
        }
        Some(craft)
    }
}

fn travel_days(
    env: &CampaignEnv<'_>,
    from: Option<GeoPosition>,
    to: Option<GeoPosition>,
) -> Result<f64, TransferError> {
    match (from, to) {
        (Some(from), Some(to)) => {
            Ok(from.distance_degrees(&to) / CampaignConfig::DEGREES_PER_TRAVEL_DAY)
        }
        _ => Ok(env.config()?.default_transfer_days()),
    }
}
