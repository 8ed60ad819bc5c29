//! Alien intake, kills and containment building lifecycle.

use super::{CampaignEngine, CampaignEvent, CampaignTrigger, MessageCategory};
use crate::env::{CampaignEnv, ConfigOracle, SpeciesOracle};
use crate::state::{
    Admission, AircraftId, AlienCargo, AlienContainment, BaseId, BuildingFlags, CapacityKind,
    ContainmentError, ContainmentMut, SpeciesId,
};

const NOT_READY: &str = "You cannot process aliens yet. Alien Containment not ready in this base.";
const ALIENS_DIED: &str = "You can't hold live aliens yet. Aliens died.";
const NO_SPACE: &str = "You don't have enough space in Alien Containment. Some aliens got killed.";
const CAPTURED: &str = "You've captured new aliens.";
const BODIES_DISCARDED: &str = "Not enough room for dead aliens in Alien Containment. Some bodies were discarded.";

/// How arriving specimens are accounted for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Intake {
    /// Fresh from the battlefield: counts towards capture statistics and triggers.
    Capture,
    /// Already counted once; just moved between bases.
    Delivery,
}

/// Result of settling a cargo into a base containment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SettleReport {
    pub base: BaseId,
    pub admission: Admission,
}

impl CampaignEngine<'_> {
    /// Records specimens recovered by an aircraft on the battlefield.
    ///
    /// # Errors
    ///
    /// Fails for unknown aircraft, species the catalog does not list as alien,
    /// or counter overflow.
    pub fn collect_alien_from_battlefield(
        &mut self,
        env: &CampaignEnv<'_>,
        aircraft: AircraftId,
        species: SpeciesId,
        alive: u32,
        dead: u32,
    ) -> Result<(), ContainmentError> {
        if !env.species()?.is_alien(species) {
            return Err(ContainmentError::NotAlien(species));
        }
        let craft = self
            .state
            .aircraft
            .get_mut(&aircraft)
            .ok_or(ContainmentError::UnknownAircraft(aircraft))?;
        let alive = i32::try_from(alive).unwrap_or(i32::MAX);
        let dead = i32::try_from(dead).unwrap_or(i32::MAX);
        let mut cargo = craft.alien_cargo.clone().unwrap_or_default();
        cargo.add(species, alive, dead)?;
        craft.alien_cargo = Some(cargo);
        Ok(())
    }

    /// Moves an aircraft's alien cargo into its homebase containment.
    ///
    /// Live specimens of species without life support are stored dead; live
    /// specimens beyond the free capacity are killed. The aircraft cargo is
    /// emptied on success and left in place on failure.
    ///
    /// # Errors
    ///
    /// Returns [`ContainmentError::NoContainment`] (after notifying the player)
    /// when the homebase cannot hold aliens.
    pub fn settle_aircraft_cargo(
        &mut self,
        env: &CampaignEnv<'_>,
        aircraft: AircraftId,
    ) -> Result<SettleReport, ContainmentError> {
        let craft = self
            .state
            .aircraft
            .get(&aircraft)
            .ok_or(ContainmentError::UnknownAircraft(aircraft))?;
        let base = craft.homebase;
        let cargo = match craft.alien_cargo.as_ref() {
            Some(cargo) if !cargo.is_empty() => cargo.clone(),
            _ => {
                return Ok(SettleReport {
                    base,
                    admission: Admission::default(),
                });
            }
        };

        let report = match self.admit_cargo(env, base, &cargo, Intake::Capture) {
            Ok(report) => report,
            Err(err) => {
                if matches!(err, ContainmentError::NoContainment(_)) {
                    self.notify(MessageCategory::Containment, NOT_READY);
                }
                return Err(err);
            }
        };
        if let Some(craft) = self.state.aircraft.get_mut(&aircraft) {
            craft.alien_cargo = None;
        }
        Ok(report)
    }

    /// Merges `cargo` into the containment of `base` as a single staged update.
    ///
    /// Either every entry is applied or none is. Bodies beyond the dead cap
    /// are discarded; live specimens are never dropped.
    pub(crate) fn admit_cargo(
        &mut self,
        env: &CampaignEnv<'_>,
        base_id: BaseId,
        cargo: &AlienCargo,
        intake: Intake,
    ) -> Result<SettleReport, ContainmentError> {
        let plan = cargo
            .iter()
            .map(|entry| -> Result<_, ContainmentError> {
                Ok((*entry, env.is_life_supported(entry.species)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mail = env.config()?.breathing_mail().to_owned();

        let base = self
            .state
            .founded_base(base_id)
            .ok_or(ContainmentError::UnknownBase(base_id))?;
        let staged = base
            .containment
            .as_ref()
            .ok_or(ContainmentError::NoContainment(base_id))?;
        let mut staged = staged.clone();
        let mut ledger = base.capacities.clone();

        let mut total = Admission::default();
        {
            let mut view = staged.bind(&mut ledger);
            for (entry, supported) in &plan {
                let admission = view.admit(entry.species, entry.alive, entry.dead, *supported)?;
                total.admitted += admission.admitted;
                total.overflow_killed += admission.overflow_killed;
                total.suffocated += admission.suffocated;
                total.dead += admission.dead;
                total.discarded += admission.discarded;
            }
        }

        if let Some(base) = self.state.founded_base_mut(base_id) {
            base.containment = Some(staged);
            base.capacities = ledger;
        }

        for (entry, _) in &plan {
            self.emit(CampaignEvent::SpeciesCollected(entry.species));
        }
        if intake == Intake::Capture {
            self.state.stats.record_captured(total.admitted);
            self.state.stats.record_killed(total.total_dead());
        }

        if total.suffocated > 0 {
            self.emit(CampaignEvent::Trigger(CampaignTrigger::CapturedAliensDied));
            self.notify(MessageCategory::Containment, ALIENS_DIED);
            if !self.state.breathing_mail_sent {
                self.emit(CampaignEvent::EventMail { mail });
                self.state.breathing_mail_sent = true;
            }
        }
        if total.admitted > 0 && intake == Intake::Capture {
            self.emit(CampaignEvent::Trigger(CampaignTrigger::CapturedAliens));
            self.notify(MessageCategory::Containment, CAPTURED);
        }
        if total.overflow_killed > 0 {
            self.notify(MessageCategory::Containment, NO_SPACE);
        }
        if total.discarded > 0 {
            self.notify(MessageCategory::Containment, BODIES_DISCARDED);
        }

        Ok(SettleReport {
            base: base_id,
            admission: total,
        })
    }

    /// Adds a single specimen to a base containment.
    ///
    /// Dead specimens always fit; a live one needs a free slot.
    ///
    /// # Errors
    ///
    /// Fails when the base has no containment or no room for a live specimen.
    pub fn add_alien_to_container(
        &mut self,
        base: BaseId,
        species: SpeciesId,
        dead: bool,
    ) -> Result<(), ContainmentError> {
        self.containment(base)?.add_one(species, dead)
    }

    /// Kills every live specimen in a base. Allowed while the base is under attack.
    ///
    /// # Errors
    ///
    /// Fails for unknown bases or bases without containment.
    pub fn kill_all_aliens(&mut self, base: BaseId) -> Result<u32, ContainmentError> {
        Ok(self.containment(base)?.kill_all())
    }

    /// # Errors
    ///
    /// Fails without mutation if no live specimen of `species` is held.
    pub fn kill_one_alien(&mut self, base: BaseId, species: SpeciesId) -> Result<(), ContainmentError> {
        self.containment(base)?.kill_one(species)
    }

    /// Consumes live specimens for a research project. Returns the species used.
    ///
    /// # Errors
    ///
    /// Fails for unknown bases or bases without containment.
    pub fn consume_aliens_for_research(
        &mut self,
        base: BaseId,
        amount: u32,
    ) -> Result<Vec<SpeciesId>, ContainmentError> {
        Ok(self.containment(base)?.consume_for_research(amount))
    }

    /// A containment building finished construction.
    ///
    /// Creates the base containment on first completion and adds `capacity`
    /// live slots. Returns the new live capacity.
    ///
    /// # Errors
    ///
    /// Fails for unknown bases or a missing config oracle.
    pub fn complete_containment_building(
        &mut self,
        env: &CampaignEnv<'_>,
        base_id: BaseId,
        capacity: u32,
    ) -> Result<i32, ContainmentError> {
        let dead_capacity = env.config()?.dead_body_capacity();
        let base = self
            .state
            .founded_base_mut(base_id)
            .ok_or(ContainmentError::UnknownBase(base_id))?;
        base.buildings.insert(BuildingFlags::ALIEN_CONTAINMENT);
        base.containment
            .get_or_insert_with(|| AlienContainment::new(dead_capacity));
        let delta = i32::try_from(capacity).unwrap_or(i32::MAX);
        Ok(base.capacities.add_max(CapacityKind::Aliens, delta))
    }

    /// Changes the live capacity of a containment, killing survivors above it.
    ///
    /// # Errors
    ///
    /// Fails for unknown bases or bases without containment.
    pub fn set_containment_capacity(
        &mut self,
        base: BaseId,
        capacity: u32,
    ) -> Result<u32, ContainmentError> {
        let killed = self.containment(base)?.set_capacity(capacity);
        if killed > 0 {
            self.state.stats.record_killed(killed);
            self.notify(MessageCategory::Containment, NO_SPACE);
        }
        Ok(killed)
    }

    /// The last containment building of a base was destroyed.
    ///
    /// Runs a truncation pass to zero capacity first, so survivors die rather
    /// than vanish, then removes the containment. Returns its final contents.
    ///
    /// # Errors
    ///
    /// Fails for unknown bases or bases without containment.
    pub fn destroy_containment(&mut self, base_id: BaseId) -> Result<AlienContainment, ContainmentError> {
        self.set_containment_capacity(base_id, 0)?;
        let base = self
            .state
            .base_mut(base_id)
            .ok_or(ContainmentError::UnknownBase(base_id))?;
        base.buildings.remove(BuildingFlags::ALIEN_CONTAINMENT);
        base.capacities.set_current(CapacityKind::Aliens, 0);
        base.containment
            .take()
            .ok_or(ContainmentError::NoContainment(base_id))
    }

    fn containment(&mut self, base_id: BaseId) -> Result<ContainmentMut<'_>, ContainmentError> {
        let base = self
            .state
            .base_mut(base_id)
            .ok_or(ContainmentError::UnknownBase(base_id))?;
        base.containment_mut()
            .ok_or(ContainmentError::NoContainment(base_id))
    }
}
