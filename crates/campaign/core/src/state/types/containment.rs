//! Base-scoped alien containment.
//!
//! Live specimens are gated by the owning base's [`CapacityKind::Aliens`]
//! ledger entry; dead bodies are optionally capped. The containment itself
//! only stores the cargo, so every mutation goes through [`ContainmentMut`],
//! which borrows the cargo and the ledger together and keeps them in lockstep.

use crate::env::OracleError;
use crate::error::{CampaignError, ErrorSeverity};
use crate::state::{
    AircraftId, AlienCargo, AlienCargoEntry, BaseId, BodyState, CapacityKind, CapacityLedger,
    CargoError, SpeciesId,
};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContainmentError {
    #[error("{0} does not exist")]
    UnknownBase(BaseId),

    #[error("{0} does not exist")]
    UnknownAircraft(AircraftId),

    #[error("{0} is not an alien species")]
    NotAlien(SpeciesId),

    #[error("{0} has no working alien containment")]
    NoContainment(BaseId),

    #[error("no free alien containment space (free: {free})")]
    Full { free: i32 },

    #[error("removing {requested} live aliens would drive the containment ledger below zero")]
    LedgerUnderflow { requested: u32 },

    #[error("dead body capacity {capacity} exceeded ({requested} requested)")]
    DeadCapacityExceeded { capacity: u32, requested: u64 },

    #[error(transparent)]
    Cargo(#[from] CargoError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl CampaignError for ContainmentError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownBase(_) | Self::UnknownAircraft(_) | Self::NotAlien(_) => {
                ErrorSeverity::Validation
            }
            Self::NoContainment(_) | Self::Full { .. } | Self::DeadCapacityExceeded { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::LedgerUnderflow { .. } => ErrorSeverity::Internal,
            Self::Cargo(err) => err.severity(),
            Self::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownBase(_) => "CONTAINMENT_UNKNOWN_BASE",
            Self::UnknownAircraft(_) => "CONTAINMENT_UNKNOWN_AIRCRAFT",
            Self::NotAlien(_) => "CONTAINMENT_NOT_ALIEN",
            Self::NoContainment(_) => "CONTAINMENT_NOT_AVAILABLE",
            Self::Full { .. } => "CONTAINMENT_FULL",
            Self::LedgerUnderflow { .. } => "CONTAINMENT_LEDGER_UNDERFLOW",
            Self::DeadCapacityExceeded { .. } => "CONTAINMENT_DEAD_CAPACITY_EXCEEDED",
            Self::Cargo(err) => err.error_code(),
            Self::Oracle(err) => err.error_code(),
        }
    }
}

/// Outcome of a single admission into a containment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Admission {
    /// Live specimens that now occupy containment space.
    pub admitted: u32,
    /// Live specimens killed because the containment was full.
    pub overflow_killed: u32,
    /// Live specimens that died because they could not be kept alive.
    pub suffocated: u32,
    /// Dead bodies stored as such.
    pub dead: u32,
    /// Bodies dropped because the dead-body storage was full.
    pub discarded: u32,
}

impl Admission {
    /// Every specimen that ended up dead in this admission.
    pub const fn total_dead(&self) -> u32 {
        self.overflow_killed + self.suffocated + self.dead
    }
}

/// Alien cargo owned by a base with a working containment building.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlienContainment {
    cargo: AlienCargo,
    dead_capacity: Option<u32>,
}

impl AlienContainment {
    pub fn new(dead_capacity: Option<u32>) -> Self {
        Self {
            cargo: AlienCargo::new(),
            dead_capacity,
        }
    }

    /// Rebuilds a containment from saved contents. The caller owns the ledger resync.
    pub fn restore(cargo: AlienCargo, dead_capacity: Option<u32>) -> Self {
        Self {
            cargo,
            dead_capacity,
        }
    }

    pub fn cargo(&self) -> &AlienCargo {
        &self.cargo
    }

    pub fn dead_capacity(&self) -> Option<u32> {
        self.dead_capacity
    }

    pub fn alive(&self) -> u32 {
        self.cargo.total_alive()
    }

    pub fn dead(&self) -> u32 {
        self.cargo.total_dead()
    }

    pub fn alive_of(&self, species: SpeciesId) -> u32 {
        self.cargo.alive(species)
    }

    pub fn dead_of(&self, species: SpeciesId) -> u32 {
        self.cargo.dead(species)
    }

    pub fn list(&self) -> Vec<AlienCargoEntry> {
        self.cargo.list()
    }

    pub fn is_empty(&self) -> bool {
        self.cargo.is_empty()
    }

    /// Pairs this containment with its base ledger for mutation.
    pub fn bind<'a>(&'a mut self, ledger: &'a mut CapacityLedger) -> ContainmentMut<'a> {
        ContainmentMut {
            containment: self,
            ledger,
        }
    }
}

/// Mutable view over a containment and the ledger that gates it.
pub struct ContainmentMut<'a> {
    containment: &'a mut AlienContainment,
    ledger: &'a mut CapacityLedger,
}

impl ContainmentMut<'_> {
    pub fn free(&self) -> i32 {
        self.ledger.free(CapacityKind::Aliens)
    }

    pub fn get(&self) -> &AlienContainment {
        self.containment
    }

    /// Adds specimens of one species.
    ///
    /// Dead bodies are stored as cargo. Positive `alive` amounts are admitted
    /// up to the free live capacity and the remainder is converted to dead;
    /// without life support every live specimen is stored dead. Negative
    /// `alive` amounts release space and move the ledger in lockstep.
    ///
    /// # Errors
    ///
    /// Fails without mutation when a removal exceeds what is present or the
    /// dead-body cap would be exceeded.
    pub fn add(
        &mut self,
        species: SpeciesId,
        alive: i32,
        dead: i32,
        life_supported: bool,
    ) -> Result<Admission, ContainmentError> {
        let mut admission = Admission::default();
        let (alive_delta, dead_delta) = if alive > 0 {
            let requested = alive as u32;
            if life_supported {
                let free = u32::try_from(self.free()).unwrap_or(0);
                admission.admitted = requested.min(free);
                admission.overflow_killed = requested - admission.admitted;
            } else {
                admission.suffocated = requested;
            }
            let converted = admission.overflow_killed + admission.suffocated;
            (admission.admitted as i32, dead.saturating_add(converted as i32))
        } else {
            if alive < 0 {
                let requested = alive.unsigned_abs();
                let present = self.containment.alive_of(species);
                if present < requested {
                    return Err(CargoError::Underflow {
                        species,
                        state: BodyState::Alive,
                        present,
                        requested,
                    }
                    .into());
                }
                if self.ledger.current(CapacityKind::Aliens) < requested as i32 {
                    return Err(ContainmentError::LedgerUnderflow { requested });
                }
            }
            (alive, dead)
        };
        admission.dead = dead.max(0) as u32;

        if dead_delta > 0 {
            self.check_dead_capacity(dead_delta as u32)?;
        }

        self.containment.cargo.add(species, alive_delta, dead_delta)?;
        self.ledger.add_current(CapacityKind::Aliens, alive_delta);
        self.debug_check_lockstep();
        Ok(admission)
    }

    /// Stores arriving specimens of one species.
    ///
    /// Live ones are handled like [`Self::add`], but the dead-body cap never
    /// rejects: bodies beyond it, including overflow kills, are discarded and
    /// reported in [`Admission::discarded`]. Live specimens are always kept.
    ///
    /// # Errors
    ///
    /// Fails without mutation only on counter overflow.
    pub fn admit(
        &mut self,
        species: SpeciesId,
        alive: u32,
        dead: u32,
        life_supported: bool,
    ) -> Result<Admission, ContainmentError> {
        let mut admission = Admission {
            dead,
            ..Admission::default()
        };
        if life_supported {
            let free = u32::try_from(self.free()).unwrap_or(0);
            admission.admitted = alive.min(free);
            admission.overflow_killed = alive - admission.admitted;
        } else {
            admission.suffocated = alive;
        }

        let bodies = u64::from(dead)
            + u64::from(admission.overflow_killed)
            + u64::from(admission.suffocated);
        let stored = self.dead_room().map_or(bodies, |room| bodies.min(room));
        admission.discarded = u32::try_from(bodies - stored).unwrap_or(u32::MAX);

        let overflow = |state| CargoError::Overflow { species, state };
        let alive_delta =
            i32::try_from(admission.admitted).map_err(|_| overflow(BodyState::Alive))?;
        let dead_delta = i32::try_from(stored).map_err(|_| overflow(BodyState::Dead))?;
        self.containment.cargo.add(species, alive_delta, dead_delta)?;
        self.ledger.add_current(CapacityKind::Aliens, alive_delta);
        self.debug_check_lockstep();
        Ok(admission)
    }

    /// Adds a single specimen, refusing live additions without free space.
    ///
    /// # Errors
    ///
    /// Returns [`ContainmentError::Full`] when a live specimen has no room.
    pub fn add_one(&mut self, species: SpeciesId, dead: bool) -> Result<(), ContainmentError> {
        if dead {
            self.add(species, 0, 1, true)?;
        } else {
            let free = self.free();
            if free <= 0 {
                return Err(ContainmentError::Full { free });
            }
            self.add(species, 1, 0, true)?;
        }
        Ok(())
    }

    /// Kills every live specimen. Returns the number killed.
    pub fn kill_all(&mut self) -> u32 {
        let killed = self.containment.cargo.kill_all();
        self.ledger.add_current(CapacityKind::Aliens, -(killed as i32));
        self.debug_check_lockstep();
        killed
    }

    /// Kills one live specimen of `species`.
    ///
    /// # Errors
    ///
    /// Fails without mutation if no live specimen of that species is held.
    pub fn kill_one(&mut self, species: SpeciesId) -> Result<(), ContainmentError> {
        self.containment.cargo.kill(species, 1)?;
        self.ledger.add_current(CapacityKind::Aliens, -1);
        self.debug_check_lockstep();
        Ok(())
    }

    /// Consumes up to `amount` live specimens for research.
    ///
    /// Each one is taken from the species with the most live specimens and
    /// kept as a dead body. Returns the species used, one per specimen.
    pub fn consume_for_research(&mut self, amount: u32) -> Vec<SpeciesId> {
        let mut consumed = Vec::new();
        for _ in 0..amount {
            let candidate = self
                .containment
                .cargo
                .iter()
                .filter(|entry| entry.alive > 0)
                .fold(None::<&AlienCargoEntry>, |best, entry| match best {
                    Some(best) if best.alive >= entry.alive => Some(best),
                    _ => Some(entry),
                })
                .map(|entry| entry.species);
            let Some(species) = candidate else {
                break;
            };
            if self.kill_one(species).is_err() {
                break;
            }
            consumed.push(species);
        }
        consumed
    }

    /// Kills live specimens above the live capacity, which may be zero.
    ///
    /// Specimens are taken from the end of the cargo first. Returns the
    /// number converted to dead.
    pub fn remove_exceeding_capacity(&mut self) -> u32 {
        let max = self.ledger.max(CapacityKind::Aliens).max(0) as u32;
        let mut excess = self.containment.alive().saturating_sub(max);
        let mut converted = 0;
        let species: Vec<_> = self
            .containment
            .cargo
            .iter()
            .rev()
            .filter(|entry| entry.alive > 0)
            .map(|entry| (entry.species, entry.alive))
            .collect();
        for (species, alive) in species {
            if excess == 0 {
                break;
            }
            let take = alive.min(excess);
            if self.containment.cargo.kill(species, take).is_ok() {
                excess -= take;
                converted += take;
            }
        }
        self.ledger
            .set_current(CapacityKind::Aliens, self.containment.alive() as i32);
        self.debug_check_lockstep();
        converted
    }

    /// Updates the live capacity and truncates anything above it.
    pub fn set_capacity(&mut self, max: u32) -> u32 {
        self.ledger
            .set_max(CapacityKind::Aliens, i32::try_from(max).unwrap_or(i32::MAX));
        self.remove_exceeding_capacity()
    }

    /// Bodies that still fit under the dead cap, `None` when uncapped.
    fn dead_room(&self) -> Option<u64> {
        self.containment
            .dead_capacity
            .map(|capacity| u64::from(capacity).saturating_sub(u64::from(self.containment.dead())))
    }

    fn check_dead_capacity(&self, incoming: u32) -> Result<(), ContainmentError> {
        if let Some(capacity) = self.containment.dead_capacity {
            let requested = u64::from(self.containment.dead()) + u64::from(incoming);
            if requested > u64::from(capacity) {
                return Err(ContainmentError::DeadCapacityExceeded {
                    capacity,
                    requested,
                });
            }
        }
        Ok(())
    }

    fn debug_check_lockstep(&self) {
        debug_assert_eq!(
            self.ledger.current(CapacityKind::Aliens),
            self.containment.alive() as i32,
            "alien ledger drifted from containment contents"
        );
    }
}
