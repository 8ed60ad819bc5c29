//! Keyed alien cargo held by aircraft, transfers and containments.
//!
//! [`AlienCargo`] is a small insertion-ordered map from species to live and
//! dead counts with cached totals. Every mutation goes through [`AlienCargo::add`],
//! which either applies both deltas or leaves the cargo untouched.

use crate::env::SpeciesOracle;
use crate::error::{CampaignError, ErrorSeverity};
use crate::state::SpeciesId;

/// Which half of an entry an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum BodyState {
    Alive,
    Dead,
}

/// Errors raised by cargo mutations and lookups.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CargoError {
    /// A removal would drive a count below zero.
    #[error("cannot remove {requested} {state} {species}: only {present} present")]
    Underflow {
        species: SpeciesId,
        state: BodyState,
        present: u32,
        requested: u32,
    },

    /// A delta would overflow the counter.
    #[error("{state} count for {species} overflows")]
    Overflow {
        species: SpeciesId,
        state: BodyState,
    },

    /// The species key could not be resolved by the species oracle.
    #[error("unknown species '{0}'")]
    UnknownSpecies(String),
}

impl CampaignError for CargoError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Underflow { .. } => ErrorSeverity::Recoverable,
            Self::Overflow { .. } => ErrorSeverity::Internal,
            Self::UnknownSpecies(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Underflow { .. } => "CARGO_UNDERFLOW",
            Self::Overflow { .. } => "CARGO_OVERFLOW",
            Self::UnknownSpecies(_) => "CARGO_UNKNOWN_SPECIES",
        }
    }
}

/// Live and dead counts of one species. Never stored with both counts at zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlienCargoEntry {
    pub species: SpeciesId,
    pub alive: u32,
    pub dead: u32,
}

impl AlienCargoEntry {
    pub const fn new(species: SpeciesId, alive: u32, dead: u32) -> Self {
        Self {
            species,
            alive,
            dead,
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.alive == 0 && self.dead == 0
    }
}

/// Insertion-ordered species counts with cached aggregate totals.
#[derive(Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<AlienCargoEntry>", into = "Vec<AlienCargoEntry>")
)]
pub struct AlienCargo {
    entries: Vec<AlienCargoEntry>,
    sum_alive: u32,
    sum_dead: u32,
}

impl AlienCargo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies signed deltas to one species.
    ///
    /// `(0, 0)` is a successful no-op. A result below zero on either side
    /// rejects the whole call. Entries reaching `(0, 0)` are removed.
    ///
    /// # Errors
    ///
    /// Returns [`CargoError::Underflow`] or [`CargoError::Overflow`] without
    /// modifying the cargo.
    pub fn add(&mut self, species: SpeciesId, alive: i32, dead: i32) -> Result<(), CargoError> {
        if alive == 0 && dead == 0 {
            return Ok(());
        }

        let position = self.position(species);
        let (present_alive, present_dead) = position
            .map(|idx| (self.entries[idx].alive, self.entries[idx].dead))
            .unwrap_or((0, 0));

        let new_alive = apply_delta(species, BodyState::Alive, present_alive, alive)?;
        let new_dead = apply_delta(species, BodyState::Dead, present_dead, dead)?;
        let sum_alive = self.sum_alive - present_alive;
        let sum_alive = sum_alive
            .checked_add(new_alive)
            .ok_or(CargoError::Overflow {
                species,
                state: BodyState::Alive,
            })?;
        let sum_dead = (self.sum_dead - present_dead)
            .checked_add(new_dead)
            .ok_or(CargoError::Overflow {
                species,
                state: BodyState::Dead,
            })?;

        let updated = AlienCargoEntry::new(species, new_alive, new_dead);
        match position {
            Some(idx) if updated.is_empty() => {
                self.entries.remove(idx);
            }
            Some(idx) => self.entries[idx] = updated,
            None => self.entries.push(updated),
        }
        self.sum_alive = sum_alive;
        self.sum_dead = sum_dead;

        debug_assert!(self.aggregates_consistent(), "cargo totals drifted");
        Ok(())
    }

    /// Resolves `species_key` through the oracle, then behaves like [`Self::add`].
    ///
    /// # Errors
    ///
    /// Returns [`CargoError::UnknownSpecies`] when the key does not resolve.
    pub fn add_by_key<S>(
        &mut self,
        species: &S,
        species_key: &str,
        alive: i32,
        dead: i32,
    ) -> Result<(), CargoError>
    where
        S: SpeciesOracle + ?Sized,
    {
        let id = resolve(species, species_key)?;
        self.add(id, alive, dead)
    }

    /// Moves `amount` live specimens of `species` to the dead column.
    ///
    /// # Errors
    ///
    /// Fails without mutation if fewer than `amount` are alive.
    pub fn kill(&mut self, species: SpeciesId, amount: u32) -> Result<(), CargoError> {
        let delta = i32::try_from(amount).map_err(|_| CargoError::Overflow {
            species,
            state: BodyState::Alive,
        })?;
        self.add(species, -delta, delta)
    }

    /// Converts every live specimen to dead. Returns the number converted.
    ///
    /// Specimens that would overflow a dead counter stay alive.
    pub fn kill_all(&mut self) -> u32 {
        let mut converted: u32 = 0;
        for entry in &mut self.entries {
            let room = (u32::MAX - entry.dead).min(u32::MAX - (self.sum_dead + converted));
            let moved = entry.alive.min(room);
            entry.alive -= moved;
            entry.dead += moved;
            converted += moved;
        }
        self.sum_dead += converted;
        self.sum_alive -= converted;
        debug_assert!(self.aggregates_consistent(), "cargo totals drifted");
        converted
    }

    /// Folds every entry of `other` into this cargo.
    ///
    /// # Errors
    ///
    /// Fails on counter overflow; entries merged before the failure stay merged.
    pub fn merge(&mut self, other: &AlienCargo) -> Result<(), CargoError> {
        for entry in other.iter() {
            let alive = to_delta(entry.species, BodyState::Alive, entry.alive)?;
            let dead = to_delta(entry.species, BodyState::Dead, entry.dead)?;
            self.add(entry.species, alive, dead)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.sum_alive = 0;
        self.sum_dead = 0;
    }

    /// Live count of `species`, zero when absent.
    pub fn alive(&self, species: SpeciesId) -> u32 {
        self.entry(species).map_or(0, |entry| entry.alive)
    }

    /// Dead count of `species`, zero when absent.
    pub fn dead(&self, species: SpeciesId) -> u32 {
        self.entry(species).map_or(0, |entry| entry.dead)
    }

    /// # Errors
    ///
    /// Returns [`CargoError::UnknownSpecies`] for keys the oracle does not know,
    /// which keeps "unknown" distinct from "zero present".
    pub fn alive_by_key<S>(&self, species: &S, species_key: &str) -> Result<u32, CargoError>
    where
        S: SpeciesOracle + ?Sized,
    {
        resolve(species, species_key).map(|id| self.alive(id))
    }

    /// # Errors
    ///
    /// Returns [`CargoError::UnknownSpecies`] for keys the oracle does not know.
    pub fn dead_by_key<S>(&self, species: &S, species_key: &str) -> Result<u32, CargoError>
    where
        S: SpeciesOracle + ?Sized,
    {
        resolve(species, species_key).map(|id| self.dead(id))
    }

    #[inline]
    pub fn total_alive(&self) -> u32 {
        self.sum_alive
    }

    #[inline]
    pub fn total_dead(&self) -> u32 {
        self.sum_dead
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entry(&self, species: SpeciesId) -> Option<&AlienCargoEntry> {
        self.entries.iter().find(|entry| entry.species == species)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &AlienCargoEntry> + '_ {
        self.entries.iter()
    }

    /// Independent snapshot of all entries in insertion order.
    pub fn list(&self) -> Vec<AlienCargoEntry> {
        self.entries.clone()
    }

    /// Recomputes both totals and compares them with the cached values.
    pub fn aggregates_consistent(&self) -> bool {
        let (alive, dead) = self.recount();
        alive == u64::from(self.sum_alive) && dead == u64::from(self.sum_dead)
    }

    fn recount(&self) -> (u64, u64) {
        self.entries.iter().fold((0u64, 0u64), |(alive, dead), entry| {
            (alive + u64::from(entry.alive), dead + u64::from(entry.dead))
        })
    }

    fn position(&self, species: SpeciesId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.species == species)
    }
}

impl Clone for AlienCargo {
    /// Deep copy; totals are recomputed from the copied entries.
    fn clone(&self) -> Self {
        Self::from(self.entries.clone())
    }
}

impl From<Vec<AlienCargoEntry>> for AlienCargo {
    /// Builds a cargo from raw entries, merging duplicate species and dropping
    /// empty entries. Counts that would overflow saturate.
    fn from(raw: Vec<AlienCargoEntry>) -> Self {
        let mut entries: Vec<AlienCargoEntry> = Vec::with_capacity(raw.len());
        for entry in raw.into_iter().filter(|entry| !entry.is_empty()) {
            match entries.iter_mut().find(|e| e.species == entry.species) {
                Some(existing) => {
                    existing.alive = existing.alive.saturating_add(entry.alive);
                    existing.dead = existing.dead.saturating_add(entry.dead);
                }
                None => entries.push(entry),
            }
        }
        let (sum_alive, sum_dead) = entries.iter().fold((0u32, 0u32), |(a, d), e| {
            (a.saturating_add(e.alive), d.saturating_add(e.dead))
        });
        Self {
            entries,
            sum_alive,
            sum_dead,
        }
    }
}

impl From<AlienCargo> for Vec<AlienCargoEntry> {
    fn from(cargo: AlienCargo) -> Self {
        cargo.entries
    }
}

impl FromIterator<AlienCargoEntry> for AlienCargo {
    fn from_iter<T: IntoIterator<Item = AlienCargoEntry>>(iter: T) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

fn resolve<S>(species: &S, species_key: &str) -> Result<SpeciesId, CargoError>
where
    S: SpeciesOracle + ?Sized,
{
    species
        .resolve(species_key)
        .ok_or_else(|| CargoError::UnknownSpecies(species_key.to_owned()))
}

fn apply_delta(
    species: SpeciesId,
    state: BodyState,
    present: u32,
    delta: i32,
) -> Result<u32, CargoError> {
    let next = i64::from(present) + i64::from(delta);
    if next < 0 {
        return Err(CargoError::Underflow {
            species,
            state,
            present,
            requested: delta.unsigned_abs(),
        });
    }
    u32::try_from(next).map_err(|_| CargoError::Overflow { species, state })
}

fn to_delta(species: SpeciesId, state: BodyState, amount: u32) -> Result<i32, CargoError> {
    i32::try_from(amount).map_err(|_| CargoError::Overflow { species, state })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{SpeciesDefinition, SpeciesSnapshot, SpeciesTraits};

    const X: SpeciesId = SpeciesId(1);
    const Y: SpeciesId = SpeciesId(2);

    fn species() -> SpeciesSnapshot {
        SpeciesSnapshot::new(vec![
            SpeciesDefinition::new(X, "taman", SpeciesTraits::ALIEN),
            SpeciesDefinition::new(Y, "ortnok", SpeciesTraits::ALIEN),
        ])
    }

    #[test]
    fn zero_delta_is_a_noop() {
        let mut cargo = AlienCargo::new();
        assert!(cargo.add(X, 0, 0).is_ok());
        assert!(cargo.add(X, 0, 0).is_ok());
        assert!(cargo.is_empty());
        assert_eq!(cargo.total_alive(), 0);
    }

    #[test]
    fn dead_bodies_added_then_removed_leave_no_entry() {
        let mut cargo = AlienCargo::new();
        cargo.add(Y, 0, 2).unwrap();
        cargo.add(Y, 0, -2).unwrap();
        assert!(cargo.list().iter().all(|entry| entry.species != Y));
        assert_eq!(cargo.total_dead(), 0);
    }

    #[test]
    fn underflow_rejects_both_deltas() {
        let mut cargo = AlienCargo::new();
        cargo.add(X, 3, 1).unwrap();
        let err = cargo.add(X, 2, -2).unwrap_err();
        assert_eq!(err.error_code(), "CARGO_UNDERFLOW");
        assert_eq!(cargo.alive(X), 3);
        assert_eq!(cargo.dead(X), 1);
        assert_eq!(cargo.total_alive(), 3);
    }

    #[test]
    fn removing_from_missing_entry_fails() {
        let mut cargo = AlienCargo::new();
        assert!(matches!(
            cargo.add(X, -1, 0),
            Err(CargoError::Underflow { present: 0, requested: 1, .. })
        ));
        assert!(cargo.is_empty());
    }

    #[test]
    fn totals_follow_every_mutation() {
        let mut cargo = AlienCargo::new();
        cargo.add(X, 4, 0).unwrap();
        cargo.add(Y, 1, 5).unwrap();
        cargo.kill(X, 2).unwrap();
        assert_eq!(cargo.total_alive(), 3);
        assert_eq!(cargo.total_dead(), 7);
        assert_eq!(cargo.kill_all(), 3);
        assert_eq!(cargo.total_alive(), 0);
        assert_eq!(cargo.total_dead(), 10);
        assert!(cargo.aggregates_consistent());
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut cargo = AlienCargo::new();
        cargo.add(Y, 1, 0).unwrap();
        cargo.add(X, 1, 0).unwrap();
        let order: Vec<_> = cargo.iter().map(|entry| entry.species).collect();
        assert_eq!(order, vec![Y, X]);
    }

    #[test]
    fn clone_is_independent() {
        let mut original = AlienCargo::new();
        original.add(X, 2, 1).unwrap();
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.add(X, 1, 0).unwrap();
        original.add(Y, 0, 4).unwrap();
        assert_eq!(original.alive(X), 2);
        assert_eq!(copy.alive(X), 3);
        assert_eq!(copy.dead(Y), 0);
    }

    #[test]
    fn unknown_key_is_distinguishable_from_zero() {
        let oracle = species();
        let mut cargo = AlienCargo::new();
        cargo.add_by_key(&oracle, "taman", 1, 0).unwrap();
        assert_eq!(cargo.alive_by_key(&oracle, "taman"), Ok(1));
        assert_eq!(cargo.dead_by_key(&oracle, "ortnok"), Ok(0));
        assert_eq!(
            cargo.alive_by_key(&oracle, "bloodspider"),
            Err(CargoError::UnknownSpecies("bloodspider".into()))
        );
        assert!(cargo.add_by_key(&oracle, "", 1, 0).is_err());
        assert_eq!(cargo.total_alive(), 1);
    }

    #[test]
    fn from_entries_merges_duplicates_and_drops_empty() {
        let cargo = AlienCargo::from(vec![
            AlienCargoEntry::new(X, 1, 0),
            AlienCargoEntry::new(Y, 0, 0),
            AlienCargoEntry::new(X, 2, 3),
        ]);
        assert_eq!(cargo.list(), vec![AlienCargoEntry::new(X, 3, 3)]);
        assert_eq!(cargo.total_alive(), 3);
        assert_eq!(cargo.total_dead(), 3);
    }

    #[test]
    fn kill_all_stops_at_a_full_dead_counter() {
        let mut cargo = AlienCargo::new();
        cargo.add(X, 0, i32::MAX).unwrap();
        cargo.add(X, 3, i32::MAX).unwrap();
        assert_eq!(cargo.dead(X), u32::MAX - 1);

        assert_eq!(cargo.kill_all(), 1);
        assert_eq!(cargo.alive(X), 2);
        assert_eq!(cargo.dead(X), u32::MAX);
        assert!(cargo.aggregates_consistent());
    }
}
