use std::collections::BTreeMap;

use bitflags::bitflags;

use crate::env::ItemDefinition;
use crate::state::{
    AlienContainment, BaseId, CapacityKind, CapacityLedger, ContainmentMut, GeoPosition, ItemId,
};

bitflags! {
    /// Working buildings of a base. A flag is set only while the building is operational.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BuildingFlags: u16 {
        const ALIEN_CONTAINMENT = 1 << 0;
        const STORAGE           = 1 << 1;
        const LIVING_QUARTERS   = 1 << 2;
        const ANTIMATTER        = 1 << 3;
        const SMALL_HANGAR      = 1 << 4;
        const BIG_HANGAR        = 1 << 5;
        const LABORATORY        = 1 << 6;
        const WORKSHOP          = 1 << 7;
        const COMMAND_CENTRE    = 1 << 8;
    }
}

impl BuildingFlags {
    const CAPACITIES: [(BuildingFlags, CapacityKind); 8] = [
        (Self::ALIEN_CONTAINMENT, CapacityKind::Aliens),
        (Self::STORAGE, CapacityKind::Items),
        (Self::LIVING_QUARTERS, CapacityKind::Employees),
        (Self::ANTIMATTER, CapacityKind::Antimatter),
        (Self::SMALL_HANGAR, CapacityKind::SmallAircraft),
        (Self::BIG_HANGAR, CapacityKind::BigAircraft),
        (Self::LABORATORY, CapacityKind::LabSpace),
        (Self::WORKSHOP, CapacityKind::WorkSpace),
    ];

    /// Ledger entry a single building of this kind contributes capacity to.
    pub fn capacity(self) -> Option<CapacityKind> {
        Self::CAPACITIES
            .iter()
            .find(|(building, _)| *building == self)
            .map(|(_, kind)| *kind)
    }
}

/// Storage mutation failed; nothing was changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{base} holds {present} of {item}, cannot remove {requested}")]
pub struct StorageError {
    pub base: BaseId,
    pub item: ItemId,
    pub present: u32,
    pub requested: u32,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Base {
    pub id: BaseId,
    pub name: String,
    pub position: Option<GeoPosition>,
    /// Cleared when the base is lost. Ids of lost bases are never reused.
    pub founded: bool,
    pub buildings: BuildingFlags,
    pub capacities: CapacityLedger,
    pub storage: BTreeMap<ItemId, u32>,
    pub containment: Option<AlienContainment>,
    pub under_attack: bool,
}

impl Base {
    pub fn new(id: BaseId, name: impl Into<String>, position: Option<GeoPosition>) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            founded: true,
            buildings: BuildingFlags::empty(),
            capacities: CapacityLedger::new(),
            storage: BTreeMap::new(),
            containment: None,
            under_attack: false,
        }
    }

    #[inline]
    pub fn has(&self, building: BuildingFlags) -> bool {
        self.buildings.contains(building)
    }

    /// Live-alien containment paired with this base's ledger.
    pub fn containment_mut(&mut self) -> Option<ContainmentMut<'_>> {
        let Base {
            containment,
            capacities,
            ..
        } = self;
        containment
            .as_mut()
            .map(|containment| containment.bind(capacities))
    }

    pub fn item_count(&self, item: ItemId) -> u32 {
        self.storage.get(&item).copied().unwrap_or(0)
    }

    /// Adds or removes items and charges the matching ledger entry.
    ///
    /// Antimatter is charged per unit against [`CapacityKind::Antimatter`];
    /// other items stored in base are charged `size` per unit against
    /// [`CapacityKind::Items`]. Capacity is not enforced here, overflow is
    /// reconciled by the per-tick capacity check.
    ///
    /// # Errors
    ///
    /// Fails without mutation when removing more than is stored.
    pub fn add_item(&mut self, item: &ItemDefinition, delta: i32) -> Result<u32, StorageError> {
        let present = self.item_count(item.id);
        let next = i64::from(present) + i64::from(delta);
        if next < 0 {
            return Err(StorageError {
                base: self.id,
                item: item.id,
                present,
                requested: delta.unsigned_abs(),
            });
        }
        let next = u32::try_from(next).unwrap_or(u32::MAX);
        if next == 0 {
            self.storage.remove(&item.id);
        } else {
            self.storage.insert(item.id, next);
        }

        if item.antimatter {
            self.capacities.add_current(CapacityKind::Antimatter, delta);
        } else if item.stored_in_base {
            let size = i32::try_from(item.size).unwrap_or(i32::MAX);
            self.capacities
                .add_current(CapacityKind::Items, delta.saturating_mul(size));
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn medkit() -> ItemDefinition {
        ItemDefinition::new(ItemId(1), "medikit", 2)
    }

    #[test]
    fn storage_charges_item_size() {
        let mut base = Base::new(BaseId(0), "Alpha", None);
        base.add_item(&medkit(), 4).unwrap();
        assert_eq!(base.item_count(ItemId(1)), 4);
        assert_eq!(base.capacities.current(CapacityKind::Items), 8);
    }

    #[test]
    fn over_removal_is_rejected() {
        let mut base = Base::new(BaseId(0), "Alpha", None);
        base.add_item(&medkit(), 1).unwrap();
        let err = base.add_item(&medkit(), -2).unwrap_err();
        assert_eq!(err.present, 1);
        assert_eq!(base.item_count(ItemId(1)), 1);
        assert_eq!(base.capacities.current(CapacityKind::Items), 2);
    }

    #[test]
    fn antimatter_uses_its_own_ledger() {
        let mut base = Base::new(BaseId(0), "Alpha", None);
        let antimatter = ItemDefinition::new(ItemId(7), "antimatter", 1).antimatter();
        base.add_item(&antimatter, 30).unwrap();
        assert_eq!(base.capacities.current(CapacityKind::Antimatter), 30);
        assert_eq!(base.capacities.current(CapacityKind::Items), 0);
        base.add_item(&antimatter, -30).unwrap();
        assert!(base.storage.is_empty());
    }

    #[test]
    fn containment_view_requires_containment() {
        let mut base = Base::new(BaseId(0), "Alpha", None);
        assert!(base.containment_mut().is_none());
        base.containment = Some(AlienContainment::default());
        base.capacities.set_max(CapacityKind::Aliens, 2);
        let mut view = base.containment_mut().unwrap();
        view.add(crate::state::SpeciesId(3), 1, 0, true).unwrap();
        assert_eq!(base.capacities.current(CapacityKind::Aliens), 1);
    }
}
