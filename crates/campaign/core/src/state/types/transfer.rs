use std::collections::{BTreeMap, BTreeSet};

use crate::state::{
    AircraftId, AlienCargo, BaseId, CampaignDate, EmployeeId, EmployeeKind, ItemId, TransferId,
};

/// Cargo carried by a transfer. A transfer owns its payload until it resolves.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferPayload {
    pub items: BTreeMap<ItemId, u32>,
    pub employees: BTreeMap<EmployeeKind, BTreeSet<EmployeeId>>,
    pub aliens: Option<AlienCargo>,
    /// Aircraft in the order they were added.
    pub aircraft: Vec<AircraftId>,
}

impl TransferPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, item: ItemId, amount: u32) -> Self {
        self.add_item(item, amount);
        self
    }

    pub fn with_employee(mut self, kind: EmployeeKind, employee: EmployeeId) -> Self {
        self.add_employee(kind, employee);
        self
    }

    pub fn with_aliens(mut self, aliens: AlienCargo) -> Self {
        self.aliens = Some(aliens);
        self
    }

    pub fn with_aircraft(mut self, aircraft: AircraftId) -> Self {
        self.add_aircraft(aircraft);
        self
    }

    pub fn add_item(&mut self, item: ItemId, amount: u32) {
        if amount > 0 {
            let slot = self.items.entry(item).or_insert(0);
            *slot = slot.saturating_add(amount);
        }
    }

    pub fn add_employee(&mut self, kind: EmployeeKind, employee: EmployeeId) {
        self.employees.entry(kind).or_default().insert(employee);
    }

    pub fn add_aircraft(&mut self, aircraft: AircraftId) {
        if !self.aircraft.contains(&aircraft) {
            self.aircraft.push(aircraft);
        }
    }

    pub fn has_employee(&self, employee: EmployeeId) -> bool {
        self.employees.values().any(|set| set.contains(&employee))
    }

    pub fn employee_ids(&self) -> impl Iterator<Item = EmployeeId> + '_ {
        self.employees.values().flatten().copied()
    }

    pub fn has_aliens(&self) -> bool {
        self.aliens.as_ref().is_some_and(|cargo| !cargo.is_empty())
    }

    /// True when there is nothing to carry.
    pub fn is_empty(&self) -> bool {
        self.items.values().all(|amount| *amount == 0)
            && self.employees.values().all(BTreeSet::is_empty)
            && !self.has_aliens()
            && self.aircraft.is_empty()
    }
}

/// A pending shipment between two bases, or from a mission site to a base.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transfer {
    pub id: TransferId,
    /// `None` for mission-recovery transfers.
    pub source: Option<BaseId>,
    pub destination: BaseId,
    pub arrival: CampaignDate,
    pub payload: TransferPayload,
}

impl Transfer {
    pub fn is_due(&self, now: CampaignDate) -> bool {
        self.arrival.is_due(now)
    }
}

/// Ordered list of pending transfers.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferRoster {
    transfers: Vec<Transfer>,
    next_id: u32,
}

impl TransferRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transfer and assigns it a fresh id.
    pub fn push(
        &mut self,
        source: Option<BaseId>,
        destination: BaseId,
        arrival: CampaignDate,
        payload: TransferPayload,
    ) -> TransferId {
        let id = TransferId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.transfers.push(Transfer {
            id,
            source,
            destination,
            arrival,
            payload,
        });
        id
    }

    /// First transfer in roster order whose arrival has been reached.
    pub fn first_due(&self, now: CampaignDate) -> Option<TransferId> {
        self.transfers
            .iter()
            .find(|transfer| transfer.is_due(now))
            .map(|transfer| transfer.id)
    }

    /// Removes and returns a transfer. This is the commit point of resolution.
    pub fn take(&mut self, id: TransferId) -> Option<Transfer> {
        let idx = self.transfers.iter().position(|t| t.id == id)?;
        Some(self.transfers.remove(idx))
    }

    pub fn get(&self, id: TransferId) -> Option<&Transfer> {
        self.transfers.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transfer> + '_ {
        self.transfers.iter()
    }

    pub fn len(&self) -> usize {
        self.transfers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Drops `aircraft` from every pending payload. Returns how many transfers carried it.
    pub fn prune_aircraft(&mut self, aircraft: AircraftId) -> usize {
        let mut pruned = 0;
        for transfer in &mut self.transfers {
            let before = transfer.payload.aircraft.len();
            transfer.payload.aircraft.retain(|id| *id != aircraft);
            if transfer.payload.aircraft.len() != before {
                pruned += 1;
            }
        }
        pruned
    }

    /// Removes every pending transfer. Id allocation continues where it was.
    pub fn drain(&mut self) -> Vec<Transfer> {
        std::mem::take(&mut self.transfers)
    }

    /// Restores a transfer read from a save, keeping id allocation ahead of it.
    pub fn restore(&mut self, transfer: Transfer) {
        self.next_id = self.next_id.max(transfer.id.0.wrapping_add(1));
        self.transfers.push(transfer);
    }
}
