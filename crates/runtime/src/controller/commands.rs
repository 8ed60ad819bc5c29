//! Typed requests accepted by the controller.
//!
//! Bases, species and items are named by the strings a player or console
//! types; the controller resolves them before touching campaign state.

use serde::{Deserialize, Serialize};

use campaign_core::{AircraftId, EmployeeId, SettleReport, TransferId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainmentCommand {
    /// Puts one specimen straight into a base containment (debug tooling).
    AddOne {
        base: String,
        species: String,
        dead: bool,
    },
    KillAll {
        base: String,
    },
    KillOne {
        base: String,
        species: String,
    },
    /// Mission recovery: specimens loaded onto an aircraft.
    Collect {
        aircraft: AircraftId,
        species: String,
        alive: u32,
        dead: u32,
    },
    /// Aircraft returned home; unload its alien cargo.
    Settle {
        aircraft: AircraftId,
    },
    ConsumeForResearch {
        base: String,
        amount: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainmentReply {
    Added,
    Killed(u32),
    Collected,
    Settled(SettleReport),
    /// Species keys of the specimens used up.
    Consumed(Vec<String>),
}

/// What to ship, by the names the player sees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub items: Vec<(String, u32)>,
    pub employees: Vec<EmployeeId>,
    /// `(species, alive, dead)`
    pub aliens: Vec<(String, u32, u32)>,
    pub aircraft: Vec<AircraftId>,
}

impl TransferRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(mut self, key: impl Into<String>, amount: u32) -> Self {
        self.items.push((key.into(), amount));
        self
    }

    pub fn employee(mut self, employee: EmployeeId) -> Self {
        self.employees.push(employee);
        self
    }

    pub fn aliens(mut self, species: impl Into<String>, alive: u32, dead: u32) -> Self {
        self.aliens.push((species.into(), alive, dead));
        self
    }

    pub fn aircraft(mut self, aircraft: AircraftId) -> Self {
        self.aircraft.push(aircraft);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferCommand {
    Start {
        source: String,
        destination: String,
        request: TransferRequest,
    },
    /// Ships an aircraft's recovered aliens straight from the mission site.
    FromMission {
        aircraft: AircraftId,
        destination: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferReply {
    Started(TransferId),
    /// Nothing to ship; no transfer was created.
    Empty,
}
