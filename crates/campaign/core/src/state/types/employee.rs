use crate::state::{AircraftId, BaseId, EmployeeId};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EmployeeKind {
    Soldier,
    Scientist,
    Worker,
    Pilot,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Employee {
    pub id: EmployeeId,
    pub kind: EmployeeKind,
    /// Base the employee works at. `None` while unhired.
    pub base: Option<BaseId>,
    pub hired: bool,
    pub in_transfer: bool,
    /// Assigned to a lab, workshop or similar building slot.
    pub assigned: bool,
    /// Aircraft the employee is crewing or piloting.
    pub aircraft: Option<AircraftId>,
}

impl Employee {
    pub fn hired(id: EmployeeId, kind: EmployeeKind, base: BaseId) -> Self {
        Self {
            id,
            kind,
            base: Some(base),
            hired: true,
            in_transfer: false,
            assigned: false,
            aircraft: None,
        }
    }

    /// Returns the employee to the hiring pool.
    pub fn discharge(&mut self) {
        self.base = None;
        self.hired = false;
        self.in_transfer = false;
        self.assigned = false;
        self.aircraft = None;
    }

    /// Available for a transfer out of `base`.
    pub fn is_available_at(&self, base: BaseId) -> bool {
        self.hired && !self.in_transfer && self.base == Some(base)
    }
}
