use strum::{EnumCount, IntoEnumIterator};

/// Kinds of base capacity tracked by the ledger.
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
    strum::EnumCount,
    strum::IntoStaticStr,
    strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CapacityKind {
    Aliens,
    SmallAircraft,
    BigAircraft,
    Employees,
    Items,
    LabSpace,
    WorkSpace,
    Antimatter,
}

impl CapacityKind {
    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

/// Single ledger entry. Both counters are kept non-negative.
///
/// `current > max` is legal until the next overflow reconciliation pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Capacity {
    pub current: i32,
    pub max: i32,
}

impl Capacity {
    pub const fn new(current: i32, max: i32) -> Self {
        Self { current, max }
    }

    /// Remaining room; negative while over capacity.
    #[inline]
    pub const fn free(&self) -> i32 {
        self.max - self.current
    }

    #[inline]
    pub const fn is_exceeded(&self) -> bool {
        self.current > self.max
    }
}

/// Per-base capacity ledger, one [`Capacity`] per [`CapacityKind`].
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapacityLedger {
    entries: [Capacity; CapacityKind::COUNT],
}

impl CapacityLedger {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, kind: CapacityKind) -> Capacity {
        self.entries[kind.index()]
    }

    #[inline]
    pub fn current(&self, kind: CapacityKind) -> i32 {
        self.get(kind).current
    }

    #[inline]
    pub fn max(&self, kind: CapacityKind) -> i32 {
        self.get(kind).max
    }

    #[inline]
    pub fn free(&self, kind: CapacityKind) -> i32 {
        self.get(kind).free()
    }

    pub fn set_current(&mut self, kind: CapacityKind, value: i32) {
        self.entries[kind.index()].current = value.max(0);
    }

    pub fn set_max(&mut self, kind: CapacityKind, value: i32) {
        self.entries[kind.index()].max = value.max(0);
    }

    /// Applies a signed delta to `current`, clamping at zero. Returns the new value.
    pub fn add_current(&mut self, kind: CapacityKind, delta: i32) -> i32 {
        let entry = &mut self.entries[kind.index()];
        entry.current = entry.current.saturating_add(delta).max(0);
        entry.current
    }

    /// Applies a signed delta to `max`, clamping at zero. Returns the new value.
    pub fn add_max(&mut self, kind: CapacityKind, delta: i32) -> i32 {
        let entry = &mut self.entries[kind.index()];
        entry.max = entry.max.saturating_add(delta).max(0);
        entry.max
    }

    /// Kinds whose current usage exceeds their maximum, in declaration order.
    pub fn exceeded(&self) -> impl Iterator<Item = CapacityKind> + '_ {
        CapacityKind::iter().filter(|kind| self.get(*kind).is_exceeded())
    }

    pub fn iter(&self) -> impl Iterator<Item = (CapacityKind, Capacity)> + '_ {
        CapacityKind::iter().map(|kind| (kind, self.get(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_clamp_at_zero() {
        let mut ledger = CapacityLedger::new();
        ledger.set_max(CapacityKind::Aliens, 5);
        assert_eq!(ledger.add_current(CapacityKind::Aliens, 3), 3);
        assert_eq!(ledger.add_current(CapacityKind::Aliens, -10), 0);
        assert_eq!(ledger.add_max(CapacityKind::Aliens, -8), 0);
        ledger.set_current(CapacityKind::Items, -4);
        assert_eq!(ledger.current(CapacityKind::Items), 0);
    }

    #[test]
    fn free_goes_negative_when_over_capacity() {
        let mut ledger = CapacityLedger::new();
        ledger.set_max(CapacityKind::Employees, 2);
        ledger.set_current(CapacityKind::Employees, 5);
        assert_eq!(ledger.free(CapacityKind::Employees), -3);
        assert_eq!(
            ledger.exceeded().collect::<Vec<_>>(),
            vec![CapacityKind::Employees]
        );
    }

    #[test]
    fn kinds_are_independent() {
        let mut ledger = CapacityLedger::new();
        ledger.set_max(CapacityKind::Antimatter, 10);
        assert_eq!(ledger.max(CapacityKind::Antimatter), 10);
        assert_eq!(ledger.max(CapacityKind::Items), 0);
        assert_eq!(ledger.iter().count(), CapacityKind::COUNT);
    }
}
