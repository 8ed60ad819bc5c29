//! Property-based checks for cargo aggregates and containment bookkeeping.

use proptest::prelude::*;

use campaign_core::{AlienCargo, AlienContainment, CapacityKind, CapacityLedger, SpeciesId};

fn op() -> impl Strategy<Value = (u16, i32, i32)> {
    (0u16..4, -6i32..8, -6i32..8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Aggregates match the entries after every call, and rejected calls change nothing.
    #[test]
    fn cargo_aggregates_follow_entries(ops in prop::collection::vec(op(), 0..64)) {
        let mut cargo = AlienCargo::new();
        for (species, alive, dead) in ops {
            let before = cargo.clone();
            match cargo.add(SpeciesId(species), alive, dead) {
                Ok(()) => {}
                Err(_) => prop_assert_eq!(&cargo, &before),
            }
            prop_assert!(cargo.aggregates_consistent());
            prop_assert_eq!(cargo.total_alive(), cargo.iter().map(|e| e.alive).sum::<u32>());
            prop_assert_eq!(cargo.total_dead(), cargo.iter().map(|e| e.dead).sum::<u32>());
            prop_assert!(cargo.iter().all(|e| e.alive > 0 || e.dead > 0));
        }
    }

    /// A copy never shares state with its origin.
    #[test]
    fn cargo_copies_are_independent(
        ops in prop::collection::vec(op(), 1..32),
        extra in 1i32..5,
    ) {
        let mut original = AlienCargo::new();
        for (species, alive, dead) in ops {
            let _ = original.add(SpeciesId(species), alive, dead);
        }
        let snapshot = original.clone();
        let mut copy = original.clone();
        copy.add(SpeciesId(9), extra, 0).unwrap();

        prop_assert_eq!(&original, &snapshot);
        prop_assert_eq!(copy.total_alive(), original.total_alive() + extra as u32);
    }

    /// The ledger tracks the live count and never exceeds its maximum through admission.
    #[test]
    fn containment_ledger_stays_in_lockstep(
        max in 0i32..12,
        ops in prop::collection::vec((op(), any::<bool>()), 0..48),
    ) {
        let mut containment = AlienContainment::default();
        let mut ledger = CapacityLedger::new();
        ledger.set_max(CapacityKind::Aliens, max);

        for ((species, alive, dead), supported) in ops {
            let mut view = containment.bind(&mut ledger);
            let _ = view.add(SpeciesId(species), alive, dead, supported);
            drop(view);

            prop_assert_eq!(ledger.current(CapacityKind::Aliens), containment.alive() as i32);
            prop_assert!(ledger.current(CapacityKind::Aliens) <= max);
        }
    }
}
