//! Per-tick capacity reconciliation.

use super::{CampaignEngine, CampaignEvent, MessageCategory, StopReason};
use crate::env::{CampaignEnv, ItemOracle};
use crate::state::{BaseId, CapacityKind};

/// One ledger entry found above its maximum and how it was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapacityOverflow {
    pub base: BaseId,
    pub kind: CapacityKind,
    pub excess: u32,
    /// Units removed automatically. Zero when the player has to decide.
    pub removed: u32,
}

impl CampaignEngine<'_> {
    /// Reconciles every founded base whose ledger exceeds its maximum.
    ///
    /// Live aliens above capacity are killed and antimatter above capacity is
    /// destroyed. Any other overflow stops game time until the player resolves it.
    pub fn check_capacity_overflow(&mut self, env: &CampaignEnv<'_>) -> Vec<CapacityOverflow> {
        let antimatter = env
            .items()
            .ok()
            .and_then(|items| items.antimatter().and_then(|id| items.definition(id)));

        let exceeded: Vec<_> = self
            .state
            .founded_bases()
            .flat_map(|base| {
                base.capacities
                    .exceeded()
                    .map(move |kind| (base.id, kind, base.capacities.free(kind).unsigned_abs()))
            })
            .collect();

        let mut overflows = Vec::with_capacity(exceeded.len());
        for (base_id, kind, excess) in exceeded {
            let Some(base) = self.state.founded_base_mut(base_id) else {
                continue;
            };
            let name = base.name.clone();
            let removed = match kind {
                CapacityKind::Aliens => {
                    let killed = match base.containment_mut() {
                        Some(mut view) => view.remove_exceeding_capacity(),
                        None => {
                            base.capacities.set_current(CapacityKind::Aliens, 0);
                            0
                        }
                    };
                    self.state.stats.record_killed(killed);
                    killed
                }
                CapacityKind::Antimatter => {
                    let removed = match antimatter.as_ref() {
                        Some(definition) => {
                            let amount = excess.min(base.item_count(definition.id));
                            let delta = i32::try_from(amount).unwrap_or(i32::MAX);
                            base.add_item(definition, -delta).map_or(0, |_| amount)
                        }
                        None => 0,
                    };
                    let max = base.capacities.max(CapacityKind::Antimatter);
                    if base.capacities.current(CapacityKind::Antimatter) > max {
                        base.capacities.set_current(CapacityKind::Antimatter, max);
                    }
                    self.notify(
                        MessageCategory::CapacityExceeded,
                        format!("{name}: antimatter storage exceeded, {removed} units destroyed"),
                    );
                    removed
                }
                _ => {
                    self.state.time_stopped = true;
                    self.emit(CampaignEvent::TimeStopped(StopReason::CapacityExceeded {
                        base: base_id,
                        kind,
                    }));
                    self.notify(
                        MessageCategory::CapacityExceeded,
                        format!("{name} exceeds its {kind} capacity by {excess}"),
                    );
                    0
                }
            };
            overflows.push(CapacityOverflow {
                base: base_id,
                kind,
                excess,
                removed,
            });
        }
        overflows
    }
}
