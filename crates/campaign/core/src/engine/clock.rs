//! Campaign time: ticks and the stop/resume switch.

use super::{
    CampaignEngine, CampaignEvent, CapacityOverflow, StopReason, TransferError, TransferOutcome,
};
use crate::env::CampaignEnv;
use crate::state::CampaignDate;

/// What happened during one tick.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    pub date: CampaignDate,
    /// False while time is stopped.
    pub advanced: bool,
    pub resolved: Option<TransferOutcome>,
    pub overflows: Vec<CapacityOverflow>,
}

impl CampaignEngine<'_> {
    /// Advances campaign time by `seconds`, then resolves at most one due
    /// transfer, then reconciles capacities.
    ///
    /// Does nothing while time is stopped.
    ///
    /// # Errors
    ///
    /// Propagates missing-oracle failures from transfer resolution; the date
    /// has already advanced when that happens.
    pub fn advance_time(
        &mut self,
        env: &CampaignEnv<'_>,
        seconds: u64,
    ) -> Result<TickReport, TransferError> {
        if self.state.time_stopped {
            return Ok(TickReport {
                date: self.state.date,
                ..TickReport::default()
            });
        }
        self.state.date = self.state.date.add_seconds(seconds);
        let resolved = self.run_transfers(env)?;
        let overflows = self.check_capacity_overflow(env);
        Ok(TickReport {
            date: self.state.date,
            advanced: true,
            resolved,
            overflows,
        })
    }

    pub fn stop_time(&mut self, reason: StopReason) {
        self.state.time_stopped = true;
        self.emit(CampaignEvent::TimeStopped(reason));
    }

    pub fn resume_time(&mut self) {
        self.state.time_stopped = false;
    }
}
