//! Rule engine for containment, cargo and transfers.
//!
//! [`CampaignEngine`] is the only code path that mutates [`CampaignState`].
//! Each operation either completes or returns an error without side effects;
//! degraded outcomes (lost cargo, killed overflow) succeed and leave a
//! [`CampaignEvent`] in the engine's outbox.

mod bases;
mod capacity;
mod clock;
mod containment;
mod errors;
mod events;
mod transfer;

pub use capacity::CapacityOverflow;
pub use clock::TickReport;
pub use containment::SettleReport;
pub use errors::TransferError;
pub use events::{CampaignEvent, CampaignTrigger, MessageCategory, StopReason};
pub use transfer::TransferOutcome;

use crate::state::CampaignState;

pub struct CampaignEngine<'a> {
    state: &'a mut CampaignState,
    events: Vec<CampaignEvent>,
}

impl<'a> CampaignEngine<'a> {
    pub fn new(state: &'a mut CampaignState) -> Self {
        Self {
            state,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &CampaignState {
        self.state
    }

    /// Events recorded since the engine was created.
    pub fn events(&self) -> &[CampaignEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<CampaignEvent> {
        self.events
    }

    fn emit(&mut self, event: CampaignEvent) {
        self.events.push(event);
    }

    fn notify(&mut self, category: MessageCategory, text: impl Into<String>) {
        self.emit(CampaignEvent::message(category, text));
    }
}
