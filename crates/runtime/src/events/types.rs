use serde::{Deserialize, Serialize};

use campaign_core::{CampaignDate, CapacityOverflow, TransferOutcome};

/// Campaign clock notifications produced by the runtime itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockEvent {
    /// One tick completed.
    Advanced {
        date: CampaignDate,
        resolved: Option<TransferOutcome>,
        overflows: Vec<CapacityOverflow>,
    },
    /// The player resumed stopped time.
    Resumed { date: CampaignDate },
    /// A save was loaded and replaced the campaign state.
    Loaded { date: CampaignDate, warnings: usize },
}
