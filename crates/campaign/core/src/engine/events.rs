//! Notifications produced by engine operations.
//!
//! The engine never talks to a UI or mail system directly; it records
//! [`CampaignEvent`]s that the runtime drains and publishes.

use crate::state::{BaseId, CampaignDate, CapacityKind, SpeciesId, TransferId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MessageCategory {
    Standard,
    /// Aliens captured, died or were killed on arrival.
    Containment,
    TransferStarted,
    TransferCompleted,
    /// Part of a cargo could not be delivered.
    CargoLost,
    /// A whole transfer was lost.
    TransferLost,
    CapacityExceeded,
}

/// Campaign triggers fired by containment events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignTrigger {
    CapturedAliens,
    CapturedAliensDied,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// A capacity the player has to resolve by hand was exceeded.
    CapacityExceeded { base: BaseId, kind: CapacityKind },
    BaseAttack(BaseId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CampaignEvent {
    Message {
        category: MessageCategory,
        text: String,
    },
    EventMail {
        mail: String,
    },
    Trigger(CampaignTrigger),
    /// First specimens of a species reached a base; research may now use them.
    SpeciesCollected(SpeciesId),
    TimeStopped(StopReason),
    TransferStarted {
        id: TransferId,
        destination: BaseId,
        arrival: CampaignDate,
    },
    TransferResolved {
        id: TransferId,
        destination: BaseId,
        delivered: bool,
    },
}

impl CampaignEvent {
    pub fn message(category: MessageCategory, text: impl Into<String>) -> Self {
        Self::Message {
            category,
            text: text.into(),
        }
    }

    /// Message text, if this event is a player-facing message.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Message { text, .. } => Some(text),
            _ => None,
        }
    }
}
