//! Worker tasks that back the runtime orchestration.
//!
//! The campaign worker is the single owner of [`campaign_core::CampaignState`];
//! every read and write goes through its command channel.

mod campaign;

pub use campaign::{CampaignWorker, Command};
