//! Configuration oracle for exposing campaign configuration to the engine.

use crate::config::CampaignConfig;

/// Provides access to runtime configuration values.
pub trait ConfigOracle: Send + Sync {
    /// Research topic that makes live aliens storable.
    fn breathing_tech(&self) -> &str;

    /// Event mail sent when captured aliens die for lack of life support.
    fn breathing_mail(&self) -> &str;

    /// Travel time in days when a transfer endpoint has no globe position.
    fn default_transfer_days(&self) -> f64;

    fn dead_body_capacity(&self) -> Option<u32>;
}

impl ConfigOracle for CampaignConfig {
    fn breathing_tech(&self) -> &str {
        &self.breathing_tech
    }

    fn breathing_mail(&self) -> &str {
        &self.breathing_mail
    }

    fn default_transfer_days(&self) -> f64 {
        self.default_transfer_days
    }

    fn dead_body_capacity(&self) -> Option<u32> {
        self.dead_body_capacity
    }
}
