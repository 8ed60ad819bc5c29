use crate::state::CampaignDate;

/// Campaign configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CampaignConfig {
    /// Travel time used when either end of a transfer has no globe position.
    pub default_transfer_days: f64,

    /// Research topic that makes live aliens storable.
    pub breathing_tech: String,

    /// Event mail sent the first time captured aliens die for lack of life support.
    pub breathing_mail: String,

    /// Upper bound on dead bodies per containment. `None` leaves them uncapped.
    pub dead_body_capacity: Option<u32>,
}

impl CampaignConfig {
    // ===== calendar =====
    pub const SECONDS_PER_DAY: u32 = CampaignDate::SECONDS_PER_DAY;
    /// Great-circle degrees covered by a transport in one day (a quarter globe).
    pub const DEGREES_PER_TRAVEL_DAY: f64 = 90.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TRANSFER_DAYS: f64 = 2.0;
    pub const DEFAULT_BREATHING_TECH: &'static str = "rs_alien_breathing";
    pub const DEFAULT_BREATHING_MAIL: &'static str = "alienbreathing";

    pub fn new() -> Self {
        Self {
            default_transfer_days: Self::DEFAULT_TRANSFER_DAYS,
            breathing_tech: Self::DEFAULT_BREATHING_TECH.to_owned(),
            breathing_mail: Self::DEFAULT_BREATHING_MAIL.to_owned(),
            dead_body_capacity: None,
        }
    }

    pub fn with_dead_body_capacity(mut self, capacity: u32) -> Self {
        self.dead_body_capacity = Some(capacity);
        self
    }
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self::new()
    }
}
