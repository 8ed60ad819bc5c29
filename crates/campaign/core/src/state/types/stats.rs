/// Campaign-wide alien statistics consumed by the interest model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CampaignStats {
    pub captured_aliens: u32,
    pub killed_aliens: u32,
}

impl CampaignStats {
    pub fn record_captured(&mut self, amount: u32) {
        self.captured_aliens = self.captured_aliens.saturating_add(amount);
    }

    pub fn record_killed(&mut self, amount: u32) {
        self.killed_aliens = self.killed_aliens.saturating_add(amount);
    }
}
