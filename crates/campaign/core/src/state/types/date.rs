use std::fmt;

/// Campaign calendar position: whole days plus seconds into the day.
///
/// Always normalized so that `sec < SECONDS_PER_DAY`. Ordering compares the
/// day first, then the second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CampaignDate {
    pub day: u32,
    pub sec: u32,
}

impl CampaignDate {
    pub const SECONDS_PER_DAY: u32 = 86_400;
    pub const EPOCH: Self = Self { day: 0, sec: 0 };

    /// Builds a date, carrying excess seconds into days.
    pub const fn new(day: u32, sec: u32) -> Self {
        Self {
            day: day + sec / Self::SECONDS_PER_DAY,
            sec: sec % Self::SECONDS_PER_DAY,
        }
    }

    /// Total seconds since the epoch.
    pub const fn as_seconds(self) -> u64 {
        self.day as u64 * Self::SECONDS_PER_DAY as u64 + self.sec as u64
    }

    pub const fn from_seconds(seconds: u64) -> Self {
        let per_day = Self::SECONDS_PER_DAY as u64;
        Self {
            day: (seconds / per_day) as u32,
            sec: (seconds % per_day) as u32,
        }
    }

    #[must_use]
    pub const fn add_seconds(self, seconds: u64) -> Self {
        Self::from_seconds(self.as_seconds() + seconds)
    }

    /// Adds a fractional number of days.
    ///
    /// Whole days are added directly; the fraction is rounded to the nearest
    /// second and wrapped into the day counter when it reaches a full day.
    /// Negative and non-finite inputs add nothing.
    #[must_use]
    pub fn add_days(self, days: f64) -> Self {
        if !days.is_finite() || days <= 0.0 {
            return self;
        }
        let whole = days.floor();
        let fraction = ((days - whole) * f64::from(Self::SECONDS_PER_DAY)).round() as u32;
        let mut day = self.day.saturating_add(whole as u32);
        let mut sec = self.sec + fraction;
        if sec >= Self::SECONDS_PER_DAY {
            sec -= Self::SECONDS_PER_DAY;
            day = day.saturating_add(1);
        }
        Self { day, sec }
    }

    /// Returns true once `now` has reached this date.
    #[inline]
    pub fn is_due(self, now: CampaignDate) -> bool {
        now >= self
    }
}

impl fmt::Display for CampaignDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.sec / 3600;
        let minutes = (self.sec % 3600) / 60;
        write!(f, "day {} {:02}:{:02}", self.day, hours, minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_day_lands_at_noon() {
        let arrival = CampaignDate::new(10, 0).add_days(0.5);
        assert_eq!(arrival, CampaignDate::new(10, 43_200));
    }

    #[test]
    fn fraction_wraps_into_next_day() {
        let arrival = CampaignDate::new(3, 80_000).add_days(1.25);
        // 80_000 + 21_600 = 101_600 -> one extra day, 15_200 seconds
        assert_eq!(arrival, CampaignDate { day: 5, sec: 15_200 });
        assert!(arrival.sec < CampaignDate::SECONDS_PER_DAY);
    }

    #[test]
    fn exact_day_boundary_is_normalized() {
        let arrival = CampaignDate::new(0, 43_200).add_days(0.5);
        assert_eq!(arrival, CampaignDate { day: 1, sec: 0 });
    }

    #[test]
    fn due_at_exact_time_but_not_one_second_before() {
        let arrival = CampaignDate::new(7, 100);
        assert!(!arrival.is_due(CampaignDate::new(7, 99)));
        assert!(arrival.is_due(CampaignDate::new(7, 100)));
        assert!(arrival.is_due(CampaignDate::new(8, 0)));
    }

    #[test]
    fn new_carries_seconds_into_days() {
        assert_eq!(CampaignDate::new(1, 90_000), CampaignDate { day: 2, sec: 3_600 });
    }

    #[test]
    fn non_positive_durations_are_ignored() {
        let date = CampaignDate::new(4, 12);
        assert_eq!(date.add_days(0.0), date);
        assert_eq!(date.add_days(-3.0), date);
        assert_eq!(date.add_days(f64::NAN), date);
    }
}
