//! Age-based retention of saved scans.
//!
//! A month is approximated as exactly 30 days.

/// Milliseconds in one day.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Days counted per retention month.
pub const DAYS_PER_MONTH: i64 = 30;

/// Default retention window in months.
pub const DEFAULT_RETENTION_MONTHS: u32 = 3;

/// Longest retention window accepted from settings, in months.
pub const MAX_RETENTION_MONTHS: u32 = 1200;

/// How long saved scans are kept.
///
/// The window is at least one month. A zero-month window would sweep away
/// a scan in the same call that saved it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retention {
    months: u32,
}

impl Retention {
    /// Keep scans for `months` 30-day months; 0 is raised to 1.
    pub fn months(months: u32) -> Self {
        Self {
            months: months.max(1),
        }
    }

    pub fn as_months(&self) -> u32 {
        self.months
    }

    /// Length of the retention window in milliseconds.
    pub fn window_ms(&self) -> i64 {
        i64::from(self.months)
            .saturating_mul(DAYS_PER_MONTH)
            .saturating_mul(DAY_MS)
    }

    /// Oldest timestamp that is already eligible for removal at `now_ms`.
    pub fn cutoff(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.window_ms())
    }

    /// Whether a scan created at `timestamp` survives a sweep at `now_ms`.
    pub fn keeps(&self, timestamp: i64, now_ms: i64) -> bool {
        timestamp > self.cutoff(now_ms)
    }
}

impl Default for Retention {
    fn default() -> Self {
        Self::months(DEFAULT_RETENTION_MONTHS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_750_000_000_000;

    #[test]
    fn test_default_window_is_ninety_days() {
        assert_eq!(Retention::default().window_ms(), 90 * DAY_MS);
    }

    #[test]
    fn test_keeps_boundary() {
        let retention = Retention::default();
        let cutoff = retention.cutoff(NOW);

        assert!(!retention.keeps(cutoff, NOW));
        assert!(retention.keeps(cutoff + 1, NOW));
        assert!(retention.keeps(NOW - 89 * DAY_MS, NOW));
        assert!(!retention.keeps(NOW - 91 * DAY_MS, NOW));
    }

    #[test]
    fn test_custom_months() {
        let retention = Retention::months(1);
        assert!(retention.keeps(NOW - 29 * DAY_MS, NOW));
        assert!(!retention.keeps(NOW - 31 * DAY_MS, NOW));
    }

    #[test]
    fn test_zero_months_raised_to_one() {
        let retention = Retention::months(0);
        assert_eq!(retention.as_months(), 1);
        assert!(retention.keeps(NOW, NOW));
    }

    #[test]
    fn test_huge_window_saturates() {
        let retention = Retention::months(u32::MAX);
        assert_eq!(retention.window_ms(), i64::MAX);
        assert_eq!(retention.cutoff(NOW), NOW - i64::MAX);
        assert!(retention.keeps(0, NOW));

        assert_eq!(Retention::months(4_000_000_000).window_ms(), i64::MAX);
    }
}
