use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("pass threshold must be between 1 and 100 percent, got {0}")]
pub struct PassThresholdError(pub u8);

/// Percentage of the total a player needs to "pass" a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PassThreshold(u8);

impl PassThreshold {
    /// # Errors
    ///
    /// Returns `PassThresholdError` if `percent` is 0 or above 100.
    pub fn new(percent: u8) -> Result<Self, PassThresholdError> {
        if percent == 0 || percent > 100 {
            return Err(PassThresholdError(percent));
        }
        Ok(Self(percent))
    }

    #[must_use]
    pub fn percent(self) -> u8 {
        self.0
    }

    /// Integer comparison, so 3/5 passes at 60% without float rounding.
    #[must_use]
    pub fn is_met(self, score: u32, total: u32) -> bool {
        if total == 0 {
            return false;
        }
        u64::from(score) * 100 >= u64::from(total) * u64::from(self.0)
    }
}

impl Default for PassThreshold {
    fn default() -> Self {
        Self(60)
    }
}

impl TryFrom<u8> for PassThreshold {
    type Error = PassThresholdError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PassThreshold> for u8 {
    fn from(value: PassThreshold) -> Self {
        value.0
    }
}

/// Result screen data for a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u32,
    pub total: u32,
    pub passed: bool,
}

impl SessionSummary {
    #[must_use]
    pub fn new(score: u32, total: u32, threshold: PassThreshold) -> Self {
        Self {
            score,
            total,
            passed: threshold.is_met(score, total),
        }
    }

    /// Whole-number percentage, rounded down.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        self.score * 100 / self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_percent_is_a_pass() {
        let threshold = PassThreshold::default();
        assert!(threshold.is_met(3, 5));
        assert!(!threshold.is_met(2, 5));
        assert!(threshold.is_met(6, 10));
    }

    #[test]
    fn empty_total_never_passes() {
        assert!(!PassThreshold::default().is_met(0, 0));
    }

    #[test]
    fn rejects_out_of_range_thresholds() {
        assert_eq!(PassThreshold::new(0), Err(PassThresholdError(0)));
        assert_eq!(PassThreshold::new(101), Err(PassThresholdError(101)));
        assert!(PassThreshold::new(100).is_ok());
    }

    #[test]
    fn summary_reports_percent() {
        let summary = SessionSummary::new(2, 3, PassThreshold::default());
        assert_eq!(summary.percent(), 66);
        assert!(summary.passed);
    }
}
