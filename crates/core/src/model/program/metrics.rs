use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate progress numbers for one program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgramMetrics {
    pub schools: u32,
    pub students_enrolled: u32,
    pub students_reached: u32,
    pub sessions_completed: u32,
    pub average_score: f64,
    pub certificates_delivered: u32,
    pub kits_delivered: u32,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

impl ProgramMetrics {
    /// Share of enrolled students reached, 0..=100.
    #[must_use]
    pub fn reach_percent(&self) -> u32 {
        if self.students_enrolled == 0 {
            return 0;
        }
        let percent = u64::from(self.students_reached) * 100 / u64::from(self.students_enrolled);
        u32::try_from(percent.min(100)).unwrap_or(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reach_percent_handles_zero_and_overshoot() {
        let mut metrics = ProgramMetrics::default();
        assert_eq!(metrics.reach_percent(), 0);

        metrics.students_enrolled = 200;
        metrics.students_reached = 150;
        assert_eq!(metrics.reach_percent(), 75);

        metrics.students_reached = 260;
        assert_eq!(metrics.reach_percent(), 100);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let metrics: ProgramMetrics = serde_json::from_str(r#"{"schools": 4}"#).unwrap();
        assert_eq!(metrics.schools, 4);
        assert_eq!(metrics.students_enrolled, 0);
        assert!(metrics.last_refreshed_at.is_none());
    }
}
