use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ProgramId;
use crate::model::program::checkpoint::Checkpoint;
use crate::model::program::metrics::ProgramMetrics;
use crate::model::program::partner::PartnerRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramStatus {
    Draft,
    Approved,
    ImplementationInProgress,
    MidProgramReviewCompleted,
    Completed,
}

impl ProgramStatus {
    pub const ALL: [ProgramStatus; 5] = [
        ProgramStatus::Draft,
        ProgramStatus::Approved,
        ProgramStatus::ImplementationInProgress,
        ProgramStatus::MidProgramReviewCompleted,
        ProgramStatus::Completed,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ProgramStatus::Draft => "Draft",
            ProgramStatus::Approved => "Approved",
            ProgramStatus::ImplementationInProgress => "Implementation in progress",
            ProgramStatus::MidProgramReviewCompleted => "Mid-program review completed",
            ProgramStatus::Completed => "Completed",
        }
    }

    /// Value used on the wire and in query strings.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProgramStatus::Draft => "draft",
            ProgramStatus::Approved => "approved",
            ProgramStatus::ImplementationInProgress => "implementation_in_progress",
            ProgramStatus::MidProgramReviewCompleted => "mid_program_review_completed",
            ProgramStatus::Completed => "completed",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }
}

/// Where the program runs and whom it targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramScope {
    pub states: Vec<String>,
    #[serde(default)]
    pub districts: Vec<String>,
    #[serde(default)]
    pub school_categories: Vec<String>,
    pub target_students: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramDuration {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ProgramDuration {
    /// Whole days from start to end.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

/// The aggregate root of the admin console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: ProgramId,
    pub name: String,
    pub partner: PartnerRef,
    #[serde(default)]
    pub description: String,
    pub scope: ProgramScope,
    pub duration: ProgramDuration,
    pub status: ProgramStatus,
    #[serde(default)]
    pub metrics: Option<ProgramMetrics>,
    #[serde(default)]
    pub checkpoints: Vec<Checkpoint>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Program {
    /// Archived programs are simply completed ones.
    #[must_use]
    pub fn is_archived(&self) -> bool {
        self.status == ProgramStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_snake_case_on_the_wire() {
        let json = serde_json::to_string(&ProgramStatus::ImplementationInProgress).unwrap();
        assert_eq!(json, "\"implementation_in_progress\"");
        for status in ProgramStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json.trim_matches('"'), status.as_str());
            assert_eq!(ProgramStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ProgramStatus::parse("archived"), None);
    }

    #[test]
    fn program_decodes_from_camel_case_json() {
        let json = r#"{
            "id": "p1",
            "name": "Digital Literacy 2025",
            "partner": { "id": "acme", "name": "Acme Foundation" },
            "description": "Tablets for rural schools",
            "scope": {
                "states": ["Karnataka"],
                "districts": ["Mysuru"],
                "schoolCategories": ["government"],
                "targetStudents": 1200
            },
            "duration": { "startDate": "2025-06-01", "endDate": "2026-03-31" },
            "status": "approved",
            "createdAt": "2025-05-01T10:00:00Z",
            "updatedAt": "2025-05-02T10:00:00Z"
        }"#;
        let program: Program = serde_json::from_str(json).unwrap();
        assert_eq!(program.scope.target_students, 1200);
        assert_eq!(program.status, ProgramStatus::Approved);
        assert!(program.checkpoints.is_empty());
        assert!(program.metrics.is_none());
        assert_eq!(program.duration.days(), 303);
        assert!(!program.is_archived());
    }
}
