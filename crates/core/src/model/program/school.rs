use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::SchoolId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id: SchoolId,
    pub name: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchoolStatus {
    Pending,
    InProgress,
    Active,
    Completed,
}

impl SchoolStatus {
    pub const ALL: [SchoolStatus; 4] = [
        SchoolStatus::Pending,
        SchoolStatus::InProgress,
        SchoolStatus::Active,
        SchoolStatus::Completed,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SchoolStatus::Pending => "Pending",
            SchoolStatus::InProgress => "In progress",
            SchoolStatus::Active => "Active",
            SchoolStatus::Completed => "Completed",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SchoolStatus::Pending => "pending",
            SchoolStatus::InProgress => "in_progress",
            SchoolStatus::Active => "active",
            SchoolStatus::Completed => "completed",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }
}

/// A school's assignment to one program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramSchool {
    #[serde(flatten)]
    pub school: School,
    pub status: SchoolStatus,
    #[serde(default)]
    pub student_count: u32,
    #[serde(default)]
    pub assigned_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_flattens_school_fields() {
        let json = r#"{
            "id": "sch-7",
            "name": "GHS Hunsur",
            "district": "Mysuru",
            "state": "Karnataka",
            "category": "government",
            "status": "in_progress",
            "studentCount": 320
        }"#;
        let assigned: ProgramSchool = serde_json::from_str(json).unwrap();
        assert_eq!(assigned.school.id, SchoolId::new("sch-7"));
        assert_eq!(assigned.status, SchoolStatus::InProgress);
        assert_eq!(assigned.student_count, 320);
    }

    #[test]
    fn status_round_trips_through_query_value() {
        for status in SchoolStatus::ALL {
            assert_eq!(SchoolStatus::parse(status.as_str()), Some(status));
        }
    }
}
