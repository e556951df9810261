use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{CertificateId, StudentId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateStatus {
    Pending,
    InProgress,
    Delivered,
}

impl CertificateStatus {
    pub const ALL: [CertificateStatus; 3] = [
        CertificateStatus::Pending,
        CertificateStatus::InProgress,
        CertificateStatus::Delivered,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CertificateStatus::Pending => "Pending",
            CertificateStatus::InProgress => "In progress",
            CertificateStatus::Delivered => "Delivered",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CertificateStatus::Pending => "pending",
            CertificateStatus::InProgress => "in_progress",
            CertificateStatus::Delivered => "delivered",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KitStatus {
    InProgress,
    Delivered,
}

impl KitStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            KitStatus::InProgress => "Kit in progress",
            KitStatus::Delivered => "Kit delivered",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRef {
    pub id: StudentId,
    pub name: String,
    #[serde(default)]
    pub school_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: CertificateId,
    pub student: StudentRef,
    pub status: CertificateStatus,
    #[serde(default)]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub kit_status: Option<KitStatus>,
}

/// Page-local selection for bulk marking. Cleared whenever the page changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateSelection {
    selected: BTreeSet<CertificateId>,
}

impl CertificateSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: &CertificateId) {
        if !self.selected.remove(id) {
            self.selected.insert(id.clone());
        }
    }

    #[must_use]
    pub fn contains(&self, id: &CertificateId) -> bool {
        self.selected.contains(id)
    }

    /// True when every visible row is selected (and there is at least one).
    #[must_use]
    pub fn all_selected(&self, visible: &[Certificate]) -> bool {
        !visible.is_empty() && visible.iter().all(|c| self.selected.contains(&c.id))
    }

    /// "Select all": selects every visible row, or clears them if they
    /// were all selected already.
    pub fn toggle_all(&mut self, visible: &[Certificate]) {
        if self.all_selected(visible) {
            for c in visible {
                self.selected.remove(&c.id);
            }
        } else {
            self.selected.extend(visible.iter().map(|c| c.id.clone()));
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in a stable order, ready for one batched request.
    #[must_use]
    pub fn ids(&self) -> Vec<CertificateId> {
        self.selected.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn certificate(id: &str) -> Certificate {
        Certificate {
            id: CertificateId::new(id),
            student: StudentRef {
                id: StudentId::new(format!("stu-{id}")),
                name: format!("Student {id}"),
                school_name: "GHS Hunsur".into(),
            },
            status: CertificateStatus::Pending,
            delivered_at: None,
            kit_status: None,
        }
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = CertificateSelection::new();
        let id = CertificateId::new("c1");
        selection.toggle(&id);
        assert!(selection.contains(&id));
        selection.toggle(&id);
        assert!(selection.is_empty());
    }

    #[test]
    fn select_all_toggles_every_visible_row() {
        let page = vec![certificate("c1"), certificate("c2"), certificate("c3")];
        let mut selection = CertificateSelection::new();
        selection.toggle(&page[1].id);

        selection.toggle_all(&page);
        assert!(selection.all_selected(&page));
        assert_eq!(selection.len(), 3);

        selection.toggle_all(&page);
        assert!(selection.is_empty());
    }

    #[test]
    fn empty_page_is_never_all_selected() {
        let selection = CertificateSelection::new();
        assert!(!selection.all_selected(&[]));
    }

    #[test]
    fn ids_are_sorted() {
        let mut selection = CertificateSelection::new();
        selection.toggle(&CertificateId::new("c9"));
        selection.toggle(&CertificateId::new("c1"));
        assert_eq!(
            selection.ids(),
            vec![CertificateId::new("c1"), CertificateId::new("c9")]
        );
    }

    #[test]
    fn kit_status_is_optional_on_the_wire() {
        let json = r#"{
            "id": "c1",
            "student": { "id": "s1", "name": "Asha" },
            "status": "delivered",
            "deliveredAt": "2025-09-01T08:00:00Z",
            "kitStatus": "in_progress"
        }"#;
        let cert: Certificate = serde_json::from_str(json).unwrap();
        assert_eq!(cert.kit_status, Some(KitStatus::InProgress));
        assert_eq!(cert.student.school_name, "");
    }
}
