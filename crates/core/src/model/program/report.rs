use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ReportId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Checkpoint,
    Quarterly,
    Final,
}

impl ReportKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ReportKind::Checkpoint => "Checkpoint",
            ReportKind::Quarterly => "Quarterly",
            ReportKind::Final => "Final",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Draft,
    Published,
}

impl ReportStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ReportStatus::Draft => "Draft",
            ReportStatus::Published => "Published",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ReportId,
    pub kind: ReportKind,
    pub title: String,
    pub status: ReportStatus,
    #[serde(default)]
    pub checkpoint_number: Option<u8>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl Report {
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.status == ReportStatus::Published
    }

    /// File name offered in the save dialog, e.g. `q2-progress-report.pdf`.
    #[must_use]
    pub fn suggested_file_name(&self, format: ReportFormat) -> String {
        let mut stem = String::with_capacity(self.title.len());
        let mut pending_dash = false;
        for ch in self.title.chars() {
            if ch.is_alphanumeric() {
                if pending_dash && !stem.is_empty() {
                    stem.push('-');
                }
                pending_dash = false;
                stem.extend(ch.to_lowercase());
            } else {
                pending_dash = true;
            }
        }
        if stem.is_empty() {
            stem = format!("report-{}", self.id);
        }
        format!("{stem}.{}", format.extension())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSection {
    pub heading: String,
    pub body: String,
}

/// Rendered content shown before publishing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPreview {
    pub report: Report,
    #[serde(default)]
    pub sections: Vec<ReportSection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    Pdf,
    Excel,
}

impl ReportFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Excel => "excel",
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Excel => "xlsx",
        }
    }

    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            ReportFormat::Pdf => "application/pdf",
            ReportFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

/// A downloaded report ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFile {
    pub file_name: String,
    pub format: ReportFormat,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn report(title: &str) -> Report {
        Report {
            id: ReportId::new("r1"),
            kind: ReportKind::Quarterly,
            title: title.into(),
            status: ReportStatus::Draft,
            checkpoint_number: None,
            created_at: fixed_now(),
            published_at: None,
        }
    }

    #[test]
    fn file_name_is_slugged_from_title() {
        let r = report("Q2 Progress Report (Karnataka)");
        assert_eq!(
            r.suggested_file_name(ReportFormat::Pdf),
            "q2-progress-report-karnataka.pdf"
        );
        assert_eq!(
            r.suggested_file_name(ReportFormat::Excel),
            "q2-progress-report-karnataka.xlsx"
        );
    }

    #[test]
    fn untitled_report_falls_back_to_id() {
        assert_eq!(report("  ").suggested_file_name(ReportFormat::Pdf), "report-r1.pdf");
    }

    #[test]
    fn format_query_values() {
        assert_eq!(ReportFormat::Pdf.as_str(), "pdf");
        assert_eq!(ReportFormat::Excel.as_str(), "excel");
    }
}
