use csr_core::model::ReportId;
use csr_core::model::program::Report;

use crate::vm::time_fmt::{format_datetime, format_optional};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportRowVm {
    pub id: ReportId,
    pub title: String,
    pub kind_label: &'static str,
    pub status_label: &'static str,
    pub created_at: String,
    pub published_at: String,
    pub can_publish: bool,
}

#[must_use]
pub fn map_report_rows(reports: &[Report]) -> Vec<ReportRowVm> {
    reports
        .iter()
        .map(|report| ReportRowVm {
            id: report.id.clone(),
            title: match report.checkpoint_number {
                Some(n) => format!("{} (checkpoint {n})", report.title),
                None => report.title.clone(),
            },
            kind_label: report.kind.label(),
            status_label: report.status.label(),
            created_at: format_datetime(report.created_at),
            published_at: format_optional(report.published_at),
            can_publish: !report.is_published(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use csr_core::model::program::{ReportKind, ReportStatus};
    use csr_core::time::fixed_now;

    #[test]
    fn published_reports_cannot_be_published_again() {
        let report = Report {
            id: ReportId::new("rpt-1"),
            kind: ReportKind::Checkpoint,
            title: "Kickoff summary".into(),
            status: ReportStatus::Published,
            checkpoint_number: Some(2),
            created_at: fixed_now(),
            published_at: Some(fixed_now()),
        };
        let rows = map_report_rows(&[report]);
        assert!(!rows[0].can_publish);
        assert_eq!(rows[0].title, "Kickoff summary (checkpoint 2)");
        assert_eq!(rows[0].status_label, "Published");
    }
}
