use csr_core::model::CertificateId;
use csr_core::model::program::{Certificate, CertificateSelection, CertificateStatus};

use crate::vm::time_fmt::format_optional;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CertificateRowVm {
    pub id: CertificateId,
    pub student: String,
    pub school: String,
    pub status_label: &'static str,
    pub delivered_at: String,
    pub kit_label: &'static str,
    pub selected: bool,
    pub can_mark_in_progress: bool,
    pub can_mark_delivered: bool,
}

#[must_use]
pub fn map_certificate_rows(
    certificates: &[Certificate],
    selection: &CertificateSelection,
) -> Vec<CertificateRowVm> {
    certificates
        .iter()
        .map(|c| CertificateRowVm {
            id: c.id.clone(),
            student: c.student.name.clone(),
            school: c.student.school_name.clone(),
            status_label: c.status.label(),
            delivered_at: format_optional(c.delivered_at),
            kit_label: c.kit_status.map_or("No kit", |kit| kit.label()),
            selected: selection.contains(&c.id),
            can_mark_in_progress: c.status == CertificateStatus::Pending,
            can_mark_delivered: c.status != CertificateStatus::Delivered,
        })
        .collect()
}

/// "3 selected" label for the bulk bar; `None` hides the bar.
#[must_use]
pub fn selection_label(selection: &CertificateSelection) -> Option<String> {
    (!selection.is_empty()).then(|| format!("{} selected", selection.len()))
}
