use async_trait::async_trait;
use csr_core::model::program::{
    Certificate, CertificateStatus, Checkpoint, CheckpointNotes, Partner, Program, ProgramInput,
    ProgramMetrics, ProgramSchool, ProgramStatus, Report, ReportFormat, ReportPreview, School,
    SchoolStatus,
};
use csr_core::model::{CertificateId, ProgramId, ReportId, SchoolId};
use serde::{Deserialize, Serialize};

use crate::envelope::Page;
use crate::error::ApiError;

pub const DEFAULT_PROGRAM_PAGE_SIZE: u32 = 10;
pub const DEFAULT_CERTIFICATE_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramQuery {
    pub search: Option<String>,
    pub status: Option<ProgramStatus>,
    pub page: u32,
    pub limit: u32,
}

impl Default for ProgramQuery {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            page: 1,
            limit: DEFAULT_PROGRAM_PAGE_SIZE,
        }
    }
}

impl ProgramQuery {
    /// Query-string pairs; blank search terms are left out.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        pairs.push(("page", self.page.max(1).to_string()));
        pairs.push(("limit", self.limit.max(1).to_string()));
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateQuery {
    pub status: Option<CertificateStatus>,
    pub page: u32,
    pub limit: u32,
}

impl Default for CertificateQuery {
    fn default() -> Self {
        Self {
            status: None,
            page: 1,
            limit: DEFAULT_CERTIFICATE_PAGE_SIZE,
        }
    }
}

impl CertificateQuery {
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        pairs.push(("page", self.page.max(1).to_string()));
        pairs.push(("limit", self.limit.max(1).to_string()));
        pairs
    }
}

/// Target state of a certificate marking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateMark {
    InProgress,
    Delivered,
}

impl CertificateMark {
    #[must_use]
    pub fn path_segment(self) -> &'static str {
        match self {
            CertificateMark::InProgress => "in-progress",
            CertificateMark::Delivered => "delivered",
        }
    }

    #[must_use]
    pub fn status(self) -> CertificateStatus {
        match self {
            CertificateMark::InProgress => CertificateStatus::InProgress,
            CertificateMark::Delivered => CertificateStatus::Delivered,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignSchoolRequest {
    pub school_id: SchoolId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAssignRequest {
    pub school_ids: Vec<SchoolId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolStatusRequest {
    pub status: SchoolStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCertificateRequest {
    pub certificate_ids: Vec<CertificateId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdate {
    pub updated: u32,
}

/// Contract of the admin backend. One method per endpoint.
#[async_trait]
pub trait ProgramAdminApi: Send + Sync {
    /// # Errors
    ///
    /// Every method returns `ApiError` when the request fails or the backend
    /// rejects it; implementations never retry.
    async fn list_partners(&self) -> Result<Vec<Partner>, ApiError>;

    async fn list_programs(&self, query: &ProgramQuery) -> Result<Page<Program>, ApiError>;
    async fn create_program(&self, input: &ProgramInput) -> Result<Program, ApiError>;
    async fn get_program(&self, id: &ProgramId) -> Result<Program, ApiError>;
    async fn update_program(&self, id: &ProgramId, input: &ProgramInput)
    -> Result<Program, ApiError>;
    async fn archive_program(&self, id: &ProgramId) -> Result<Program, ApiError>;
    async fn delete_program(&self, id: &ProgramId) -> Result<(), ApiError>;

    async fn list_program_schools(&self, id: &ProgramId) -> Result<Vec<ProgramSchool>, ApiError>;
    async fn list_available_schools(&self, search: Option<&str>) -> Result<Vec<School>, ApiError>;
    async fn assign_school(
        &self,
        id: &ProgramId,
        school: &SchoolId,
    ) -> Result<ProgramSchool, ApiError>;
    async fn assign_schools(
        &self,
        id: &ProgramId,
        schools: &[SchoolId],
    ) -> Result<Vec<ProgramSchool>, ApiError>;
    async fn remove_school(&self, id: &ProgramId, school: &SchoolId) -> Result<(), ApiError>;
    async fn update_school_status(
        &self,
        id: &ProgramId,
        school: &SchoolId,
        status: SchoolStatus,
    ) -> Result<ProgramSchool, ApiError>;

    async fn list_checkpoints(&self, id: &ProgramId) -> Result<Vec<Checkpoint>, ApiError>;
    async fn trigger_checkpoint(&self, id: &ProgramId, number: u8)
    -> Result<Checkpoint, ApiError>;
    async fn update_checkpoint_notes(
        &self,
        id: &ProgramId,
        number: u8,
        notes: &CheckpointNotes,
    ) -> Result<Checkpoint, ApiError>;

    async fn get_metrics(&self, id: &ProgramId) -> Result<ProgramMetrics, ApiError>;
    async fn refresh_metrics(&self, id: &ProgramId) -> Result<ProgramMetrics, ApiError>;

    async fn list_certificates(
        &self,
        id: &ProgramId,
        query: &CertificateQuery,
    ) -> Result<Page<Certificate>, ApiError>;
    async fn mark_certificate(
        &self,
        id: &ProgramId,
        certificate: &CertificateId,
        mark: CertificateMark,
    ) -> Result<Certificate, ApiError>;
    async fn mark_certificates(
        &self,
        id: &ProgramId,
        certificates: &[CertificateId],
        mark: CertificateMark,
    ) -> Result<BulkUpdate, ApiError>;

    async fn list_reports(&self, id: &ProgramId) -> Result<Vec<Report>, ApiError>;
    async fn preview_report(
        &self,
        id: &ProgramId,
        report: &ReportId,
    ) -> Result<ReportPreview, ApiError>;
    async fn publish_report(&self, id: &ProgramId, report: &ReportId) -> Result<Report, ApiError>;
    async fn download_report(
        &self,
        id: &ProgramId,
        report: &ReportId,
        format: ReportFormat,
    ) -> Result<Vec<u8>, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_query_skips_blank_search() {
        let query = ProgramQuery {
            search: Some("   ".into()),
            status: Some(ProgramStatus::Approved),
            ..ProgramQuery::default()
        };
        assert_eq!(
            query.to_pairs(),
            vec![
                ("status", "approved".to_string()),
                ("page", "1".to_string()),
                ("limit", "10".to_string()),
            ]
        );
    }

    #[test]
    fn certificate_marks_use_kebab_path_segments() {
        assert_eq!(CertificateMark::InProgress.path_segment(), "in-progress");
        assert_eq!(
            CertificateMark::Delivered.status(),
            CertificateStatus::Delivered
        );
    }
}
