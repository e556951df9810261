use std::sync::Arc;

use backend::{
    ApiError, CertificateMark, CertificateQuery, Page, ProgramAdminApi, ProgramQuery,
};
use csr_core::model::program::{
    Certificate, CertificateSelection, Checkpoint, CheckpointNotes, Partner, Program,
    ProgramDraft, ProgramMetrics, ProgramSchool, Report, ReportFile, ReportFormat, ReportPreview,
    School, SchoolStatus, check_trigger,
};
use csr_core::model::{CertificateId, ProgramId, SchoolId};
use tracing::{error, info, instrument, warn};

use crate::error::AdminError;

//
// ─── PAGE DATA ─────────────────────────────────────────────────────────────────
//

/// Everything the program detail page renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramOverview {
    pub program: Program,
    pub metrics: ProgramMetrics,
    pub checkpoints: Vec<Checkpoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchoolsPage {
    pub program: Program,
    pub assigned: Vec<ProgramSchool>,
    pub available: Vec<School>,
}

impl SchoolsPage {
    /// Catalogue entries not yet assigned to this program.
    pub fn unassigned(&self) -> impl Iterator<Item = &School> {
        self.available
            .iter()
            .filter(|s| !self.assigned.iter().any(|a| a.school.id == s.id))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointsPage {
    pub program: Program,
    pub checkpoints: Vec<Checkpoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CertificatesPage {
    pub program: Program,
    pub certificates: Page<Certificate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportsPage {
    pub program: Program,
    pub reports: Vec<Report>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricsPage {
    pub program: Program,
    pub metrics: ProgramMetrics,
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

fn logged<T>(action: &'static str, result: Result<T, ApiError>) -> Result<T, AdminError> {
    result.map_err(|e| {
        error!(action, error = %e, "admin api call failed");
        AdminError::Api(e)
    })
}

/// Admin console operations on top of a `ProgramAdminApi`.
///
/// Every method is one user-visible action. Reads that feed one page run in
/// parallel; mutations go straight through and leave the refetch to the page.
#[derive(Clone)]
pub struct ProgramAdminService {
    api: Arc<dyn ProgramAdminApi>,
}

impl ProgramAdminService {
    #[must_use]
    pub fn new(api: Arc<dyn ProgramAdminApi>) -> Self {
        Self { api }
    }

    //
    // ─── PROGRAMS ──────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `AdminError::Api` when the backend call fails.
    #[instrument(skip(self))]
    pub async fn list_programs(&self, query: &ProgramQuery) -> Result<Page<Program>, AdminError> {
        logged("list_programs", self.api.list_programs(query).await)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` when the backend call fails.
    #[instrument(skip(self))]
    pub async fn list_partners(&self) -> Result<Vec<Partner>, AdminError> {
        logged("list_partners", self.api.list_partners().await)
    }

    /// Validates the draft locally, then creates the program.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` without a request when the draft is
    /// invalid, or `AdminError::Api` when the backend call fails.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_program(&self, draft: &ProgramDraft) -> Result<Program, AdminError> {
        let input = draft.validate()?;
        let program = logged("create_program", self.api.create_program(&input).await)?;
        info!(program = %program.id, "program created");
        Ok(program)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` when the backend call fails.
    #[instrument(skip(self), fields(program = %id))]
    pub async fn get_program(&self, id: &ProgramId) -> Result<Program, AdminError> {
        logged("get_program", self.api.get_program(id).await)
    }

    /// # Errors
    ///
    /// Same as `create_program`.
    #[instrument(skip(self, draft), fields(program = %id))]
    pub async fn update_program(
        &self,
        id: &ProgramId,
        draft: &ProgramDraft,
    ) -> Result<Program, AdminError> {
        let input = draft.validate()?;
        let program = logged("update_program", self.api.update_program(id, &input).await)?;
        info!("program updated");
        Ok(program)
    }

    /// Marks the program completed. Reversible only by editing status
    /// server-side.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Api` when the backend call fails.
    #[instrument(skip(self), fields(program = %id))]
    pub async fn archive_program(&self, id: &ProgramId) -> Result<Program, AdminError> {
        let program = logged("archive_program", self.api.archive_program(id).await)?;
        info!("program archived");
        Ok(program)
    }

    /// Deletes the program with its schools, checkpoints, certificates,
    /// metrics and reports.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Api` when the backend call fails.
    #[instrument(skip(self), fields(program = %id))]
    pub async fn delete_program(&self, id: &ProgramId) -> Result<(), AdminError> {
        logged("delete_program", self.api.delete_program(id).await)?;
        info!("program permanently deleted");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` when any of the parallel fetches fails.
    #[instrument(skip(self), fields(program = %id))]
    pub async fn overview(&self, id: &ProgramId) -> Result<ProgramOverview, AdminError> {
        let (program, metrics, checkpoints) = logged(
            "overview",
            tokio::try_join!(
                self.api.get_program(id),
                self.api.get_metrics(id),
                self.api.list_checkpoints(id),
            ),
        )?;
        Ok(ProgramOverview {
            program,
            metrics,
            checkpoints,
        })
    }

    //
    // ─── SCHOOLS ───────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `AdminError::Api` when any of the parallel fetches fails.
    #[instrument(skip(self), fields(program = %id))]
    pub async fn schools_page(
        &self,
        id: &ProgramId,
        search: Option<&str>,
    ) -> Result<SchoolsPage, AdminError> {
        let (program, assigned, available) = logged(
            "schools_page",
            tokio::try_join!(
                self.api.get_program(id),
                self.api.list_program_schools(id),
                self.api.list_available_schools(search),
            ),
        )?;
        Ok(SchoolsPage {
            program,
            assigned,
            available,
        })
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` when the backend call fails.
    #[instrument(skip(self), fields(program = %id))]
    pub async fn list_program_schools(
        &self,
        id: &ProgramId,
    ) -> Result<Vec<ProgramSchool>, AdminError> {
        logged("list_program_schools", self.api.list_program_schools(id).await)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` when the backend call fails.
    #[instrument(skip(self))]
    pub async fn list_available_schools(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<School>, AdminError> {
        logged(
            "list_available_schools",
            self.api.list_available_schools(search).await,
        )
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` when the backend call fails.
    #[instrument(skip(self), fields(program = %id, school = %school))]
    pub async fn assign_school(
        &self,
        id: &ProgramId,
        school: &SchoolId,
    ) -> Result<ProgramSchool, AdminError> {
        let assigned = logged("assign_school", self.api.assign_school(id, school).await)?;
        info!("school assigned");
        Ok(assigned)
    }

    /// # Errors
    ///
    /// Returns `AdminError::NothingSelected` for an empty selection, or
    /// `AdminError::Api` when the backend call fails.
    #[instrument(skip(self, schools), fields(program = %id, count = schools.len()))]
    pub async fn assign_schools(
        &self,
        id: &ProgramId,
        schools: &[SchoolId],
    ) -> Result<Vec<ProgramSchool>, AdminError> {
        if schools.is_empty() {
            return Err(AdminError::NothingSelected);
        }
        let assigned = logged("assign_schools", self.api.assign_schools(id, schools).await)?;
        info!(assigned = assigned.len(), "schools bulk-assigned");
        Ok(assigned)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` when the backend call fails.
    #[instrument(skip(self), fields(program = %id, school = %school))]
    pub async fn remove_school(&self, id: &ProgramId, school: &SchoolId) -> Result<(), AdminError> {
        logged("remove_school", self.api.remove_school(id, school).await)?;
        info!("school removed");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` when the backend call fails.
    #[instrument(skip(self), fields(program = %id, school = %school))]
    pub async fn update_school_status(
        &self,
        id: &ProgramId,
        school: &SchoolId,
        status: SchoolStatus,
    ) -> Result<ProgramSchool, AdminError> {
        let updated = logged(
            "update_school_status",
            self.api.update_school_status(id, school, status).await,
        )?;
        info!(status = status.as_str(), "school status updated");
        Ok(updated)
    }

    //
    // ─── CHECKPOINTS ───────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `AdminError::Api` when any of the parallel fetches fails.
    #[instrument(skip(self), fields(program = %id))]
    pub async fn checkpoints_page(&self, id: &ProgramId) -> Result<CheckpointsPage, AdminError> {
        let (program, mut checkpoints) = logged(
            "checkpoints_page",
            tokio::try_join!(self.api.get_program(id), self.api.list_checkpoints(id)),
        )?;
        checkpoints.sort_by_key(|c| c.number);
        Ok(CheckpointsPage {
            program,
            checkpoints,
        })
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` when the backend call fails.
    #[instrument(skip(self), fields(program = %id))]
    pub async fn list_checkpoints(&self, id: &ProgramId) -> Result<Vec<Checkpoint>, AdminError> {
        logged("list_checkpoints", self.api.list_checkpoints(id).await)
    }

    /// Re-checks the gate against a fresh checkpoint list before sending the
    /// trigger.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Gated` (no trigger request sent) when the
    /// checkpoint may not be triggered yet, or `AdminError::Api`.
    #[instrument(skip(self), fields(program = %id))]
    pub async fn trigger_checkpoint(
        &self,
        id: &ProgramId,
        number: u8,
    ) -> Result<Checkpoint, AdminError> {
        let checkpoints = logged("list_checkpoints", self.api.list_checkpoints(id).await)?;
        if let Err(gate) = check_trigger(&checkpoints, number) {
            warn!(number, reason = %gate, "checkpoint trigger refused");
            return Err(gate.into());
        }
        let checkpoint = logged(
            "trigger_checkpoint",
            self.api.trigger_checkpoint(id, number).await,
        )?;
        info!(number, "checkpoint triggered");
        Ok(checkpoint)
    }

    /// Blank notes are sent as cleared.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Api` when the backend call fails.
    #[instrument(skip(self, notes), fields(program = %id))]
    pub async fn update_checkpoint_notes(
        &self,
        id: &ProgramId,
        number: u8,
        notes: CheckpointNotes,
    ) -> Result<Checkpoint, AdminError> {
        let trimmed = |text: Option<String>| {
            text.map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
        };
        let notes = CheckpointNotes {
            notes: trimmed(notes.notes),
            admin_notes: trimmed(notes.admin_notes),
        };
        let checkpoint = logged(
            "update_checkpoint_notes",
            self.api.update_checkpoint_notes(id, number, &notes).await,
        )?;
        info!(number, "checkpoint notes saved");
        Ok(checkpoint)
    }

    //
    // ─── METRICS ───────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `AdminError::Api` when any of the parallel fetches fails.
    #[instrument(skip(self), fields(program = %id))]
    pub async fn metrics_page(&self, id: &ProgramId) -> Result<MetricsPage, AdminError> {
        let (program, metrics) = logged(
            "metrics_page",
            tokio::try_join!(self.api.get_program(id), self.api.get_metrics(id)),
        )?;
        Ok(MetricsPage { program, metrics })
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` when the backend call fails.
    #[instrument(skip(self), fields(program = %id))]
    pub async fn get_metrics(&self, id: &ProgramId) -> Result<ProgramMetrics, AdminError> {
        logged("get_metrics", self.api.get_metrics(id).await)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` when the backend call fails.
    #[instrument(skip(self), fields(program = %id))]
    pub async fn refresh_metrics(&self, id: &ProgramId) -> Result<ProgramMetrics, AdminError> {
        let metrics = logged("refresh_metrics", self.api.refresh_metrics(id).await)?;
        info!("metrics refreshed");
        Ok(metrics)
    }

    //
    // ─── CERTIFICATES ──────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `AdminError::Api` when any of the parallel fetches fails.
    #[instrument(skip(self), fields(program = %id))]
    pub async fn certificates_page(
        &self,
        id: &ProgramId,
        query: &CertificateQuery,
    ) -> Result<CertificatesPage, AdminError> {
        let (program, certificates) = logged(
            "certificates_page",
            tokio::try_join!(
                self.api.get_program(id),
                self.api.list_certificates(id, query)
            ),
        )?;
        Ok(CertificatesPage {
            program,
            certificates,
        })
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` when the backend call fails.
    #[instrument(skip(self), fields(program = %id))]
    pub async fn list_certificates(
        &self,
        id: &ProgramId,
        query: &CertificateQuery,
    ) -> Result<Page<Certificate>, AdminError> {
        logged("list_certificates", self.api.list_certificates(id, query).await)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` when the backend call fails.
    #[instrument(skip(self), fields(program = %id, certificate = %certificate))]
    pub async fn mark_certificate(
        &self,
        id: &ProgramId,
        certificate: &CertificateId,
        mark: CertificateMark,
    ) -> Result<Certificate, AdminError> {
        let updated = logged(
            "mark_certificate",
            self.api.mark_certificate(id, certificate, mark).await,
        )?;
        info!(status = updated.status.as_str(), "certificate marked");
        Ok(updated)
    }

    /// Sends every selected id in one request.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::NothingSelected` for an empty selection, or
    /// `AdminError::Api` when the backend call fails.
    #[instrument(skip(self, selection), fields(program = %id, count = selection.len()))]
    pub async fn mark_certificates(
        &self,
        id: &ProgramId,
        selection: &CertificateSelection,
        mark: CertificateMark,
    ) -> Result<u32, AdminError> {
        if selection.is_empty() {
            return Err(AdminError::NothingSelected);
        }
        let result = logged(
            "mark_certificates",
            self.api
                .mark_certificates(id, &selection.ids(), mark)
                .await,
        )?;
        info!(updated = result.updated, "certificates bulk-marked");
        Ok(result.updated)
    }

    //
    // ─── REPORTS ───────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `AdminError::Api` when any of the parallel fetches fails.
    #[instrument(skip(self), fields(program = %id))]
    pub async fn reports_page(&self, id: &ProgramId) -> Result<ReportsPage, AdminError> {
        let (program, reports) = logged(
            "reports_page",
            tokio::try_join!(self.api.get_program(id), self.api.list_reports(id)),
        )?;
        Ok(ReportsPage { program, reports })
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` when the backend call fails.
    #[instrument(skip(self), fields(program = %id))]
    pub async fn list_reports(&self, id: &ProgramId) -> Result<Vec<Report>, AdminError> {
        logged("list_reports", self.api.list_reports(id).await)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` when the backend call fails.
    #[instrument(skip(self, report), fields(program = %id, report = %report.id))]
    pub async fn preview_report(
        &self,
        id: &ProgramId,
        report: &Report,
    ) -> Result<ReportPreview, AdminError> {
        logged("preview_report", self.api.preview_report(id, &report.id).await)
    }

    /// # Errors
    ///
    /// Returns `AdminError::Api` when the backend call fails.
    #[instrument(skip(self, report), fields(program = %id, report = %report.id))]
    pub async fn publish_report(&self, id: &ProgramId, report: &Report) -> Result<Report, AdminError> {
        let published = logged("publish_report", self.api.publish_report(id, &report.id).await)?;
        info!("report published");
        Ok(published)
    }

    /// Fetches the file and names it after the report title.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Api` when the backend call fails.
    #[instrument(skip(self, report), fields(program = %id, report = %report.id))]
    pub async fn download_report(
        &self,
        id: &ProgramId,
        report: &Report,
        format: ReportFormat,
    ) -> Result<ReportFile, AdminError> {
        let bytes = logged(
            "download_report",
            self.api.download_report(id, &report.id, format).await,
        )?;
        info!(format = format.as_str(), size = bytes.len(), "report downloaded");
        Ok(ReportFile {
            file_name: report.suggested_file_name(format),
            format,
            bytes,
        })
    }
}
