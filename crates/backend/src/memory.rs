//! In-process implementation of the admin API.
//!
//! Follows the backend's business rules closely enough for service tests and
//! the offline demo mode: new programs get five pending checkpoints, archive
//! completes a program, permanent delete cascades, triggering respects the
//! checkpoint gate, and delivering a certificate starts its kit.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Duration;
use csr_core::Clock;
use csr_core::model::program::{
    CHECKPOINT_COUNT, Certificate, CertificateStatus, Checkpoint, CheckpointNotes,
    CheckpointStatus, KitStatus, Partner, PartnerRef, Program, ProgramDuration, ProgramInput,
    ProgramMetrics, ProgramSchool, ProgramScope, ProgramStatus, Report, ReportFormat, ReportKind,
    ReportPreview, ReportSection, ReportStatus, School, SchoolStatus, StudentRef, check_trigger,
};
use csr_core::model::{CertificateId, PartnerId, ProgramId, ReportId, SchoolId, StudentId};
use tracing::debug;
use uuid::Uuid;

use crate::api::{BulkUpdate, CertificateMark, CertificateQuery, ProgramAdminApi, ProgramQuery};
use crate::envelope::Page;
use crate::error::ApiError;

#[derive(Default)]
struct Store {
    partners: Vec<Partner>,
    catalogue: Vec<School>,
    programs: HashMap<ProgramId, Program>,
    schools: HashMap<ProgramId, Vec<ProgramSchool>>,
    certificates: HashMap<ProgramId, Vec<Certificate>>,
    reports: HashMap<ProgramId, Vec<Report>>,
}

impl Store {
    fn program(&self, id: &ProgramId) -> Result<&Program, ApiError> {
        self.programs
            .get(id)
            .ok_or_else(|| ApiError::NotFound(format!("Program {id} not found")))
    }

    fn program_mut(&mut self, id: &ProgramId) -> Result<&mut Program, ApiError> {
        self.programs
            .get_mut(id)
            .ok_or_else(|| ApiError::NotFound(format!("Program {id} not found")))
    }

    fn partner_ref(&self, id: &PartnerId) -> Result<PartnerRef, ApiError> {
        self.partners
            .iter()
            .find(|p| &p.id == id)
            .map(PartnerRef::from)
            .ok_or_else(|| ApiError::Rejected(format!("Partner {id} does not exist")))
    }

    fn recompute_metrics(&mut self, id: &ProgramId, clock: Clock) -> Result<ProgramMetrics, ApiError> {
        let schools = self.schools.get(id).map(Vec::as_slice).unwrap_or_default();
        let certificates = self.certificates.get(id).map(Vec::as_slice).unwrap_or_default();
        let count = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);

        let school_count = count(schools.len());
        let enrolled = schools.iter().map(|s| s.student_count).sum();
        let delivered = count(
            certificates
                .iter()
                .filter(|c| c.status == CertificateStatus::Delivered)
                .count(),
        );
        let kits = count(
            certificates
                .iter()
                .filter(|c| c.kit_status == Some(KitStatus::Delivered))
                .count(),
        );

        let program = self.program_mut(id)?;
        let metrics = program.metrics.get_or_insert_with(ProgramMetrics::default);
        metrics.schools = school_count;
        metrics.students_enrolled = enrolled;
        metrics.certificates_delivered = delivered;
        metrics.kits_delivered = kits;
        metrics.last_refreshed_at = Some(clock.now());
        Ok(metrics.clone())
    }
}

/// Thread-safe in-memory admin backend.
#[derive(Clone, Default)]
pub struct InMemoryProgramApi {
    store: Arc<Mutex<Store>>,
    clock: Clock,
}

impl InMemoryProgramApi {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            store: Arc::new(Mutex::new(Store::default())),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, ApiError> {
        self.store
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))
    }

    fn next_id(prefix: &str) -> String {
        format!("{prefix}-{}", Uuid::new_v4().simple())
    }

    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the store lock is poisoned.
    pub fn insert_partner(&self, partner: Partner) -> Result<(), ApiError> {
        self.lock()?.partners.push(partner);
        Ok(())
    }

    /// Adds a school to the catalogue of assignable schools.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the store lock is poisoned.
    pub fn insert_school(&self, school: School) -> Result<(), ApiError> {
        self.lock()?.catalogue.push(school);
        Ok(())
    }

    /// Enrols a student; their certificate starts out pending.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown program.
    pub fn insert_certificate(
        &self,
        program: &ProgramId,
        student: StudentRef,
    ) -> Result<Certificate, ApiError> {
        let mut store = self.lock()?;
        store.program(program)?;
        let certificate = Certificate {
            id: CertificateId::new(Self::next_id("cert")),
            student,
            status: CertificateStatus::Pending,
            delivered_at: None,
            kit_status: None,
        };
        store
            .certificates
            .entry(program.clone())
            .or_default()
            .push(certificate.clone());
        Ok(certificate)
    }

    /// # Errors
    ///
    /// `NotFound` for an unknown program.
    pub fn insert_report(
        &self,
        program: &ProgramId,
        kind: ReportKind,
        title: &str,
    ) -> Result<Report, ApiError> {
        let mut store = self.lock()?;
        store.program(program)?;
        let report = Report {
            id: ReportId::new(Self::next_id("rep")),
            kind,
            title: title.to_string(),
            status: ReportStatus::Draft,
            checkpoint_number: None,
            created_at: self.clock.now(),
            published_at: None,
        };
        store
            .reports
            .entry(program.clone())
            .or_default()
            .push(report.clone());
        Ok(report)
    }

    /// Moves a checkpoint along on the partner's side (acknowledge, complete),
    /// which the console itself never does.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown program or checkpoint.
    pub fn set_checkpoint_status(
        &self,
        program: &ProgramId,
        number: u8,
        status: CheckpointStatus,
    ) -> Result<Checkpoint, ApiError> {
        let now = self.clock.now();
        let mut store = self.lock()?;
        let checkpoint = store
            .program_mut(program)?
            .checkpoints
            .iter_mut()
            .find(|c| c.number == number)
            .ok_or_else(|| ApiError::NotFound(format!("Checkpoint {number} not found")))?;
        checkpoint.status = status;
        match status {
            CheckpointStatus::Pending => {}
            CheckpointStatus::Ready => {
                checkpoint.triggered_at.get_or_insert(now);
            }
            CheckpointStatus::Acknowledged => {
                checkpoint.acknowledged_at.get_or_insert(now);
            }
            CheckpointStatus::Completed => {
                checkpoint.completed_at.get_or_insert(now);
            }
        }
        Ok(checkpoint.clone())
    }

    /// Demo data for the offline mode.
    ///
    /// # Errors
    ///
    /// Only if the store cannot be written.
    pub fn seeded(clock: Clock) -> Result<Self, ApiError> {
        let api = Self::new(clock);
        for (id, name, email) in [
            ("ptn-sunrise", "Sunrise Foundation", Some("csr@sunrise.example")),
            ("ptn-bright", "Bright Futures Trust", None),
        ] {
            api.insert_partner(Partner {
                id: PartnerId::new(id),
                name: name.into(),
                contact_email: email.map(str::to_string),
            })?;
        }
        for (id, name, district, state) in [
            ("sch-hunsur", "GHS Hunsur", "Mysuru", "Karnataka"),
            ("sch-nanjangud", "GHPS Nanjangud", "Mysuru", "Karnataka"),
            ("sch-maddur", "GHS Maddur", "Mandya", "Karnataka"),
            ("sch-hosur", "PUMS Hosur", "Krishnagiri", "Tamil Nadu"),
            ("sch-kolar", "GHS Kolar", "Kolar", "Karnataka"),
        ] {
            api.insert_school(School {
                id: SchoolId::new(id),
                name: name.into(),
                district: district.into(),
                state: state.into(),
                category: "government".into(),
            })?;
        }

        let today = clock.today();
        let input = ProgramInput {
            name: "Digital Literacy 2025".into(),
            partner_id: PartnerId::new("ptn-sunrise"),
            description: "Tablet-based learning games for government schools.".into(),
            scope: ProgramScope {
                states: vec!["Karnataka".into()],
                districts: vec!["Mysuru".into(), "Mandya".into()],
                school_categories: vec!["government".into()],
                target_students: 1200,
            },
            duration: ProgramDuration {
                start_date: today,
                end_date: today + Duration::days(300),
            },
        };
        let program = api.create_program_now(&input)?;
        let id = program.id;
        for school in ["sch-hunsur", "sch-maddur"] {
            api.assign_now(&id, &SchoolId::new(school))?;
        }
        api.set_checkpoint_status(&id, 1, CheckpointStatus::Completed)?;
        for (n, name) in ["Asha K", "Ravi M", "Meena S", "Kiran P", "Divya R"]
            .into_iter()
            .enumerate()
        {
            api.insert_certificate(
                &id,
                StudentRef {
                    id: StudentId::new(format!("stu-{n}")),
                    name: name.into(),
                    school_name: "GHS Hunsur".into(),
                },
            )?;
        }
        api.insert_report(&id, ReportKind::Checkpoint, "Checkpoint 1 Summary")?;
        api.insert_report(&id, ReportKind::Quarterly, "Q1 Progress Report")?;
        Ok(api)
    }

    fn create_program_now(&self, input: &ProgramInput) -> Result<Program, ApiError> {
        let now = self.clock.now();
        let mut store = self.lock()?;
        let partner = store.partner_ref(&input.partner_id)?;
        let program = Program {
            id: ProgramId::new(Self::next_id("prg")),
            name: input.name.clone(),
            partner,
            description: input.description.clone(),
            scope: input.scope.clone(),
            duration: input.duration,
            status: ProgramStatus::Draft,
            metrics: Some(ProgramMetrics::default()),
            checkpoints: (1..=CHECKPOINT_COUNT).filter_map(Checkpoint::pending).collect(),
            created_at: now,
            updated_at: now,
        };
        store.programs.insert(program.id.clone(), program.clone());
        debug!(program = %program.id, "program created");
        Ok(program)
    }

    fn assign_now(&self, id: &ProgramId, school_id: &SchoolId) -> Result<ProgramSchool, ApiError> {
        let now = self.clock.now();
        let mut store = self.lock()?;
        store.program(id)?;
        let school = store
            .catalogue
            .iter()
            .find(|s| &s.id == school_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("School {school_id} not found")))?;
        let assigned = store.schools.entry(id.clone()).or_default();
        if assigned.iter().any(|s| &s.school.id == school_id) {
            return Err(ApiError::Rejected(format!(
                "{} is already assigned to this program",
                school.name
            )));
        }
        let record = ProgramSchool {
            school,
            status: SchoolStatus::Pending,
            student_count: 0,
            assigned_at: Some(now),
        };
        assigned.push(record.clone());
        Ok(record)
    }

    fn report_preview(program: &Program, report: &Report) -> ReportPreview {
        let metrics = program.metrics.clone().unwrap_or_default();
        let completed = program
            .checkpoints
            .iter()
            .filter(|c| c.status == CheckpointStatus::Completed)
            .count();
        ReportPreview {
            report: report.clone(),
            sections: vec![
                ReportSection {
                    heading: "Overview".into(),
                    body: format!(
                        "{} for {}, {} to {}.",
                        program.name,
                        program.partner.name,
                        program.duration.start_date,
                        program.duration.end_date
                    ),
                },
                ReportSection {
                    heading: "Reach".into(),
                    body: format!(
                        "{} schools, {} of {} enrolled students reached.",
                        metrics.schools, metrics.students_reached, metrics.students_enrolled
                    ),
                },
                ReportSection {
                    heading: "Checkpoints".into(),
                    body: format!("{completed} of {CHECKPOINT_COUNT} checkpoints completed."),
                },
            ],
        }
    }
}

fn matches_search(haystacks: &[&str], needle: &str) -> bool {
    let needle = needle.to_lowercase();
    haystacks.iter().any(|h| h.to_lowercase().contains(&needle))
}

fn blank_to_none(search: Option<&str>) -> Option<&str> {
    search.map(str::trim).filter(|s| !s.is_empty())
}

#[async_trait]
impl ProgramAdminApi for InMemoryProgramApi {
    async fn list_partners(&self) -> Result<Vec<Partner>, ApiError> {
        Ok(self.lock()?.partners.clone())
    }

    async fn list_programs(&self, query: &ProgramQuery) -> Result<Page<Program>, ApiError> {
        let store = self.lock()?;
        let search = blank_to_none(query.search.as_deref());
        let mut programs: Vec<Program> = store
            .programs
            .values()
            .filter(|p| query.status.is_none_or(|s| p.status == s))
            .filter(|p| {
                search.is_none_or(|s| {
                    matches_search(&[p.name.as_str(), p.partner.name.as_str()], s)
                })
            })
            .cloned()
            .collect();
        programs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(Page::slice(programs, query.page, query.limit))
    }

    async fn create_program(&self, input: &ProgramInput) -> Result<Program, ApiError> {
        self.create_program_now(input)
    }

    async fn get_program(&self, id: &ProgramId) -> Result<Program, ApiError> {
        Ok(self.lock()?.program(id)?.clone())
    }

    async fn update_program(
        &self,
        id: &ProgramId,
        input: &ProgramInput,
    ) -> Result<Program, ApiError> {
        let now = self.clock.now();
        let mut store = self.lock()?;
        let partner = store.partner_ref(&input.partner_id)?;
        let program = store.program_mut(id)?;
        program.name = input.name.clone();
        program.partner = partner;
        program.description = input.description.clone();
        program.scope = input.scope.clone();
        program.duration = input.duration;
        program.updated_at = now;
        Ok(program.clone())
    }

    async fn archive_program(&self, id: &ProgramId) -> Result<Program, ApiError> {
        let now = self.clock.now();
        let mut store = self.lock()?;
        let program = store.program_mut(id)?;
        program.status = ProgramStatus::Completed;
        program.updated_at = now;
        Ok(program.clone())
    }

    async fn delete_program(&self, id: &ProgramId) -> Result<(), ApiError> {
        let mut store = self.lock()?;
        store
            .programs
            .remove(id)
            .ok_or_else(|| ApiError::NotFound(format!("Program {id} not found")))?;
        store.schools.remove(id);
        store.certificates.remove(id);
        store.reports.remove(id);
        debug!(program = %id, "program deleted with dependents");
        Ok(())
    }

    async fn list_program_schools(&self, id: &ProgramId) -> Result<Vec<ProgramSchool>, ApiError> {
        let store = self.lock()?;
        store.program(id)?;
        Ok(store.schools.get(id).cloned().unwrap_or_default())
    }

    async fn list_available_schools(&self, search: Option<&str>) -> Result<Vec<School>, ApiError> {
        let store = self.lock()?;
        let search = blank_to_none(search);
        Ok(store
            .catalogue
            .iter()
            .filter(|s| {
                search.is_none_or(|q| {
                    matches_search(&[s.name.as_str(), s.district.as_str(), s.state.as_str()], q)
                })
            })
            .cloned()
            .collect())
    }

    async fn assign_school(
        &self,
        id: &ProgramId,
        school: &SchoolId,
    ) -> Result<ProgramSchool, ApiError> {
        self.assign_now(id, school)
    }

    async fn assign_schools(
        &self,
        id: &ProgramId,
        schools: &[SchoolId],
    ) -> Result<Vec<ProgramSchool>, ApiError> {
        // Already assigned or repeated ids are skipped.
        let mut seen: HashSet<SchoolId> = {
            let store = self.lock()?;
            store.program(id)?;
            store
                .schools
                .get(id)
                .map(|list| list.iter().map(|s| s.school.id.clone()).collect())
                .unwrap_or_default()
        };
        let mut added = Vec::new();
        for school in schools {
            if seen.insert(school.clone()) {
                added.push(self.assign_now(id, school)?);
            }
        }
        Ok(added)
    }

    async fn remove_school(&self, id: &ProgramId, school: &SchoolId) -> Result<(), ApiError> {
        let mut store = self.lock()?;
        store.program(id)?;
        let assigned = store.schools.entry(id.clone()).or_default();
        let before = assigned.len();
        assigned.retain(|s| &s.school.id != school);
        if assigned.len() == before {
            return Err(ApiError::NotFound(format!(
                "School {school} is not assigned to this program"
            )));
        }
        Ok(())
    }

    async fn update_school_status(
        &self,
        id: &ProgramId,
        school: &SchoolId,
        status: SchoolStatus,
    ) -> Result<ProgramSchool, ApiError> {
        let mut store = self.lock()?;
        store.program(id)?;
        let record = store
            .schools
            .get_mut(id)
            .and_then(|list| list.iter_mut().find(|s| &s.school.id == school))
            .ok_or_else(|| {
                ApiError::NotFound(format!("School {school} is not assigned to this program"))
            })?;
        record.status = status;
        Ok(record.clone())
    }

    async fn list_checkpoints(&self, id: &ProgramId) -> Result<Vec<Checkpoint>, ApiError> {
        let store = self.lock()?;
        let mut checkpoints = store.program(id)?.checkpoints.clone();
        checkpoints.sort_by_key(|c| c.number);
        Ok(checkpoints)
    }

    async fn trigger_checkpoint(
        &self,
        id: &ProgramId,
        number: u8,
    ) -> Result<Checkpoint, ApiError> {
        let now = self.clock.now();
        let mut store = self.lock()?;
        let program = store.program_mut(id)?;
        check_trigger(&program.checkpoints, number)
            .map_err(|e| ApiError::Rejected(e.to_string()))?;
        let snapshot = program.metrics.clone();
        let checkpoint = program
            .checkpoints
            .iter_mut()
            .find(|c| c.number == number)
            .ok_or_else(|| ApiError::NotFound(format!("Checkpoint {number} not found")))?;
        checkpoint.status = CheckpointStatus::Ready;
        checkpoint.triggered_at = Some(now);
        checkpoint.metrics_snapshot = snapshot;
        Ok(checkpoint.clone())
    }

    async fn update_checkpoint_notes(
        &self,
        id: &ProgramId,
        number: u8,
        notes: &CheckpointNotes,
    ) -> Result<Checkpoint, ApiError> {
        let mut store = self.lock()?;
        let checkpoint = store
            .program_mut(id)?
            .checkpoints
            .iter_mut()
            .find(|c| c.number == number)
            .ok_or_else(|| ApiError::NotFound(format!("Checkpoint {number} not found")))?;
        checkpoint.notes.clone_from(&notes.notes);
        checkpoint.admin_notes.clone_from(&notes.admin_notes);
        Ok(checkpoint.clone())
    }

    async fn get_metrics(&self, id: &ProgramId) -> Result<ProgramMetrics, ApiError> {
        let store = self.lock()?;
        Ok(store.program(id)?.metrics.clone().unwrap_or_default())
    }

    async fn refresh_metrics(&self, id: &ProgramId) -> Result<ProgramMetrics, ApiError> {
        self.lock()?.recompute_metrics(id, self.clock)
    }

    async fn list_certificates(
        &self,
        id: &ProgramId,
        query: &CertificateQuery,
    ) -> Result<Page<Certificate>, ApiError> {
        let store = self.lock()?;
        store.program(id)?;
        let certificates: Vec<Certificate> = store
            .certificates
            .get(id)
            .map(|list| {
                list.iter()
                    .filter(|c| query.status.is_none_or(|s| c.status == s))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(Page::slice(certificates, query.page, query.limit))
    }

    async fn mark_certificate(
        &self,
        id: &ProgramId,
        certificate: &CertificateId,
        mark: CertificateMark,
    ) -> Result<Certificate, ApiError> {
        let updated = self.mark_certificates(id, std::slice::from_ref(certificate), mark).await?;
        debug!(updated = updated.updated, "certificate marked");
        let store = self.lock()?;
        store
            .certificates
            .get(id)
            .and_then(|list| list.iter().find(|c| &c.id == certificate))
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Certificate {certificate} not found")))
    }

    async fn mark_certificates(
        &self,
        id: &ProgramId,
        certificates: &[CertificateId],
        mark: CertificateMark,
    ) -> Result<BulkUpdate, ApiError> {
        let now = self.clock.now();
        let mut store = self.lock()?;
        store.program(id)?;
        let list = store.certificates.entry(id.clone()).or_default();
        if let Some(missing) = certificates
            .iter()
            .find(|wanted| !list.iter().any(|c| &c.id == *wanted))
        {
            return Err(ApiError::NotFound(format!("Certificate {missing} not found")));
        }
        let mut updated = 0;
        for certificate in list.iter_mut().filter(|c| certificates.contains(&c.id)) {
            certificate.status = mark.status();
            if mark == CertificateMark::Delivered {
                certificate.delivered_at.get_or_insert(now);
                certificate.kit_status.get_or_insert(KitStatus::InProgress);
            }
            updated += 1;
        }
        Ok(BulkUpdate { updated })
    }

    async fn list_reports(&self, id: &ProgramId) -> Result<Vec<Report>, ApiError> {
        let store = self.lock()?;
        store.program(id)?;
        Ok(store.reports.get(id).cloned().unwrap_or_default())
    }

    async fn preview_report(
        &self,
        id: &ProgramId,
        report: &ReportId,
    ) -> Result<ReportPreview, ApiError> {
        let store = self.lock()?;
        let program = store.program(id)?;
        let found = store
            .reports
            .get(id)
            .and_then(|list| list.iter().find(|r| &r.id == report))
            .ok_or_else(|| ApiError::NotFound(format!("Report {report} not found")))?;
        Ok(Self::report_preview(program, found))
    }

    async fn publish_report(&self, id: &ProgramId, report: &ReportId) -> Result<Report, ApiError> {
        let now = self.clock.now();
        let mut store = self.lock()?;
        store.program(id)?;
        let found = store
            .reports
            .get_mut(id)
            .and_then(|list| list.iter_mut().find(|r| &r.id == report))
            .ok_or_else(|| ApiError::NotFound(format!("Report {report} not found")))?;
        if found.is_published() {
            return Err(ApiError::Rejected("Report is already published".into()));
        }
        found.status = ReportStatus::Published;
        found.published_at = Some(now);
        Ok(found.clone())
    }

    async fn download_report(
        &self,
        id: &ProgramId,
        report: &ReportId,
        format: ReportFormat,
    ) -> Result<Vec<u8>, ApiError> {
        let preview = self.preview_report(id, report).await?;
        let mut body = String::new();
        match format {
            ReportFormat::Pdf => {
                body.push_str("%PDF-1.4\n");
                body.push_str(&preview.report.title);
                body.push('\n');
                for section in &preview.sections {
                    body.push_str(&format!("{}\n{}\n", section.heading, section.body));
                }
            }
            ReportFormat::Excel => {
                body.push_str("heading,body\n");
                for section in &preview.sections {
                    body.push_str(&format!("{},\"{}\"\n", section.heading, section.body));
                }
            }
        }
        Ok(body.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use csr_core::time::fixed_clock;

    fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
    }

    fn input(partner: &str) -> ProgramInput {
        ProgramInput {
            name: "Road Safety Week".into(),
            partner_id: PartnerId::new(partner),
            description: "Reflex games for primary classes".into(),
            scope: ProgramScope {
                states: vec!["Karnataka".into()],
                districts: vec![],
                school_categories: vec![],
                target_students: 300,
            },
            duration: ProgramDuration {
                start_date: date(2025, 1, 1).unwrap(),
                end_date: date(2025, 6, 30).unwrap(),
            },
        }
    }

    #[tokio::test]
    async fn new_program_has_five_pending_checkpoints() {
        let api = InMemoryProgramApi::seeded(fixed_clock()).unwrap();
        let program = api.create_program(&input("ptn-bright")).await.unwrap();
        assert_eq!(program.status, ProgramStatus::Draft);
        assert_eq!(program.checkpoints.len(), 5);
        assert!(
            program
                .checkpoints
                .iter()
                .all(|c| c.status == CheckpointStatus::Pending)
        );
        assert_eq!(program.partner.name, "Bright Futures Trust");
    }

    #[tokio::test]
    async fn unknown_partner_is_rejected() {
        let api = InMemoryProgramApi::new(fixed_clock());
        let err = api.create_program(&input("nobody")).await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected(_)));
    }

    #[tokio::test]
    async fn trigger_respects_gate() {
        let api = InMemoryProgramApi::seeded(fixed_clock()).unwrap();
        let program = api.create_program(&input("ptn-bright")).await.unwrap();

        let err = api.trigger_checkpoint(&program.id, 2).await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected(_)));

        let first = api.trigger_checkpoint(&program.id, 1).await.unwrap();
        assert_eq!(first.status, CheckpointStatus::Ready);
        assert!(first.triggered_at.is_some());
    }

    #[tokio::test]
    async fn delivering_certificates_starts_kits() {
        let api = InMemoryProgramApi::seeded(fixed_clock()).unwrap();
        let program = api
            .list_programs(&ProgramQuery::default())
            .await
            .unwrap()
            .items
            .remove(0);
        let page = api
            .list_certificates(&program.id, &CertificateQuery::default())
            .await
            .unwrap();
        let ids: Vec<_> = page.items.iter().take(2).map(|c| c.id.clone()).collect();

        let result = api
            .mark_certificates(&program.id, &ids, CertificateMark::Delivered)
            .await
            .unwrap();
        assert_eq!(result.updated, 2);

        let delivered = api
            .list_certificates(
                &program.id,
                &CertificateQuery {
                    status: Some(CertificateStatus::Delivered),
                    ..CertificateQuery::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(delivered.items.len(), 2);
        assert!(
            delivered
                .items
                .iter()
                .all(|c| c.kit_status == Some(KitStatus::InProgress) && c.delivered_at.is_some())
        );
    }

    #[tokio::test]
    async fn permanent_delete_cascades() {
        let api = InMemoryProgramApi::seeded(fixed_clock()).unwrap();
        let program = api
            .list_programs(&ProgramQuery::default())
            .await
            .unwrap()
            .items
            .remove(0);
        api.delete_program(&program.id).await.unwrap();

        assert!(matches!(
            api.get_program(&program.id).await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            api.list_certificates(&program.id, &CertificateQuery::default())
                .await,
            Err(ApiError::NotFound(_))
        ));
        let store = api.lock().unwrap();
        assert!(!store.schools.contains_key(&program.id));
        assert!(!store.certificates.contains_key(&program.id));
        assert!(!store.reports.contains_key(&program.id));
    }

    #[tokio::test]
    async fn duplicate_assignment_is_rejected_and_bulk_skips_it() {
        let api = InMemoryProgramApi::seeded(fixed_clock()).unwrap();
        let program = api.create_program(&input("ptn-bright")).await.unwrap();
        let hunsur = SchoolId::new("sch-hunsur");
        api.assign_school(&program.id, &hunsur).await.unwrap();

        let err = api.assign_school(&program.id, &hunsur).await.unwrap_err();
        assert_eq!(err.message(), "GHS Hunsur is already assigned to this program");

        let added = api
            .assign_schools(&program.id, &[hunsur, SchoolId::new("sch-kolar")])
            .await
            .unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(
            api.list_program_schools(&program.id).await.unwrap().len(),
            2
        );
    }

    #[tokio::test]
    async fn bulk_assign_ignores_repeated_ids() {
        let api = InMemoryProgramApi::seeded(fixed_clock()).unwrap();
        let program = api.create_program(&input("ptn-bright")).await.unwrap();
        let kolar = SchoolId::new("sch-kolar");

        let added = api
            .assign_schools(&program.id, &[kolar.clone(), kolar.clone()])
            .await
            .unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].school.id, kolar);
        assert_eq!(
            api.list_program_schools(&program.id).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn refresh_recounts_schools_and_deliveries() {
        let api = InMemoryProgramApi::seeded(fixed_clock()).unwrap();
        let program = api
            .list_programs(&ProgramQuery::default())
            .await
            .unwrap()
            .items
            .remove(0);
        let metrics = api.refresh_metrics(&program.id).await.unwrap();
        assert_eq!(metrics.schools, 2);
        assert_eq!(metrics.certificates_delivered, 0);
        assert!(metrics.last_refreshed_at.is_some());
    }

    #[tokio::test]
    async fn publishing_twice_is_rejected() {
        let api = InMemoryProgramApi::seeded(fixed_clock()).unwrap();
        let program = api
            .list_programs(&ProgramQuery::default())
            .await
            .unwrap()
            .items
            .remove(0);
        let report = api.list_reports(&program.id).await.unwrap().remove(0);
        let published = api.publish_report(&program.id, &report.id).await.unwrap();
        assert!(published.is_published());
        assert!(matches!(
            api.publish_report(&program.id, &report.id).await,
            Err(ApiError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn archive_completes_program() {
        let api = InMemoryProgramApi::seeded(fixed_clock()).unwrap();
        let program = api.create_program(&input("ptn-sunrise")).await.unwrap();
        let archived = api.archive_program(&program.id).await.unwrap();
        assert!(archived.is_archived());
    }
}
