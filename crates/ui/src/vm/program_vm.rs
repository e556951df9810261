use csr_core::model::program::{Program, ProgramScope, ProgramStatus};

use crate::vm::time_fmt::format_date;

/// One row of the programs table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramRowVm {
    pub id: String,
    pub name: String,
    pub partner: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub dates: String,
    pub target: String,
}

#[must_use]
pub fn status_class(status: ProgramStatus) -> &'static str {
    match status {
        ProgramStatus::Draft => "badge badge--muted",
        ProgramStatus::Approved => "badge badge--info",
        ProgramStatus::ImplementationInProgress => "badge badge--warn",
        ProgramStatus::MidProgramReviewCompleted => "badge badge--info",
        ProgramStatus::Completed => "badge badge--ok",
    }
}

#[must_use]
pub fn map_program_rows(programs: &[Program]) -> Vec<ProgramRowVm> {
    programs
        .iter()
        .map(|program| ProgramRowVm {
            id: program.id.as_str().to_string(),
            name: program.name.clone(),
            partner: program.partner.name.clone(),
            status_label: program.status.label(),
            status_class: status_class(program.status),
            dates: format!(
                "{} – {}",
                format_date(program.duration.start_date),
                format_date(program.duration.end_date)
            ),
            target: format!("{} students", program.scope.target_students),
        })
        .collect()
}

/// "Karnataka · Mysuru, Mandya · government"; empty parts are skipped.
#[must_use]
pub fn scope_summary(scope: &ProgramScope) -> String {
    [&scope.states, &scope.districts, &scope.school_categories]
        .into_iter()
        .filter(|part| !part.is_empty())
        .map(|part| part.join(", "))
        .collect::<Vec<_>>()
        .join(" · ")
}

/// Header shared by the program sub-pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramHeaderVm {
    pub id: String,
    pub name: String,
    pub partner: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub archived: bool,
}

#[must_use]
pub fn map_program_header(program: &Program) -> ProgramHeaderVm {
    ProgramHeaderVm {
        id: program.id.as_str().to_string(),
        name: program.name.clone(),
        partner: program.partner.name.clone(),
        status_label: program.status.label(),
        status_class: status_class(program.status),
        archived: program.is_archived(),
    }
}
