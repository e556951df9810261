//! Program-side domain: the records the admin console reads and edits.
//!
//! Everything here mirrors the backend's JSON shapes (camelCase fields,
//! snake_case enum values) plus the rules the console enforces locally:
//! checkpoint gating, form validation and the certificate selection set.

mod certificate;
mod checkpoint;
pub mod draft;
mod metrics;
mod partner;
mod program;
mod report;
mod school;

pub use certificate::{
    Certificate, CertificateSelection, CertificateStatus, KitStatus, StudentRef,
};
pub use checkpoint::{
    CHECKPOINT_COUNT, Checkpoint, CheckpointError, CheckpointNotes, CheckpointStatus,
    can_trigger, check_trigger, default_checkpoint_name, shows_trigger_action,
};
pub use draft::{ProgramDraft, ProgramField, ProgramFieldErrors, ProgramInput};
pub use metrics::ProgramMetrics;
pub use partner::{Partner, PartnerRef};
pub use program::{Program, ProgramDuration, ProgramScope, ProgramStatus};
pub use report::{Report, ReportFile, ReportFormat, ReportKind, ReportPreview, ReportSection, ReportStatus};
pub use school::{ProgramSchool, School, SchoolStatus};
