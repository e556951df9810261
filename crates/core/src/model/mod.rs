mod ids;
pub mod program;

pub use ids::{
    CategoryId, CertificateId, ItemId, OptionId, PartnerId, ProgramId, PromptId, ReportId,
    SchoolId, StageId, StudentId,
};
