mod certificates;
mod checkpoints;
mod detail;
mod form;
mod list;
mod metrics;
mod nav;
mod reports;
mod schools;

pub use certificates::CertificatesView;
pub use checkpoints::CheckpointsView;
pub use detail::ProgramDetailView;
pub use form::{ProgramCreateView, ProgramEditView};
pub use list::ProgramsView;
pub use metrics::MetricsView;
pub use reports::ReportsView;
pub use schools::SchoolsView;
