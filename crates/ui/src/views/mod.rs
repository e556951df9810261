mod games;
mod programs;
mod state;
mod toast;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use games::{GameLibraryView, GamePlayView, GameShell};
pub use programs::{
    CertificatesView, CheckpointsView, MetricsView, ProgramCreateView, ProgramDetailView,
    ProgramEditView, ProgramsView, ReportsView, SchoolsView,
};
pub use state::{StatePanel, ViewError, ViewState, view_state_from_resource};
pub use toast::{ToastHost, Toasts, use_toast_provider, use_toasts};
