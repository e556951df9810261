#![forbid(unsafe_code)]

pub mod admin;
pub mod app_services;
pub mod countdown;
pub mod downloads;
pub mod error;
pub mod games;
pub mod notice;

pub use csr_core::Clock;

pub use admin::{
    CertificatesPage, CheckpointsPage, MetricsPage, ProgramAdminService, ProgramOverview,
    ReportsPage, SchoolsPage,
};
pub use app_services::{AppServices, GamesSetup};
pub use countdown::{Countdown, TICK_PERIOD};
pub use downloads::ReportDownloads;
pub use error::{AdminError, AppServicesError, GameError};
pub use games::{GameLibraryService, GamePlay, GameResult, GameSettings, feedback_pause};
pub use notice::{Notice, NoticeKind};
