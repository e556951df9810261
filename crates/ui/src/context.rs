use std::sync::Arc;

use services::{AppServices, GameLibraryService, ProgramAdminService, ReportDownloads};

/// What the views need from the composition root.
pub trait UiApp: Send + Sync {
    fn window_title(&self) -> &str;

    fn admin(&self) -> Arc<ProgramAdminService>;
    fn games(&self) -> Arc<GameLibraryService>;
    fn downloads(&self) -> Arc<ReportDownloads>;
}

/// `AppServices` plus a title; what `app` hands to the desktop launcher.
pub struct DesktopApp {
    pub title: String,
    pub services: AppServices,
}

impl UiApp for DesktopApp {
    fn window_title(&self) -> &str {
        &self.title
    }

    fn admin(&self) -> Arc<ProgramAdminService> {
        self.services.admin()
    }

    fn games(&self) -> Arc<GameLibraryService> {
        self.services.games()
    }

    fn downloads(&self) -> Arc<ReportDownloads> {
        self.services.downloads()
    }
}

#[derive(Clone)]
pub struct AppContext {
    window_title: String,
    admin: Arc<ProgramAdminService>,
    games: Arc<GameLibraryService>,
    downloads: Arc<ReportDownloads>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            window_title: app.window_title().to_string(),
            admin: app.admin(),
            games: app.games(),
            downloads: app.downloads(),
        }
    }

    #[must_use]
    pub fn window_title(&self) -> &str {
        &self.window_title
    }

    #[must_use]
    pub fn admin(&self) -> Arc<ProgramAdminService> {
        Arc::clone(&self.admin)
    }

    #[must_use]
    pub fn games(&self) -> Arc<GameLibraryService> {
        Arc::clone(&self.games)
    }

    #[must_use]
    pub fn downloads(&self) -> Arc<ReportDownloads> {
        Arc::clone(&self.downloads)
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
