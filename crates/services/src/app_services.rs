use std::path::Path;
use std::sync::Arc;

use backend::{HttpConfig, HttpProgramApi, InMemoryProgramApi, ProgramAdminApi};
use csr_core::game::GameLibrary;
use tracing::info;

use crate::Clock;
use crate::admin::ProgramAdminService;
use crate::downloads::ReportDownloads;
use crate::error::AppServicesError;
use crate::games::{GameLibraryService, GameSettings};

/// Where the game library comes from and how games are tuned.
#[derive(Debug, Clone, Default)]
pub struct GamesSetup<'a> {
    /// Extra library file; `None` uses the built-in games.
    pub library_path: Option<&'a Path>,
    pub settings: GameSettings,
}

/// Assembles the app-facing services.
#[derive(Clone)]
pub struct AppServices {
    admin: Arc<ProgramAdminService>,
    games: Arc<GameLibraryService>,
    downloads: Arc<ReportDownloads>,
}

impl AppServices {
    /// Services talking to the admin REST backend.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the HTTP client or the game library
    /// cannot be built.
    pub async fn http(
        config: HttpConfig,
        games: GamesSetup<'_>,
        downloads: ReportDownloads,
    ) -> Result<Self, AppServicesError> {
        let api = HttpProgramApi::new(config)?;
        info!(base_url = %api.base_url(), "using admin backend");
        Self::assemble(Arc::new(api), games, downloads).await
    }

    /// Services backed by seeded in-process data, for demos and tests.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if seeding or the game library fails.
    pub async fn offline(
        clock: Clock,
        games: GamesSetup<'_>,
        downloads: ReportDownloads,
    ) -> Result<Self, AppServicesError> {
        let api = InMemoryProgramApi::seeded(clock)?;
        info!("using offline sample data");
        Self::assemble(Arc::new(api), games, downloads).await
    }

    /// # Errors
    ///
    /// Returns `AppServicesError` if the game library fails to load.
    pub async fn assemble(
        api: Arc<dyn ProgramAdminApi>,
        games: GamesSetup<'_>,
        downloads: ReportDownloads,
    ) -> Result<Self, AppServicesError> {
        let library = load_library(games.library_path).await?;
        info!(games = library.len(), "game library loaded");
        Ok(Self {
            admin: Arc::new(ProgramAdminService::new(api)),
            games: Arc::new(GameLibraryService::new(library, games.settings)),
            downloads: Arc::new(downloads),
        })
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

async fn load_library(path: Option<&Path>) -> Result<GameLibrary, AppServicesError> {
    let Some(path) = path else {
        return GameLibrary::builtin().map_err(|source| AppServicesError::Library {
            path: "<built-in>".into(),
            source,
        });
    };
    let display = path.display().to_string();
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| AppServicesError::LibraryFile {
            path: display.clone(),
            source,
        })?;
    GameLibrary::from_toml_str(&raw).map_err(|source| AppServicesError::Library {
        path: display,
        source,
    })
}
