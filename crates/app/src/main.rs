mod config;
mod telemetry;

use std::sync::Arc;

use clap::Parser;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, AppServicesError, Clock, GamesSetup, ReportDownloads};
use thiserror::Error;
use tracing::{error, info};
use ui::{App, DesktopApp, UiApp, build_app_context};

use crate::config::{Cli, ConfigError, Mode, Settings};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Services(#[from] AppServicesError),
}

async fn build_services(settings: &Settings) -> Result<AppServices, AppServicesError> {
    let downloads = settings
        .download_dir
        .clone()
        .map_or_else(ReportDownloads::user_default, ReportDownloads::new);
    let games = GamesSetup {
        library_path: settings.library_path.as_deref(),
        settings: settings.games,
    };
    match settings.mode {
        Mode::Http => AppServices::http(settings.http.clone(), games, downloads).await,
        Mode::Offline => AppServices::offline(Clock::default(), games, downloads).await,
    }
}

async fn run() -> Result<(), StartupError> {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    telemetry::init();

    let settings = Settings::load(cli)?;
    info!(mode = ?settings.mode, "starting");
    let services = build_services(&settings).await?;

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        title: settings.window_title.clone(),
        services,
    });
    let context = build_app_context(&app);

    // On macOS, tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title(settings.window_title)
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        error!(%err, "startup failed");
        eprintln!("{err}");
        std::process::exit(2);
    }
}
