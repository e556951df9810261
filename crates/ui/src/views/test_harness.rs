use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use csr_core::time::fixed_clock;
use tempfile::TempDir;
use services::{AppServices, GamesSetup, GameLibraryService, ProgramAdminService, ReportDownloads};

use crate::context::{UiApp, build_app_context};
use crate::views::{
    GameLibraryView, GamePlayView, ProgramDetailView, ProgramsView, ToastHost, use_toast_provider,
};

struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn window_title(&self) -> &str {
        "CSR Learn (test)"
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

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Programs,
    ProgramDetail(String),
    Games,
    GamePlay(String),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    use_toast_provider();
    let view = use_context::<ViewKind>();
    rsx! {
        match view {
            ViewKind::Programs => rsx! { ProgramsView {} },
            ViewKind::ProgramDetail(id) => rsx! { ProgramDetailView { id } },
            ViewKind::Games => rsx! { GameLibraryView {} },
            ViewKind::GamePlay(slug) => rsx! { GamePlayView { slug } },
        }
        ToastHost {}
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    _downloads: TempDir,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..4 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Seeded services saving downloads into a per-test folder.
pub struct OfflineServices {
    pub services: AppServices,
    downloads: TempDir,
}

pub async fn offline_services() -> OfflineServices {
    let downloads = tempfile::tempdir().expect("download folder");
    let services = AppServices::offline(
        fixed_clock(),
        GamesSetup::default(),
        ReportDownloads::new(downloads.path()),
    )
    .await
    .expect("offline services");
    OfflineServices {
        services,
        downloads,
    }
}

pub fn mount(offline: OfflineServices, view: ViewKind) -> ViewHarness {
    let app = Arc::new(TestApp {
        services: offline.services,
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness {
        dom,
        _downloads: offline.downloads,
    }
}

pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    mount(offline_services().await, view)
}
