use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{
    CertificatesView, CheckpointsView, GameLibraryView, GamePlayView, MetricsView,
    ProgramCreateView, ProgramDetailView, ProgramEditView, ProgramsView, ReportsView,
    SchoolsView, ToastHost, use_toast_provider,
};

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", ProgramsView)] Programs {},
        #[route("/programs/new", ProgramCreateView)] ProgramCreate {},
        #[route("/programs/:id", ProgramDetailView)] ProgramDetail { id: String },
        #[route("/programs/:id/edit", ProgramEditView)] ProgramEdit { id: String },
        #[route("/programs/:id/schools", SchoolsView)] Schools { id: String },
        #[route("/programs/:id/checkpoints", CheckpointsView)] Checkpoints { id: String },
        #[route("/programs/:id/metrics", MetricsView)] Metrics { id: String },
        #[route("/programs/:id/certificates", CertificatesView)] Certificates { id: String },
        #[route("/programs/:id/reports", ReportsView)] Reports { id: String },
        #[route("/games", GameLibraryView)] GameLibrary {},
        #[route("/games/:slug", GamePlayView)] GamePlay { slug: String },
}

#[component]
fn Layout() -> Element {
    use_toast_provider();
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
            ToastHost {}
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "CSR Learn" }
            ul {
                li { Link { to: Route::Programs {}, "Programs" } }
                li { Link { to: Route::ProgramCreate {}, "New program" } }
                li { Link { to: Route::GameLibrary {}, "Games" } }
            }
        }
    }
}
