use dioxus::prelude::*;
use dioxus_router::Link;

use crate::routes::Route;
use crate::vm::ProgramHeaderVm;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgramTab {
    Overview,
    Schools,
    Checkpoints,
    Metrics,
    Certificates,
    Reports,
}

impl ProgramTab {
    const ALL: [ProgramTab; 6] = [
        ProgramTab::Overview,
        ProgramTab::Schools,
        ProgramTab::Checkpoints,
        ProgramTab::Metrics,
        ProgramTab::Certificates,
        ProgramTab::Reports,
    ];

    fn label(self) -> &'static str {
        match self {
            ProgramTab::Overview => "Overview",
            ProgramTab::Schools => "Schools",
            ProgramTab::Checkpoints => "Checkpoints",
            ProgramTab::Metrics => "Metrics",
            ProgramTab::Certificates => "Certificates",
            ProgramTab::Reports => "Reports",
        }
    }

    fn route(self, id: String) -> Route {
        match self {
            ProgramTab::Overview => Route::ProgramDetail { id },
            ProgramTab::Schools => Route::Schools { id },
            ProgramTab::Checkpoints => Route::Checkpoints { id },
            ProgramTab::Metrics => Route::Metrics { id },
            ProgramTab::Certificates => Route::Certificates { id },
            ProgramTab::Reports => Route::Reports { id },
        }
    }
}

/// Program name, partner, status badge and the sub-page tabs.
#[component]
pub fn ProgramHeader(header: ProgramHeaderVm, active: ProgramTab) -> Element {
    rsx! {
        header { class: "view-header",
            Link { class: "back-link", to: Route::Programs {}, "← All programs" }
            h2 { class: "view-title", "{header.name}" }
            p { class: "view-subtitle",
                "{header.partner} "
                span { class: header.status_class, "{header.status_label}" }
            }
        }
        nav { class: "tabs",
            for tab in ProgramTab::ALL {
                Link {
                    class: if tab == active { "tab tab--active" } else { "tab" },
                    to: tab.route(header.id.clone()),
                    "{tab.label()}"
                }
            }
        }
    }
}
