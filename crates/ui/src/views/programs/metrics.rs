use csr_core::model::ProgramId;
use dioxus::prelude::*;
use services::Notice;

use crate::context::AppContext;
use crate::views::programs::nav::{ProgramHeader, ProgramTab};
use crate::views::{StatePanel, ViewError, ViewState, use_toasts, view_state_from_resource};
use crate::vm::{MetricTileVm, ProgramHeaderVm, map_metric_tiles, map_program_header, refreshed_label};

#[derive(Clone, Debug, PartialEq)]
struct MetricsData {
    header: ProgramHeaderVm,
    tiles: Vec<MetricTileVm>,
    refreshed: String,
}

#[component]
pub fn MetricsView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let admin = ctx.admin();
    let toasts = use_toasts();
    let program_id = ProgramId::new(id.clone());
    let mut refreshing = use_signal(|| false);

    let admin_for_resource = admin.clone();
    let id_for_resource = program_id.clone();
    let mut resource = use_resource(move || {
        let admin = admin_for_resource.clone();
        let id = id_for_resource.clone();
        async move {
            let page = admin.metrics_page(&id).await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(MetricsData {
                header: map_program_header(&page.program),
                tiles: map_metric_tiles(&page.metrics),
                refreshed: refreshed_label(&page.metrics),
            })
        }
    });

    let refresh = move |_: MouseEvent| {
        let admin = admin.clone();
        let id = program_id.clone();
        refreshing.set(true);
        spawn(async move {
            let outcome = admin.refresh_metrics(&id).await;
            toasts.show(Notice::from_outcome(&outcome, "Metrics refreshed"));
            refreshing.set(false);
            resource.restart();
        });
    };

    rsx! {
        div { class: "page metrics-page",
            match view_state_from_resource(&resource) {
                ViewState::Idle | ViewState::Loading => rsx! {
                    StatePanel { error: None, on_retry: move |()| {} }
                },
                ViewState::Error(err) => rsx! {
                    StatePanel { error: Some(err), on_retry: move |()| resource.restart() }
                },
                ViewState::Ready(data) => rsx! {
                    ProgramHeader { header: data.header.clone(), active: ProgramTab::Metrics }
                    div { class: "toolbar",
                        span { class: "muted", "{data.refreshed}" }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            disabled: refreshing(),
                            onclick: refresh,
                            if refreshing() { "Refreshing..." } else { "Refresh" }
                        }
                    }
                    section { class: "tiles",
                        for tile in data.tiles {
                            div { class: "tile", key: "{tile.label}",
                                span { class: "tile-value", "{tile.value}" }
                                span { class: "tile-label", "{tile.label}" }
                            }
                        }
                    }
                },
            }
        }
    }
}
