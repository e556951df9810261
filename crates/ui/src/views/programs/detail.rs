use csr_core::model::ProgramId;
use csr_core::model::program::CheckpointStatus;
use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::Notice;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::programs::nav::{ProgramHeader, ProgramTab};
use crate::views::{StatePanel, ViewError, ViewState, use_toasts, view_state_from_resource};
use crate::vm::{
    MetricTileVm, ProgramHeaderVm, format_date, map_metric_tiles, map_program_header,
    scope_summary,
};

#[derive(Clone, Debug, PartialEq)]
struct DetailData {
    header: ProgramHeaderVm,
    description: String,
    scope: String,
    target: u32,
    start: String,
    end: String,
    days: i64,
    tiles: Vec<MetricTileVm>,
    checkpoints_completed: usize,
    checkpoints_total: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pending {
    Archive,
    Delete,
}

#[component]
pub fn ProgramDetailView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let admin = ctx.admin();
    let navigator = use_navigator();
    let toasts = use_toasts();
    let program_id = ProgramId::new(id.clone());
    let mut confirm = use_signal(|| None::<Pending>);
    let mut busy = use_signal(|| false);

    let admin_for_resource = admin.clone();
    let id_for_resource = program_id.clone();
    let mut resource = use_resource(move || {
        let admin = admin_for_resource.clone();
        let id = id_for_resource.clone();
        async move {
            let overview = admin.overview(&id).await.map_err(ViewError::from)?;
            let program = &overview.program;
            Ok::<_, ViewError>(DetailData {
                header: map_program_header(program),
                description: program.description.clone(),
                scope: scope_summary(&program.scope),
                target: program.scope.target_students,
                start: format_date(program.duration.start_date),
                end: format_date(program.duration.end_date),
                days: program.duration.days(),
                tiles: map_metric_tiles(&overview.metrics),
                checkpoints_completed: overview
                    .checkpoints
                    .iter()
                    .filter(|c| c.status == CheckpointStatus::Completed)
                    .count(),
                checkpoints_total: overview.checkpoints.len(),
            })
        }
    });

    let run_confirmed = move |action: Pending| {
        let admin = admin.clone();
        let id = program_id.clone();
        confirm.set(None);
        busy.set(true);
        spawn(async move {
            match action {
                Pending::Archive => {
                    let outcome = admin.archive_program(&id).await;
                    toasts.show(Notice::from_outcome(&outcome, "Program archived"));
                    resource.restart();
                }
                Pending::Delete => {
                    let outcome = admin.delete_program(&id).await;
                    toasts.show(Notice::from_outcome(&outcome, "Program permanently deleted"));
                    if outcome.is_ok() {
                        let _ = navigator.push(Route::Programs {});
                    }
                }
            }
            busy.set(false);
        });
    };

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page program-detail",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    StatePanel { error: None, on_retry: move |()| {} }
                },
                ViewState::Error(err) => rsx! {
                    Link { class: "back-link", to: Route::Programs {}, "← All programs" }
                    StatePanel { error: Some(err), on_retry: move |()| resource.restart() }
                },
                ViewState::Ready(data) => rsx! {
                    ProgramHeader { header: data.header.clone(), active: ProgramTab::Overview }
                    section { class: "card",
                        p { "{data.description}" }
                        dl { class: "facts",
                            dt { "Scope" }
                            dd { "{data.scope}" }
                            dt { "Target" }
                            dd { "{data.target} students" }
                            dt { "Duration" }
                            dd { "{data.start} – {data.end} ({data.days} days)" }
                            dt { "Checkpoints" }
                            dd { "{data.checkpoints_completed} of {data.checkpoints_total} completed" }
                        }
                    }
                    section { class: "tiles",
                        for tile in data.tiles.iter().take(4) {
                            div { class: "tile",
                                span { class: "tile-value", "{tile.value}" }
                                span { class: "tile-label", "{tile.label}" }
                            }
                        }
                    }
                    section { class: "actions",
                        Link {
                            class: "btn btn-secondary",
                            to: Route::ProgramEdit { id: data.header.id.clone() },
                            "Edit"
                        }
                        if !data.header.archived {
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                disabled: busy(),
                                onclick: move |_| confirm.set(Some(Pending::Archive)),
                                "Archive"
                            }
                        }
                        button {
                            class: "btn btn-danger",
                            r#type: "button",
                            disabled: busy(),
                            onclick: move |_| confirm.set(Some(Pending::Delete)),
                            "Delete permanently"
                        }
                    }
                },
            }
            if let Some(action) = confirm() {
                ConfirmDialog {
                    action,
                    on_confirm: run_confirmed,
                    on_cancel: move |()| confirm.set(None),
                }
            }
        }
    }
}

#[component]
fn ConfirmDialog(
    action: Pending,
    on_confirm: EventHandler<Pending>,
    on_cancel: EventHandler<()>,
) -> Element {
    let (title, body, cta) = match action {
        Pending::Archive => (
            "Archive this program?",
            "The program will be marked completed.",
            "Archive",
        ),
        Pending::Delete => (
            "Delete this program permanently?",
            "Schools, checkpoints, metrics, certificates and reports are deleted with it. This cannot be undone.",
            "Delete",
        ),
    };
    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal", role: "dialog",
                h3 { "{title}" }
                p { "{body}" }
                div { class: "modal-actions",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: if action == Pending::Delete { "btn btn-danger" } else { "btn btn-primary" },
                        r#type: "button",
                        onclick: move |_| on_confirm.call(action),
                        "{cta}"
                    }
                }
            }
        }
    }
}
