use csr_core::model::ProgramId;
use csr_core::model::program::CheckpointNotes;
use dioxus::prelude::*;
use services::Notice;

use crate::context::AppContext;
use crate::views::programs::nav::{ProgramHeader, ProgramTab};
use crate::views::{StatePanel, ViewError, ViewState, use_toasts, view_state_from_resource};
use crate::vm::{CheckpointRowVm, ProgramHeaderVm, map_checkpoint_rows, map_program_header};

#[derive(Clone, Debug, PartialEq)]
struct CheckpointsData {
    header: ProgramHeaderVm,
    rows: Vec<CheckpointRowVm>,
}

#[component]
pub fn CheckpointsView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let admin = ctx.admin();
    let toasts = use_toasts();
    let program_id = ProgramId::new(id.clone());
    let mut triggering = use_signal(|| None::<u8>);

    let admin_for_resource = admin.clone();
    let id_for_resource = program_id.clone();
    let mut resource = use_resource(move || {
        let admin = admin_for_resource.clone();
        let id = id_for_resource.clone();
        async move {
            let page = admin.checkpoints_page(&id).await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(CheckpointsData {
                header: map_program_header(&page.program),
                rows: map_checkpoint_rows(&page.checkpoints),
            })
        }
    });

    let admin_for_trigger = admin.clone();
    let id_for_trigger = program_id.clone();
    let trigger = move |number: u8| {
        let admin = admin_for_trigger.clone();
        let id = id_for_trigger.clone();
        triggering.set(Some(number));
        spawn(async move {
            let outcome = admin.trigger_checkpoint(&id, number).await;
            toasts.show(Notice::from_outcome(
                &outcome,
                format!("Checkpoint {number} sent to the partner"),
            ));
            triggering.set(None);
            resource.restart();
        });
    };

    let save_notes = move |(number, notes): (u8, CheckpointNotes)| {
        let admin = admin.clone();
        let id = program_id.clone();
        spawn(async move {
            let outcome = admin.update_checkpoint_notes(&id, number, notes).await;
            toasts.show(Notice::from_outcome(&outcome, "Notes saved"));
            resource.restart();
        });
    };

    rsx! {
        div { class: "page checkpoints-page",
            match view_state_from_resource(&resource) {
                ViewState::Idle | ViewState::Loading => rsx! {
                    StatePanel { error: None, on_retry: move |()| {} }
                },
                ViewState::Error(err) => rsx! {
                    StatePanel { error: Some(err), on_retry: move |()| resource.restart() }
                },
                ViewState::Ready(data) => rsx! {
                    ProgramHeader { header: data.header.clone(), active: ProgramTab::Checkpoints }
                    ol { class: "checkpoints",
                        for row in data.rows {
                            CheckpointCard {
                                key: "{row.number}",
                                busy: triggering() == Some(row.number),
                                row,
                                on_trigger: trigger.clone(),
                                on_save_notes: save_notes.clone(),
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn CheckpointCard(
    row: CheckpointRowVm,
    busy: bool,
    on_trigger: EventHandler<u8>,
    on_save_notes: EventHandler<(u8, CheckpointNotes)>,
) -> Element {
    let number = row.number;
    let mut editing = use_signal(|| false);
    let mut notes = use_signal(|| row.notes.clone());
    let mut admin_notes = use_signal(|| row.admin_notes.clone());

    rsx! {
        li { class: "checkpoint card",
            div { class: "checkpoint-head",
                span { class: "checkpoint-number", "{number}" }
                h3 { "{row.name}" }
                span { class: row.status_class, "{row.status_label}" }
            }
            dl { class: "facts",
                dt { "Triggered" }
                dd { "{row.triggered_at}" }
                dt { "Acknowledged" }
                dd { "{row.acknowledged_at}" }
                dt { "Completed" }
                dd { "{row.completed_at}" }
            }
            if editing() {
                div { class: "notes-editor",
                    label { class: "field",
                        span { class: "field-label", "Notes for the partner" }
                        textarea {
                            class: "input",
                            rows: 2,
                            value: "{notes}",
                            oninput: move |evt| notes.set(evt.value()),
                        }
                    }
                    label { class: "field",
                        span { class: "field-label", "Internal notes" }
                        textarea {
                            class: "input",
                            rows: 2,
                            value: "{admin_notes}",
                            oninput: move |evt| admin_notes.set(evt.value()),
                        }
                    }
                    div { class: "actions",
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| editing.set(false),
                            "Cancel"
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| {
                                on_save_notes.call((
                                    number,
                                    CheckpointNotes {
                                        notes: Some(notes()),
                                        admin_notes: Some(admin_notes()),
                                    },
                                ));
                                editing.set(false);
                            },
                            "Save notes"
                        }
                    }
                }
            } else {
                if !row.notes.is_empty() {
                    p { class: "checkpoint-notes", "{row.notes}" }
                }
                if !row.admin_notes.is_empty() {
                    p { class: "checkpoint-notes checkpoint-notes--internal", "{row.admin_notes}" }
                }
            }
            div { class: "actions",
                if row.show_trigger {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: !row.can_trigger || busy,
                        title: row.locked_hint.clone().unwrap_or_default(),
                        onclick: move |_| on_trigger.call(number),
                        if busy { "Sending..." } else { "Trigger checkpoint" }
                    }
                    if let Some(hint) = row.locked_hint.clone() {
                        span { class: "hint", "{hint}" }
                    }
                }
                if !editing() {
                    button {
                        class: "btn btn-link",
                        r#type: "button",
                        onclick: move |_| editing.set(true),
                        "Edit notes"
                    }
                }
            }
        }
    }
}
