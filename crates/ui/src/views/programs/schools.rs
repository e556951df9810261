use std::collections::BTreeSet;

use csr_core::model::program::SchoolStatus;
use csr_core::model::{ProgramId, SchoolId};
use dioxus::prelude::*;
use services::Notice;

use crate::context::AppContext;
use crate::views::programs::nav::{ProgramHeader, ProgramTab};
use crate::views::{StatePanel, ViewError, ViewState, use_toasts, view_state_from_resource};
use crate::vm::{
    AssignedSchoolVm, CatalogueSchoolVm, ProgramHeaderVm, map_assigned_schools,
    map_catalogue_schools, map_program_header,
};

#[derive(Clone, Debug, PartialEq)]
struct SchoolsData {
    header: ProgramHeaderVm,
    assigned: Vec<AssignedSchoolVm>,
    catalogue: Vec<CatalogueSchoolVm>,
}

#[component]
pub fn SchoolsView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let admin = ctx.admin();
    let toasts = use_toasts();
    let program_id = ProgramId::new(id.clone());
    let mut search = use_signal(String::new);
    let mut picked = use_signal(BTreeSet::<SchoolId>::new);
    let mut busy = use_signal(|| false);

    let admin_for_resource = admin.clone();
    let id_for_resource = program_id.clone();
    let mut resource = use_resource(move || {
        let admin = admin_for_resource.clone();
        let id = id_for_resource.clone();
        let term = search();
        async move {
            let term = term.trim();
            let page = admin
                .schools_page(&id, (!term.is_empty()).then_some(term))
                .await
                .map_err(ViewError::from)?;
            Ok::<_, ViewError>(SchoolsData {
                header: map_program_header(&page.program),
                assigned: map_assigned_schools(&page.assigned),
                catalogue: map_catalogue_schools(page.unassigned()),
            })
        }
    });

    let admin_for_status = admin.clone();
    let id_for_status = program_id.clone();
    let change_status = move |(school, status): (SchoolId, SchoolStatus)| {
        let admin = admin_for_status.clone();
        let id = id_for_status.clone();
        spawn(async move {
            let outcome = admin.update_school_status(&id, &school, status).await;
            toasts.show(Notice::from_outcome(&outcome, "School status updated"));
            resource.restart();
        });
    };

    let admin_for_remove = admin.clone();
    let id_for_remove = program_id.clone();
    let remove = move |school: SchoolId| {
        let admin = admin_for_remove.clone();
        let id = id_for_remove.clone();
        spawn(async move {
            let outcome = admin.remove_school(&id, &school).await;
            toasts.show(Notice::from_outcome(&outcome, "School removed from program"));
            resource.restart();
        });
    };

    let admin_for_one = admin.clone();
    let id_for_one = program_id.clone();
    let assign_one = move |school: SchoolId| {
        let admin = admin_for_one.clone();
        let id = id_for_one.clone();
        spawn(async move {
            let outcome = admin.assign_school(&id, &school).await;
            toasts.show(Notice::from_outcome(&outcome, "School assigned"));
            picked.write().remove(&school);
            resource.restart();
        });
    };

    let assign_picked = move |_: MouseEvent| {
        let admin = admin.clone();
        let id = program_id.clone();
        let schools: Vec<SchoolId> = picked.read().iter().cloned().collect();
        busy.set(true);
        spawn(async move {
            match admin.assign_schools(&id, &schools).await {
                Ok(added) => {
                    toasts.show(Notice::success(format!(
                        "{} schools assigned",
                        added.len()
                    )));
                    picked.write().clear();
                    resource.restart();
                }
                Err(err) => toasts.show(Notice::error(&err)),
            }
            busy.set(false);
        });
    };

    let picked_count = picked.read().len();

    rsx! {
        div { class: "page schools-page",
            match view_state_from_resource(&resource) {
                ViewState::Idle | ViewState::Loading => rsx! {
                    StatePanel { error: None, on_retry: move |()| {} }
                },
                ViewState::Error(err) => rsx! {
                    StatePanel { error: Some(err), on_retry: move |()| resource.restart() }
                },
                ViewState::Ready(data) => rsx! {
                    ProgramHeader { header: data.header.clone(), active: ProgramTab::Schools }
                    section { class: "card",
                        h3 { "Assigned schools ({data.assigned.len()})" }
                        if data.assigned.is_empty() {
                            p { class: "empty-state", "No schools assigned yet." }
                        } else {
                            table { class: "table",
                                thead {
                                    tr {
                                        th { "School" }
                                        th { "Location" }
                                        th { "Students" }
                                        th { "Status" }
                                        th {}
                                    }
                                }
                                tbody {
                                    for school in data.assigned {
                                        AssignedRow {
                                            key: "{school.id}",
                                            school,
                                            on_status: change_status.clone(),
                                            on_remove: remove.clone(),
                                        }
                                    }
                                }
                            }
                        }
                    }
                    section { class: "card",
                        h3 { "Add schools" }
                        div { class: "filters",
                            input {
                                class: "input",
                                r#type: "search",
                                placeholder: "Search the school catalogue",
                                value: "{search}",
                                oninput: move |evt| search.set(evt.value()),
                            }
                            button {
                                class: "btn btn-primary",
                                r#type: "button",
                                disabled: picked_count == 0 || busy(),
                                onclick: assign_picked,
                                if picked_count == 0 {
                                    "Assign selected"
                                } else {
                                    "Assign {picked_count} selected"
                                }
                            }
                        }
                        if data.catalogue.is_empty() {
                            p { class: "empty-state", "No unassigned schools match." }
                        } else {
                            ul { class: "catalogue",
                                for school in data.catalogue {
                                    CatalogueRow {
                                        key: "{school.id}",
                                        checked: picked.read().contains(&school.id),
                                        school,
                                        on_toggle: move |id: SchoolId| {
                                            let mut set = picked.write();
                                            if !set.remove(&id) {
                                                set.insert(id);
                                            }
                                        },
                                        on_assign: assign_one.clone(),
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn AssignedRow(
    school: AssignedSchoolVm,
    on_status: EventHandler<(SchoolId, SchoolStatus)>,
    on_remove: EventHandler<SchoolId>,
) -> Element {
    let id_for_status = school.id.clone();
    let id_for_remove = school.id.clone();
    rsx! {
        tr {
            td { "{school.name}" }
            td { "{school.location}" }
            td { "{school.students}" }
            td {
                select {
                    class: "input",
                    onchange: move |evt| {
                        if let Some(status) = SchoolStatus::parse(&evt.value()) {
                            on_status.call((id_for_status.clone(), status));
                        }
                    },
                    for s in SchoolStatus::ALL {
                        option { value: s.as_str(), selected: s == school.status, "{s.label()}" }
                    }
                }
            }
            td {
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| on_remove.call(id_for_remove.clone()),
                    "Remove"
                }
            }
        }
    }
}

#[component]
fn CatalogueRow(
    school: CatalogueSchoolVm,
    checked: bool,
    on_toggle: EventHandler<SchoolId>,
    on_assign: EventHandler<SchoolId>,
) -> Element {
    let id_for_toggle = school.id.clone();
    let id_for_assign = school.id.clone();
    rsx! {
        li { class: "catalogue-row",
            label {
                input {
                    r#type: "checkbox",
                    checked,
                    onchange: move |_| on_toggle.call(id_for_toggle.clone()),
                }
                span { class: "catalogue-name", "{school.name}" }
                span { class: "catalogue-location", "{school.location}" }
            }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| on_assign.call(id_for_assign.clone()),
                "Assign"
            }
        }
    }
}
