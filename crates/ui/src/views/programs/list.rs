use backend::ProgramQuery;
use csr_core::model::program::ProgramStatus;
use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{StatePanel, ViewError, ViewState, view_state_from_resource};
use crate::vm::{ProgramRowVm, map_program_rows};

#[derive(Clone, Debug, PartialEq)]
struct ProgramsData {
    rows: Vec<ProgramRowVm>,
    page: u32,
    total_pages: u32,
    total: u32,
    has_previous: bool,
    has_next: bool,
}

#[component]
pub fn ProgramsView() -> Element {
    let ctx = use_context::<AppContext>();
    let admin = ctx.admin();
    let mut search = use_signal(String::new);
    let mut status = use_signal(|| None::<ProgramStatus>);
    let mut page = use_signal(|| 1u32);

    let resource = use_resource(move || {
        let admin = admin.clone();
        let query = ProgramQuery {
            search: Some(search()),
            status: status(),
            page: page(),
            ..ProgramQuery::default()
        };
        async move {
            let programs = admin.list_programs(&query).await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(ProgramsData {
                rows: map_program_rows(&programs.items),
                page: programs.pagination.page,
                total_pages: programs.pagination.total_pages,
                total: programs.pagination.total,
                has_previous: programs.pagination.has_previous(),
                has_next: programs.pagination.has_next(),
            })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page programs-page",
            header { class: "view-header",
                h2 { class: "view-title", "Programs" }
                Link { class: "btn btn-primary", to: Route::ProgramCreate {}, "New program" }
            }
            div { class: "filters",
                input {
                    class: "input",
                    r#type: "search",
                    placeholder: "Search by program or partner",
                    value: "{search}",
                    oninput: move |evt| {
                        search.set(evt.value());
                        page.set(1);
                    },
                }
                select {
                    class: "input",
                    onchange: move |evt| {
                        status.set(ProgramStatus::parse(&evt.value()));
                        page.set(1);
                    },
                    option { value: "", "All statuses" }
                    for s in ProgramStatus::ALL {
                        option { value: s.as_str(), selected: status() == Some(s), "{s.label()}" }
                    }
                }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    StatePanel { error: None, on_retry: move |()| {} }
                },
                ViewState::Error(err) => rsx! {
                    StatePanel {
                        error: Some(err),
                        on_retry: move |()| {
                            let mut resource = resource;
                            resource.restart();
                        },
                    }
                },
                ViewState::Ready(data) => rsx! {
                    if data.rows.is_empty() {
                        div { class: "empty-state",
                            p { "No programs found." }
                            Link { to: Route::ProgramCreate {}, "Create the first program" }
                        }
                    } else {
                        table { class: "table",
                            thead {
                                tr {
                                    th { "Program" }
                                    th { "Partner" }
                                    th { "Status" }
                                    th { "Duration" }
                                    th { "Target" }
                                }
                            }
                            tbody {
                                for row in data.rows {
                                    ProgramRow { key: "{row.id}", row }
                                }
                            }
                        }
                        div { class: "pagination",
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                disabled: !data.has_previous,
                                onclick: move |_| page -= 1,
                                "Previous"
                            }
                            span { "Page {data.page} of {data.total_pages} · {data.total} programs" }
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                disabled: !data.has_next,
                                onclick: move |_| page += 1,
                                "Next"
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn ProgramRow(row: ProgramRowVm) -> Element {
    rsx! {
        tr {
            td {
                Link { to: Route::ProgramDetail { id: row.id.clone() }, "{row.name}" }
            }
            td { "{row.partner}" }
            td { span { class: row.status_class, "{row.status_label}" } }
            td { "{row.dates}" }
            td { "{row.target}" }
        }
    }
}
