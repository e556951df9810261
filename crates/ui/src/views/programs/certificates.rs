use backend::{CertificateMark, CertificateQuery};
use csr_core::model::program::{Certificate, CertificateSelection, CertificateStatus};
use csr_core::model::{CertificateId, ProgramId};
use dioxus::prelude::*;
use services::Notice;

use crate::context::AppContext;
use crate::views::programs::nav::{ProgramHeader, ProgramTab};
use crate::views::{StatePanel, ViewError, ViewState, use_toasts, view_state_from_resource};
use crate::vm::{
    CertificateRowVm, ProgramHeaderVm, map_certificate_rows, map_program_header, selection_label,
};

#[derive(Clone, Debug, PartialEq)]
struct CertificatesData {
    header: ProgramHeaderVm,
    certificates: Vec<Certificate>,
    page: u32,
    total_pages: u32,
    has_previous: bool,
    has_next: bool,
}

fn mark_message(mark: CertificateMark, count: u32) -> String {
    match mark {
        CertificateMark::InProgress => format!("{count} certificates marked in progress"),
        CertificateMark::Delivered => format!("{count} certificates marked delivered"),
    }
}

#[component]
pub fn CertificatesView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let admin = ctx.admin();
    let toasts = use_toasts();
    let program_id = ProgramId::new(id.clone());
    let mut status = use_signal(|| None::<CertificateStatus>);
    let mut page = use_signal(|| 1u32);
    let mut selection = use_signal(CertificateSelection::new);
    let mut busy = use_signal(|| false);

    let admin_for_resource = admin.clone();
    let id_for_resource = program_id.clone();
    let mut resource = use_resource(move || {
        let admin = admin_for_resource.clone();
        let id = id_for_resource.clone();
        let query = CertificateQuery {
            status: status(),
            page: page(),
            ..CertificateQuery::default()
        };
        async move {
            let data = admin
                .certificates_page(&id, &query)
                .await
                .map_err(ViewError::from)?;
            let pagination = data.certificates.pagination;
            Ok::<_, ViewError>(CertificatesData {
                header: map_program_header(&data.program),
                certificates: data.certificates.items,
                page: pagination.page,
                total_pages: pagination.total_pages,
                has_previous: pagination.has_previous(),
                has_next: pagination.has_next(),
            })
        }
    });

    // Selection is page-local.
    let mut go_to_page = move |next: u32| {
        selection.write().clear();
        page.set(next);
    };

    let admin_for_one = admin.clone();
    let id_for_one = program_id.clone();
    let mark_one = move |(certificate, mark): (CertificateId, CertificateMark)| {
        let admin = admin_for_one.clone();
        let id = id_for_one.clone();
        spawn(async move {
            let outcome = admin.mark_certificate(&id, &certificate, mark).await;
            toasts.show(Notice::from_outcome(&outcome, mark_message(mark, 1)));
            resource.restart();
        });
    };

    let mark_selected = move |mark: CertificateMark| {
        let admin = admin.clone();
        let id = program_id.clone();
        let picked = selection.read().clone();
        busy.set(true);
        spawn(async move {
            match admin.mark_certificates(&id, &picked, mark).await {
                Ok(updated) => {
                    toasts.show(Notice::success(mark_message(mark, updated)));
                    selection.write().clear();
                    resource.restart();
                }
                Err(err) => toasts.show(Notice::error(&err)),
            }
            busy.set(false);
        });
    };
    let mut mark_selected_in_progress = mark_selected.clone();
    let mut mark_selected_delivered = mark_selected;

    let selected_label = selection_label(&selection.read());

    rsx! {
        div { class: "page certificates-page",
            match view_state_from_resource(&resource) {
                ViewState::Idle | ViewState::Loading => rsx! {
                    StatePanel { error: None, on_retry: move |()| {} }
                },
                ViewState::Error(err) => rsx! {
                    StatePanel { error: Some(err), on_retry: move |()| resource.restart() }
                },
                ViewState::Ready(data) => {
                    let rows: Vec<CertificateRowVm> =
                        map_certificate_rows(&data.certificates, &selection.read());
                    let all_selected = selection.read().all_selected(&data.certificates);
                    let visible = data.certificates.clone();
                    rsx! {
                        ProgramHeader { header: data.header.clone(), active: ProgramTab::Certificates }
                        div { class: "toolbar",
                            select {
                                class: "input",
                                onchange: move |evt| {
                                    status.set(CertificateStatus::parse(&evt.value()));
                                    go_to_page(1);
                                },
                                option { value: "", "All certificates" }
                                for s in CertificateStatus::ALL {
                                    option { value: s.as_str(), selected: status() == Some(s), "{s.label()}" }
                                }
                            }
                            if let Some(label) = selected_label {
                                span { class: "muted", "{label}" }
                                button {
                                    class: "btn btn-secondary",
                                    r#type: "button",
                                    disabled: busy(),
                                    onclick: move |_| mark_selected_in_progress(CertificateMark::InProgress),
                                    "Mark in progress"
                                }
                                button {
                                    class: "btn btn-primary",
                                    r#type: "button",
                                    disabled: busy(),
                                    onclick: move |_| mark_selected_delivered(CertificateMark::Delivered),
                                    "Mark delivered"
                                }
                            }
                        }
                        if rows.is_empty() {
                            p { class: "empty-state", "No certificates match this filter." }
                        } else {
                            table { class: "table",
                                thead {
                                    tr {
                                        th {
                                            input {
                                                r#type: "checkbox",
                                                checked: all_selected,
                                                onchange: move |_| selection.write().toggle_all(&visible),
                                            }
                                        }
                                        th { "Student" }
                                        th { "School" }
                                        th { "Status" }
                                        th { "Delivered" }
                                        th { "Kit" }
                                        th {}
                                    }
                                }
                                tbody {
                                    for row in rows {
                                        CertificateRow {
                                            key: "{row.id}",
                                            row,
                                            on_toggle: move |id: CertificateId| selection.write().toggle(&id),
                                            on_mark: mark_one.clone(),
                                        }
                                    }
                                }
                            }
                            div { class: "pagination",
                                button {
                                    class: "btn btn-secondary",
                                    r#type: "button",
                                    disabled: !data.has_previous,
                                    onclick: move |_| go_to_page(data.page.saturating_sub(1).max(1)),
                                    "Previous"
                                }
                                span { "Page {data.page} of {data.total_pages}" }
                                button {
                                    class: "btn btn-secondary",
                                    r#type: "button",
                                    disabled: !data.has_next,
                                    onclick: move |_| go_to_page(data.page + 1),
                                    "Next"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn CertificateRow(
    row: CertificateRowVm,
    on_toggle: EventHandler<CertificateId>,
    on_mark: EventHandler<(CertificateId, CertificateMark)>,
) -> Element {
    let id_for_toggle = row.id.clone();
    let id_for_progress = row.id.clone();
    let id_for_delivered = row.id.clone();
    rsx! {
        tr { class: if row.selected { "row--selected" } else { "" },
            td {
                input {
                    r#type: "checkbox",
                    checked: row.selected,
                    onchange: move |_| on_toggle.call(id_for_toggle.clone()),
                }
            }
            td { "{row.student}" }
            td { "{row.school}" }
            td { "{row.status_label}" }
            td { "{row.delivered_at}" }
            td { "{row.kit_label}" }
            td { class: "row-actions",
                if row.can_mark_in_progress {
                    button {
                        class: "btn btn-link",
                        r#type: "button",
                        onclick: move |_| on_mark.call((id_for_progress.clone(), CertificateMark::InProgress)),
                        "In progress"
                    }
                }
                if row.can_mark_delivered {
                    button {
                        class: "btn btn-link",
                        r#type: "button",
                        onclick: move |_| on_mark.call((id_for_delivered.clone(), CertificateMark::Delivered)),
                        "Delivered"
                    }
                }
            }
        }
    }
}
