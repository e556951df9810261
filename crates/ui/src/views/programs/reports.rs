use csr_core::model::program::{Report, ReportFormat, ReportPreview};
use csr_core::model::{ProgramId, ReportId};
use dioxus::prelude::*;
use services::Notice;

use crate::context::AppContext;
use crate::views::programs::nav::{ProgramHeader, ProgramTab};
use crate::views::{StatePanel, ViewError, ViewState, use_toasts, view_state_from_resource};
use crate::vm::{ProgramHeaderVm, ReportRowVm, map_program_header, map_report_rows};

#[derive(Clone, Debug, PartialEq)]
struct ReportsData {
    header: ProgramHeaderVm,
    reports: Vec<Report>,
    rows: Vec<ReportRowVm>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ReportAction {
    Preview,
    Publish,
    Download(ReportFormat),
}

#[component]
pub fn ReportsView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let admin = ctx.admin();
    let downloads = ctx.downloads();
    let toasts = use_toasts();
    let program_id = ProgramId::new(id.clone());
    let mut preview = use_signal(|| None::<ReportPreview>);
    let mut working = use_signal(|| None::<ReportId>);

    let admin_for_resource = admin.clone();
    let id_for_resource = program_id.clone();
    let mut resource = use_resource(move || {
        let admin = admin_for_resource.clone();
        let id = id_for_resource.clone();
        async move {
            let page = admin.reports_page(&id).await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(ReportsData {
                header: map_program_header(&page.program),
                rows: map_report_rows(&page.reports),
                reports: page.reports,
            })
        }
    });

    let run = move |(report, action): (Report, ReportAction)| {
        let admin = admin.clone();
        let downloads = downloads.clone();
        let id = program_id.clone();
        working.set(Some(report.id.clone()));
        spawn(async move {
            match action {
                ReportAction::Preview => match admin.preview_report(&id, &report).await {
                    Ok(loaded) => preview.set(Some(loaded)),
                    Err(err) => toasts.show(Notice::error(&err)),
                },
                ReportAction::Publish => {
                    let outcome = admin.publish_report(&id, &report).await;
                    toasts.show(Notice::from_outcome(&outcome, "Report published"));
                    resource.restart();
                }
                ReportAction::Download(format) => {
                    let saved = match admin.download_report(&id, &report, format).await {
                        Ok(file) => downloads.save(&file).await,
                        Err(err) => Err(err),
                    };
                    match saved {
                        Ok(path) => {
                            toasts.show(Notice::success(format!("Saved to {}", path.display())));
                        }
                        Err(err) => toasts.show(Notice::error(&err)),
                    }
                }
            }
            working.set(None);
        });
    };

    rsx! {
        div { class: "page reports-page",
            match view_state_from_resource(&resource) {
                ViewState::Idle | ViewState::Loading => rsx! {
                    StatePanel { error: None, on_retry: move |()| {} }
                },
                ViewState::Error(err) => rsx! {
                    StatePanel { error: Some(err), on_retry: move |()| resource.restart() }
                },
                ViewState::Ready(data) => rsx! {
                    ProgramHeader { header: data.header.clone(), active: ProgramTab::Reports }
                    if data.rows.is_empty() {
                        p { class: "empty-state", "No reports yet." }
                    } else {
                        table { class: "table",
                            thead {
                                tr {
                                    th { "Report" }
                                    th { "Type" }
                                    th { "Status" }
                                    th { "Created" }
                                    th { "Published" }
                                    th {}
                                }
                            }
                            tbody {
                                for (row, report) in data.rows.into_iter().zip(data.reports) {
                                    ReportRow {
                                        key: "{row.id}",
                                        busy: working.read().as_ref() == Some(&row.id),
                                        row,
                                        report,
                                        on_action: run.clone(),
                                    }
                                }
                            }
                        }
                    }
                },
            }
            if let Some(loaded) = preview() {
                ReportPreviewPanel { preview: loaded, on_close: move |()| preview.set(None) }
            }
        }
    }
}

#[component]
fn ReportRow(
    row: ReportRowVm,
    report: Report,
    busy: bool,
    on_action: EventHandler<(Report, ReportAction)>,
) -> Element {
    let act = move |action: ReportAction| {
        let report = report.clone();
        move |_: MouseEvent| on_action.call((report.clone(), action))
    };
    rsx! {
        tr {
            td { "{row.title}" }
            td { "{row.kind_label}" }
            td { "{row.status_label}" }
            td { "{row.created_at}" }
            td { "{row.published_at}" }
            td { class: "row-actions",
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    disabled: busy,
                    onclick: act(ReportAction::Preview),
                    "Preview"
                }
                if row.can_publish {
                    button {
                        class: "btn btn-link",
                        r#type: "button",
                        disabled: busy,
                        onclick: act(ReportAction::Publish),
                        "Publish"
                    }
                }
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    disabled: busy,
                    onclick: act(ReportAction::Download(ReportFormat::Pdf)),
                    "PDF"
                }
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    disabled: busy,
                    onclick: act(ReportAction::Download(ReportFormat::Excel)),
                    "Excel"
                }
            }
        }
    }
}

#[component]
fn ReportPreviewPanel(preview: ReportPreview, on_close: EventHandler<()>) -> Element {
    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal modal--wide", role: "dialog",
                h3 { "{preview.report.title}" }
                for section in preview.sections {
                    section { class: "report-section",
                        h4 { "{section.heading}" }
                        p { "{section.body}" }
                    }
                }
                div { class: "modal-actions",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
            }
        }
    }
}
