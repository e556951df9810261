use csr_core::model::ProgramId;
use csr_core::model::program::draft::split_list;
use csr_core::model::program::{Partner, ProgramDraft, ProgramField, ProgramFieldErrors};
use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::{AdminError, Notice};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{StatePanel, ViewError, ViewState, use_toasts, view_state_from_resource};

#[derive(Clone, Debug, PartialEq, Eq)]
enum FormMode {
    Create,
    Edit(ProgramId),
}

#[derive(Clone, Debug, PartialEq)]
struct FormData {
    partners: Vec<Partner>,
    draft: ProgramDraft,
}

#[component]
pub fn ProgramCreateView() -> Element {
    let ctx = use_context::<AppContext>();
    let admin = ctx.admin();

    let resource = use_resource(move || {
        let admin = admin.clone();
        async move {
            let partners = admin.list_partners().await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(FormData {
                partners,
                draft: ProgramDraft::default(),
            })
        }
    });

    rsx! {
        div { class: "page form-page",
            header { class: "view-header",
                Link { class: "back-link", to: Route::Programs {}, "← All programs" }
                h2 { class: "view-title", "New program" }
            }
            FormLoader { resource, mode: FormMode::Create }
        }
    }
}

#[component]
pub fn ProgramEditView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let admin = ctx.admin();
    let program_id = ProgramId::new(id.clone());

    let resource = use_resource(move || {
        let admin = admin.clone();
        let program_id = program_id.clone();
        async move {
            let (program, partners) =
                tokio::try_join!(admin.get_program(&program_id), admin.list_partners())
                    .map_err(ViewError::from)?;
            Ok::<_, ViewError>(FormData {
                partners,
                draft: ProgramDraft::from_program(&program),
            })
        }
    });

    rsx! {
        div { class: "page form-page",
            header { class: "view-header",
                Link { class: "back-link", to: Route::ProgramDetail { id: id.clone() }, "← Back to program" }
                h2 { class: "view-title", "Edit program" }
            }
            FormLoader { resource, mode: FormMode::Edit(ProgramId::new(id.clone())) }
        }
    }
}

#[component]
fn FormLoader(resource: Resource<Result<FormData, ViewError>>, mode: FormMode) -> Element {
    match view_state_from_resource(&resource) {
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
            ProgramForm { partners: data.partners, initial: data.draft, mode }
        },
    }
}

#[component]
fn ProgramForm(partners: Vec<Partner>, initial: ProgramDraft, mode: FormMode) -> Element {
    let ctx = use_context::<AppContext>();
    let admin = ctx.admin();
    let navigator = use_navigator();
    let toasts = use_toasts();

    let mut draft = use_signal(|| initial.clone());
    let mut states_raw = use_signal(|| initial.states.join(", "));
    let mut districts_raw = use_signal(|| initial.districts.join(", "));
    let mut categories_raw = use_signal(|| initial.school_categories.join(", "));
    let mut errors = use_signal(|| None::<ProgramFieldErrors>);
    let mut saving = use_signal(|| false);

    let collect = move || {
        let mut candidate = draft();
        candidate.states = split_list(&states_raw());
        candidate.districts = split_list(&districts_raw());
        candidate.school_categories = split_list(&categories_raw());
        candidate
    };

    // Once the user has tried to submit, errors follow every keystroke.
    let mut revalidate = move || {
        if errors.peek().is_some() {
            errors.set(collect().validate().err());
        }
    };

    let mode_for_submit = mode.clone();
    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let candidate = collect();
        if let Err(field_errors) = candidate.validate() {
            errors.set(Some(field_errors));
            return;
        }
        errors.set(None);
        saving.set(true);

        let admin = admin.clone();
        let mode = mode_for_submit.clone();
        spawn(async move {
            let outcome = match &mode {
                FormMode::Create => admin.create_program(&candidate).await,
                FormMode::Edit(id) => admin.update_program(id, &candidate).await,
            };
            saving.set(false);
            match outcome {
                Ok(program) => {
                    let message = match mode {
                        FormMode::Create => "Program created",
                        FormMode::Edit(_) => "Program updated",
                    };
                    toasts.show(Notice::success(message));
                    let _ = navigator.push(Route::ProgramDetail {
                        id: program.id.as_str().to_string(),
                    });
                }
                Err(AdminError::Validation(field_errors)) => errors.set(Some(field_errors)),
                Err(err) => toasts.show(Notice::error(&err)),
            }
        });
    };

    let field_error = move |field: ProgramField| errors.read().as_ref().and_then(|e| e.get(field));
    let submit_label = match (&mode, saving()) {
        (_, true) => "Saving...",
        (FormMode::Create, false) => "Create program",
        (FormMode::Edit(_), false) => "Save changes",
    };

    rsx! {
        form { class: "program-form", onsubmit,
            FormField { label: "Program name", error: field_error(ProgramField::Name),
                input {
                    class: "input",
                    value: "{draft.read().name}",
                    oninput: move |evt| {
                        draft.write().name = evt.value();
                        revalidate();
                    },
                }
            }
            FormField { label: "Partner", error: field_error(ProgramField::Partner),
                select {
                    class: "input",
                    onchange: move |evt| {
                        draft.write().partner_id = evt.value();
                        revalidate();
                    },
                    option { value: "", "Select a partner" }
                    for partner in partners.iter() {
                        option {
                            value: partner.id.as_str(),
                            selected: draft.read().partner_id == partner.id.as_str(),
                            "{partner.name}"
                        }
                    }
                }
            }
            FormField { label: "Description", error: field_error(ProgramField::Description),
                textarea {
                    class: "input",
                    rows: 3,
                    value: "{draft.read().description}",
                    oninput: move |evt| {
                        draft.write().description = evt.value();
                        revalidate();
                    },
                }
            }
            FormField { label: "States (comma separated)", error: field_error(ProgramField::States),
                input {
                    class: "input",
                    value: "{states_raw}",
                    oninput: move |evt| {
                        states_raw.set(evt.value());
                        revalidate();
                    },
                }
            }
            FormField { label: "Districts (optional)", error: None,
                input {
                    class: "input",
                    value: "{districts_raw}",
                    oninput: move |evt| districts_raw.set(evt.value()),
                }
            }
            FormField { label: "School categories (optional)", error: None,
                input {
                    class: "input",
                    value: "{categories_raw}",
                    oninput: move |evt| categories_raw.set(evt.value()),
                }
            }
            FormField { label: "Target students", error: field_error(ProgramField::TargetStudents),
                input {
                    class: "input",
                    r#type: "number",
                    min: "1",
                    value: "{draft.read().target_students}",
                    oninput: move |evt| {
                        draft.write().target_students = evt.value();
                        revalidate();
                    },
                }
            }
            div { class: "form-row",
                FormField { label: "Start date", error: field_error(ProgramField::StartDate),
                    input {
                        class: "input",
                        r#type: "date",
                        value: "{draft.read().start_date}",
                        oninput: move |evt| {
                            draft.write().start_date = evt.value();
                            revalidate();
                        },
                    }
                }
                FormField { label: "End date", error: field_error(ProgramField::EndDate),
                    input {
                        class: "input",
                        r#type: "date",
                        value: "{draft.read().end_date}",
                        oninput: move |evt| {
                            draft.write().end_date = evt.value();
                            revalidate();
                        },
                    }
                }
            }
            button {
                class: "btn btn-primary",
                r#type: "submit",
                disabled: saving(),
                "{submit_label}"
            }
        }
    }
}

#[component]
fn FormField(label: &'static str, error: Option<&'static str>, children: Element) -> Element {
    rsx! {
        label { class: if error.is_some() { "field field--invalid" } else { "field" },
            span { class: "field-label", "{label}" }
            {children}
            if let Some(message) = error {
                span { class: "field-error", "{message}" }
            }
        }
    }
}
