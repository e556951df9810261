use dioxus::prelude::*;
use services::AdminError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    NotFound,
    Failed(String),
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ViewError::NotFound => "This item no longer exists.",
            ViewError::Failed(message) => message,
        }
    }

    /// Missing resources get a way back instead of a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ViewError::NotFound)
    }
}

impl From<AdminError> for ViewError {
    fn from(error: AdminError) -> Self {
        if error.is_not_found() {
            ViewError::NotFound
        } else {
            ViewError::Failed(error.user_message())
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Failed("Something went wrong".into())),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

/// Loading line and error panel shared by every admin page.
#[component]
pub fn StatePanel(error: Option<ViewError>, on_retry: EventHandler<()>) -> Element {
    match error {
        None => rsx! {
            p { class: "loading", "Loading..." }
        },
        Some(err) => rsx! {
            div { class: "error-panel",
                p { "{err.message()}" }
                if err.is_retryable() {
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_retry.call(()),
                        "Retry"
                    }
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend::ApiError;

    #[test]
    fn not_found_is_not_retryable() {
        let err = ViewError::from(AdminError::Api(ApiError::NotFound("Program x".into())));
        assert_eq!(err, ViewError::NotFound);
        assert!(!err.is_retryable());
    }

    #[test]
    fn other_errors_keep_user_message() {
        let err = ViewError::from(AdminError::Api(ApiError::Status {
            status: 500,
            message: String::new(),
        }));
        assert_eq!(err.message(), "Something went wrong");
        assert!(err.is_retryable());
    }
}
