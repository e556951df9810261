use std::time::Duration;

use dioxus::prelude::*;
use services::{Notice, NoticeKind};

const TOAST_LIFETIME: Duration = Duration::from_secs(4);

/// Handle to the single toast slot of the layout.
#[derive(Clone, Copy)]
pub struct Toasts {
    current: Signal<Option<Notice>>,
}

impl Toasts {
    /// Shows `notice`, replacing any visible toast; it clears itself later
    /// unless another notice took its place.
    pub fn show(mut self, notice: Notice) {
        self.current.set(Some(notice.clone()));
        let mut current = self.current;
        spawn(async move {
            tokio::time::sleep(TOAST_LIFETIME).await;
            if current.peek().as_ref() == Some(&notice) {
                current.set(None);
            }
        });
    }

    pub fn dismiss(mut self) {
        self.current.set(None);
    }

    #[must_use]
    pub fn current(&self) -> Option<Notice> {
        self.current.read().clone()
    }
}

pub fn use_toast_provider() -> Toasts {
    let current = use_signal(|| None::<Notice>);
    use_context_provider(|| Toasts { current })
}

#[must_use]
pub fn use_toasts() -> Toasts {
    use_context::<Toasts>()
}

#[component]
pub fn ToastHost() -> Element {
    let toasts = use_toasts();
    let Some(notice) = toasts.current() else {
        return rsx! {};
    };
    let class = match notice.kind {
        NoticeKind::Success => "toast toast--success",
        NoticeKind::Error => "toast toast--error",
    };
    rsx! {
        div { class, role: "status",
            span { "{notice.message}" }
            button {
                class: "toast-close",
                r#type: "button",
                onclick: move |_| toasts.dismiss(),
                "×"
            }
        }
    }
}
