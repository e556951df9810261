use dioxus::prelude::*;
use dioxus_router::Router;

use crate::context::AppContext;
use crate::routes::Route;

const STYLE: Asset = asset!("/assets/style.css");

/// Desktop entry component; expects an `AppContext` in the root context.
#[component]
pub fn App() -> Element {
    let title = use_context::<AppContext>().window_title().to_string();

    rsx! {
        document::Stylesheet { href: STYLE }
        document::Title { "{title}" }
        ErrorBoundary {
            handle_error: |errors: ErrorContext| rsx! {
                FatalPanel { details: format!("{errors:?}") }
            },
            Router::<Route> {}
        }
    }
}

#[component]
fn FatalPanel(details: String) -> Element {
    rsx! {
        div { class: "fatal",
            h1 { "The console hit an unexpected error" }
            p { "Restart the app. If it keeps happening, send the details below to support." }
            pre { "{details}" }
        }
    }
}
