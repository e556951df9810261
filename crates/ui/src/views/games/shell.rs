use dioxus::prelude::*;
use dioxus_router::Link;

use crate::routes::Route;

/// Frame shared by every game template: title, progress bar and score.
#[component]
pub fn GameShell(title: String, progress: usize, score: String, children: Element) -> Element {
    rsx! {
        div { class: "game-shell",
            header { class: "game-shell-header",
                Link { class: "back-link", to: Route::GameLibrary {}, "← Games" }
                h2 { "{title}" }
                span { class: "game-score", "{score}" }
            }
            div { class: "progress",
                div { class: "progress-bar", style: "width: {progress}%" }
            }
            div { class: "game-stage", {children} }
        }
    }
}
