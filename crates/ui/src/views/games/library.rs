use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{GameCardVm, map_game_cards};

#[component]
pub fn GameLibraryView() -> Element {
    let ctx = use_context::<AppContext>();
    let cards = map_game_cards(ctx.games().games());

    rsx! {
        div { class: "page games-page",
            header { class: "view-header",
                h2 { class: "view-title", "Games" }
                p { class: "view-subtitle", "Short activities students play during a session." }
            }
            if cards.is_empty() {
                p { class: "empty-state", "No games are installed." }
            } else {
                div { class: "game-grid",
                    for card in cards {
                        GameCard { key: "{card.slug}", card }
                    }
                }
            }
        }
    }
}

#[component]
fn GameCard(card: GameCardVm) -> Element {
    rsx! {
        Link { class: "game-card", to: Route::GamePlay { slug: card.slug.clone() },
            span { class: "game-icon", "{card.icon}" }
            h3 { "{card.title}" }
            p { "{card.description}" }
            div { class: "game-meta",
                span { class: "badge badge--muted", "{card.template_label}" }
                span { class: "muted", "{card.steps}" }
                if let Some(badge) = card.badge {
                    span { class: "badge badge--ok", "🏅 {badge}" }
                }
            }
        }
    }
}
