use csr_core::game::{
    AnswerOutcome, GameSession, JournalStage, MatchCategory, MatchItem, MatchRecord, Prompt,
    SessionError, Tick, trimmed_length,
};
use csr_core::model::{CategoryId, ItemId, OptionId};
use dioxus::core::Task;
use dioxus::prelude::*;
use dioxus_router::Link;
use services::{Countdown, GameError, GamePlay, TICK_PERIOD, feedback_pause};
use tracing::debug;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::GameShell;
use crate::vm::{MediaVm, map_media, map_result, progress_percent};

/// What the learner sees between answering and the next prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Feedback {
    picked: Option<OptionId>,
    is_correct: bool,
}

/// Signals behind one running game and the transitions between them.
#[derive(Clone, Copy, PartialEq)]
struct Controls {
    play: Signal<GamePlay>,
    feedback: Signal<Option<Feedback>>,
    celebrating: Signal<bool>,
    timer: Signal<Option<Task>>,
}

impl Controls {
    fn answer(self, option: OptionId) {
        self.stop_countdown();
        let mut play = self.play;
        let outcome = match play.write().answer(option) {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(%err, "answer ignored");
                return;
            }
        };
        self.show_feedback(Some(option), outcome);
        spawn(async move {
            self.finish_feedback(outcome).await;
            self.arm_countdown();
        });
    }

    fn show_feedback(self, picked: Option<OptionId>, outcome: AnswerOutcome) {
        let mut feedback = self.feedback;
        let mut celebrating = self.celebrating;
        feedback.set(Some(Feedback {
            picked,
            is_correct: outcome.is_correct,
        }));
        if outcome.celebrate {
            celebrating.set(true);
            spawn(async move {
                tokio::time::sleep(outcome.feedback_clear).await;
                celebrating.set(false);
            });
        }
    }

    async fn finish_feedback(self, outcome: AnswerOutcome) {
        feedback_pause(&outcome).await;
        let mut play = self.play;
        let mut feedback = self.feedback;
        if let Err(err) = play.write().advance() {
            debug!(%err, "advance ignored");
        }
        feedback.set(None);
    }

    /// Starts the reflex countdown for the current prompt, if there is one.
    /// Expired prompts count as wrong and the loop moves on by itself.
    fn arm_countdown(self) {
        self.stop_countdown();
        if self.play.peek().countdown_remaining().is_none() {
            return;
        }
        let mut timer = self.timer;
        let task = spawn(async move {
            let mut play = self.play;
            loop {
                let last = Countdown::start(TICK_PERIOD)
                    .drive(|| play.write().tick())
                    .await;
                let Tick::Expired(outcome) = last else {
                    break;
                };
                self.show_feedback(None, outcome);
                self.finish_feedback(outcome).await;
                if play.peek().countdown_remaining().is_none() {
                    break;
                }
            }
        });
        timer.set(Some(task));
    }

    fn stop_countdown(self) {
        let mut timer = self.timer;
        if let Some(task) = timer.write().take() {
            task.cancel();
        }
    }

    fn restart(self) {
        self.stop_countdown();
        let mut play = self.play;
        let mut feedback = self.feedback;
        let mut celebrating = self.celebrating;
        play.write().reset();
        feedback.set(None);
        celebrating.set(false);
        self.arm_countdown();
    }
}

#[component]
pub fn GamePlayView(slug: String) -> Element {
    rsx! {
        GameLoader { key: "{slug}", slug: slug.clone() }
    }
}

#[component]
fn GameLoader(slug: String) -> Element {
    let ctx = use_context::<AppContext>();
    let started = use_hook(|| {
        ctx.games()
            .start(&slug, None)
            .map(Signal::new)
            .map_err(|err| match err {
                GameError::UnknownGame(_) => "This game does not exist.".to_string(),
                other => other.to_string(),
            })
    });

    match started {
        Ok(play) => rsx! {
            GameBoard { play }
        },
        Err(message) => rsx! {
            div { class: "page state-panel state-panel--error",
                p { "{message}" }
                Link { class: "btn btn-secondary", to: Route::GameLibrary {}, "Back to games" }
            }
        },
    }
}

#[component]
fn GameBoard(play: Signal<GamePlay>) -> Element {
    let controls = Controls {
        play,
        feedback: use_signal(|| None),
        celebrating: use_signal(|| false),
        timer: use_signal(|| None),
    };
    use_hook(move || controls.arm_countdown());

    let current = play.read();
    let title = current.definition().title.clone();
    let session = current.session();
    let progress = progress_percent(session.progress());
    let score = format!("Score {}/{}", session.score(), session.total());
    let finished = current.is_finished();
    let stage = match session {
        _ if finished => None,
        GameSession::Choice(quiz) => quiz.current_prompt().cloned().map(Stage::Choice),
        GameSession::Timed(quiz) => quiz.session().current_prompt().cloned().map(Stage::Choice),
        GameSession::Match(_) => Some(Stage::Match),
        GameSession::Journal(journal) => journal.current_stage().cloned().map(Stage::Journal),
    };
    drop(current);

    rsx! {
        div { class: "page game-page",
            GameShell { title, progress, score,
                match stage {
                    None => rsx! {
                        ResultScreen { controls }
                    },
                    Some(Stage::Choice(prompt)) => rsx! {
                        ChoiceStage { controls, prompt }
                    },
                    Some(Stage::Match) => rsx! {
                        MatchStage { play }
                    },
                    Some(Stage::Journal(stage)) => rsx! {
                        JournalStageView { play, stage }
                    },
                }
            }
        }
    }
}

enum Stage {
    Choice(Prompt),
    Match,
    Journal(JournalStage),
}

//
// ─── CHOICE ────────────────────────────────────────────────────────────────
//

fn option_class(feedback: Option<Feedback>, id: OptionId, is_correct: bool) -> &'static str {
    match feedback {
        None => "option",
        Some(_) if is_correct => "option option--correct",
        Some(shown) if shown.picked == Some(id) => "option option--wrong",
        Some(_) => "option option--dimmed",
    }
}

#[component]
fn ChoiceStage(controls: Controls, prompt: Prompt) -> Element {
    let feedback = (controls.feedback)();
    let remaining = controls.play.read().countdown_remaining();
    let celebrating = (controls.celebrating)();

    rsx! {
        div { class: if celebrating { "prompt prompt--celebrate" } else { "prompt" },
            if let Some(secs) = remaining {
                div { class: if secs <= 3 { "countdown countdown--low" } else { "countdown" },
                    "{secs}s"
                }
            }
            if let Some(media) = prompt.media() {
                Media { class: "prompt-media", media: media.to_string() }
            }
            p { class: "prompt-text", "{prompt.text()}" }
            div { class: "options",
                for option in prompt.options().iter().cloned() {
                    button {
                        key: "{option.id}",
                        class: option_class(feedback, option.id, option.is_correct),
                        r#type: "button",
                        disabled: feedback.is_some(),
                        onclick: move |_| controls.answer(option.id),
                        "{option.label}"
                    }
                }
            }
            match feedback {
                Some(Feedback { is_correct: true, .. }) => rsx! {
                    p { class: "feedback feedback--ok", "Correct!" }
                },
                Some(Feedback { picked: None, .. }) => rsx! {
                    p { class: "feedback feedback--bad", "Time's up!" }
                },
                Some(_) => rsx! {
                    p { class: "feedback feedback--bad", "Not quite." }
                },
                None => rsx! {},
            }
        }
    }
}

//
// ─── MATCH ─────────────────────────────────────────────────────────────────
//

#[component]
fn MatchStage(play: Signal<GamePlay>) -> Element {
    let mut play = play;
    let mut last = use_signal(|| None::<MatchRecord>);

    let current = play.read();
    let GameSession::Match(puzzle) = current.session() else {
        return rsx! {};
    };
    let items: Vec<MatchItem> = puzzle.available_items().cloned().collect();
    let categories: Vec<MatchCategory> = puzzle.available_categories().cloned().collect();
    let selected_item = puzzle.selected_item();
    let selected_category = puzzle.selected_category();
    drop(current);

    let mut commit_if_ready = move || {
        let ready = matches!(
            play.peek().session(),
            GameSession::Match(p) if p.selected_item().is_some() && p.selected_category().is_some()
        );
        if !ready {
            return;
        }
        match play.write().commit_match() {
            Ok(record) => last.set(Some(record)),
            Err(err) => debug!(%err, "match not committed"),
        }
    };

    let mut pick_item = move |id: ItemId| {
        if let Err(err) = play.write().select_item(id) {
            debug!(%err, "item not selectable");
        }
        commit_if_ready();
    };
    let mut pick_category = move |id: CategoryId| {
        if let Err(err) = play.write().select_category(id) {
            debug!(%err, "category not selectable");
        }
        commit_if_ready();
    };

    rsx! {
        div { class: "match-board",
            p { class: "prompt-text", "Pick an item, then the group it belongs to." }
            div { class: "match-columns",
                ul { class: "match-items",
                    for item in items {
                        li { key: "{item.id}",
                            button {
                                class: if selected_item == Some(item.id) { "option option--selected" } else { "option" },
                                r#type: "button",
                                onclick: move |_| pick_item(item.id),
                                if let Some(media) = item.media.clone() {
                                    Media { class: "option-media", media }
                                }
                                "{item.label}"
                            }
                        }
                    }
                }
                ul { class: "match-categories",
                    for category in categories {
                        li { key: "{category.id}",
                            button {
                                class: if selected_category == Some(category.id) { "option option--selected" } else { "option" },
                                r#type: "button",
                                onclick: move |_| pick_category(category.id),
                                "{category.label}"
                            }
                        }
                    }
                }
            }
            match last() {
                Some(record) if record.is_correct => rsx! {
                    p { class: "feedback feedback--ok", "Good match!" }
                },
                Some(_) => rsx! {
                    p { class: "feedback feedback--bad", "That one belongs somewhere else." }
                },
                None => rsx! {},
            }
        }
    }
}

//
// ─── JOURNAL ───────────────────────────────────────────────────────────────
//

#[component]
fn JournalStageView(play: Signal<GamePlay>, stage: JournalStage) -> Element {
    let mut play = play;
    let mut draft = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let length = trimmed_length(&draft.read());
    let min = stage.min_length;

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let text = draft();
        match play.write().submit_entry(&text) {
            Ok(_) => {
                draft.set(String::new());
                error.set(None);
            }
            Err(GameError::Session(SessionError::EntryTooShort { min, .. })) => {
                error.set(Some(format!("Write at least {min} characters.")));
            }
            Err(err) => debug!(%err, "entry not recorded"),
        }
    };

    rsx! {
        form { class: "journal", onsubmit: submit,
            label { class: "field",
                span { class: "prompt-text", "{stage.prompt}" }
                textarea {
                    class: "input",
                    rows: 4,
                    value: "{draft}",
                    oninput: move |evt| {
                        draft.set(evt.value());
                        error.set(None);
                    },
                }
            }
            div { class: "journal-footer",
                span { class: if length >= min { "muted" } else { "hint" }, "{length}/{min} characters" }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: length < min,
                    "Save entry"
                }
            }
            if let Some(message) = error() {
                p { class: "field-error", "{message}" }
            }
        }
    }
}

//
// ─── RESULT ────────────────────────────────────────────────────────────────
//

#[component]
fn ResultScreen(controls: Controls) -> Element {
    let Some(result) = controls.play.read().result() else {
        return rsx! {};
    };
    let vm = map_result(&result);

    rsx! {
        div { class: if vm.passed { "result result--passed" } else { "result" },
            h3 { "{vm.headline}" }
            p { class: "result-score", "{vm.score} · {vm.percent}" }
            div { class: "rewards",
                span { "🪙 {vm.coins} coins" }
                span { "⭐ {vm.xp} XP" }
                if let Some(badge) = vm.badge {
                    span { class: "badge badge--ok", "🏅 {badge}" }
                }
            }
            div { class: "actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| controls.restart(),
                    "Try again"
                }
                Link { class: "btn btn-secondary", to: Route::GameLibrary {}, "Back to games" }
            }
        }
    }
}

#[component]
fn Media(class: &'static str, media: String) -> Element {
    match map_media(&media) {
        MediaVm::Image(src) => rsx! {
            img { class, src, alt: "" }
        },
        MediaVm::Glyph(glyph) => rsx! {
            span { class: "{class} media-glyph", "{glyph}" }
        },
    }
}
