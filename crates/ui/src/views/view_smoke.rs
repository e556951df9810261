use backend::ProgramQuery;

use super::test_harness::{ViewKind, mount, offline_services, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn programs_view_lists_seeded_program() {
    let mut harness = setup_view_harness(ViewKind::Programs).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Digital Literacy 2025"), "missing program in {html}");
    assert!(html.contains("Page 1 of 1"), "missing pagination in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn program_detail_shows_checkpoint_progress() {
    let offline = offline_services().await;
    let page = offline
        .services
        .admin()
        .list_programs(&ProgramQuery::default())
        .await
        .expect("list programs");
    let id = page.items[0].id.as_str().to_string();

    let mut harness = mount(offline, ViewKind::ProgramDetail(id));
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Digital Literacy 2025"), "missing title in {html}");
    assert!(html.contains("Checkpoints"), "missing tabs in {html}");
    assert!(html.contains("Delete permanently"), "missing actions in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn missing_program_offers_no_retry() {
    let mut harness = setup_view_harness(ViewKind::ProgramDetail("prg-missing".into())).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("This item no longer exists."), "missing error in {html}");
    assert!(!html.contains("Retry"), "unexpected retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn game_library_lists_builtin_games() {
    let mut harness = setup_view_harness(ViewKind::Games).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Clean Hands Champion"), "missing badge quiz in {html}");
    assert!(html.contains("4 items"), "missing match step count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn reflex_game_shows_countdown() {
    let mut harness = setup_view_harness(ViewKind::GamePlay("road-safety-reflex".into())).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("8s"), "missing countdown in {html}");
    assert!(html.contains("Score 0/"), "missing score in {html}");
    assert!(html.contains("🚦"), "missing prompt emoji in {html}");
    assert!(!html.contains("<img"), "emoji rendered as image in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn match_game_shows_item_emoji() {
    let mut harness = setup_view_harness(ViewKind::GamePlay("healthy-plate".into())).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("🥬"), "missing item emoji in {html}");
    assert!(html.contains("Spinach"), "missing item label in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn unknown_game_links_back_to_library() {
    let mut harness = setup_view_harness(ViewKind::GamePlay("missing".into())).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("This game does not exist."), "missing error in {html}");
    assert!(html.contains("Back to games"), "missing link in {html}");
}
