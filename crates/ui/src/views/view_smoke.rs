use std::sync::Arc;

use quiz_core::model::{
    FinalProfile, Part, PartKey, PartResult, Question, QuizCatalog, QuizSession,
};
use quiz_core::time::fixed_now;

use super::test_harness::{ViewKind, setup_view_harness};

fn key(raw: &str) -> PartKey {
    PartKey::new(raw).unwrap()
}

fn sorting_catalog() -> Arc<QuizCatalog> {
    let house_questions = vec![
        Question::new("What's more important to you?", vec![
            "Bravery and daring".into(),
            "Loyalty and hard work".into(),
        ]),
        Question::new("Pick a magical pet:", vec!["Phoenix".into(), "Badger".into()]),
        Question::new("Pick a color:", vec!["Scarlet".into(), "Yellow".into()]),
    ];
    let patronus_questions = vec![Question::new("What calms you in dark times?", vec![
        "Memories of loved ones".into(),
        "Quiet by a river".into(),
    ])];
    Arc::new(
        QuizCatalog::new(vec![
            (
                key("house"),
                Part::new("House sorting", "Values and instinct.", house_questions),
            ),
            (
                key("patronus"),
                Part::new("Patronus", "Which Patronus might you conjure?", patronus_questions),
            ),
        ])
        .unwrap(),
    )
}

#[tokio::test(flavor = "current_thread")]
async fn menu_renders_parts_with_completion_status() {
    let catalog = sorting_catalog();
    let mut session = QuizSession::new();
    session.record_submission(
        key("house"),
        vec!["A".into(), "B".into(), "A".into()],
        PartResult {
            result: Some("Gryffindor".into()),
            scores: [("Gryffindor".to_string(), 3.0)].into(),
        },
        fixed_now(),
    );

    let harness = setup_view_harness(ViewKind::Menu, Some(catalog), session, None);
    let html = harness.render();
    assert!(html.contains("House sorting"), "missing part name in {html}");
    assert!(html.contains("Patronus"), "missing part name in {html}");
    assert!(html.contains("Questions: 3"), "missing question count in {html}");
    assert!(html.contains("Completed \u{2713}"), "missing completed badge in {html}");
    assert!(html.contains("Not completed"), "missing pending badge in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn menu_degrades_without_a_catalog() {
    let harness = setup_view_harness(ViewKind::Menu, None, QuizSession::new(), None);
    let html = harness.render();
    assert!(html.contains("No quiz available."), "missing degraded state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_renders_open_question_and_selection() {
    let catalog = sorting_catalog();
    let mut session = QuizSession::new();
    session.open_part(&catalog, &key("house")).unwrap();
    session.select_answer("Bravery and daring");

    let harness = setup_view_harness(
        ViewKind::Quiz("house".into()),
        Some(catalog),
        session,
        None,
    );
    let html = harness.render();
    assert!(
        html.contains("What&#39;s more important to you?") || html.contains("more important to you"),
        "missing prompt in {html}"
    );
    assert!(html.contains("Loyalty and hard work"), "missing option in {html}");
    assert!(html.contains("option-label selected"), "missing selection in {html}");
    assert!(html.contains("Question 1 of 3"), "missing position in {html}");
    assert!(html.contains("Answered 1 of 3"), "missing progress in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_without_open_part_points_back_to_menu() {
    let harness = setup_view_harness(
        ViewKind::Quiz("house".into()),
        Some(sorting_catalog()),
        QuizSession::new(),
        None,
    );
    let html = harness.render();
    assert!(html.contains("This part is not open."), "missing fallback in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_renders_fields_bars_and_placeholders() {
    let profile = FinalProfile {
        house: Some("Ravenclaw".into()),
        house_desc: Some("Wit beyond measure.".into()),
        house_scores: [("Ravenclaw".to_string(), 3.0)].into(),
        ..FinalProfile::default()
    };

    let harness = setup_view_harness(
        ViewKind::Profile,
        Some(sorting_catalog()),
        QuizSession::new(),
        Some(profile),
    );
    let html = harness.render();
    assert!(html.contains("Ravenclaw"), "missing house in {html}");
    assert!(html.contains("Wit beyond measure."), "missing description in {html}");
    assert!(html.contains("width: 54%"), "missing scaled bar in {html}");
    assert!(html.contains("\u{2014}"), "missing placeholder in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_without_result_prompts_finalize() {
    let harness = setup_view_harness(
        ViewKind::Profile,
        Some(sorting_catalog()),
        QuizSession::new(),
        None,
    );
    let html = harness.render();
    assert!(html.contains("No profile yet."), "missing empty state in {html}");
}
