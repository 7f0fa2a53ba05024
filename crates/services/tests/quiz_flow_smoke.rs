use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use quiz_core::model::{
    FinalProfile, Part, PartKey, PartResult, Question, QuizCatalog, QuizSession, SessionError,
};
use quiz_core::time::fixed_clock;
use services::{QuizFlowError, QuizFlowService, ScoringBackend, SyncError};

fn key(raw: &str) -> PartKey {
    PartKey::new(raw).unwrap()
}

fn house_catalog() -> QuizCatalog {
    let questions = vec![
        Question::new("Q1", vec!["A".into(), "B".into()]),
        Question::new("Q2", vec!["A".into(), "B".into()]),
        Question::new("Q3", vec!["A".into(), "B".into()]),
    ];
    QuizCatalog::new(vec![(key("house"), Part::new("House sorting", "", questions))]).unwrap()
}

fn answered_session(answers: &[&str]) -> QuizSession {
    let catalog = house_catalog();
    let mut session = QuizSession::new();
    session.open_part(&catalog, &key("house")).unwrap();
    for answer in answers {
        session.select_answer(*answer);
        session.advance(quiz_core::model::Direction::Next);
    }
    session
}

/// Backend whose responses are fixed up front; counts calls per endpoint.
struct ScriptedBackend {
    part_response: Result<PartResult, SyncError>,
    profile_response: Result<FinalProfile, SyncError>,
    part_calls: AtomicUsize,
    profile_calls: AtomicUsize,
}

impl ScriptedBackend {
    fn parts(part_response: Result<PartResult, SyncError>) -> Self {
        Self {
            part_response,
            profile_response: Ok(FinalProfile::default()),
            part_calls: AtomicUsize::new(0),
            profile_calls: AtomicUsize::new(0),
        }
    }

    fn profile(profile_response: Result<FinalProfile, SyncError>) -> Self {
        Self {
            part_response: Ok(PartResult::default()),
            profile_response,
            part_calls: AtomicUsize::new(0),
            profile_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ScoringBackend for ScriptedBackend {
    async fn submit_part(
        &self,
        _part: &PartKey,
        _answers: &[String],
    ) -> Result<PartResult, SyncError> {
        self.part_calls.fetch_add(1, Ordering::SeqCst);
        self.part_response.clone()
    }

    async fn final_profile(
        &self,
        _answers_by_part: &BTreeMap<PartKey, Vec<String>>,
    ) -> Result<FinalProfile, SyncError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.profile_response.clone()
    }
}

#[tokio::test]
async fn successful_submit_freezes_part_and_returns_to_menu() {
    let backend = Arc::new(ScriptedBackend::parts(Ok(PartResult {
        result: Some("Gryffindor".into()),
        scores: [("Gryffindor".to_string(), 3.0)].into(),
    })));
    let flow = QuizFlowService::new(backend.clone()).with_clock(fixed_clock());
    let mut session = answered_session(&["A", "B", "A"]);

    let (part, result) = flow.submit_active_part(&mut session).await.unwrap();
    assert_eq!(part, key("house"));
    assert_eq!(result.result.as_deref(), Some("Gryffindor"));

    assert!(session.active_part().is_none());
    let completed = session.completed().get(&key("house")).unwrap();
    assert_eq!(completed.answers(), ["A", "B", "A"]);
    assert_eq!(completed.result().result.as_deref(), Some("Gryffindor"));
    assert_eq!(backend.part_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unanswered_draft_never_reaches_the_network() {
    let backend = Arc::new(ScriptedBackend::parts(Ok(PartResult::default())));
    let flow = QuizFlowService::new(backend.clone());
    // Answer only the first question, then jump ahead.
    let mut session = answered_session(&["A"]);

    let err = flow.submit_active_part(&mut session).await.unwrap_err();
    assert_eq!(
        err,
        QuizFlowError::Session(SessionError::Unanswered { index: 1 })
    );
    assert_eq!(session.question_index(), 1);
    assert_eq!(backend.part_calls.load(Ordering::SeqCst), 0);
    assert!(session.completed().is_empty());
}

#[tokio::test]
async fn rejected_submit_mutates_nothing_and_surfaces_server_message() {
    let backend = Arc::new(ScriptedBackend::parts(Err(SyncError::Rejected {
        message: "bad input".into(),
    })));
    let flow = QuizFlowService::new(backend.clone());
    let mut session = answered_session(&["A", "B", "A"]);
    let before = session.clone();

    let err = flow.submit_active_part(&mut session).await.unwrap_err();
    assert_eq!(err.to_string(), "bad input");
    assert_eq!(session, before);
    assert_eq!(backend.part_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn transport_failure_mutates_nothing() {
    let backend = Arc::new(ScriptedBackend::parts(Err(SyncError::Transport {
        message: "connection refused".into(),
    })));
    let flow = QuizFlowService::new(backend);
    let mut session = answered_session(&["A", "B", "A"]);
    let before = session.clone();

    let err = flow.submit_active_part(&mut session).await.unwrap_err();
    assert!(matches!(
        err,
        QuizFlowError::Sync(SyncError::Transport { .. })
    ));
    assert_eq!(session, before);
}

#[tokio::test]
async fn finalize_with_nothing_completed_never_reaches_the_network() {
    let backend = Arc::new(ScriptedBackend::profile(Ok(FinalProfile::default())));
    let flow = QuizFlowService::new(backend.clone());
    let session = QuizSession::new();

    let err = flow.request_final_profile(&session).await.unwrap_err();
    assert_eq!(err, QuizFlowError::NothingToFinalize);
    assert_eq!(backend.profile_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn finalize_posts_all_completed_answers() {
    let backend = Arc::new(ScriptedBackend::profile(Ok(FinalProfile {
        house: Some("Ravenclaw".into()),
        ..FinalProfile::default()
    })));
    let flow = QuizFlowService::new(backend.clone()).with_clock(fixed_clock());
    let mut session = answered_session(&["A", "B", "A"]);
    flow.submit_active_part(&mut session).await.unwrap();

    let profile = flow.request_final_profile(&session).await.unwrap();
    assert_eq!(profile.house.as_deref(), Some("Ravenclaw"));
    assert_eq!(backend.profile_calls.load(Ordering::SeqCst), 1);
    // The profile is view state, not session state.
    assert_eq!(session.completed().len(), 1);
}

/// Backend that parks the first part call until released.
struct GatedBackend {
    started: Notify,
    release: Notify,
    part_calls: AtomicUsize,
}

impl GatedBackend {
    fn new() -> Self {
        Self {
            started: Notify::new(),
            release: Notify::new(),
            part_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ScoringBackend for GatedBackend {
    async fn submit_part(
        &self,
        _part: &PartKey,
        _answers: &[String],
    ) -> Result<PartResult, SyncError> {
        self.part_calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        self.release.notified().await;
        Ok(PartResult {
            result: Some("Hufflepuff".into()),
            scores: BTreeMap::new(),
        })
    }

    async fn final_profile(
        &self,
        _answers_by_part: &BTreeMap<PartKey, Vec<String>>,
    ) -> Result<FinalProfile, SyncError> {
        Ok(FinalProfile::default())
    }
}

#[tokio::test]
async fn second_submit_for_same_part_fails_fast_while_one_is_outstanding() {
    let backend = Arc::new(GatedBackend::new());
    let flow = QuizFlowService::new(backend.clone());
    let mut session = answered_session(&["A", "B", "A"]);
    let mut racing = session.clone();

    let flow_bg = flow.clone();
    let first = tokio::spawn(async move {
        flow_bg.submit_active_part(&mut racing).await.map(|_| racing)
    });
    backend.started.notified().await;

    let err = flow.submit_active_part(&mut session).await.unwrap_err();
    assert!(matches!(err, QuizFlowError::AlreadyInFlight { .. }));
    assert_eq!(backend.part_calls.load(Ordering::SeqCst), 1);

    backend.release.notify_one();
    let completed = first.await.unwrap().unwrap();
    assert!(completed.is_completed(&key("house")));

    // The slot is released once the first request resolves.
    backend.release.notify_one();
    flow.submit_active_part(&mut session).await.unwrap();
    assert_eq!(backend.part_calls.load(Ordering::SeqCst), 2);
}
