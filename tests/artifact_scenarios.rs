//! End-to-end scenarios driven through the public artifact API.

use quizflow::action::ActionSet;
use quizflow::artifact::REGENERATE_INSTRUCTION;
use quizflow::quiz::Phase;
use quizflow::{
    ActionId, ActionOutcome, ArtifactEvent, DispatchError, NavigationError, Outbox, ParseError,
    QuizAction, QuizArtifact, StreamPart, Transition, TransitionError, VersionChange,
};

const THREE_QUESTIONS: &str = r#"{"title":"Iterators","questions":[
    {"question":"Which adapter is lazy?","options":["map","collect"],"correct":0,"explanation":"Adapters do nothing until consumed."},
    {"question":"What does sum consume?","options":["Nothing","The iterator"],"correct":1,"explanation":"sum takes self."},
    {"question":"Which trait powers for loops?","options":["IntoIterator","Deref"],"correct":0,"explanation":"for desugars to IntoIterator::into_iter."}]}"#;

fn generate(artifact: &mut QuizArtifact, raw: &str, fragment_chars: usize) {
    artifact.handle(ArtifactEvent::StreamStarted).unwrap();
    let chars: Vec<char> = raw.chars().collect();
    for chunk in chars.chunks(fragment_chars) {
        let text: String = chunk.iter().collect();
        artifact
            .handle(ArtifactEvent::Stream(StreamPart::text(text)))
            .unwrap();
    }
    artifact.handle(ArtifactEvent::StreamFinished).unwrap();
}

fn interact(artifact: &mut QuizArtifact, action: QuizAction) -> Result<Transition, DispatchError> {
    match artifact.handle(ArtifactEvent::Interact(action))? {
        quizflow::Effect::Transition(transition) => Ok(transition),
        other => panic!("unexpected effect {other:?}"),
    }
}

#[test]
fn test_content_is_concatenation_of_fragments() {
    for size in [1, 3, 17, 64, 1000] {
        let mut artifact = QuizArtifact::new();
        generate(&mut artifact, THREE_QUESTIONS, size);
        assert_eq!(artifact.content(), THREE_QUESTIONS);
    }
}

#[test]
fn test_visibility_fires_once_inside_window() {
    let mut artifact = QuizArtifact::new();
    artifact.handle(ArtifactEvent::StreamStarted).unwrap();
    let mut flips = 0;
    for chunk in THREE_QUESTIONS.as_bytes().chunks(10) {
        let text = std::str::from_utf8(chunk).unwrap();
        let before = artifact.is_visible();
        artifact
            .handle(ArtifactEvent::Stream(StreamPart::text(text)))
            .unwrap();
        if !before && artifact.is_visible() {
            flips += 1;
            assert!(artifact.content().len() > 200 && artifact.content().len() < 250);
        }
    }
    assert_eq!(flips, 1);
}

#[test]
fn test_visibility_skipped_by_large_fragment() {
    let mut artifact = QuizArtifact::new();
    generate(&mut artifact, THREE_QUESTIONS, 300);
    assert!(!artifact.is_visible());
}

#[test]
fn test_three_question_attempt_scores_two() {
    let mut artifact = QuizArtifact::new();
    generate(&mut artifact, THREE_QUESTIONS, 9);

    interact(&mut artifact, QuizAction::SelectAnswer(0)).unwrap();
    interact(&mut artifact, QuizAction::SelectAnswer(0)).unwrap();
    let last = interact(&mut artifact, QuizAction::SelectAnswer(0)).unwrap();

    assert_eq!(last, Transition::Completed { score: 2, total: 3 });
    assert_eq!(artifact.state().phase(), Phase::Results);
    assert_eq!(artifact.state().score(), 2);
}

#[test]
fn test_review_from_results_keeps_answers_and_score() {
    let mut artifact = QuizArtifact::new();
    generate(&mut artifact, THREE_QUESTIONS, 9);
    for option in [0, 0, 0] {
        interact(&mut artifact, QuizAction::SelectAnswer(option)).unwrap();
    }
    let answers = artifact.state().answers().clone();

    interact(&mut artifact, QuizAction::GoToQuestion(1)).unwrap();
    assert_eq!(artifact.state().phase(), Phase::Answering { question: 1 });
    assert_eq!(artifact.state().answers(), &answers);
    assert_eq!(artifact.state().score(), 2);
}

#[test]
fn test_out_of_range_jump_changes_nothing() {
    let mut artifact = QuizArtifact::new();
    generate(&mut artifact, THREE_QUESTIONS, 9);
    let before = artifact.state().clone();

    let err = interact(&mut artifact, QuizAction::GoToQuestion(3)).unwrap_err();
    assert_eq!(
        err,
        DispatchError::Transition(TransitionError::QuestionOutOfRange { index: 3, total: 3 })
    );
    assert_eq!(artifact.state(), &before);
}

#[test]
fn test_reset_restores_defaults() {
    let mut artifact = QuizArtifact::new();
    generate(&mut artifact, THREE_QUESTIONS, 9);
    for option in [1, 1, 1] {
        interact(&mut artifact, QuizAction::SelectAnswer(option)).unwrap();
    }

    let dispatched = artifact.dispatch(ActionId::ResetQuiz).unwrap();
    assert_eq!(dispatched.outcome, ActionOutcome::SessionReset);
    assert_eq!(dispatched.notice, Some("Quiz reset!"));
    assert!(artifact.state().is_pristine());
    assert_eq!(artifact.state().phase(), Phase::Answering { question: 0 });
}

#[test]
fn test_previous_version_at_first_is_disabled() {
    let mut artifact = QuizArtifact::new();
    generate(&mut artifact, THREE_QUESTIONS, 50);

    assert!(!artifact.enabled_actions().contains(ActionSet::PREVIOUS_VERSION));
    assert_eq!(
        artifact.handle(ArtifactEvent::Version(VersionChange::Prev)),
        Err(DispatchError::Navigation(NavigationError::Disabled(
            quizflow::Direction::Prev
        )))
    );
    assert_eq!(artifact.history().current_index(), 0);
    assert!(!artifact.enabled_actions().contains(ActionSet::PREVIOUS_VERSION));
}

#[test]
fn test_not_json_keeps_previous_document() {
    let mut artifact = QuizArtifact::new();
    generate(&mut artifact, THREE_QUESTIONS, 50);
    generate(&mut artifact, "not json", 50);

    assert!(matches!(artifact.parse_error(), Some(ParseError::Syntax { .. })));
    assert_eq!(artifact.document().map(|d| d.title.as_str()), Some("Iterators"));

    // Still interactive
    interact(&mut artifact, QuizAction::SelectAnswer(0)).unwrap();
    assert!(artifact.enabled_actions().contains(ActionSet::REGENERATE));
}

#[test]
fn test_parse_is_pure() {
    let first = quizflow::parse(THREE_QUESTIONS);
    let second = quizflow::parse(THREE_QUESTIONS);
    assert_eq!(first, second);
    assert_eq!(quizflow::parse("{"), quizflow::parse("{"));
}

#[test]
fn test_regenerate_request_round_trip() {
    let (outbox, requests) = Outbox::channel(1);
    let mut artifact = QuizArtifact::new().with_outbox(outbox);
    generate(&mut artifact, THREE_QUESTIONS, 50);

    artifact.dispatch(ActionId::Regenerate).unwrap();
    let request = requests.try_recv().unwrap();
    assert_eq!(request.content, REGENERATE_INSTRUCTION);
    assert_eq!(
        request.to_json(),
        format!(r#"{{"role":"user","content":"{REGENERATE_INSTRUCTION}"}}"#)
    );

    // The collaborator answers with a new stream
    let regenerated = THREE_QUESTIONS.replace("Iterators", "Closures");
    generate(&mut artifact, &regenerated, 25);
    assert_eq!(artifact.history().len(), 2);
    assert_eq!(artifact.document().map(|d| d.title.as_str()), Some("Closures"));
    assert!(artifact.enabled_actions().contains(ActionSet::PREVIOUS_VERSION));
}

#[test]
fn test_copy_while_browsing_exports_live_content() {
    let mut artifact = QuizArtifact::new();
    generate(&mut artifact, THREE_QUESTIONS, 50);
    let revised = THREE_QUESTIONS.replace("Iterators", "Closures");
    generate(&mut artifact, &revised, 50);

    artifact.dispatch(ActionId::PreviousVersion).unwrap();
    let dispatched = artifact.dispatch(ActionId::CopyContent).unwrap();
    assert_eq!(
        dispatched.outcome,
        ActionOutcome::Exported(revised.as_str().into())
    );
    assert_eq!(dispatched.notice, Some("Quiz JSON copied to clipboard!"));
}
