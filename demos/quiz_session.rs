//! Quiz Session Demo: Streams a quiz through an artifact actor and takes it.
//!
//! This example simulates a generator streaming quiz JSON in small
//! fragments, then answers every question and prints the results screen.

use quizflow::action::{ActionId, Placement};
use quizflow::view::{OptionMark, QuizView, ViewConfig};
use quizflow::{
    ActorConfig, ArtifactActor, ArtifactEvent, KindId, Outbox, QuizAction, QuizArtifact,
    StreamPart,
};
use std::time::Duration;

/// Sample quiz to stream (simulating a generator response).
const SAMPLE_QUIZ: &str = r#"{
  "title": "Rust Ownership Basics",
  "questions": [
    {
      "question": "What happens to a String when it is assigned to another variable?",
      "options": ["It is copied", "It is moved", "It is borrowed", "It is cloned lazily"],
      "correct": 1,
      "explanation": "String does not implement Copy, so assignment moves ownership."
    },
    {
      "question": "How many mutable references to a value may exist at once?",
      "options": ["Zero", "One", "Two", "Unlimited"],
      "correct": 1,
      "explanation": "The borrow checker allows exactly one active mutable reference."
    },
    {
      "question": "When is a value dropped?",
      "options": ["When its owner goes out of scope", "At program exit", "When the GC runs"],
      "correct": 0,
      "explanation": "Rust drops values deterministically at the end of the owner's scope."
    }
  ]
}"#;

fn main() -> std::io::Result<()> {
    println!("Quizflow Session Demo");
    println!("=====================");
    println!();

    let descriptor = KindId::Quiz.descriptor();
    println!("{}: {}", descriptor.id.as_str(), descriptor.description);
    for placement in [Placement::ActionBar, Placement::Toolbar] {
        let labels: Vec<&str> = descriptor
            .actions_at(placement)
            .map(|spec| spec.description)
            .collect();
        println!("  {placement:?}: {}", labels.join(" | "));
    }
    println!();

    let (outbox, requests) = Outbox::channel(8);
    let artifact = QuizArtifact::new().with_outbox(outbox);
    let actor = ArtifactActor::spawn(artifact, &ActorConfig::default())?;

    // Stream the quiz in 12-char fragments
    actor.send(ArtifactEvent::StreamStarted);
    let chars: Vec<char> = SAMPLE_QUIZ.chars().collect();
    for chunk in chars.chunks(12) {
        actor.send(ArtifactEvent::Stream(StreamPart::text(chunk.iter().collect::<String>())));
    }
    actor.send(ArtifactEvent::StreamFinished);

    // Take the quiz, getting the second question wrong
    for option in [1, 2, 0] {
        actor.send(ArtifactEvent::Interact(QuizAction::SelectAnswer(option)));
    }
    actor.send(ArtifactEvent::Action(ActionId::AddQuestions));

    let mut events = 0;
    while actor.updates().recv_timeout(Duration::from_millis(100)).is_ok() {
        events += 1;
    }
    println!("Handled {events} events");

    let Some(mut artifact) = actor.join() else {
        eprintln!("artifact actor panicked");
        return Ok(());
    };

    match QuizView::build(&artifact, &ViewConfig::default()) {
        QuizView::Results(results) => {
            println!("{}", results.title);
            println!("Score: {}/{} ({}%)", results.score, results.total, results.percent);
            println!();
            for review in &results.reviews {
                println!("Question {}: {:?}", review.number, review.outcome);
                println!("  {}", review.prompt);
                for (option, mark) in &review.options {
                    let marker = match mark {
                        OptionMark::Correct => '+',
                        OptionMark::WrongChoice => 'x',
                        OptionMark::Plain => ' ',
                    };
                    println!("  [{marker}] {option}");
                }
                println!("  Explanation: {}", review.explanation);
            }
        }
        other => println!("Unexpected view: {other:?}"),
    }

    println!();
    while let Ok(request) = requests.try_recv() {
        println!("Outbound request: {}", request.to_json());
    }

    for id in [ActionId::CopyContent, ActionId::ResetQuiz] {
        match artifact.dispatch(id) {
            Ok(dispatched) => println!("{id:?}: {}", dispatched.notice.unwrap_or("done")),
            Err(err) => println!("{id:?}: {err}"),
        }
    }

    Ok(())
}
