//! System-level walks of the session lifecycle: shuffle identity, restart,
//! disposal, completion one-shots, and the guided experiment flow.

use studyhall_minigames::{
    CardRef, CardRole, ContentItem, ExperimentPhase, GameKind, HostEvent, InputError, ItemPayload,
    ResolveInput, Session, SessionPhase,
};

fn quiz_pool(n: usize) -> Vec<ContentItem> {
    (0..n)
        .map(|i| {
            ContentItem::new(
                format!("q{i}"),
                ItemPayload::Choice {
                    prompt: format!("question {i}"),
                    options: vec!["a".into(), "b".into()],
                    correct: 0,
                },
            )
        })
        .collect()
}

fn math_pool(n: usize) -> Vec<ContentItem> {
    (0..n)
        .map(|i| {
            ContentItem::new(
                format!("m{i}"),
                ItemPayload::Problem {
                    text: format!("{i} * 2"),
                    answer: 8,
                    options: vec![6, 8, 10],
                },
            )
        })
        .collect()
}

fn guided_pool(n: usize) -> Vec<ContentItem> {
    (0..n)
        .map(|i| {
            ContentItem::new(
                format!("e{i}"),
                ItemPayload::Guided {
                    hypothesis_prompt: format!("prompt {i}"),
                    steps: vec!["observe".into(), "record".into()],
                    conclusion: format!("conclusion {i}"),
                },
            )
        })
        .collect()
}

fn order_ids(session: &Session) -> Vec<String> {
    session
        .play_order()
        .iter()
        .map(|item| item.id.clone())
        .collect()
}

#[test]
fn play_order_is_a_permutation_of_the_pool() {
    let pool = quiz_pool(23);
    let mut expected: Vec<String> = pool.iter().map(|item| item.id.clone()).collect();
    let session = Session::new(GameKind::Quiz, pool, 0xFACE);
    let mut shuffled = order_ids(&session);
    assert_eq!(shuffled.len(), expected.len());
    shuffled.sort();
    expected.sort();
    assert_eq!(shuffled, expected);
}

#[test]
fn restart_reuses_the_shuffle_and_reports_a_zero_score() {
    let mut session = Session::new(GameKind::Quiz, quiz_pool(6), 0xBEE);
    let before = order_ids(&session);
    session.start();
    for _ in 0..3 {
        session.submit(&ResolveInput::Choice { index: 0 }).unwrap();
        session.advance();
    }
    session.drain_events();

    session.restart();
    assert_eq!(session.position(), 0);
    assert_eq!(session.score(), 0);
    assert_eq!(order_ids(&session), before);
    assert!(session.item_state("q0").is_some_and(|s| s.attempts == 0));
    let events = session.drain_events();
    assert!(events.contains(&HostEvent::ScoreChanged { score: 0 }));

    // A restarted session plays through again from scratch.
    session.start();
    session.submit(&ResolveInput::Choice { index: 0 }).unwrap();
    assert_eq!(session.score(), 10);
}

#[test]
fn restart_after_completion_allows_a_second_completion() {
    let mut session = Session::new(GameKind::Quiz, quiz_pool(1), 3);
    session.start();
    session.submit(&ResolveInput::Choice { index: 0 }).unwrap();
    session.advance();
    assert!(session.is_complete());
    session.drain_events();

    session.restart();
    assert!(!session.is_complete());
    session.start();
    session.submit(&ResolveInput::Choice { index: 1 }).unwrap();
    session.advance();
    assert!(session.is_complete());
    assert!(!session.result().unwrap().won);
}

#[test]
fn disposed_session_with_outstanding_countdown_stays_silent() {
    let mut session = Session::new(GameKind::MathRace, math_pool(1), 3);
    session.start();
    let handle = session.timer_handle().unwrap();
    session.drain_events();

    session.dispose();
    // Real time marches well past the 30-unit deadline.
    for _ in 0..60 {
        session.tick(handle);
    }
    assert!(session.drain_events().is_empty());
    assert!(!session.is_complete());
    assert_eq!(
        session.submit(&ResolveInput::Answer { value: 8 }),
        Err(InputError::Disposed)
    );
}

#[test]
fn stale_timer_handle_is_ignored_after_resolution() {
    let mut session = Session::new(GameKind::MathRace, math_pool(2), 3);
    session.start();
    let stale = session.timer_handle().unwrap();
    session.submit(&ResolveInput::Answer { value: 8 }).unwrap();
    session.advance();
    // The first item's countdown was cancelled the instant it resolved; its
    // late ticks must not drain the second item's clock.
    for _ in 0..40 {
        session.tick(stale);
    }
    assert_eq!(session.countdown_remaining(), Some(30));
    assert_eq!(session.position(), 1);
}

#[test]
fn memory_completion_notifies_exactly_once_under_noise() {
    let pool = vec![ContentItem::new(
        "p0",
        ItemPayload::Pair {
            term: "sun".into(),
            matches: "sol".into(),
        },
    )];
    let mut session = Session::new(GameKind::Memory, pool, 3);
    session.start();
    session
        .submit(&ResolveInput::FlipPair {
            first: CardRef {
                item_id: "p0".into(),
                role: CardRole::Term,
            },
            second: CardRef {
                item_id: "p0".into(),
                role: CardRole::Match,
            },
        })
        .unwrap();
    assert!(session.is_complete());

    // Overlapping updates after the final match try to re-trigger completion.
    session.advance();
    assert_eq!(
        session.submit(&ResolveInput::FlipPair {
            first: CardRef {
                item_id: "p0".into(),
                role: CardRole::Term,
            },
            second: CardRef {
                item_id: "p0".into(),
                role: CardRole::Match,
            },
        }),
        Err(InputError::NotActive)
    );
    let completions = session
        .drain_events()
        .into_iter()
        .filter(|event| matches!(event, HostEvent::Completed { .. }))
        .count();
    assert_eq!(completions, 1);
}

#[test]
fn experiment_session_walks_phases_and_wins_on_completion() {
    let mut session = Session::new(GameKind::Experiment, guided_pool(2), 3);
    session.start();
    assert_eq!(session.experiment_phase(), Some(ExperimentPhase::Hypothesis));

    session
        .submit(&ResolveInput::Hypothesis {
            text: "the seed in the dark cup will sprout later than the other".into(),
        })
        .unwrap();
    assert_eq!(session.experiment_phase(), Some(ExperimentPhase::Step(0)));
    assert_eq!(session.score(), 30, "eleven words hit the top tier");

    session.submit(&ResolveInput::StepForward).unwrap();
    session.submit(&ResolveInput::StepBack).unwrap();
    session.submit(&ResolveInput::StepForward).unwrap();
    let res = session.submit(&ResolveInput::StepForward).unwrap();
    assert!(res.terminal);
    assert_eq!(session.phase(), SessionPhase::ItemResolved);
    // 30 for the hypothesis, 3 forward advances at 10 each.
    assert_eq!(session.score(), 60);

    session.advance();
    assert_eq!(session.experiment_phase(), Some(ExperimentPhase::Hypothesis));
    session
        .submit(&ResolveInput::Hypothesis { text: String::new() })
        .unwrap();
    session.submit(&ResolveInput::StepForward).unwrap();
    session.submit(&ResolveInput::StepForward).unwrap();
    session.advance();

    assert!(session.is_complete());
    let result = session.result().unwrap();
    assert!(result.won);
    assert_eq!(result.resolved, 2);
    assert_eq!(result.score, 80);
}
