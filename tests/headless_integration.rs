use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{rngs::StdRng, SeedableRng};
use typespeed::{
    input::InputLine,
    runtime::{AppEvent, FixedTicker, Runner, TestEventSource},
    session::SessionConfig,
    InputOutcome, Phase, TypingSession, WordPool,
};

fn session(words: &str, config: SessionConfig) -> TypingSession {
    let pool = WordPool::parse("headless", words).unwrap();
    TypingSession::with_rng(pool, config, StdRng::seed_from_u64(99))
}

fn send_str(tx: &mpsc::Sender<AppEvent>, s: &str) {
    for c in s.chars() {
        tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)))
            .unwrap();
    }
}

/// Minimal host loop: keys edit the input line, the clock is polled every pass.
fn drive(
    session: &mut TypingSession,
    input: &mut InputLine,
    runner: &Runner<TestEventSource, FixedTicker>,
    max_steps: u32,
    stop: impl Fn(&TypingSession) -> bool,
) {
    for _ in 0..max_steps {
        match runner.step() {
            AppEvent::Tick | AppEvent::Resize => {}
            AppEvent::Key(key) => match key.code {
                KeyCode::Char(c) => {
                    input.push(c);
                    if let InputOutcome::Committed { .. } = session.on_input(input.value()) {
                        input.clear();
                    }
                }
                KeyCode::Backspace => {
                    if input.backspace() {
                        session.on_input(input.value());
                    }
                }
                _ => {}
            },
        }
        session.poll(Instant::now());
        if stop(session) {
            break;
        }
    }
}

#[test]
fn headless_typing_full_quote_wraps() {
    let mut session = session("the quick brown fox jumps over", SessionConfig::default());
    let quote = session.quote().words().to_vec();
    let mut input = InputLine::new();

    let (tx, rx) = mpsc::channel();
    for word in &quote {
        send_str(&tx, word);
        send_str(&tx, " ");
    }

    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );
    drive(&mut session, &mut input, &runner, 200, |s| {
        s.state().correct_words == 5
    });

    assert_eq!(session.state().correct_words, 5);
    assert_eq!(session.state().wrong_words, 0);
    assert_eq!(session.state().word_index, 0);
    assert_eq!(session.phase(), Phase::Running);
    assert!(input.is_empty());
}

#[test]
fn headless_mistyped_word_is_wrong() {
    let mut session = session("alpha beta gamma delta epsilon", SessionConfig::default());
    let target = session.active_word().unwrap().to_owned();
    let mut input = InputLine::new();

    let (tx, rx) = mpsc::channel();
    send_str(&tx, &format!("{target}q"));
    tx.send(AppEvent::Key(KeyEvent::new(
        KeyCode::Backspace,
        KeyModifiers::NONE,
    )))
    .unwrap();
    send_str(&tx, "x ");

    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );
    drive(&mut session, &mut input, &runner, 200, |s| {
        s.state().word_index == 1
    });

    assert_eq!(session.state().correct_words, 0);
    assert_eq!(session.state().wrong_words, 1);
}

#[test]
fn headless_timed_session_finishes_by_time() {
    let config = SessionConfig {
        duration_secs: 3,
        tick_period: Duration::from_millis(20),
        ..SessionConfig::default()
    };
    let mut session = session("alpha beta gamma delta epsilon", config);
    let mut input = InputLine::new();

    let (tx, rx) = mpsc::channel();
    send_str(&tx, "al");

    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(10)),
    );
    drive(&mut session, &mut input, &runner, 500, |s| {
        s.phase() == Phase::Finished
    });

    assert_eq!(session.phase(), Phase::Finished, "clock should run out");
    let result = session.result().expect("result computed at finish");
    assert_eq!(result.keystrokes, 2);
    assert_eq!(session.state().seconds_remaining, 0);

    // input after the end changes nothing
    assert_eq!(session.on_input("alpha "), InputOutcome::Ignored);
    assert_eq!(session.result(), Some(result));
}

#[test]
fn headless_clock_runs_out_while_keys_stream_in() {
    let config = SessionConfig {
        duration_secs: 3,
        tick_period: Duration::from_millis(20),
        ..SessionConfig::default()
    };
    let mut session = session("alpha beta gamma delta epsilon", config);
    let mut input = InputLine::new();

    let sent = 100;
    let (tx, rx) = mpsc::channel();
    let feeder = std::thread::spawn(move || {
        for _ in 0..sent {
            if tx
                .send(AppEvent::Key(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE)))
                .is_err()
            {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
    });

    // key gaps stay well under the tick interval for the whole run
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(200)),
    );
    let started = Instant::now();
    drive(&mut session, &mut input, &runner, 1000, |s| {
        s.phase() == Phase::Finished
    });
    let elapsed = started.elapsed();

    assert_eq!(session.phase(), Phase::Finished, "clock should run out");
    assert!(
        elapsed < Duration::from_millis(400),
        "finished late: {elapsed:?}"
    );
    let result = session.result().expect("result computed at finish");
    assert!(result.keystrokes < sent, "late keys counted: {result:?}");

    // keys still queued after the deadline change nothing
    feeder.join().unwrap();
    drive(&mut session, &mut input, &runner, sent, |_| false);
    assert_eq!(session.result(), Some(result));
    assert_eq!(session.state().characters_typed, result.keystrokes);
}

#[test]
fn headless_idle_session_never_finishes() {
    let config = SessionConfig {
        duration_secs: 1,
        tick_period: Duration::from_millis(1),
        ..SessionConfig::default()
    };
    let mut session = session("alpha beta", config);
    let mut input = InputLine::new();

    let (_tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(2)),
    );
    drive(&mut session, &mut input, &runner, 20, |_| false);

    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.state().seconds_remaining, 1);
}
