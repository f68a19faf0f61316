use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;

use typerzone::clock::ManualClock;
use typerzone::runtime::{FixedTicker, Runner, TestEventSource, TyperEvent};
use typerzone::session::Phase;
use typerzone::{App, Catalog, Control, Difficulty, Tier, TypingTest};

fn app_for(sentence: &str, secs: u32) -> App {
    let tier = Tier::new([sentence], secs);
    let catalog = Catalog::new(tier.clone(), tier.clone(), tier).unwrap();
    App::with_typing(TypingTest::with_parts(
        catalog,
        Difficulty::Easy,
        Box::new(ManualClock::new(0)),
        StdRng::seed_from_u64(11),
    ))
}

fn char_key(c: char) -> TyperEvent {
    TyperEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

// Headless integration using the internal runtime + App without a TTY
// Verifies that a minimal typing flow completes via Runner/TestEventSource.
#[test]
fn headless_typing_flow_completes() {
    let mut app = app_for("hi", 30);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    tx.send(char_key('h')).unwrap();
    tx.send(char_key('i')).unwrap();

    for _ in 0..100u32 {
        if let TyperEvent::Key(key) = runner.step() {
            app.on_key(key, Instant::now());
        }
        app.advance_countdown(Instant::now());
        if app.typing.phase() == Phase::Completed {
            break;
        }
    }

    assert_eq!(app.typing.phase(), Phase::Completed);
    assert_eq!(app.typing.session().accuracy_percent, 100);
    assert!(!app.countdown.is_armed());
}

#[test]
fn headless_esc_quits_loop() {
    let mut app = app_for("hello", 30);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );
    tx.send(char_key('h')).unwrap();
    tx.send(TyperEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
        .unwrap();

    let mut quit = false;
    for _ in 0..20u32 {
        if let TyperEvent::Key(key) = runner.step() {
            if app.on_key(key, Instant::now()) == Control::Quit {
                quit = true;
                break;
            }
        }
    }

    assert!(quit);
    assert!(!app.countdown.is_armed());
}

#[test]
fn headless_timed_session_finishes_by_time() {
    let mut app = app_for("hello", 2);
    let t0 = Instant::now();

    app.on_key(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE), t0);

    // simulated wall clock, one poll every 100ms
    for step in 1..=50u64 {
        app.advance_countdown(t0 + Duration::from_millis(step * 100));
        if app.typing.phase() == Phase::Completed {
            break;
        }
    }

    let session = app.typing.session();
    assert!(session.is_completed, "timed session should finish by timeout");
    assert_eq!(session.remaining_seconds, 0);
    assert_eq!(session.accuracy_percent, 100);
}

#[test]
fn headless_restart_does_not_inherit_old_countdown() {
    let mut app = app_for("ab", 5);
    let t0 = Instant::now();

    app.on_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE), t0);
    app.on_key(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE), t0);
    assert_eq!(app.typing.phase(), Phase::Completed);

    app.on_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), t0);
    assert_eq!(app.typing.phase(), Phase::Idle);

    // a new session only counts down once it is running again
    app.advance_countdown(t0 + Duration::from_secs(3));
    assert_eq!(app.typing.session().remaining_seconds, 5);

    let t1 = t0 + Duration::from_secs(4);
    app.on_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE), t1);
    app.advance_countdown(t1 + Duration::from_millis(1100));
    assert_eq!(app.typing.session().remaining_seconds, 4);
}
