use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use unwind::app::{App, AppAction};
use unwind::capabilities::Capabilities;
use unwind::config::Config;
use unwind::runtime::{AppEvent, FixedTicker, Runner, TestEventSource};
use unwind::stage::{Stage, SESSION_SECS};
use unwind::storage::{MemoryStorage, SqliteStorage};
use unwind::triggers::Category;

fn key(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

/// Drive the app like the terminal loop does, until it quits, completes or
/// `max_steps` run out
fn drive<E: unwind::runtime::EventSource>(
    app: &mut App,
    runner: &mut Runner<E, FixedTicker>,
    max_steps: u32,
) {
    for _ in 0..max_steps {
        match runner.step() {
            AppEvent::Tick => app.on_tick(),
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if app.on_key(key) == AppAction::Quit {
                    return;
                }
            }
        }
        if app.timer.has_completed() {
            return;
        }
    }
}

// Headless integration using the internal runtime + App without a TTY:
// a whole session runs on a fast ticker and lands in the mood log.
#[test]
fn headless_session_completes_and_records() {
    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );
    let mut app = App::new(
        Config::default(),
        Capabilities::default(),
        Box::new(MemoryStorage::new()),
    );

    tx.send(key(' ')).unwrap();
    drive(&mut app, &mut runner, 1000);

    let state = app.timer.state();
    assert!(app.timer.has_completed());
    assert_eq!(state.elapsed_secs, SESSION_SECS);
    assert_eq!(state.stage, Stage::Completion);
    assert!(!state.is_playing);

    let entries = app.store.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].mood, "Good");
    assert_eq!(entries[0].intensity, 3);
}

#[test]
fn headless_check_in_flow() {
    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );
    let mut app = App::new(
        Config::default(),
        Capabilities::default(),
        Box::new(MemoryStorage::new()),
    );

    tx.send(key(' ')).unwrap();
    drive(&mut app, &mut runner, 40);
    while app.stage() != Stage::Checkin {
        app.on_tick();
    }

    // pause so the check-in can't run out while typing
    tx.send(key(' ')).unwrap();
    tx.send(key('2')).unwrap();
    tx.send(key('w')).unwrap();
    for c in "overwhelmed by the deadline and exhausted".chars() {
        tx.send(key(c)).unwrap();
    }
    tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)))
        .unwrap();
    tx.send(key(' ')).unwrap();
    drive(&mut app, &mut runner, 1000);

    let check_in = app.check_in.as_ref().expect("check-in was analysed");
    assert_eq!(check_in.analysis.primary_category, Category::Overwhelm);
    assert!(check_in
        .analysis
        .detected_triggers
        .iter()
        .any(|t| t.word == "exhausted"));
    assert!(!check_in.response.suggestions.is_empty());

    let entries = app.store.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].mood, "Meh");
    assert_eq!(
        entries[0].notes.as_deref(),
        Some("overwhelmed by the deadline and exhausted")
    );
}

#[test]
fn sqlite_log_survives_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("state").join("unwind.db");

    let mut app = App::new(
        Config::default(),
        Capabilities::default(),
        Box::new(SqliteStorage::open(&db).unwrap()),
    );
    app.timer.start();
    for _ in 0..SESSION_SECS {
        app.on_tick();
    }
    assert!(app.timer.has_completed());
    drop(app);

    let reopened = App::new(
        Config::default(),
        Capabilities::default(),
        Box::new(SqliteStorage::open(&db).unwrap()),
    );
    let stats = reopened.stats();
    assert_eq!(stats.total_sessions, 1);
    assert_eq!(stats.streak, 1);
    assert_eq!(stats.average_mood, 3.0);
}
