use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{error, info};

use crate::capabilities::Capabilities;
use crate::config::Config;
use crate::guidance::MoodLevel;
use crate::habits::{self, HabitSuggestion};
use crate::insights::{export_csv, export_file_name, export_json, snapshot};
use crate::mood::{MoodEntry, MoodStats, MoodStore};
use crate::session::{SessionSignal, SessionTimer};
use crate::stage::Stage;
use crate::storage::StoragePort;
use crate::triggers::{analyze, respond, Notice, TriggerAnalysis, TriggerResponse};

/// Longest journal line accepted at check-in
pub const MAX_JOURNAL_CHARS: usize = 280;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Session,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerLevel {
    Info,
    Gentle,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub text: String,
    pub level: BannerLevel,
}

impl Banner {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: BannerLevel::Info,
        }
    }
}

/// What the terminal loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
    OpenSupport,
}

/// Result of classifying a check-in
#[derive(Debug, Clone, PartialEq)]
pub struct CheckIn {
    pub analysis: TriggerAnalysis,
    pub response: TriggerResponse,
}

pub struct App {
    pub config: Config,
    pub capabilities: Capabilities,
    pub timer: SessionTimer,
    pub store: MoodStore<Box<dyn StoragePort>>,
    pub view: View,
    pub mood: MoodLevel,
    pub journal: String,
    pub editing: bool,
    pub check_in: Option<CheckIn>,
    pub habit: Option<HabitSuggestion>,
    pub banner: Option<Banner>,
    pub last_entry: Option<MoodEntry>,
    pub history: Vec<MoodEntry>,
}

impl App {
    pub fn new(config: Config, capabilities: Capabilities, storage: Box<dyn StoragePort>) -> Self {
        let banner = capabilities.voice_notice(config.voice).map(Banner::info);
        Self {
            mood: MoodLevel::new(config.default_mood).unwrap_or_default(),
            config,
            capabilities,
            timer: SessionTimer::new(),
            store: MoodStore::new(storage),
            view: View::Session,
            journal: String::new(),
            editing: false,
            check_in: None,
            habit: None,
            banner,
            last_entry: None,
            history: Vec::new(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.timer.state().stage
    }

    pub fn stats(&self) -> MoodStats {
        self.store.stats()
    }

    /// Voice hints are shown only when asked for and supported
    pub fn voice_enabled(&self) -> bool {
        self.config.voice && self.capabilities.speech
    }

    pub fn on_tick(&mut self) {
        let signals = self.timer.tick();
        self.handle_signals(&signals);
    }

    fn handle_signals(&mut self, signals: &[SessionSignal]) {
        for signal in signals {
            match *signal {
                SessionSignal::StageChanged { from, to } => {
                    info!("stage {from} -> {to}");
                    if from == Stage::Checkin {
                        self.editing = false;
                    }
                    if to == Stage::Affirmation && self.habit.is_none() {
                        self.habit = Some(self.suggest_habit());
                    }
                }
                SessionSignal::Completed => self.complete_session(),
                SessionSignal::Reset => self.clear_session(),
                SessionSignal::Started
                | SessionSignal::Paused
                | SessionSignal::Resumed
                | SessionSignal::BreathingStarted
                | SessionSignal::BreathPhaseChanged(_)
                | SessionSignal::BreathingStopped => {}
            }
        }
    }

    fn suggest_habit(&self) -> HabitSuggestion {
        match &self.check_in {
            Some(check_in) => habits::suggest_for(check_in.analysis.primary_category),
            None => habits::suggest(self.mood.label()),
        }
    }

    fn clear_session(&mut self) {
        self.mood = MoodLevel::new(self.config.default_mood).unwrap_or_default();
        self.journal.clear();
        self.editing = false;
        self.check_in = None;
        self.habit = None;
        self.banner = None;
    }

    fn complete_session(&mut self) {
        info!("session complete (mood {})", self.mood.label());
        if !self.config.record_sessions {
            return;
        }

        let mut activities = vec![
            "Guided breathing".to_string(),
            self.mood.guidance().activity.title.clone(),
        ];
        if let Some(habit) = &self.habit {
            activities.push(habit.habit.title.to_string());
        }
        let notes = Some(self.journal.trim().to_string());

        match self
            .store
            .record_rated(self.mood.label(), self.mood.intensity(), activities, notes)
        {
            Ok(entry) => {
                self.banner = Some(Banner::info(format!(
                    "Session saved: {} mood recorded.",
                    entry.mood
                )));
                self.last_entry = Some(entry);
            }
            Err(e) => {
                error!("failed to save mood entry: {e}");
                self.banner = Some(Banner {
                    text: "Could not save this session to your mood log.".into(),
                    level: BannerLevel::Alert,
                });
            }
        }
    }

    /// Classify the journal text and surface the canned response
    pub fn submit_check_in(&mut self) {
        self.editing = false;
        if self.journal.trim().is_empty() {
            return;
        }
        let analysis = analyze(&self.journal);
        let response = respond(&analysis);
        info!(
            "check-in classified as {} ({}, confidence {:.2})",
            analysis.primary_category, analysis.severity_level, analysis.confidence
        );

        self.banner = response.notice_text().map(|text| Banner {
            text: text.to_string(),
            level: match response.notice() {
                Notice::Alert => BannerLevel::Alert,
                _ => BannerLevel::Gentle,
            },
        });
        self.check_in = Some(CheckIn { analysis, response });
    }

    pub fn refresh_history(&mut self) {
        self.history = self.store.entries();
    }

    /// Write the 30-day snapshot as JSON and the full log as CSV into `dir`
    pub fn export_to(&self, dir: &Path) -> Result<(PathBuf, PathBuf), Box<dyn Error>> {
        let entries = self.store.entries();
        let now = Local::now();
        fs::create_dir_all(dir)?;

        let json_path = dir.join(export_file_name(now.date_naive(), "json"));
        fs::write(&json_path, export_json(&snapshot(&entries, now))?)?;

        let csv_path = dir.join(export_file_name(now.date_naive(), "csv"));
        export_csv(&entries, fs::File::create(&csv_path)?)?;

        info!("exported {} entries to {}", entries.len(), dir.display());
        Ok((json_path, csv_path))
    }

    pub fn on_key(&mut self, key: KeyEvent) -> AppAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppAction::Quit;
        }

        if self.editing {
            self.on_journal_key(key);
            return AppAction::Continue;
        }

        match self.view {
            View::Session => self.on_session_key(key),
            View::History => self.on_history_key(key),
        }
    }

    fn on_journal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_check_in(),
            KeyCode::Esc => self.editing = false,
            KeyCode::Backspace => {
                self.journal.pop();
            }
            KeyCode::Char(c) if self.journal.chars().count() < MAX_JOURNAL_CHARS => {
                self.journal.push(c)
            }
            _ => {}
        }
    }

    fn on_session_key(&mut self, key: KeyEvent) -> AppAction {
        let in_checkin = self.stage() == Stage::Checkin;
        let signals = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Char(' ') | KeyCode::Char('p') => {
                let state = self.timer.state();
                if state.is_playing {
                    self.timer.pause()
                } else if state.elapsed_secs == 0 || state.is_complete() {
                    self.timer.start()
                } else {
                    self.timer.resume()
                }
            }
            KeyCode::Char('r') => self.timer.reset(),
            KeyCode::Char('h') => {
                self.refresh_history();
                self.view = View::History;
                return AppAction::Continue;
            }
            KeyCode::Char('o')
                if self.banner.as_ref().map(|b| b.level) == Some(BannerLevel::Alert) =>
            {
                return AppAction::OpenSupport;
            }
            KeyCode::Char('w') | KeyCode::Enter if in_checkin => {
                self.editing = true;
                return AppAction::Continue;
            }
            KeyCode::Left | KeyCode::Down if in_checkin => {
                self.mood = self.mood.down();
                return AppAction::Continue;
            }
            KeyCode::Right | KeyCode::Up if in_checkin => {
                self.mood = self.mood.up();
                return AppAction::Continue;
            }
            KeyCode::Char(c @ '1'..='5') if in_checkin => {
                if let Some(level) = MoodLevel::new(c as u8 - b'1') {
                    self.mood = level;
                }
                return AppAction::Continue;
            }
            _ => return AppAction::Continue,
        };
        self.handle_signals(&signals);
        AppAction::Continue
    }

    fn on_history_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Backspace => self.view = View::Session,
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Char('e') => {
                let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                self.banner = Some(match self.export_to(&dir) {
                    Ok((json, csv)) => Banner::info(format!(
                        "Exported {} and {}",
                        json.display(),
                        csv.display()
                    )),
                    Err(e) => {
                        error!("export failed: {e}");
                        Banner {
                            text: format!("Export failed: {e}"),
                            level: BannerLevel::Alert,
                        }
                    }
                });
            }
            _ => {}
        }
        AppAction::Continue
    }
}
