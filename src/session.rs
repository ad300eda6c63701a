use crate::breathing::{BreathPhase, BreathingCycle};
use crate::stage::{stage_at, Stage, SESSION_SECS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub elapsed_secs: u32,
    pub is_playing: bool,
    pub stage: Stage,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            elapsed_secs: 0,
            is_playing: false,
            stage: Stage::Welcome,
        }
    }
}

impl SessionState {
    pub fn is_complete(&self) -> bool {
        self.elapsed_secs >= SESSION_SECS
    }

    pub fn progress_percent(&self) -> f64 {
        (self.elapsed_secs as f64 / SESSION_SECS as f64 * 100.0).clamp(0.0, 100.0)
    }

    pub fn remaining_secs(&self) -> u32 {
        SESSION_SECS.saturating_sub(self.elapsed_secs)
    }

    /// Seconds left in the current stage window
    pub fn stage_remaining_secs(&self) -> u32 {
        self.stage.window().end.saturating_sub(self.elapsed_secs)
    }
}

/// Everything that can happen to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Start,
    Pause,
    Resume,
    Toggle,
    Reset,
    Tick,
}

/// Pure state transition for one event
pub fn reduce(state: &SessionState, event: SessionEvent) -> SessionState {
    match event {
        SessionEvent::Start => {
            let base = if state.is_complete() {
                SessionState::default()
            } else {
                *state
            };
            SessionState {
                is_playing: true,
                ..base
            }
        }
        SessionEvent::Pause => SessionState {
            is_playing: false,
            ..*state
        },
        SessionEvent::Resume => SessionState {
            is_playing: !state.is_complete(),
            ..*state
        },
        SessionEvent::Toggle => SessionState {
            is_playing: !state.is_playing && !state.is_complete(),
            ..*state
        },
        SessionEvent::Reset => SessionState::default(),
        SessionEvent::Tick => {
            if !state.is_playing || state.is_complete() {
                return *state;
            }
            let elapsed_secs = state.elapsed_secs + 1;
            if elapsed_secs >= SESSION_SECS {
                SessionState {
                    elapsed_secs: SESSION_SECS,
                    is_playing: false,
                    stage: Stage::Completion,
                }
            } else {
                SessionState {
                    elapsed_secs,
                    is_playing: true,
                    stage: stage_at(elapsed_secs),
                }
            }
        }
    }
}

/// Side effects observed while applying an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    Started,
    Paused,
    Resumed,
    Reset,
    StageChanged { from: Stage, to: Stage },
    BreathingStarted,
    BreathPhaseChanged(BreathPhase),
    BreathingStopped,
    Completed,
}

/// Drives a session: applies events through `reduce`, owns the breathing
/// cycle while the breathing stage is active and reports what changed.
#[derive(Debug, Clone, Default)]
pub struct SessionTimer {
    state: SessionState,
    breathing: Option<BreathingCycle>,
    completion_fired: bool,
}

impl SessionTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn breathing(&self) -> Option<&BreathingCycle> {
        self.breathing.as_ref()
    }

    pub fn has_completed(&self) -> bool {
        self.completion_fired
    }

    pub fn start(&mut self) -> Vec<SessionSignal> {
        self.apply(SessionEvent::Start)
    }

    pub fn pause(&mut self) -> Vec<SessionSignal> {
        self.apply(SessionEvent::Pause)
    }

    pub fn resume(&mut self) -> Vec<SessionSignal> {
        self.apply(SessionEvent::Resume)
    }

    pub fn toggle(&mut self) -> Vec<SessionSignal> {
        self.apply(SessionEvent::Toggle)
    }

    pub fn reset(&mut self) -> Vec<SessionSignal> {
        self.apply(SessionEvent::Reset)
    }

    /// One second of wall time
    pub fn tick(&mut self) -> Vec<SessionSignal> {
        self.apply(SessionEvent::Tick)
    }

    pub fn apply(&mut self, event: SessionEvent) -> Vec<SessionSignal> {
        let old = self.state;
        let new = reduce(&old, event);
        let mut signals = Vec::new();

        if event == SessionEvent::Reset || (event == SessionEvent::Start && old.is_complete()) {
            self.completion_fired = false;
        }

        match event {
            SessionEvent::Reset => signals.push(SessionSignal::Reset),
            _ if !old.is_playing && new.is_playing => {
                if old.is_complete() {
                    // a restart discards the finished session
                    signals.push(SessionSignal::Reset);
                    signals.push(SessionSignal::Started);
                } else if old.elapsed_secs == 0 {
                    signals.push(SessionSignal::Started);
                } else {
                    signals.push(SessionSignal::Resumed);
                }
            }
            _ if old.is_playing && !new.is_playing && !new.is_complete() => {
                signals.push(SessionSignal::Paused)
            }
            _ => {}
        }

        if new.stage != old.stage {
            signals.push(SessionSignal::StageChanged {
                from: old.stage,
                to: new.stage,
            });
        }

        // the breathing cycle only advances on ticks that stay inside the stage
        let was_breathing = self.breathing.is_some();
        if new.stage == Stage::Breathing {
            match self.breathing.as_mut() {
                Some(cycle) if event == SessionEvent::Tick && new.elapsed_secs != old.elapsed_secs => {
                    if let Some(phase) = cycle.tick() {
                        signals.push(SessionSignal::BreathPhaseChanged(phase));
                    }
                }
                Some(_) => {}
                None => {
                    self.breathing = Some(BreathingCycle::new());
                    signals.push(SessionSignal::BreathingStarted);
                }
            }
        } else if was_breathing {
            self.breathing = None;
            signals.push(SessionSignal::BreathingStopped);
        }

        if new.is_complete() && !self.completion_fired {
            self.completion_fired = true;
            signals.push(SessionSignal::Completed);
        }

        self.state = new;
        signals
    }
}
