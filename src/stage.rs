use serde::{Deserialize, Serialize};

/// Total length of a guided reset, in seconds
pub const SESSION_SECS: u32 = 180;

/// One of the five named phases of a guided reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    Welcome,
    Checkin,
    Breathing,
    Affirmation,
    Completion,
}

/// A stage together with its half-open time window and display copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageWindow {
    pub stage: Stage,
    pub start: u32,
    pub end: u32,
    pub title: &'static str,
    pub description: &'static str,
}

impl StageWindow {
    pub fn contains(&self, secs: u32) -> bool {
        self.start <= secs && secs < self.end
    }

    pub fn duration(&self) -> u32 {
        self.end - self.start
    }
}

/// Ordered stage table covering [0, SESSION_SECS) with no gaps or overlaps
pub const STAGES: [StageWindow; 5] = [
    StageWindow {
        stage: Stage::Welcome,
        start: 0,
        end: 30,
        title: "Welcome",
        description: "Settle in. Find a comfortable position and let your shoulders drop.",
    },
    StageWindow {
        stage: Stage::Checkin,
        start: 30,
        end: 75,
        title: "Mood Check-in",
        description: "How are you feeling right now? Pick a mood or write a few words.",
    },
    StageWindow {
        stage: Stage::Breathing,
        start: 75,
        end: 135,
        title: "Guided Breathing",
        description: "Follow the 4-7-8 rhythm: breathe in, hold, and breathe out slowly.",
    },
    StageWindow {
        stage: Stage::Affirmation,
        start: 135,
        end: 165,
        title: "Personalized Affirmation",
        description: "A message and a small action chosen for how you feel.",
    },
    StageWindow {
        stage: Stage::Completion,
        start: 165,
        end: SESSION_SECS,
        title: "Reset Complete",
        description: "Your mental reset is complete. Notice how you feel now.",
    },
];

impl Stage {
    pub fn window(&self) -> &'static StageWindow {
        // the table holds every variant exactly once, in declaration order
        &STAGES[*self as usize]
    }

    pub fn title(&self) -> &'static str {
        self.window().title
    }

    pub fn description(&self) -> &'static str {
        self.window().description
    }

    /// 1-based position in the session, for "Step n of 5"
    pub fn ordinal(&self) -> usize {
        *self as usize + 1
    }
}

/// Map elapsed seconds to the stage whose window contains it.
/// Anything at or past the end of the session stays on completion.
pub fn stage_at(secs: u32) -> Stage {
    STAGES
        .iter()
        .find(|w| w.contains(secs))
        .map(|w| w.stage)
        .unwrap_or(Stage::Completion)
}
