use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
}

impl BreathPhase {
    /// Full length of the phase in seconds (4-7-8 breathing)
    pub fn duration(&self) -> u32 {
        match self {
            BreathPhase::Inhale => 4,
            BreathPhase::Hold => 7,
            BreathPhase::Exhale => 8,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            BreathPhase::Inhale => BreathPhase::Hold,
            BreathPhase::Hold => BreathPhase::Exhale,
            BreathPhase::Exhale => BreathPhase::Inhale,
        }
    }

    pub fn cue(&self) -> &'static str {
        match self {
            BreathPhase::Inhale => "Breathe in through your nose",
            BreathPhase::Hold => "Hold gently",
            BreathPhase::Exhale => "Breathe out slowly through your mouth",
        }
    }
}

/// Inhale/hold/exhale countdown that runs while the session sits in the
/// breathing stage. A fresh cycle always starts at inhale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreathingCycle {
    pub phase: BreathPhase,
    pub countdown: u32,
    pub completed_breaths: u32,
}

impl Default for BreathingCycle {
    fn default() -> Self {
        Self {
            phase: BreathPhase::Inhale,
            countdown: BreathPhase::Inhale.duration(),
            completed_breaths: 0,
        }
    }
}

impl BreathingCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one second. Returns the new phase when the tick switched phases.
    pub fn tick(&mut self) -> Option<BreathPhase> {
        if self.countdown <= 1 {
            if self.phase == BreathPhase::Exhale {
                self.completed_breaths += 1;
            }
            self.phase = self.phase.next();
            self.countdown = self.phase.duration();
            Some(self.phase)
        } else {
            self.countdown -= 1;
            None
        }
    }

    /// Fraction of the current phase already elapsed, in [0, 1)
    pub fn phase_progress(&self) -> f64 {
        let total = self.phase.duration() as f64;
        ((total - self.countdown as f64) / total).clamp(0.0, 1.0)
    }
}
