use serde::Deserialize;
use std::sync::OnceLock;

use crate::content::read_content;

/// Five-point mood scale offered during check-in, 0 = Low .. 4 = Amazing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MoodLevel(u8);

impl MoodLevel {
    pub const COUNT: u8 = 5;

    pub fn new(level: u8) -> Option<Self> {
        (level < Self::COUNT).then_some(Self(level))
    }

    pub fn all() -> impl Iterator<Item = MoodLevel> {
        (0..Self::COUNT).map(MoodLevel)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Intensity recorded in the mood log (1-5)
    pub fn intensity(&self) -> u8 {
        self.0 + 1
    }

    pub fn up(&self) -> Self {
        Self((self.0 + 1).min(Self::COUNT - 1))
    }

    pub fn down(&self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    pub fn guidance(&self) -> &'static MoodGuidance {
        &guidance_table()[self.index()]
    }

    pub fn label(&self) -> &'static str {
        &self.guidance().label
    }
}

impl Default for MoodLevel {
    fn default() -> Self {
        // "Good"
        Self(2)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MicroActivity {
    pub title: String,
    pub description: String,
}

/// Copy keyed to one mood level
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MoodGuidance {
    pub label: String,
    pub emoji: String,
    pub reflection: String,
    pub affirmation: String,
    pub activity: MicroActivity,
}

fn guidance_table() -> &'static Vec<MoodGuidance> {
    static TABLE: OnceLock<Vec<MoodGuidance>> = OnceLock::new();
    TABLE.get_or_init(|| read_content("guidance.json").expect("bundled guidance.json is valid"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_guidance_entry_per_level() {
        assert_eq!(guidance_table().len(), MoodLevel::COUNT as usize);
        let labels: Vec<&str> = MoodLevel::all().map(|m| m.label()).collect();
        assert_eq!(labels, vec!["Low", "Meh", "Good", "Great", "Amazing"]);
    }

    #[test]
    fn level_bounds() {
        assert!(MoodLevel::new(5).is_none());
        let top = MoodLevel::new(4).unwrap();
        assert_eq!(top.up(), top);
        assert_eq!(MoodLevel::new(0).unwrap().down().index(), 0);
        assert_eq!(MoodLevel::default().label(), "Good");
        assert_eq!(MoodLevel::default().intensity(), 3);
    }

    #[test]
    fn low_mood_gets_grounding() {
        let low = MoodLevel::new(0).unwrap().guidance();
        assert_eq!(low.activity.title, "5-4-3-2-1 Grounding");
        assert!(!low.affirmation.is_empty());
    }
}
