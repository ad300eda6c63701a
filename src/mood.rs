use chrono::{DateTime, Local, NaiveDate};
use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::insights::{average_intensity, streak_days, top_activities};
use crate::storage::{StorageError, StoragePort};

/// Storage key holding the whole mood log as one JSON array
pub const MOOD_ENTRIES_KEY: &str = "unwind_mood_entries";

/// How many entries `recent` returns
pub const RECENT_ENTRIES: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: String,
    pub mood: String,
    pub intensity: u8,
    pub timestamp: DateTime<Local>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MoodEntry {
    pub fn new(
        mood: impl Into<String>,
        intensity: u8,
        activities: Vec<String>,
        notes: Option<String>,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            id: timestamp.timestamp_millis().to_string(),
            mood: mood.into(),
            intensity: intensity.clamp(1, 5),
            timestamp,
            activities,
            notes: notes.filter(|n| !n.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodStats {
    pub average_mood: f64,
    pub streak: u32,
    pub total_sessions: usize,
    pub top_activities: Vec<String>,
}

/// Append-only mood log on top of a key/value store
#[derive(Debug)]
pub struct MoodStore<S: StoragePort> {
    storage: S,
}

impl<S: StoragePort> MoodStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The stored log. Port errors propagate; a malformed log reads as empty.
    pub fn load(&self) -> Result<Vec<MoodEntry>, StorageError> {
        let Some(raw) = self.storage.get(MOOD_ENTRIES_KEY)? else {
            return Ok(Vec::new());
        };

        Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("mood log is malformed, treating it as empty: {e}");
            Vec::new()
        }))
    }

    /// Every logged entry, oldest first. A missing or unreadable log is empty.
    pub fn entries(&self) -> Vec<MoodEntry> {
        self.load().unwrap_or_else(|e| {
            warn!("could not read mood log: {e}");
            Vec::new()
        })
    }

    pub fn append(&self, entry: MoodEntry) -> Result<MoodEntry, StorageError> {
        let mut entries = self.load()?;
        entries.push(entry.clone());
        self.storage
            .set(MOOD_ENTRIES_KEY, &serde_json::to_string(&entries)?)?;
        info!(
            "mood entry saved: {} (intensity {}, {} activities)",
            entry.mood,
            entry.intensity,
            entry.activities.len()
        );
        Ok(entry)
    }

    /// Log a mood with a randomly assigned intensity
    pub fn record(
        &self,
        mood: &str,
        activities: Vec<String>,
        notes: Option<String>,
    ) -> Result<MoodEntry, StorageError> {
        let intensity = rand::thread_rng().gen_range(1..=5);
        self.record_rated(mood, intensity, activities, notes)
    }

    pub fn record_rated(
        &self,
        mood: &str,
        intensity: u8,
        activities: Vec<String>,
        notes: Option<String>,
    ) -> Result<MoodEntry, StorageError> {
        self.append(MoodEntry::new(
            mood,
            intensity,
            activities,
            notes,
            Local::now(),
        ))
    }

    pub fn recent(&self) -> Vec<MoodEntry> {
        let entries = self.entries();
        let skip = entries.len().saturating_sub(RECENT_ENTRIES);
        entries.into_iter().skip(skip).collect()
    }

    pub fn stats(&self) -> MoodStats {
        self.stats_on(Local::now().date_naive())
    }

    pub fn stats_on(&self, today: NaiveDate) -> MoodStats {
        let entries = self.entries();
        MoodStats {
            average_mood: average_intensity(&entries),
            streak: streak_days(&entries, today),
            total_sessions: entries.len(),
            top_activities: top_activities(&entries, 5),
        }
    }
}
