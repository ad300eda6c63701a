//! Aggregates over the mood log: averages, streaks, activity rankings, and
//! the 30-day wellness snapshot that can be exported as JSON or CSV.

use chrono::{DateTime, Duration, Local, NaiveDate};
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;

use crate::mood::MoodEntry;
use crate::util::{mean, round1};

pub const SNAPSHOT_DAYS: i64 = 30;
const EXPORT_FORMAT: &str = "Unwind Wellness Snapshot";
const EXPORT_INSTRUCTIONS: &str =
    "This data can be shared with healthcare providers or used for personal reflection.";

/// Mean intensity to one decimal; 0 for an empty log
pub fn average_intensity(entries: &[MoodEntry]) -> f64 {
    let scores: Vec<f64> = entries.iter().map(|e| e.intensity as f64).collect();
    mean(&scores).map(round1).unwrap_or(0.0)
}

/// Consecutive calendar days with at least one entry, counted back from
/// today. A streak still counts when the latest entry was yesterday.
pub fn streak_days(entries: &[MoodEntry], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = entries.iter().map(|e| e.timestamp.date_naive()).collect();

    let mut day = match today.pred_opt() {
        _ if days.contains(&today) => today,
        Some(yesterday) if days.contains(&yesterday) => yesterday,
        _ => return 0,
    };

    let mut streak = 0;
    while days.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

/// Most frequently logged activities, ties in order of first appearance
pub fn top_activities(entries: &[MoodEntry], limit: usize) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for activity in entries.iter().flat_map(|e| e.activities.iter()) {
        match counts.iter_mut().find(|(a, _)| *a == activity.as_str()) {
            Some((_, n)) => *n += 1,
            None => counts.push((activity.as_str(), 1)),
        }
    }

    counts
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1))
        .take(limit)
        .map(|(a, _)| a.to_string())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodTrend {
    pub date: NaiveDate,
    pub mood: String,
    pub score: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Positive,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellnessInsight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub message: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WellnessSnapshot {
    pub period: String,
    pub average_mood: f64,
    pub total_sessions: usize,
    pub streak_days: u32,
    pub top_activities: Vec<String>,
    pub mood_trends: Vec<MoodTrend>,
    pub insights: Vec<WellnessInsight>,
    pub generated_at: DateTime<Local>,
}

fn insights_for(average: f64, sessions: usize) -> Vec<WellnessInsight> {
    if sessions == 0 {
        return Vec::new();
    }
    if average < 2.5 {
        vec![WellnessInsight {
            kind: InsightKind::Warning,
            message: "Your mood has been trending lower recently.".into(),
            suggestion: "Consider scheduling more frequent mental reset sessions or speaking with a counselor.".into(),
        }]
    } else if average > 4.0 {
        vec![WellnessInsight {
            kind: InsightKind::Positive,
            message: "Your mental wellness is trending positively!".into(),
            suggestion: "Keep up your current wellness practices - they're working well for you.".into(),
        }]
    } else {
        Vec::new()
    }
}

/// Summarise the last thirty days of the log as of `now`
pub fn snapshot(entries: &[MoodEntry], now: DateTime<Local>) -> WellnessSnapshot {
    let cutoff = now - Duration::days(SNAPSHOT_DAYS);
    let window: Vec<MoodEntry> = entries
        .iter()
        .filter(|e| e.timestamp >= cutoff)
        .cloned()
        .collect();

    let mood_trends = window
        .iter()
        .map(|e| MoodTrend {
            date: e.timestamp.date_naive(),
            mood: e.mood.clone(),
            score: e.intensity,
        })
        .collect();

    let average_mood = average_intensity(&window);

    WellnessSnapshot {
        period: format!("Last {SNAPSHOT_DAYS} Days"),
        average_mood,
        total_sessions: window.len(),
        streak_days: streak_days(entries, now.date_naive()),
        top_activities: top_activities(&window, 5),
        mood_trends,
        insights: insights_for(average_mood, window.len()),
        generated_at: now,
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    #[serde(flatten)]
    snapshot: &'a WellnessSnapshot,
    export_format: &'static str,
    instructions: &'static str,
}

/// Pretty-printed JSON document suitable for sharing
pub fn export_json(snapshot: &WellnessSnapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ExportDocument {
        snapshot,
        export_format: EXPORT_FORMAT,
        instructions: EXPORT_INSTRUCTIONS,
    })
}

/// One CSV row per logged entry
pub fn export_csv<W: Write>(entries: &[MoodEntry], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["id", "timestamp", "mood", "intensity", "activities", "notes"])?;
    for e in entries {
        wtr.write_record([
            e.id.clone(),
            e.timestamp.to_rfc3339(),
            e.mood.clone(),
            e.intensity.to_string(),
            e.activities.join(";"),
            e.notes.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Suggested file name for an export made on `date`
pub fn export_file_name(date: NaiveDate, extension: &str) -> String {
    format!("unwind-snapshot-{}.{}", date.format("%Y-%m-%d"), extension)
}
