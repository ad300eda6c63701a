use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::content::read_content;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Stress,
    Anxiety,
    Depression,
    Anger,
    Fatigue,
    Overwhelm,
    Positive,
    Neutral,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TriggerWord {
    pub word: &'static str,
    pub category: Category,
    pub severity: Severity,
}

const fn tw(word: &'static str, category: Category, severity: Severity) -> TriggerWord {
    TriggerWord {
        word,
        category,
        severity,
    }
}

/// Keyword dictionary, scanned in order
pub const TRIGGER_WORDS: [TriggerWord; 27] = [
    tw("stressed", Category::Stress, Severity::Medium),
    tw("overwhelmed", Category::Overwhelm, Severity::High),
    tw("pressure", Category::Stress, Severity::Medium),
    tw("deadline", Category::Stress, Severity::Medium),
    tw("burnout", Category::Stress, Severity::High),
    tw("anxious", Category::Anxiety, Severity::Medium),
    tw("worried", Category::Anxiety, Severity::Low),
    tw("panic", Category::Anxiety, Severity::High),
    tw("nervous", Category::Anxiety, Severity::Low),
    tw("fear", Category::Anxiety, Severity::Medium),
    tw("sad", Category::Depression, Severity::Medium),
    tw("hopeless", Category::Depression, Severity::High),
    tw("empty", Category::Depression, Severity::Medium),
    tw("worthless", Category::Depression, Severity::High),
    tw("lonely", Category::Depression, Severity::Medium),
    tw("angry", Category::Anger, Severity::Medium),
    tw("frustrated", Category::Anger, Severity::Medium),
    tw("furious", Category::Anger, Severity::High),
    tw("irritated", Category::Anger, Severity::Low),
    tw("tired", Category::Fatigue, Severity::Medium),
    tw("exhausted", Category::Fatigue, Severity::High),
    tw("drained", Category::Fatigue, Severity::High),
    tw("sleepy", Category::Fatigue, Severity::Low),
    tw("happy", Category::Positive, Severity::Low),
    tw("grateful", Category::Positive, Severity::Low),
    tw("excited", Category::Positive, Severity::Low),
    tw("calm", Category::Positive, Severity::Low),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggerAnalysis {
    pub detected_triggers: Vec<TriggerWord>,
    pub primary_category: Category,
    pub severity_level: Severity,
    pub confidence: f64,
}

impl TriggerAnalysis {
    pub fn neutral() -> Self {
        Self {
            detected_triggers: Vec::new(),
            primary_category: Category::Neutral,
            severity_level: Severity::Low,
            confidence: 0.0,
        }
    }
}

/// Case-insensitive substring scan of `text` against the keyword table.
///
/// The primary category is the one with the most matches; ties go to the
/// category matched first in table order.
pub fn analyze(text: &str) -> TriggerAnalysis {
    let lower = text.to_lowercase();
    let detected_triggers: Vec<TriggerWord> = TRIGGER_WORDS
        .iter()
        .filter(|t| lower.contains(t.word))
        .copied()
        .collect();

    if detected_triggers.is_empty() {
        return TriggerAnalysis::neutral();
    }

    let mut counts: Vec<(Category, usize)> = Vec::new();
    for trigger in &detected_triggers {
        match counts.iter_mut().find(|(c, _)| *c == trigger.category) {
            Some((_, n)) => *n += 1,
            None => counts.push((trigger.category, 1)),
        }
    }

    let mut primary_category = counts[0].0;
    let mut best = counts[0].1;
    for &(category, n) in &counts[1..] {
        if n > best {
            primary_category = category;
            best = n;
        }
    }

    let severity_level = detected_triggers
        .iter()
        .map(|t| t.severity)
        .max()
        .unwrap_or(Severity::Low);

    let confidence = (detected_triggers.len() as f64 / 3.0).min(1.0);

    TriggerAnalysis {
        detected_triggers,
        primary_category,
        severity_level,
        confidence,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CannedResponse {
    pub message: String,
    pub suggestions: Vec<String>,
}

type ResponseTable = HashMap<Category, HashMap<Severity, CannedResponse>>;

fn response_table() -> &'static ResponseTable {
    static TABLE: OnceLock<ResponseTable> = OnceLock::new();
    TABLE.get_or_init(|| read_content("responses.json").expect("bundled responses.json is valid"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerResponse {
    pub category: Category,
    pub severity: Severity,
    pub message: String,
    pub suggestions: Vec<String>,
    pub urgency: Severity,
}

/// How loudly the UI should surface a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Alert,
    Gentle,
    None,
}

impl TriggerResponse {
    pub fn notice(&self) -> Notice {
        match self.urgency {
            Severity::High => Notice::Alert,
            Severity::Medium => Notice::Gentle,
            Severity::Low => Notice::None,
        }
    }

    pub fn notice_text(&self) -> Option<&'static str> {
        match self.notice() {
            Notice::Alert => Some(
                "Important: it sounds like you may need support right now. Please consider reaching out to someone.",
            ),
            Notice::Gentle => {
                Some("Personalized support available: here are a few things that may help.")
            }
            Notice::None => None,
        }
    }
}

/// Map an analysis to its canned message. Categories without copy of their
/// own (neutral) use the stress set.
pub fn respond(analysis: &TriggerAnalysis) -> TriggerResponse {
    let table = response_table();
    let by_severity = table
        .get(&analysis.primary_category)
        .or_else(|| table.get(&Category::Stress))
        .expect("stress responses are bundled");
    let canned = by_severity
        .get(&analysis.severity_level)
        .expect("every severity has a response");

    TriggerResponse {
        category: analysis.primary_category,
        severity: analysis.severity_level,
        message: canned.message.clone(),
        suggestions: canned.suggestions.clone(),
        urgency: analysis.severity_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_unmatched_text_is_neutral() {
        for text in ["", "   ", "the weather is mild"] {
            let analysis = analyze(text);
            assert_eq!(analysis, TriggerAnalysis::neutral());
            assert_eq!(analysis.primary_category, Category::Neutral);
            assert_eq!(analysis.severity_level, Severity::Low);
            assert_eq!(analysis.confidence, 0.0);
            assert!(analysis.detected_triggers.is_empty());
        }
    }

    #[test]
    fn anxious_and_tired() {
        let analysis = analyze("I feel so anxious and tired today");
        let categories: Vec<Category> =
            analysis.detected_triggers.iter().map(|t| t.category).collect();
        assert!(categories.contains(&Category::Anxiety));
        assert!(categories.contains(&Category::Fatigue));
        assert_eq!(analysis.primary_category, Category::Anxiety);
        assert_eq!(analysis.severity_level, Severity::Medium);
        assert!((analysis.confidence - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn tie_goes_to_first_category_in_table_order() {
        // fatigue word comes first in the text but anxiety is earlier in the table
        let analysis = analyze("sleepy and nervous");
        assert_eq!(analysis.primary_category, Category::Anxiety);
    }

    #[test]
    fn majority_category_wins() {
        let analysis = analyze("tired, exhausted and a bit nervous");
        assert_eq!(analysis.primary_category, Category::Fatigue);
        assert_eq!(analysis.severity_level, Severity::High);
        assert_eq!(analysis.confidence, 1.0);
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let analysis = analyze("PANICKING about the Deadline");
        let words: Vec<&str> = analysis.detected_triggers.iter().map(|t| t.word).collect();
        assert_eq!(words, vec!["deadline", "panic"]);
        assert_eq!(analysis.primary_category, Category::Stress);
        assert_eq!(analysis.severity_level, Severity::High);
    }

    #[test]
    fn word_counts_once_even_if_repeated() {
        let analysis = analyze("sad sad sad");
        assert_eq!(analysis.detected_triggers.len(), 1);
        assert!((analysis.confidence - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn table_covers_every_category_and_severity() {
        let table = response_table();
        for category in [
            Category::Stress,
            Category::Anxiety,
            Category::Depression,
            Category::Anger,
            Category::Fatigue,
            Category::Overwhelm,
            Category::Positive,
        ] {
            for severity in [Severity::Low, Severity::Medium, Severity::High] {
                let canned = &table[&category][&severity];
                assert!(!canned.message.is_empty());
                assert!(!canned.suggestions.is_empty());
            }
        }
        assert_eq!(table.values().map(|m| m.len()).sum::<usize>(), 21);
    }

    #[test]
    fn respond_is_pure() {
        let analysis = TriggerAnalysis {
            detected_triggers: vec![tw("panic", Category::Anxiety, Severity::High)],
            primary_category: Category::Anxiety,
            severity_level: Severity::High,
            confidence: 1.0 / 3.0,
        };
        let first = respond(&analysis);
        let second = respond(&analysis);
        assert_eq!(first, second);
        assert_eq!(first.urgency, Severity::High);
        assert!(!first.suggestions.is_empty());
        assert_eq!(first.notice(), Notice::Alert);
    }

    #[test]
    fn neutral_falls_back_to_stress_copy() {
        let response = respond(&TriggerAnalysis::neutral());
        let stress = respond(&TriggerAnalysis {
            primary_category: Category::Stress,
            ..TriggerAnalysis::neutral()
        });
        assert_eq!(response.category, Category::Neutral);
        assert_eq!(response.message, stress.message);
        assert_eq!(response.notice(), Notice::None);
        assert!(response.notice_text().is_none());
    }
}
