use serde::Serialize;

use crate::triggers::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HabitCategory {
    Mindfulness,
    Movement,
    Gratitude,
    Breathing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MicroHabit {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    pub category: HabitCategory,
    pub difficulty: Difficulty,
    pub instructions: &'static [&'static str],
}

pub const MICRO_HABITS: [MicroHabit; 4] = [
    MicroHabit {
        id: "gratitude-3",
        title: "3 Gratitudes",
        description: "Name three things you're grateful for right now",
        duration: "1 minute",
        category: HabitCategory::Gratitude,
        difficulty: Difficulty::Easy,
        instructions: &[
            "Take a deep breath",
            "Think of 3 specific things you appreciate today",
            "Say them out loud or write them down",
            "Notice how this makes you feel",
        ],
    },
    MicroHabit {
        id: "body-scan",
        title: "Quick Body Scan",
        description: "Check in with your physical sensations",
        duration: "2 minutes",
        category: HabitCategory::Mindfulness,
        difficulty: Difficulty::Easy,
        instructions: &[
            "Sit comfortably and close your eyes",
            "Start from the top of your head",
            "Notice any tension or sensations",
            "Breathe into areas that feel tight",
            "Move down to your toes",
        ],
    },
    MicroHabit {
        id: "desk-stretch",
        title: "Desk Stretch Sequence",
        description: "Gentle stretches for computer workers",
        duration: "3 minutes",
        category: HabitCategory::Movement,
        difficulty: Difficulty::Easy,
        instructions: &[
            "Roll your shoulders back 5 times",
            "Gently turn your head left and right",
            "Stretch your arms above your head",
            "Twist your torso gently to each side",
            "Take 3 deep breaths",
        ],
    },
    MicroHabit {
        id: "box-breathing",
        title: "Box Breathing",
        description: "Structured breathing for instant calm",
        duration: "2 minutes",
        category: HabitCategory::Breathing,
        difficulty: Difficulty::Medium,
        instructions: &[
            "Inhale for 4 counts",
            "Hold for 4 counts",
            "Exhale for 4 counts",
            "Hold empty for 4 counts",
            "Repeat 4-6 times",
        ],
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitSuggestion {
    pub habit: &'static MicroHabit,
    pub reason: &'static str,
    pub personalized_tip: &'static str,
}

fn habit_in(category: HabitCategory) -> &'static MicroHabit {
    MICRO_HABITS
        .iter()
        .find(|h| h.category == category)
        .unwrap_or(&MICRO_HABITS[0])
}

fn suggestion(category: HabitCategory) -> HabitSuggestion {
    let (reason, personalized_tip) = match category {
        HabitCategory::Breathing => (
            "Breathing exercises activate your parasympathetic nervous system and lower stress hormones.",
            "Since you're feeling stressed, make your exhales longer than your inhales to maximize the calming effect.",
        ),
        HabitCategory::Gratitude => (
            "Gratitude practices can lift your mood within minutes.",
            "When feeling down, look for gratitude in small, specific details rather than big, general things.",
        ),
        HabitCategory::Movement => (
            "Gentle movement increases blood flow and can provide natural energy without caffeine.",
            "Since you're tired, focus on gentle, mindful movements rather than vigorous exercise.",
        ),
        HabitCategory::Mindfulness => (
            "Mindfulness practices help maintain emotional balance and present-moment awareness.",
            "This is a great opportunity to build your mindfulness foundation while you're feeling stable.",
        ),
    };
    HabitSuggestion {
        habit: habit_in(category),
        reason,
        personalized_tip,
    }
}

/// Pick a micro-habit for a free-form mood word
pub fn suggest(mood: &str) -> HabitSuggestion {
    let category = match mood.trim().to_lowercase().as_str() {
        "stressed" | "overwhelmed" => HabitCategory::Breathing,
        "sad" | "down" => HabitCategory::Gratitude,
        "tired" | "exhausted" => HabitCategory::Movement,
        _ => HabitCategory::Mindfulness,
    };
    suggestion(category)
}

/// Pick a micro-habit for a classified check-in
pub fn suggest_for(category: Category) -> HabitSuggestion {
    let habit = match category {
        Category::Stress | Category::Overwhelm | Category::Anxiety => HabitCategory::Breathing,
        Category::Depression => HabitCategory::Gratitude,
        Category::Fatigue => HabitCategory::Movement,
        Category::Anger | Category::Positive | Category::Neutral => HabitCategory::Mindfulness,
    };
    suggestion(habit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_habit() {
        for category in [
            HabitCategory::Mindfulness,
            HabitCategory::Movement,
            HabitCategory::Gratitude,
            HabitCategory::Breathing,
        ] {
            assert_eq!(habit_in(category).category, category);
        }
    }

    #[test]
    fn mood_words_map_to_habits() {
        assert_eq!(suggest("Stressed").habit.id, "box-breathing");
        assert_eq!(suggest("overwhelmed").habit.id, "box-breathing");
        assert_eq!(suggest("down").habit.id, "gratitude-3");
        assert_eq!(suggest("exhausted").habit.id, "desk-stretch");
        assert_eq!(suggest("fine").habit.id, "body-scan");
        assert_eq!(suggest("").habit.id, "body-scan");
    }

    #[test]
    fn trigger_categories_map_to_habits() {
        assert_eq!(suggest_for(Category::Anxiety).habit.category, HabitCategory::Breathing);
        assert_eq!(suggest_for(Category::Depression).habit.category, HabitCategory::Gratitude);
        assert_eq!(suggest_for(Category::Fatigue).habit.category, HabitCategory::Movement);
        assert_eq!(suggest_for(Category::Neutral).habit.category, HabitCategory::Mindfulness);
    }

    #[test]
    fn habits_have_instructions() {
        assert!(MICRO_HABITS.iter().all(|h| !h.instructions.is_empty()));
    }
}
