//! Built-in habit templates offered as creation shortcuts.
//!
//! Templates are read-only seeds; they are never stored. Adding one
//! produces an ordinary daily habit with a fresh id.

use crate::{Error, HabitCategory, HabitFrequency, NewHabit, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A read-only habit seed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HabitTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: HabitCategory,
    pub icon: &'static str,
    pub color: &'static str,
}

impl HabitTemplate {
    /// Creation payload for a daily habit based on this template
    pub fn to_new_habit(&self) -> NewHabit {
        let mut new = NewHabit::new(self.name, self.category, HabitFrequency::Daily);
        new.description = self.description.to_string();
        new.icon = Some(self.icon.to_string());
        new.color = Some(self.color.to_string());
        new
    }
}

/// The built-in tiny habits, in display order
pub const HABIT_TEMPLATES: &[HabitTemplate] = &[
    HabitTemplate {
        id: "template-meditation",
        name: "1-Minute Meditation",
        description: "Take a minute to breathe and center yourself",
        category: HabitCategory::Mindfulness,
        icon: "wind",
        color: "#A5B4FC",
    },
    HabitTemplate {
        id: "template-journal",
        name: "5-Word Journal",
        description: "Today I felt ____ because ____",
        category: HabitCategory::Mindfulness,
        icon: "book",
        color: "#A7F3D0",
    },
    HabitTemplate {
        id: "template-gratitude",
        name: "10-Second Gratitude",
        description: "Think of one thing you're grateful for today",
        category: HabitCategory::Mindfulness,
        icon: "heart",
        color: "#FCD34D",
    },
    HabitTemplate {
        id: "template-pushup",
        name: "1 Push-up",
        description: "Just one push-up. That's it!",
        category: HabitCategory::Fitness,
        icon: "activity",
        color: "#F87171",
    },
    HabitTemplate {
        id: "template-water",
        name: "Drink 1 Glass of Water",
        description: "Stay hydrated with just one glass",
        category: HabitCategory::Health,
        icon: "droplet",
        color: "#60A5FA",
    },
    HabitTemplate {
        id: "template-stretch",
        name: "30-Second Stretch",
        description: "A quick stretch for your body",
        category: HabitCategory::Fitness,
        icon: "move",
        color: "#C4B5FD",
    },
    HabitTemplate {
        id: "template-posture",
        name: "Posture Check",
        description: "Take a moment to fix your posture",
        category: HabitCategory::Health,
        icon: "align-center",
        color: "#FBBF24",
    },
    HabitTemplate {
        id: "template-compliment",
        name: "Self-Compliment",
        description: "Say one nice thing to yourself",
        category: HabitCategory::Mindfulness,
        icon: "smile",
        color: "#F472B6",
    },
];

/// Lookup table by id, built once
static TEMPLATE_INDEX: Lazy<HashMap<&'static str, &'static HabitTemplate>> =
    Lazy::new(|| HABIT_TEMPLATES.iter().map(|t| (t.id, t)).collect());

/// Find a template by id
pub fn find_template(id: &str) -> Option<&'static HabitTemplate> {
    TEMPLATE_INDEX.get(id).copied()
}

/// Creation payload for the template `id`
pub fn new_habit_from_template(id: &str) -> Result<NewHabit> {
    find_template(id)
        .map(HabitTemplate::to_new_habit)
        .ok_or_else(|| Error::TemplateNotFound(id.to_string()))
}
