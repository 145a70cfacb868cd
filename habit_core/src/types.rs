//! Core domain types for Tiny Habits.
//!
//! This module defines the fundamental types used throughout the system:
//! - Habit categories, frequency rules and coach styles
//! - Habits and their per-day completion records
//! - Standalone mood entries
//! - The persisted store document
//! - Creation and patch payloads used by the store

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

// ============================================================================
// Enumerations
// ============================================================================

/// Broad grouping a habit belongs to
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HabitCategory {
    Mindfulness,
    Fitness,
    Productivity,
    Health,
    Creativity,
    Social,
    Custom,
}

impl HabitCategory {
    pub const ALL: [HabitCategory; 7] = [
        HabitCategory::Mindfulness,
        HabitCategory::Fitness,
        HabitCategory::Productivity,
        HabitCategory::Health,
        HabitCategory::Creativity,
        HabitCategory::Social,
        HabitCategory::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HabitCategory::Mindfulness => "mindfulness",
            HabitCategory::Fitness => "fitness",
            HabitCategory::Productivity => "productivity",
            HabitCategory::Health => "health",
            HabitCategory::Creativity => "creativity",
            HabitCategory::Social => "social",
            HabitCategory::Custom => "custom",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            HabitCategory::Mindfulness => "Mindfulness",
            HabitCategory::Fitness => "Fitness",
            HabitCategory::Productivity => "Productivity",
            HabitCategory::Health => "Health",
            HabitCategory::Creativity => "Creativity",
            HabitCategory::Social => "Social",
            HabitCategory::Custom => "Custom",
        }
    }

    /// Color given to new habits of this category when no template supplies one
    pub fn default_color(&self) -> &'static str {
        match self {
            HabitCategory::Mindfulness => "#A5B4FC",
            HabitCategory::Fitness => "#F87171",
            HabitCategory::Productivity => "#60A5FA",
            HabitCategory::Health => "#34D399",
            HabitCategory::Creativity => "#FBBF24",
            HabitCategory::Social => "#F472B6",
            HabitCategory::Custom => "#9CA3AF",
        }
    }
}

/// Rule deciding on which calendar dates a habit is scheduled
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HabitFrequency {
    Daily,
    Weekdays,
    Weekends,
    /// Accepted and persisted, but never matches a date (see `schedule::is_scheduled`)
    Weekly,
    Custom,
}

impl HabitFrequency {
    pub const ALL: [HabitFrequency; 5] = [
        HabitFrequency::Daily,
        HabitFrequency::Weekdays,
        HabitFrequency::Weekends,
        HabitFrequency::Weekly,
        HabitFrequency::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HabitFrequency::Daily => "daily",
            HabitFrequency::Weekdays => "weekdays",
            HabitFrequency::Weekends => "weekends",
            HabitFrequency::Weekly => "weekly",
            HabitFrequency::Custom => "custom",
        }
    }
}

/// Tone preset selecting which pool of encouragement messages is shown
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiCoachStyle {
    Playful,
    #[default]
    Empathetic,
    Minimalist,
    Wise,
    Friendly,
    Cozy,
}

impl AiCoachStyle {
    pub const ALL: [AiCoachStyle; 6] = [
        AiCoachStyle::Playful,
        AiCoachStyle::Empathetic,
        AiCoachStyle::Minimalist,
        AiCoachStyle::Wise,
        AiCoachStyle::Friendly,
        AiCoachStyle::Cozy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AiCoachStyle::Playful => "playful",
            AiCoachStyle::Empathetic => "empathetic",
            AiCoachStyle::Minimalist => "minimalist",
            AiCoachStyle::Wise => "wise",
            AiCoachStyle::Friendly => "friendly",
            AiCoachStyle::Cozy => "cozy",
        }
    }
}

fn parse_enum<T: Copy>(
    input: &str,
    all: &[T],
    as_str: impl Fn(&T) -> &'static str,
    kind: &str,
) -> Result<T, Error> {
    let wanted = input.trim().to_lowercase();
    all.iter()
        .copied()
        .find(|v| as_str(v) == wanted)
        .ok_or_else(|| {
            let options: Vec<_> = all.iter().map(&as_str).collect();
            Error::InvalidValue(format!(
                "unknown {} '{}' (expected one of: {})",
                kind,
                input,
                options.join(", ")
            ))
        })
}

impl FromStr for HabitCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_enum(s, &Self::ALL, Self::as_str, "category")
    }
}

impl FromStr for HabitFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_enum(s, &Self::ALL, Self::as_str, "frequency")
    }
}

impl FromStr for AiCoachStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_enum(s, &Self::ALL, Self::as_str, "coach style")
    }
}

impl fmt::Display for HabitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for HabitFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AiCoachStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Habit and Completion Types
// ============================================================================

/// A record that a habit was (or was explicitly marked not) performed on a day
///
/// Identity is the UTC calendar day of `date`, not the full timestamp.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HabitCompletion {
    #[serde(deserialize_with = "crate::schedule::deserialize_timestamp")]
    pub date: DateTime<Utc>,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl HabitCompletion {
    /// Calendar day this record belongs to
    pub fn day(&self) -> NaiveDate {
        crate::schedule::calendar_day(self.date)
    }
}

/// A user-defined recurring action
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: HabitCategory,
    pub frequency: HabitFrequency,
    /// Weekday indices 0-6 (Sunday = 0), consulted only for `Custom`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_days: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// HH:MM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_enabled: Option<bool>,
    /// HH:MM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<String>,
    /// Id of the habit this one is stacked with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_to: Option<String>,
    #[serde(deserialize_with = "crate::schedule::deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completions: Vec<HabitCompletion>,
}

impl Habit {
    /// The completion record for a calendar day, if any
    pub fn completion_on(&self, day: NaiveDate) -> Option<&HabitCompletion> {
        self.completions.iter().find(|c| c.day() == day)
    }

    pub(crate) fn completion_on_mut(&mut self, day: NaiveDate) -> Option<&mut HabitCompletion> {
        self.completions.iter_mut().find(|c| c.day() == day)
    }
}

/// A standalone mood log, independent of any habit
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodEntry {
    pub id: String,
    #[serde(deserialize_with = "crate::schedule::deserialize_timestamp")]
    pub date: DateTime<Utc>,
    pub score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Label for a mood score on the 1-5 scale
pub fn mood_label(score: u8) -> Option<&'static str> {
    match score {
        1 => Some("Low"),
        2 => Some("Meh"),
        3 => Some("Okay"),
        4 => Some("Good"),
        5 => Some("Great"),
        _ => None,
    }
}

// ============================================================================
// Store Document
// ============================================================================

/// Everything the store owns, in its persisted shape
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct HabitState {
    pub habits: Vec<Habit>,
    pub mood_entries: Vec<MoodEntry>,
    pub ai_coach_style: AiCoachStyle,
    pub is_premium: bool,
}

// ============================================================================
// Mutation Payloads
// ============================================================================

/// Every habit field except the ones the store assigns (id, timestamp, completions)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewHabit {
    pub name: String,
    pub description: String,
    pub category: HabitCategory,
    pub frequency: HabitFrequency,
    pub custom_days: Option<Vec<u8>>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub time_of_day: Option<String>,
    pub reminder_enabled: Option<bool>,
    pub reminder_time: Option<String>,
    pub linked_to: Option<String>,
}

impl NewHabit {
    pub fn new(
        name: impl Into<String>,
        category: HabitCategory,
        frequency: HabitFrequency,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            category,
            frequency,
            custom_days: None,
            icon: None,
            color: None,
            time_of_day: None,
            reminder_enabled: None,
            reminder_time: None,
            linked_to: None,
        }
    }

    pub(crate) fn into_habit(self, id: String, created_at: DateTime<Utc>) -> Habit {
        Habit {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            frequency: self.frequency,
            custom_days: self.custom_days,
            icon: self.icon,
            color: self.color,
            time_of_day: self.time_of_day,
            reminder_enabled: self.reminder_enabled,
            reminder_time: self.reminder_time,
            linked_to: self.linked_to,
            created_at,
            completions: Vec::new(),
        }
    }
}

/// Per-field optional update for a habit; `None` leaves the field untouched
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HabitPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<HabitCategory>,
    pub frequency: Option<HabitFrequency>,
    pub custom_days: Option<Vec<u8>>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub time_of_day: Option<String>,
    pub reminder_enabled: Option<bool>,
    pub reminder_time: Option<String>,
    pub linked_to: Option<String>,
}

impl HabitPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the set fields into `habit`
    pub fn apply_to(self, habit: &mut Habit) {
        if let Some(name) = self.name {
            habit.name = name;
        }
        if let Some(description) = self.description {
            habit.description = description;
        }
        if let Some(category) = self.category {
            habit.category = category;
        }
        if let Some(frequency) = self.frequency {
            habit.frequency = frequency;
        }
        if self.custom_days.is_some() {
            habit.custom_days = self.custom_days;
        }
        if self.icon.is_some() {
            habit.icon = self.icon;
        }
        if self.color.is_some() {
            habit.color = self.color;
        }
        if self.time_of_day.is_some() {
            habit.time_of_day = self.time_of_day;
        }
        if self.reminder_enabled.is_some() {
            habit.reminder_enabled = self.reminder_enabled;
        }
        if self.reminder_time.is_some() {
            habit.reminder_time = self.reminder_time;
        }
        if self.linked_to.is_some() {
            habit.linked_to = self.linked_to;
        }
    }
}
