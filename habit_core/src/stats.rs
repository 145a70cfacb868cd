//! Completion and mood statistics.
//!
//! Everything here is a pure function over borrowed store data; nothing
//! reads or writes the store itself.

use crate::schedule::{calendar_day, is_scheduled};
use crate::{Habit, MoodEntry};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

/// Number of habits scheduled on `date`
pub fn total_scheduled(habits: &[Habit], date: NaiveDate) -> usize {
    habits.iter().filter(|h| is_scheduled(h, date)).count()
}

/// Number of habits with a completed record on `date`
///
/// Not filtered by schedule: a completion on an unscheduled day still
/// counts, so this can exceed `total_scheduled` but never `habits.len()`.
pub fn total_completed(habits: &[Habit], date: NaiveDate) -> usize {
    habits.iter().filter(|h| is_completed_on(h, date)).count()
}

/// `completed / scheduled`, or 0 when nothing is scheduled
pub fn progress_ratio(completed: usize, scheduled: usize) -> f64 {
    if scheduled == 0 {
        0.0
    } else {
        completed as f64 / scheduled as f64
    }
}

/// Does `habit` have a completed record on `date`?
pub fn is_completed_on(habit: &Habit, date: NaiveDate) -> bool {
    habit
        .completions
        .iter()
        .any(|c| c.completed && c.day() == date)
}

/// Habits scheduled on `date`, in store order
pub fn scheduled_habits(habits: &[Habit], date: NaiveDate) -> Vec<&Habit> {
    habits.iter().filter(|h| is_scheduled(h, date)).collect()
}

/// Scheduled/completed counts for one calendar day
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DailyProgress {
    pub date: NaiveDate,
    pub scheduled: usize,
    pub completed: usize,
}

impl DailyProgress {
    pub fn ratio(&self) -> f64 {
        progress_ratio(self.completed, self.scheduled)
    }

    /// One-line encouragement for the day's progress
    pub fn summary(&self) -> &'static str {
        let ratio = self.ratio();
        if self.scheduled > 0 && self.completed == self.scheduled {
            "Perfect day! Keep it up!"
        } else if ratio > 0.5 {
            "Good progress today!"
        } else if self.scheduled > 0 {
            "Every tiny habit counts"
        } else {
            "No habits scheduled for this day"
        }
    }
}

pub fn daily_progress(habits: &[Habit], date: NaiveDate) -> DailyProgress {
    DailyProgress {
        date,
        scheduled: total_scheduled(habits, date),
        completed: total_completed(habits, date),
    }
}

/// Progress for `days` consecutive days ending at `end`, oldest first
pub fn progress_window(habits: &[Habit], end: NaiveDate, days: u32) -> Vec<DailyProgress> {
    (0..days as i64)
        .rev()
        .map(|offset| daily_progress(habits, end - Duration::days(offset)))
        .collect()
}

/// Progress for the seven days ending at `end`, oldest first
pub fn week_progress(habits: &[Habit], end: NaiveDate) -> Vec<DailyProgress> {
    progress_window(habits, end, 7)
}

/// Consecutive days ending at `today` on which the habit was completed
///
/// Zero if `today` itself has no completed record.
pub fn current_streak(habit: &Habit, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = today;
    while is_completed_on(habit, day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

/// The Monday-start week containing `today`
pub fn week_dates(today: NaiveDate) -> [NaiveDate; 7] {
    let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    std::array::from_fn(|i| monday + Duration::days(i as i64))
}

/// Mean mood score over the seven days ending at `today`
pub fn weekly_mood_average(entries: &[MoodEntry], today: NaiveDate) -> Option<f64> {
    let start = today - Duration::days(6);
    let scores: Vec<f64> = entries
        .iter()
        .filter(|e| {
            let day = calendar_day(e.date);
            day >= start && day <= today
        })
        .map(|e| e.score as f64)
        .collect();

    if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}

/// Mood entries grouped by calendar day, newest day first
///
/// Entries within a day keep their logged order.
pub fn mood_entries_by_day(entries: &[MoodEntry]) -> Vec<(NaiveDate, Vec<&MoodEntry>)> {
    let mut grouped: BTreeMap<NaiveDate, Vec<&MoodEntry>> = BTreeMap::new();
    for entry in entries {
        grouped.entry(calendar_day(entry.date)).or_default().push(entry);
    }
    grouped.into_iter().rev().collect()
}
