//! The habit store: single owner of habits, mood entries and preferences.
//!
//! Every mutation updates the in-memory state first and then writes the
//! whole document to storage. Mutations referencing an unknown habit id
//! are silent no-ops, and a failed write is only logged; the in-memory
//! state stays authoritative either way.

use crate::storage::{FileStorage, KeyValueStorage, MemoryStorage, STORAGE_KEY};
use crate::{
    generate_id, schedule, templates, AiCoachStyle, Habit, HabitCompletion, HabitPatch,
    HabitState, MoodEntry, NewHabit, Result,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::PathBuf;

/// Accepted persisted shapes: the bare document, or one wrapped in a
/// `{ "state": ..., "version": n }` envelope (the version is ignored)
#[derive(Deserialize)]
#[serde(untagged)]
enum PersistedDocument {
    Envelope { state: HabitState },
    Bare(HabitState),
}

impl PersistedDocument {
    fn into_state(self) -> HabitState {
        match self {
            PersistedDocument::Envelope { state } => state,
            PersistedDocument::Bare(state) => state,
        }
    }
}

/// Decode a persisted document
pub fn decode_state(contents: &str) -> Result<HabitState> {
    let doc: PersistedDocument = serde_json::from_str(contents)?;
    Ok(doc.into_state())
}

/// Encode the store document
pub fn encode_state(state: &HabitState) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

/// State-owning store, constructed once at startup and passed by reference
pub struct HabitStore<S: KeyValueStorage = FileStorage> {
    state: HabitState,
    storage: S,
}

impl HabitStore<FileStorage> {
    /// Open the store kept in `data_dir`
    pub fn open_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self::open(FileStorage::new(data_dir))
    }
}

impl HabitStore<MemoryStorage> {
    /// A store that never touches the disk
    pub fn in_memory() -> Self {
        Self::open(MemoryStorage::new())
    }
}

impl<S: KeyValueStorage> HabitStore<S> {
    /// Rehydrate from `storage`, falling back to defaults if the slot is
    /// missing or unreadable
    pub fn open(storage: S) -> Self {
        let state = match storage.get_item(STORAGE_KEY) {
            Ok(Some(contents)) => match decode_state(&contents) {
                Ok(state) => {
                    tracing::debug!(
                        "Loaded {} habits and {} mood entries",
                        state.habits.len(),
                        state.mood_entries.len()
                    );
                    state
                }
                Err(e) => {
                    tracing::warn!("Failed to parse stored state: {}. Starting fresh.", e);
                    HabitState::default()
                }
            },
            Ok(None) => {
                tracing::info!("No stored state found, using default state");
                HabitState::default()
            }
            Err(e) => {
                tracing::warn!("Unable to read stored state: {}. Starting fresh.", e);
                HabitState::default()
            }
        };

        Self { state, storage }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn state(&self) -> &HabitState {
        &self.state
    }

    pub fn habits(&self) -> &[Habit] {
        &self.state.habits
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.state.habits.iter().find(|h| h.id == id)
    }

    pub fn mood_entries(&self) -> &[MoodEntry] {
        &self.state.mood_entries
    }

    pub fn ai_coach_style(&self) -> AiCoachStyle {
        self.state.ai_coach_style
    }

    pub fn is_premium(&self) -> bool {
        self.state.is_premium
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Append a new habit and return its freshly generated id
    pub fn add_habit(&mut self, new: NewHabit) -> String {
        let id = generate_id();
        let habit = new.into_habit(id.clone(), Utc::now());
        tracing::info!("Adding habit {} ({})", habit.name, id);
        self.state.habits.push(habit);
        self.persist();
        id
    }

    /// Add a habit seeded from a built-in template
    pub fn add_habit_from_template(&mut self, template_id: &str) -> Result<String> {
        let new = templates::new_habit_from_template(template_id)?;
        Ok(self.add_habit(new))
    }

    pub fn remove_habit(&mut self, id: &str) {
        let before = self.state.habits.len();
        self.state.habits.retain(|h| h.id != id);
        if self.state.habits.len() == before {
            tracing::debug!("remove_habit: no habit {}", id);
        }
        self.persist();
    }

    pub fn update_habit(&mut self, id: &str, patch: HabitPatch) {
        match self.habit_mut(id) {
            Some(habit) => patch.apply_to(habit),
            None => tracing::debug!("update_habit: no habit {}", id),
        }
        self.persist();
    }

    /// Mark `id` done on the calendar day of `date`
    ///
    /// An existing record for that day is replaced, so repeating the call
    /// never creates a second record. Empty notes are dropped.
    pub fn complete_habit(
        &mut self,
        id: &str,
        date: DateTime<Utc>,
        mood: Option<u8>,
        notes: Option<String>,
    ) {
        let completion = HabitCompletion {
            date,
            completed: true,
            mood,
            notes: notes.filter(|n| !n.is_empty()),
        };

        match self.habit_mut(id) {
            Some(habit) => {
                let day = schedule::calendar_day(date);
                match habit.completion_on_mut(day) {
                    Some(existing) => *existing = completion,
                    None => habit.completions.push(completion),
                }
                tracing::debug!("Completed habit {} on {}", id, day);
            }
            None => tracing::debug!("complete_habit: no habit {}", id),
        }
        self.persist();
    }

    /// Clear the done flag for the calendar day of `date`, keeping mood and notes
    pub fn uncomplete_habit(&mut self, id: &str, date: DateTime<Utc>) {
        let day = schedule::calendar_day(date);
        match self
            .habit_mut(id)
            .and_then(|habit| habit.completion_on_mut(day))
        {
            Some(existing) => {
                existing.completed = false;
                tracing::debug!("Uncompleted habit {} on {}", id, day);
            }
            None => tracing::debug!("uncomplete_habit: nothing recorded for {} on {}", id, day),
        }
        self.persist();
    }

    /// Append a mood entry stamped with the current time
    ///
    /// The score is not range checked here.
    pub fn add_mood_entry(&mut self, score: u8, note: Option<String>) -> String {
        let id = generate_id();
        self.state.mood_entries.push(MoodEntry {
            id: id.clone(),
            date: Utc::now(),
            score,
            note,
        });
        self.persist();
        id
    }

    pub fn set_ai_coach_style(&mut self, style: AiCoachStyle) {
        self.state.ai_coach_style = style;
        self.persist();
    }

    pub fn set_premium_status(&mut self, status: bool) {
        self.state.is_premium = status;
        self.persist();
    }

    fn habit_mut(&mut self, id: &str) -> Option<&mut Habit> {
        self.state.habits.iter_mut().find(|h| h.id == id)
    }

    fn persist(&mut self) {
        let result =
            encode_state(&self.state).and_then(|doc| self.storage.set_item(STORAGE_KEY, &doc));
        if let Err(e) = result {
            tracing::warn!("Failed to persist state: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::parse_timestamp;
    use crate::{stats, Error, HabitCategory, HabitFrequency};
    use chrono::NaiveDate;

    fn drink_water() -> NewHabit {
        let mut new = NewHabit::new("Drink Water", HabitCategory::Health, HabitFrequency::Daily);
        new.description = "One glass".into();
        new
    }

    fn ts(s: &str) -> DateTime<Utc> {
        parse_timestamp(s).unwrap()
    }

    /// Storage whose writes always fail
    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Storage("disk on fire".into()))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Storage("disk on fire".into()))
        }
    }

    #[test]
    fn test_add_habit_to_empty_store() {
        crate::logging::init_test();
        let mut store = HabitStore::in_memory();

        let id = store.add_habit(drink_water());

        assert_eq!(store.habits().len(), 1);
        let habit = &store.habits()[0];
        assert_eq!(habit.id, id);
        assert!(!habit.id.is_empty());
        assert_eq!(habit.name, "Drink Water");
        assert!(habit.completions.is_empty());

        let any_day = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert_eq!(stats::total_scheduled(store.habits(), any_day), 1);
        assert_eq!(stats::total_completed(store.habits(), any_day), 0);
    }

    #[test]
    fn test_add_habit_ids_are_distinct() {
        let mut store = HabitStore::in_memory();
        let a = store.add_habit(drink_water());
        let b = store.add_habit(drink_water());
        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_habit() {
        let mut store = HabitStore::in_memory();
        let keep = store.add_habit(drink_water());
        let gone = store.add_habit(drink_water());

        store.remove_habit(&gone);
        assert_eq!(store.habits().len(), 1);
        assert_eq!(store.habits()[0].id, keep);

        // Unknown id is a no-op
        store.remove_habit("nope");
        assert_eq!(store.habits().len(), 1);
    }

    #[test]
    fn test_update_habit_merges_fields() {
        let mut store = HabitStore::in_memory();
        let id = store.add_habit(drink_water());
        let created_at = store.habit(&id).unwrap().created_at;

        store.update_habit(
            &id,
            HabitPatch {
                name: Some("Drink Two Glasses".into()),
                color: Some("#60A5FA".into()),
                ..Default::default()
            },
        );

        let habit = store.habit(&id).unwrap();
        assert_eq!(habit.name, "Drink Two Glasses");
        assert_eq!(habit.color.as_deref(), Some("#60A5FA"));
        assert_eq!(habit.description, "One glass");
        assert_eq!(habit.created_at, created_at);

        let before = store.state().clone();
        store.update_habit(
            "missing",
            HabitPatch {
                name: Some("x".into()),
                ..Default::default()
            },
        );
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_same_day_completion_updates_in_place() {
        let mut store = HabitStore::in_memory();
        let id = store.add_habit(drink_water());

        store.complete_habit(&id, ts("2024-01-10T09:00:00Z"), None, None);
        store.complete_habit(&id, ts("2024-01-10T18:00:00Z"), None, None);

        let habit = store.habit(&id).unwrap();
        assert_eq!(habit.completions.len(), 1);
        assert!(habit.completions[0].completed);
        assert_eq!(habit.completions[0].date, ts("2024-01-10T18:00:00Z"));
    }

    #[test]
    fn test_same_day_completion_replaces_mood_and_notes() {
        let mut store = HabitStore::in_memory();
        let id = store.add_habit(drink_water());

        store.complete_habit(&id, ts("2024-01-10T09:00:00Z"), Some(5), Some("x".into()));
        store.complete_habit(&id, ts("2024-01-10T12:00:00Z"), None, None);

        let habit = store.habit(&id).unwrap();
        assert_eq!(habit.completions.len(), 1);
        assert!(habit.completions[0].completed);
        assert_eq!(habit.completions[0].mood, None);
        assert_eq!(habit.completions[0].notes, None);
    }

    #[test]
    fn test_complete_is_idempotent() {
        let mut store = HabitStore::in_memory();
        let id = store.add_habit(drink_water());
        let date = ts("2024-01-10T09:00:00Z");

        store.complete_habit(&id, date, Some(4), Some("easy".into()));
        let once = store.habit(&id).unwrap().completions.clone();
        store.complete_habit(&id, date, Some(4), Some("easy".into()));
        let twice = store.habit(&id).unwrap().completions.clone();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_complete_on_different_days_appends() {
        let mut store = HabitStore::in_memory();
        let id = store.add_habit(drink_water());

        store.complete_habit(&id, ts("2024-01-10"), None, None);
        store.complete_habit(&id, ts("2024-01-11"), None, None);

        assert_eq!(store.habit(&id).unwrap().completions.len(), 2);
    }

    #[test]
    fn test_complete_drops_empty_notes() {
        let mut store = HabitStore::in_memory();
        let id = store.add_habit(drink_water());

        store.complete_habit(&id, ts("2024-01-10"), Some(3), Some(String::new()));

        let c = &store.habit(&id).unwrap().completions[0];
        assert_eq!(c.mood, Some(3));
        assert_eq!(c.notes, None);
    }

    #[test]
    fn test_complete_unknown_habit_is_noop() {
        let mut store = HabitStore::in_memory();
        store.add_habit(drink_water());
        let before = store.state().clone();

        store.complete_habit("ghost", ts("2024-01-10"), None, None);
        store.uncomplete_habit("ghost", ts("2024-01-10"));

        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_uncomplete_keeps_mood_and_notes() {
        let mut store = HabitStore::in_memory();
        let id = store.add_habit(drink_water());

        store.complete_habit(
            &id,
            ts("2024-01-10T09:00:00Z"),
            Some(5),
            Some("felt great".into()),
        );
        store.uncomplete_habit(&id, ts("2024-01-10T21:00:00Z"));

        let habit = store.habit(&id).unwrap();
        assert_eq!(habit.completions.len(), 1);
        let c = &habit.completions[0];
        assert!(!c.completed);
        assert_eq!(c.mood, Some(5));
        assert_eq!(c.notes.as_deref(), Some("felt great"));
    }

    #[test]
    fn test_uncomplete_without_record_is_noop() {
        let mut store = HabitStore::in_memory();
        let id = store.add_habit(drink_water());

        store.uncomplete_habit(&id, ts("2024-01-10"));

        assert!(store.habit(&id).unwrap().completions.is_empty());
    }

    #[test]
    fn test_add_mood_entry_appends() {
        let mut store = HabitStore::in_memory();
        store.add_mood_entry(2, None);
        let first = store.mood_entries()[0].clone();

        let before = Utc::now();
        store.add_mood_entry(4, Some("felt okay".into()));

        assert_eq!(store.mood_entries().len(), 2);
        assert_eq!(store.mood_entries()[0], first);
        let entry = &store.mood_entries()[1];
        assert_eq!(entry.score, 4);
        assert_eq!(entry.note.as_deref(), Some("felt okay"));
        assert!(entry.date >= before);
        assert_ne!(entry.id, first.id);
    }

    #[test]
    fn test_preferences() {
        let mut store = HabitStore::in_memory();
        assert_eq!(store.ai_coach_style(), AiCoachStyle::Empathetic);
        assert!(!store.is_premium());

        store.set_ai_coach_style(AiCoachStyle::Cozy);
        store.set_premium_status(true);

        assert_eq!(store.ai_coach_style(), AiCoachStyle::Cozy);
        assert!(store.is_premium());
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let mut store = HabitStore::in_memory();
        store.set_premium_status(true);

        let doc = store.storage().get_item(STORAGE_KEY).unwrap().unwrap();
        assert_eq!(decode_state(&doc).unwrap(), *store.state());
    }

    #[test]
    fn test_persistence_roundtrip_through_files() {
        let temp_dir = tempfile::tempdir().unwrap();

        let expected = {
            let mut store = HabitStore::open_dir(temp_dir.path());
            let id = store.add_habit(drink_water());
            let mut custom =
                NewHabit::new("Sketch", HabitCategory::Creativity, HabitFrequency::Custom);
            custom.custom_days = Some(vec![1, 3, 5]);
            custom.icon = Some("pen".into());
            custom.reminder_time = Some("08:30".into());
            store.add_habit(custom);
            store.complete_habit(&id, ts("2024-01-10T09:00:00Z"), Some(4), Some("ok".into()));
            store.add_mood_entry(3, Some("meh".into()));
            store.set_ai_coach_style(AiCoachStyle::Wise);
            store.set_premium_status(true);
            store.state().clone()
        };

        let reopened = HabitStore::open_dir(temp_dir.path());
        assert_eq!(reopened.state(), &expected);
    }

    #[test]
    fn test_corrupted_document_falls_back_to_defaults() {
        let store = HabitStore::open(MemoryStorage::with_item(STORAGE_KEY, "{ invalid json }"));
        assert_eq!(store.state(), &HabitState::default());
    }

    #[test]
    fn test_unreadable_storage_falls_back_and_keeps_working() {
        crate::logging::init_test();
        let mut store = HabitStore::open(BrokenStorage);
        assert_eq!(store.state(), &HabitState::default());

        // Writes fail, but in-memory state is still updated
        let id = store.add_habit(drink_water());
        store.complete_habit(&id, ts("2024-01-10"), None, None);
        assert_eq!(store.habit(&id).unwrap().completions.len(), 1);
    }

    #[test]
    fn test_envelope_document_is_accepted() {
        let doc = r#"{
            "state": {
                "habits": [{
                    "id": "abc123",
                    "name": "Posture Check",
                    "description": "Sit up",
                    "category": "health",
                    "frequency": "weekdays",
                    "isTemplate": false,
                    "createdAt": "2024-01-01T08:00:00.000Z",
                    "completions": [
                        { "date": "2024-01-02T10:00:00.000Z", "completed": true, "mood": 4 }
                    ]
                }],
                "moodEntries": [],
                "aiCoachStyle": "playful",
                "isPremium": false
            },
            "version": 0
        }"#;

        let store = HabitStore::open(MemoryStorage::with_item(STORAGE_KEY, doc));
        assert_eq!(store.habits().len(), 1);
        assert_eq!(store.habits()[0].frequency, HabitFrequency::Weekdays);
        assert_eq!(store.habits()[0].completions[0].mood, Some(4));
        assert_eq!(store.ai_coach_style(), AiCoachStyle::Playful);
    }

    #[test]
    fn test_bare_day_dates_are_accepted() {
        let doc = r#"{
            "state": {
                "habits": [
                    {
                        "id": "h1",
                        "name": "Drink Water",
                        "category": "health",
                        "frequency": "daily",
                        "createdAt": "2024-01-01T08:00:00.000Z",
                        "completions": [
                            { "date": "2024-01-10", "completed": true },
                            { "date": "2024-01-11T07:30:00.000Z", "completed": false, "mood": 2 }
                        ]
                    },
                    {
                        "id": "h2",
                        "name": "Stretch",
                        "category": "fitness",
                        "frequency": "weekdays",
                        "createdAt": "2024-01-02",
                        "completions": []
                    }
                ],
                "moodEntries": [{ "id": "m1", "date": "2024-01-10", "score": 5 }],
                "aiCoachStyle": "cozy",
                "isPremium": true
            },
            "version": 0
        }"#;

        let store = HabitStore::open(MemoryStorage::with_item(STORAGE_KEY, doc));
        assert_eq!(store.habits().len(), 2);
        assert_eq!(store.mood_entries().len(), 1);
        assert!(store.is_premium());
        assert_eq!(store.ai_coach_style(), AiCoachStyle::Cozy);

        let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(stats::total_completed(store.habits(), day), 1);
        assert_eq!(store.habits()[0].completions[0].date, ts("2024-01-10T00:00:00Z"));
        assert_eq!(store.mood_entries()[0].date, ts("2024-01-10"));
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let store = HabitStore::open(MemoryStorage::with_item(
            STORAGE_KEY,
            r#"{"isPremium": true}"#,
        ));
        assert!(store.is_premium());
        assert!(store.habits().is_empty());
        assert_eq!(store.ai_coach_style(), AiCoachStyle::Empathetic);
    }

    #[test]
    fn test_add_from_template() {
        let mut store = HabitStore::in_memory();
        let id = store.add_habit_from_template("template-water").unwrap();

        let habit = store.habit(&id).unwrap();
        assert_eq!(habit.name, "Drink 1 Glass of Water");
        assert_eq!(habit.category, HabitCategory::Health);
        assert_eq!(habit.icon.as_deref(), Some("droplet"));
        assert_ne!(habit.id, "template-water");

        assert!(matches!(
            store.add_habit_from_template("template-nope"),
            Err(Error::TemplateNotFound(_))
        ));
        assert_eq!(store.habits().len(), 1);
    }
}
