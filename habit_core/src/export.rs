//! CSV export of completion history.

use crate::{Habit, Result};
use std::fs::File;
use std::path::Path;

const HEADER: [&str; 7] = [
    "habit_id",
    "habit_name",
    "date",
    "day",
    "completed",
    "mood",
    "notes",
];

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    habit_id: &'a str,
    habit_name: &'a str,
    date: String,
    day: String,
    completed: bool,
    mood: Option<u8>,
    notes: Option<&'a str>,
}

/// Write one row per completion record to `path`, replacing any existing file
///
/// Rows are ordered by calendar day, then habit name. Returns the number
/// of rows written.
pub fn export_completions_csv(habits: &[Habit], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut rows: Vec<CsvRow<'_>> = habits
        .iter()
        .flat_map(|habit| {
            habit.completions.iter().map(move |c| CsvRow {
                habit_id: &habit.id,
                habit_name: &habit.name,
                date: c.date.to_rfc3339(),
                day: c.day().to_string(),
                completed: c.completed,
                mood: c.mood,
                notes: c.notes.as_deref(),
            })
        })
        .collect();
    rows.sort_by(|a, b| a.day.cmp(&b.day).then_with(|| a.habit_name.cmp(b.habit_name)));

    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.write_record(HEADER)?;
    for row in &rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    file.sync_all()?;

    tracing::info!("Exported {} completions to {:?}", rows.len(), path);
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::parse_timestamp;
    use crate::{HabitCategory, HabitCompletion, HabitFrequency, NewHabit};
    use chrono::Utc;

    fn habit_with(name: &str, days: &[(&str, bool)]) -> Habit {
        let mut h = NewHabit::new(name, HabitCategory::Health, HabitFrequency::Daily)
            .into_habit(format!("id-{}", name), Utc::now());
        h.completions = days
            .iter()
            .map(|(d, done)| HabitCompletion {
                date: parse_timestamp(d).unwrap(),
                completed: *done,
                mood: Some(3),
                notes: None,
            })
            .collect();
        h
    }

    #[test]
    fn test_export_rows_sorted() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out").join("completions.csv");

        let habits = vec![
            habit_with("Water", &[("2024-01-11", true), ("2024-01-10", true)]),
            habit_with("Stretch", &[("2024-01-10", false)]),
        ];

        let count = export_completions_csv(&habits, &path).unwrap();
        assert_eq!(count, 3);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), HEADER.to_vec());

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 3);
        assert_eq!(&records[0][1], "Stretch");
        assert_eq!(&records[0][3], "2024-01-10");
        assert_eq!(&records[0][4], "false");
        assert_eq!(&records[1][1], "Water");
        assert_eq!(&records[2][3], "2024-01-11");
    }

    #[test]
    fn test_export_empty_writes_header_only() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("empty.csv");

        let count = export_completions_csv(&[], &path).unwrap();
        assert_eq!(count, 0);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.trim(), HEADER.join(","));
    }
}
