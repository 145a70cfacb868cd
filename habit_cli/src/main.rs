use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use habit_core::*;
use habit_core::{encouragement, schedule, stats, templates};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tinyhabits")]
#[command(about = "Tiny habit tracker with mood log and encouragement", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a habit, from scratch or from a template
    Add {
        /// Habit name (defaults to the template name)
        #[arg(required_unless_present = "template")]
        name: Option<String>,

        /// Start from a built-in template (see `templates`)
        #[arg(long)]
        template: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// mindfulness, fitness, productivity, health, creativity, social, custom
        #[arg(long)]
        category: Option<HabitCategory>,

        /// daily, weekdays, weekends, weekly, custom
        #[arg(long)]
        frequency: Option<HabitFrequency>,

        /// Weekday indices for custom frequency, Sunday = 0 (e.g. 1,3,5)
        #[arg(long)]
        days: Option<String>,

        #[arg(long)]
        icon: Option<String>,

        #[arg(long)]
        color: Option<String>,

        /// Preferred time of day (HH:MM)
        #[arg(long)]
        time: Option<String>,

        /// Reminder time (HH:MM); enables the reminder
        #[arg(long)]
        reminder: Option<String>,

        /// Id of a habit to stack this one after
        #[arg(long)]
        linked_to: Option<String>,
    },

    /// List the built-in habit templates
    Templates,

    /// Show habits scheduled for a day (default)
    List {
        /// Day to show (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,

        /// Include habits not scheduled on that day
        #[arg(long)]
        all: bool,
    },

    /// Show one habit with its streak and history
    Show { id: String },

    /// Mark a habit done
    Complete {
        id: String,

        /// Day or timestamp (YYYY-MM-DD or RFC 3339, default now)
        #[arg(long)]
        date: Option<String>,

        /// How it felt, 1-5
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        mood: Option<u8>,

        #[arg(long)]
        note: Option<String>,
    },

    /// Clear the done mark for a day
    Uncomplete {
        id: String,

        /// Day or timestamp (YYYY-MM-DD or RFC 3339, default now)
        #[arg(long)]
        date: Option<String>,
    },

    /// Change fields of a habit
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        category: Option<HabitCategory>,

        #[arg(long)]
        frequency: Option<HabitFrequency>,

        /// Weekday indices for custom frequency, Sunday = 0
        #[arg(long)]
        days: Option<String>,

        #[arg(long)]
        icon: Option<String>,

        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        time: Option<String>,

        #[arg(long)]
        reminder: Option<String>,

        #[arg(long)]
        linked_to: Option<String>,
    },

    /// Delete a habit and its history
    Remove { id: String },

    /// Log how you feel right now (1 Low .. 5 Great)
    Mood {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        score: u8,

        #[arg(long)]
        note: Option<String>,
    },

    /// Show the mood log
    Moods,

    /// Completion summary for a day and the days before it
    Progress {
        /// Last day to show (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Show or set the coach style
    Coach {
        /// playful, empathetic, minimalist, wise, friendly, cozy
        style: Option<AiCoachStyle>,
    },

    /// Turn premium on or off
    Premium { status: Switch },

    /// Write all completion records to a CSV file
    Export { path: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum Switch {
    On,
    Off,
}

fn main() -> Result<()> {
    // Initialize logging
    habit_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);

    let mut store = HabitStore::open_dir(data_dir);

    match cli.command {
        Some(Commands::Add {
            name,
            template,
            description,
            category,
            frequency,
            days,
            icon,
            color,
            time,
            reminder,
            linked_to,
        }) => {
            let new = build_new_habit(
                &config,
                name,
                template,
                HabitPatch {
                    name: None,
                    description,
                    category,
                    frequency,
                    custom_days: parse_days_arg(days.as_deref())?,
                    icon,
                    color,
                    time_of_day: time,
                    reminder_enabled: reminder.as_ref().map(|_| true),
                    reminder_time: reminder,
                    linked_to,
                },
            )?;
            cmd_add(&mut store, new)
        }
        Some(Commands::Templates) => {
            cmd_templates();
            Ok(())
        }
        Some(Commands::List { date, all }) => cmd_list(&store, parse_day_arg(date.as_deref())?, all),
        Some(Commands::Show { id }) => {
            cmd_show(&store, &id);
            Ok(())
        }
        Some(Commands::Complete {
            id,
            date,
            mood,
            note,
        }) => cmd_complete(&mut store, &id, parse_timestamp_arg(date.as_deref())?, mood, note),
        Some(Commands::Uncomplete { id, date }) => {
            cmd_uncomplete(&mut store, &id, parse_timestamp_arg(date.as_deref())?);
            Ok(())
        }
        Some(Commands::Update {
            id,
            name,
            description,
            category,
            frequency,
            days,
            icon,
            color,
            time,
            reminder,
            linked_to,
        }) => {
            let custom_days = parse_days_arg(days.as_deref())?;
            let frequency = frequency.or(custom_days.as_ref().map(|_| HabitFrequency::Custom));
            let patch = HabitPatch {
                name,
                description,
                category,
                frequency,
                custom_days,
                icon,
                color,
                time_of_day: time,
                reminder_enabled: reminder.as_ref().map(|_| true),
                reminder_time: reminder,
                linked_to,
            };
            cmd_update(&mut store, &id, patch);
            Ok(())
        }
        Some(Commands::Remove { id }) => {
            cmd_remove(&mut store, &id);
            Ok(())
        }
        Some(Commands::Mood { score, note }) => {
            cmd_mood(&mut store, score, note);
            Ok(())
        }
        Some(Commands::Moods) => {
            cmd_moods(&store);
            Ok(())
        }
        Some(Commands::Progress { date }) => {
            cmd_progress(&store, parse_day_arg(date.as_deref())?, &config);
            Ok(())
        }
        Some(Commands::Coach { style }) => {
            cmd_coach(&mut store, style);
            Ok(())
        }
        Some(Commands::Premium { status }) => {
            store.set_premium_status(matches!(status, Switch::On));
            if store.is_premium() {
                println!("✓ Premium enabled");
            } else {
                println!("✓ Premium disabled");
            }
            Ok(())
        }
        Some(Commands::Export { path }) => {
            let count = export_completions_csv(store.habits(), &path)?;
            println!("✓ Exported {} completions", count);
            println!("  CSV: {}", path.display());
            Ok(())
        }
        None => {
            // Default to today's list
            cmd_list(&store, today(), false)
        }
    }
}

// ============================================================================
// Argument helpers
// ============================================================================

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn parse_day_arg(date: Option<&str>) -> Result<NaiveDate> {
    date.map(parse_day).unwrap_or_else(|| Ok(today()))
}

fn parse_timestamp_arg(date: Option<&str>) -> Result<DateTime<Utc>> {
    date.map(parse_timestamp).unwrap_or_else(|| Ok(Utc::now()))
}

fn parse_days_arg(days: Option<&str>) -> Result<Option<Vec<u8>>> {
    days.map(schedule::parse_custom_days).transpose()
}

/// Assemble the creation payload from a template and/or command line fields
fn build_new_habit(
    config: &Config,
    name: Option<String>,
    template: Option<String>,
    fields: HabitPatch,
) -> Result<NewHabit> {
    let mut new = match template {
        Some(id) => templates::new_habit_from_template(&id)?,
        None => NewHabit::new(
            String::new(),
            fields.category.unwrap_or(config.defaults.category),
            config.defaults.frequency,
        ),
    };

    let frequency = fields.frequency.or(if fields.custom_days.is_some() {
        Some(HabitFrequency::Custom)
    } else {
        None
    });

    let mut new_name = name.unwrap_or_default();
    if new_name.trim().is_empty() {
        new_name = new.name.clone();
    }
    if new_name.trim().is_empty() {
        return Err(Error::InvalidValue("habit name must not be empty".into()));
    }

    let mut habit_fields = HabitPatch {
        name: Some(new_name.trim().to_string()),
        frequency,
        ..fields
    };
    if new.icon.is_none() && habit_fields.icon.is_none() {
        habit_fields.icon = Some(config.defaults.icon.clone());
    }
    let category = habit_fields.category.unwrap_or(new.category);
    if new.color.is_none() && habit_fields.color.is_none() {
        habit_fields.color = Some(category.default_color().to_string());
    }

    apply_to_new(&mut new, habit_fields);

    if new.frequency == HabitFrequency::Custom
        && new.custom_days.as_ref().map_or(true, |d| d.is_empty())
    {
        return Err(Error::InvalidValue(
            "custom frequency needs --days (e.g. --days 1,3,5)".into(),
        ));
    }

    Ok(new)
}

fn apply_to_new(new: &mut NewHabit, fields: HabitPatch) {
    if let Some(name) = fields.name {
        new.name = name;
    }
    if let Some(description) = fields.description {
        new.description = description;
    }
    if let Some(category) = fields.category {
        new.category = category;
    }
    if let Some(frequency) = fields.frequency {
        new.frequency = frequency;
    }
    if fields.custom_days.is_some() {
        new.custom_days = fields.custom_days;
    }
    if fields.icon.is_some() {
        new.icon = fields.icon;
    }
    if fields.color.is_some() {
        new.color = fields.color;
    }
    if fields.time_of_day.is_some() {
        new.time_of_day = fields.time_of_day;
    }
    if fields.reminder_enabled.is_some() {
        new.reminder_enabled = fields.reminder_enabled;
    }
    if fields.reminder_time.is_some() {
        new.reminder_time = fields.reminder_time;
    }
    if fields.linked_to.is_some() {
        new.linked_to = fields.linked_to;
    }
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_add(store: &mut HabitStore, new: NewHabit) -> Result<()> {
    let name = new.name.clone();
    let frequency = new.frequency;
    let id = store.add_habit(new);

    println!("✓ Added habit: {}", name);
    println!("  id: {}", id);
    println!("  frequency: {}", frequency);
    if frequency == HabitFrequency::Weekly {
        println!("  note: weekly habits are not counted as scheduled on any day yet");
    }
    Ok(())
}

fn cmd_templates() {
    println!("Templates (use `add --template <id>`):");
    println!();
    for t in HABIT_TEMPLATES {
        println!("  {:<22} {}", t.id, t.name);
        println!("  {:<22} {} · {}", "", t.description, t.category.label());
    }
}

fn cmd_list(store: &HabitStore, date: NaiveDate, all: bool) -> Result<()> {
    let habits: Vec<&Habit> = if all {
        store.habits().iter().collect()
    } else {
        stats::scheduled_habits(store.habits(), date)
    };

    println!("{}", date.format("%A, %B %-d"));
    println!();

    if habits.is_empty() {
        if store.habits().is_empty() {
            println!("  No habits yet. Add one with `tinyhabits add <name>`");
            println!("  or pick a template with `tinyhabits templates`.");
        } else {
            println!("  No habits scheduled for this day");
        }
    } else {
        for habit in &habits {
            let mark = if stats::is_completed_on(habit, date) {
                "[x]"
            } else {
                "[ ]"
            };
            let scheduled = if is_scheduled(habit, date) { "" } else { " (not scheduled)" };
            println!("  {} {}{}", mark, habit.name, scheduled);
            println!("      {} · {}", habit.id, habit.frequency);
        }
    }

    let progress = stats::daily_progress(store.habits(), date);
    println!();
    println!(
        "  {} of {} habits completed {}",
        progress.completed,
        progress.scheduled,
        progress_bar(progress.ratio(), 10)
    );

    if !store.is_premium() {
        println!();
        println!("  ✦ Unlock all coach styles and insights with `tinyhabits premium on`");
    }
    Ok(())
}

fn cmd_show(store: &HabitStore, id: &str) {
    let Some(habit) = store.habit(id) else {
        println!("Habit {} not found", id);
        return;
    };
    let today = today();

    println!("{}", habit.name);
    if !habit.description.is_empty() {
        println!("  {}", habit.description);
    }
    println!();
    println!("  category:  {}", habit.category.label());
    match (&habit.frequency, &habit.custom_days) {
        (HabitFrequency::Custom, Some(days)) => {
            let names: Vec<_> = days.iter().map(|d| weekday_name(*d)).collect();
            println!("  frequency: custom ({})", names.join(", "));
        }
        (frequency, _) => println!("  frequency: {}", frequency),
    }
    if let Some(time) = &habit.time_of_day {
        println!("  time:      {}", time);
    }
    if let (Some(true), Some(time)) = (habit.reminder_enabled, &habit.reminder_time) {
        println!("  reminder:  {}", time);
    }
    if let Some(linked) = habit.linked_to.as_deref().and_then(|l| store.habit(l)) {
        println!("  after:     {}", linked.name);
    }
    println!("  created:   {}", habit.created_at.format("%B %-d, %Y"));
    println!("  streak:    {} day(s)", stats::current_streak(habit, today));

    println!();
    print!("  This week: ");
    for day in stats::week_dates(today) {
        let mark = if stats::is_completed_on(habit, day) {
            "●"
        } else {
            "○"
        };
        print!("{} {}  ", day.format("%a"), mark);
    }
    println!();

    let mut history: Vec<&HabitCompletion> = habit.completions.iter().collect();
    history.sort_by(|a, b| b.date.cmp(&a.date));
    if !history.is_empty() {
        println!();
        println!("  History:");
        for c in history.iter().take(14) {
            let mark = if c.completed { "✓" } else { "✗" };
            let mut line = format!("    {} {}", mark, c.day().format("%A, %B %-d"));
            if let Some(label) = c.mood.and_then(mood_label) {
                line.push_str(&format!(" · mood: {}", label));
            }
            if let Some(notes) = &c.notes {
                line.push_str(&format!(" · {}", notes));
            }
            println!("{}", line);
        }
    }
}

fn cmd_complete(
    store: &mut HabitStore,
    id: &str,
    date: DateTime<Utc>,
    mood: Option<u8>,
    note: Option<String>,
) -> Result<()> {
    let Some(name) = store.habit(id).map(|h| h.name.clone()) else {
        println!("Habit {} not found", id);
        return Ok(());
    };

    store.complete_habit(id, date, mood, note);
    let day = calendar_day(date);

    println!("✓ {} done for {}", name, day);
    println!();
    let message = random_encouragement(store.ai_coach_style(), &mut rand::thread_rng());
    println!("  {}", message);

    let progress = stats::daily_progress(store.habits(), day);
    println!();
    println!(
        "  {} of {} habits completed · {}",
        progress.completed,
        progress.scheduled,
        progress.summary()
    );
    Ok(())
}

fn cmd_uncomplete(store: &mut HabitStore, id: &str, date: DateTime<Utc>) {
    let day = calendar_day(date);
    let Some(habit) = store.habit(id) else {
        println!("Habit {} not found", id);
        return;
    };
    if habit.completion_on(day).is_none() {
        println!("Nothing recorded for {} on {}", habit.name, day);
        return;
    }
    let name = habit.name.clone();

    store.uncomplete_habit(id, date);
    println!("✓ {} marked not done for {}", name, day);
}

fn cmd_update(store: &mut HabitStore, id: &str, patch: HabitPatch) {
    if store.habit(id).is_none() {
        println!("Habit {} not found", id);
        return;
    }
    if patch.is_empty() {
        println!("Nothing to update");
        return;
    }

    store.update_habit(id, patch);
    if let Some(habit) = store.habit(id) {
        println!("✓ Updated habit: {}", habit.name);
    }
}

fn cmd_remove(store: &mut HabitStore, id: &str) {
    let Some(name) = store.habit(id).map(|h| h.name.clone()) else {
        println!("Habit {} not found", id);
        return;
    };

    store.remove_habit(id);
    println!("✓ Removed habit: {}", name);
}

fn cmd_mood(store: &mut HabitStore, score: u8, note: Option<String>) {
    store.add_mood_entry(score, note);
    println!(
        "✓ Logged mood: {} ({})",
        mood_label(score).unwrap_or("?"),
        score
    );
}

fn cmd_moods(store: &HabitStore) {
    println!("Weekly mood");
    match stats::weekly_mood_average(store.mood_entries(), today()) {
        Some(avg) => {
            let label = mood_label(avg.round() as u8).unwrap_or("?");
            println!("  You've been feeling {} ({:.1})", label.to_lowercase(), avg);
            println!("  Based on your last 7 days");
        }
        None => {
            println!("  No mood data yet");
            println!("  Start tracking with `tinyhabits mood <1-5>`");
        }
    }

    for (day, entries) in stats::mood_entries_by_day(store.mood_entries()) {
        println!();
        println!("{}", day.format("%A, %B %-d"));
        for entry in entries {
            let mut line = format!(
                "  {}  {}",
                entry.date.format("%H:%M"),
                mood_label(entry.score).unwrap_or("?")
            );
            if let Some(note) = &entry.note {
                line.push_str(&format!(" · {}", note));
            }
            println!("{}", line);
        }
    }
}

fn cmd_progress(store: &HabitStore, date: NaiveDate, config: &Config) {
    let progress = stats::daily_progress(store.habits(), date);

    println!("Your progress · {}", date.format("%A, %B %-d"));
    println!();
    println!(
        "  {} of {} habits completed {} {:.0}%",
        progress.completed,
        progress.scheduled,
        progress_bar(progress.ratio(), 10),
        progress.ratio() * 100.0
    );
    println!("  {}", progress.summary());
    println!();

    for day in stats::progress_window(store.habits(), date, config.display.history_days) {
        println!(
            "  {} {}  {} {}/{}",
            day.date.format("%a"),
            day.date.format("%d"),
            progress_bar(day.ratio(), 5),
            day.completed,
            day.scheduled
        );
    }
}

fn cmd_coach(store: &mut HabitStore, style: Option<AiCoachStyle>) {
    if let Some(style) = style {
        store.set_ai_coach_style(style);
        println!("✓ Coach style set to {}", encouragement::style_title(style));
        println!(
            "  \"{}\"",
            encouragement::encouragements(style)
                .first()
                .copied()
                .unwrap_or_default()
        );
        return;
    }

    let current = store.ai_coach_style();
    println!("Coach styles:");
    for style in AiCoachStyle::ALL {
        let marker = if style == current { "●" } else { "○" };
        println!(
            "  {} {:<11} {}",
            marker,
            style.as_str(),
            encouragement::style_title(style)
        );
        println!("    {:<11} {}", "", encouragement::style_description(style));
    }
}

// ============================================================================
// Rendering helpers
// ============================================================================

fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn weekday_name(index: u8) -> &'static str {
    match index {
        0 => "Sun",
        1 => "Mon",
        2 => "Tue",
        3 => "Wed",
        4 => "Thu",
        5 => "Fri",
        6 => "Sat",
        _ => "?",
    }
}
