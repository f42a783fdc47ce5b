use clap::{Args, Parser, Subcommand};
use lift_core::catalog::capitalize_words;
use lift_core::*;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "lift")]
#[command(about = "Weight-training exercise library and progress log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Don't seed the default exercise library into an empty store
    #[arg(long, global = true)]
    no_seed: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the exercise library
    Exercise {
        #[command(subcommand)]
        action: ExerciseCommand,
    },

    /// Assemble workouts from exercises
    Workout {
        #[command(subcommand)]
        action: WorkoutCommand,
    },

    /// Log weight, reps and sets for an exercise
    Log {
        /// Exercise id
        #[arg(long)]
        exercise: u64,

        #[arg(long, allow_negative_numbers = true)]
        weight: f64,

        #[arg(long)]
        reps: u32,

        #[arg(long)]
        sets: u32,

        /// Workout session this entry belongs to
        #[arg(long)]
        workout: Option<u64>,
    },

    /// Show weight history for an exercise, newest first
    Progress {
        /// Exercise id
        #[arg(long)]
        exercise: u64,
    },

    /// Export the whole weight log to CSV
    Export {
        #[arg(long)]
        output: PathBuf,
    },

    /// Add any missing exercises from the default library
    Seed,
}

#[derive(Args)]
struct ExerciseFields {
    /// Equipment type (e.g. Barbell, Dumbbell, Cable)
    #[arg(long)]
    equipment: String,

    /// Muscle group (e.g. chest, back, lower body)
    #[arg(long)]
    muscle: String,
}

#[derive(Subcommand)]
enum ExerciseCommand {
    /// Add an exercise to the library
    Add {
        name: String,
        #[command(flatten)]
        fields: ExerciseFields,
    },
    /// Replace all fields of an exercise
    Update {
        id: u64,
        #[arg(long)]
        name: String,
        #[command(flatten)]
        fields: ExerciseFields,
    },
    /// Remove an exercise (workouts and history keep their references)
    Delete { id: u64 },
    /// Show one exercise
    Show { id: u64 },
    /// List exercises sorted by name
    List {
        /// Only exercises with exactly this equipment type
        #[arg(long)]
        equipment: Option<String>,

        /// Only exercises with exactly this muscle group
        #[arg(long)]
        muscle: Option<String>,
    },
}

#[derive(Subcommand)]
enum WorkoutCommand {
    /// Create a workout from exercise ids (order is kept)
    Create {
        name: String,
        #[arg(long = "exercise", required = true)]
        exercises: Vec<u64>,
    },
    /// Replace a workout's name and exercise list
    Update {
        id: u64,
        #[arg(long)]
        name: String,
        #[arg(long = "exercise", required = true)]
        exercises: Vec<u64>,
    },
    /// Remove a workout
    Delete { id: u64 },
    /// Show a workout and its exercises
    Show { id: u64 },
    /// List workouts, newest first
    List,
}

fn main() -> ExitCode {
    lift_core::logging::init_with_level("warn");

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(data_dir) = &cli.data_dir {
        config.data.data_dir = data_dir.clone();
    }

    // Held until the command finishes so concurrent runs don't lose writes
    let _lock = StoreLock::acquire(&config.lock_path())?;
    let service = FitnessService::open(config.store_path())?;
    if config.library.seed_defaults && !cli.no_seed {
        let seeded = service.seed_if_empty()?;
        if seeded > 0 {
            tracing::info!("Seeded {} default exercises", seeded);
        }
    }

    let unit = config.display.weight_unit.as_str();
    match cli.command {
        Commands::Exercise { action } => cmd_exercise(&service, action),
        Commands::Workout { action } => cmd_workout(&service, action),
        Commands::Log {
            exercise,
            weight,
            reps,
            sets,
            workout,
        } => cmd_log(
            &service,
            EntryDraft {
                exercise_id: ExerciseId(exercise),
                weight,
                reps,
                sets,
                workout_id: workout.map(WorkoutId),
            },
            unit,
        ),
        Commands::Progress { exercise } => cmd_progress(&service, ExerciseId(exercise), unit),
        Commands::Export { output } => cmd_export(&service, output),
        Commands::Seed => {
            let created = service.seed_exercises()?;
            println!("✓ Added {} exercises from the default library", created.len());
            Ok(())
        }
    }
}

fn cmd_exercise(service: &FitnessService, action: ExerciseCommand) -> Result<()> {
    match action {
        ExerciseCommand::Add { name, fields } => {
            let draft = ExerciseDraft::new(name, fields.equipment, fields.muscle);
            let id = service.create_exercise(draft)?;
            let exercise = service.get_exercise(id)?;
            println!("✓ Created exercise #{}: {}", id, exercise.name);
        }
        ExerciseCommand::Update { id, name, fields } => {
            let id = ExerciseId(id);
            service.update_exercise(
                id,
                ExerciseDraft::new(name, fields.equipment, fields.muscle),
            )?;
            println!("✓ Updated exercise #{}", id);
        }
        ExerciseCommand::Delete { id } => {
            let id = ExerciseId(id);
            service.delete_exercise(id)?;
            println!("✓ Deleted exercise #{}", id);
        }
        ExerciseCommand::Show { id } => {
            let exercise = service.get_exercise(ExerciseId(id))?;
            println!("{}", describe_exercise(&exercise));
        }
        ExerciseCommand::List { equipment, muscle } => {
            let mut exercises = match &equipment {
                Some(equipment) => service.filter_exercises_by_equipment_type(equipment)?,
                None => match &muscle {
                    Some(muscle) => service.filter_exercises_by_muscle_group(muscle)?,
                    None => service.get_all_exercises_sorted()?,
                },
            };
            if let (Some(_), Some(muscle)) = (&equipment, &muscle) {
                exercises.retain(|e| &e.muscle_group == muscle);
            }

            if exercises.is_empty() {
                println!("No exercises found.");
            }
            for exercise in &exercises {
                println!("{}", describe_exercise(exercise));
            }
        }
    }
    Ok(())
}

fn cmd_workout(service: &FitnessService, action: WorkoutCommand) -> Result<()> {
    match action {
        WorkoutCommand::Create { name, exercises } => {
            let ids = known_exercises(service, &exercises)?;
            let id = service.create_workout(&name, ids)?;
            let workout = service.get_workout(id)?;
            println!("✓ Created workout #{}: {}", id, workout.name);
        }
        WorkoutCommand::Update {
            id,
            name,
            exercises,
        } => {
            let id = WorkoutId(id);
            let ids = known_exercises(service, &exercises)?;
            service.update_workout(id, &name, ids)?;
            println!("✓ Updated workout #{}", id);
        }
        WorkoutCommand::Delete { id } => {
            let id = WorkoutId(id);
            service.delete_workout(id)?;
            println!("✓ Deleted workout #{}", id);
        }
        WorkoutCommand::Show { id } => {
            let id = WorkoutId(id);
            let workout = service.get_workout(id)?;
            let slots = service.resolve_workout_exercises(id)?;

            println!("#{}  {}", workout.id, workout.name);
            println!("  Created: {}", workout.created_at.format("%b %-d, %Y"));
            println!("  {} {}", slots.len(), plural(slots.len(), "exercise", "exercises"));
            for (position, slot) in slots.iter().enumerate() {
                match slot {
                    ExerciseSlot::Found(exercise) => {
                        println!("  {}. {}", position + 1, describe_exercise(exercise))
                    }
                    ExerciseSlot::Missing(exercise_id) => {
                        println!("  {}. exercise #{} not found", position + 1, exercise_id)
                    }
                }
            }
        }
        WorkoutCommand::List => {
            let workouts = service.list_workouts()?;
            if workouts.is_empty() {
                println!("No workouts yet.");
            }
            for workout in &workouts {
                let count = workout.exercise_ids.len();
                println!(
                    "#{}  {}  ({} {}, created {})",
                    workout.id,
                    workout.name,
                    count,
                    plural(count, "exercise", "exercises"),
                    workout.created_at.format("%Y-%m-%d")
                );
            }
        }
    }
    Ok(())
}

fn cmd_log(service: &FitnessService, draft: EntryDraft, unit: &str) -> Result<()> {
    // The front end only offers records that exist; the log itself is lenient
    let exercise = service.get_exercise(draft.exercise_id)?;
    if let Some(workout_id) = draft.workout_id {
        service.get_workout(workout_id)?;
    }

    let (weight, reps, sets) = (draft.weight, draft.reps, draft.sets);
    service.log_weight_entry(draft)?;
    println!(
        "✓ Logged {}: {} {}, {} {} × {} {}",
        exercise.name,
        format_weight(weight),
        unit,
        sets,
        plural(sets as usize, "set", "sets"),
        reps,
        plural(reps as usize, "rep", "reps"),
    );
    Ok(())
}

fn cmd_progress(service: &FitnessService, exercise_id: ExerciseId, unit: &str) -> Result<()> {
    let title = match service.get_exercise(exercise_id) {
        Ok(exercise) => exercise.name,
        Err(e) if e.is_not_found() => format!("exercise #{} (not found)", exercise_id),
        Err(e) => return Err(e),
    };
    let entries = service.get_weight_progress(exercise_id)?;

    println!("{}", title);
    let Some(summary) = ProgressSummary::from_entries(&entries) else {
        println!("  No entries logged yet.");
        return Ok(());
    };

    println!(
        "  {} {} recorded",
        summary.count,
        plural(summary.count, "entry", "entries")
    );
    for (entry, trend) in with_trends(entries) {
        let trend = match trend {
            Some(Trend::Up(diff)) => format!("  +{} {}", format_weight(diff), unit),
            Some(Trend::Down(diff)) => format!("  -{} {}", format_weight(diff), unit),
            Some(Trend::Same) => "  same".to_string(),
            None => String::new(),
        };
        println!(
            "  {}  {} {}  {} sets × {} reps{}",
            entry.date.format("%b %-d, %Y"),
            format_weight(entry.weight),
            unit,
            entry.sets,
            entry.reps,
            trend
        );
    }
    println!(
        "  Best: {} {}  Net change: {} {}  Volume: {} {}",
        format_weight(summary.best_weight),
        unit,
        format_weight(summary.net_change()),
        unit,
        format_weight(summary.total_volume),
        unit
    );
    Ok(())
}

fn cmd_export(service: &FitnessService, output: PathBuf) -> Result<()> {
    let entries = service.list_weight_entries()?;
    let exercises = service.get_all_exercises_sorted()?;
    let count = export_progress_csv(&entries, &exercises, &output)?;

    println!("✓ Exported {} entries", count);
    println!("  CSV: {}", output.display());
    Ok(())
}

/// Check every id against the library, keeping order and duplicates
fn known_exercises(service: &FitnessService, ids: &[u64]) -> Result<Vec<ExerciseId>> {
    ids.iter()
        .map(|&id| service.get_exercise(ExerciseId(id)).map(|e| e.id))
        .collect()
}

fn describe_exercise(exercise: &Exercise) -> String {
    format!(
        "#{}  {}  ({}, {})",
        exercise.id,
        exercise.name,
        exercise.equipment_type,
        capitalize_words(&exercise.muscle_group)
    )
}

fn format_weight(weight: f64) -> String {
    if weight.fract() == 0.0 {
        format!("{:.0}", weight)
    } else {
        format!("{:.1}", weight)
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}
