mod interactive;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use log::debug;
use std::env;

use liftlog::db::resolve_database_url;
use liftlog::form::today;
use liftlog::logging::{Target, init_logger, parse_level};
use liftlog::{LogError, LogRow, Session, WorkoutForm};

#[derive(Parser, Debug)]
#[command(version, about = "Workout Log - record, search and delete workout sets", long_about = None)]
struct Args {
    /// SQLite database file [default: $DATABASE_URL, then workout_logs.db]
    #[arg(short, long, global = true)]
    database: Option<String>,
    /// off, error, warn, info, debug or trace
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive form and log table (the default)
    Interactive,
    /// Record one exercise and its sets
    Add {
        /// Date as MM-DD-YYYY
        #[arg(long, default_value_t = today())]
        date: String,
        /// Workout day type, e.g. Push, Pull, Leg
        #[arg(short = 't', long = "type", default_value = "")]
        workout_day_type: String,
        #[arg(short, long, default_value = "")]
        exercise: String,
        /// Set values as reps/weight pairs: `10 135 8 145`
        #[arg(value_name = "REPS WEIGHT", allow_negative_numbers = true)]
        sets: Vec<String>,
    },
    /// Delete workout logs and everything recorded under them
    Delete {
        #[arg(value_name = "LOG_ID")]
        ids: Vec<i32>,
    },
    /// List every recorded set, latest date first
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show sets whose date, workout type or exercise contains QUERY
    Search {
        #[arg(default_value = "")]
        query: String,
        #[arg(long)]
        json: bool,
    },
}

fn print_rows(rows: &[LogRow], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }
    if rows.is_empty() {
        println!("No workout logs found.");
        return Ok(());
    }

    println!(
        "{:>5}  {:<10}  {:<16}  {:<24}  {:>3}  {:>4}  {:>12}",
        "ID", "Date", "Workout Day Type", "Exercise", "Set", "Reps", "Weight (lbs)"
    );
    for row in rows {
        println!(
            "{:>5}  {:<10}  {:<16}  {:<24}  {:>3}  {:>4}  {:>12.1}",
            row.log_id,
            row.date,
            row.workout_day_type,
            row.exercise,
            row.set_number,
            row.reps,
            row.weight_used
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();

    let level = parse_level(&args.log_level)
        .ok_or_else(|| anyhow!("unknown log level: {}", args.log_level))?;
    init_logger(level, Target::Stderr);

    let database_url =
        resolve_database_url(args.database.as_deref(), env::var("DATABASE_URL").ok());
    debug!("Resolved database location: {}", database_url);
    let session = Session::open(&database_url)?;

    match args.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            let terminal = ratatui::init();
            let result = interactive::run(terminal, session);
            ratatui::restore();
            result
        }
        Commands::Add {
            date,
            workout_day_type,
            exercise,
            sets,
        } => {
            let form = WorkoutForm {
                date,
                workout_day_type,
                exercise,
                set_fields: sets,
            };
            let added = session.add_workout(&form)?;
            println!(
                "Workout log added! (log #{}, {} sets)",
                added.workout_log_id, added.set_count
            );
            Ok(())
        }
        Commands::Delete { ids } => match session.delete_workouts(&ids) {
            Ok(removed) => {
                println!("Selected log(s) deleted successfully ({} removed)", removed);
                Ok(())
            }
            Err(e @ LogError::NothingSelected) => {
                eprintln!("Warning: {}", e);
                Ok(())
            }
            Err(e) => Err(e.into()),
        },
        Commands::List { json } => print_rows(&session.list_rows()?, json),
        Commands::Search { query, json } => print_rows(&session.search_rows(&query)?, json),
    }
}
