use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;
use log::{debug, info, warn};
use std::collections::BTreeSet;

use crate::{
    db::models::{LogRow, NewExerciseLog, NewSetRecord, NewWorkoutLog},
    db::schema::{exercise_logs, sets, workout_logs},
    errors::{LogError, Result},
    form::NewWorkout,
};

/// Sort key turning the stored MM-DD-YYYY text into YYYYMMDD.
const CHRONOLOGICAL_DATE: &str = "substr(workout_logs.date, 7, 4) \
    || substr(workout_logs.date, 1, 2) \
    || substr(workout_logs.date, 4, 2)";

/// Identifiers and counts of a freshly stored workout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedWorkout {
    pub workout_log_id: i32,
    pub exercise_log_id: i32,
    pub set_count: usize,
}

// Workout logs
/// Writes one workout log, its exercise and every set in a single transaction.
pub fn insert_workout(conn: &mut SqliteConnection, workout: &NewWorkout) -> Result<AddedWorkout> {
    let date = workout.date_text();

    conn.transaction::<_, LogError, _>(|conn| {
        let workout_log_id = diesel::insert_into(workout_logs::table)
            .values(&NewWorkoutLog {
                date: &date,
                workout_day_type: &workout.workout_day_type,
            })
            .returning(workout_logs::id)
            .get_result::<i32>(conn)?;

        let exercise_log_id = diesel::insert_into(exercise_logs::table)
            .values(&NewExerciseLog {
                workout_log_id,
                exercise: &workout.exercise,
            })
            .returning(exercise_logs::id)
            .get_result::<i32>(conn)?;

        let new_sets: Vec<NewSetRecord> = workout
            .sets
            .iter()
            .zip(1..)
            .map(|(set, set_number)| NewSetRecord {
                exercise_log_id,
                set_number,
                reps: set.reps,
                weight_used: set.weight,
            })
            .collect();

        let set_count = if new_sets.is_empty() {
            0
        } else {
            diesel::insert_into(sets::table)
                .values(&new_sets)
                .execute(conn)?
        };

        info!(
            "Added workout log {} ({} {}, {}) with {} sets",
            workout_log_id, date, workout.workout_day_type, workout.exercise, set_count
        );

        Ok(AddedWorkout {
            workout_log_id,
            exercise_log_id,
            set_count,
        })
    })
}

/// Cascade-deletes every distinct id in `ids` inside one transaction.
///
/// Returns the number of workout logs that existed and were removed. An empty
/// `ids` yields [`LogError::NothingSelected`]; a missing id is not an error.
pub fn delete_workout_logs(conn: &mut SqliteConnection, ids: &[i32]) -> Result<usize> {
    if ids.is_empty() {
        warn!("Delete requested with no workout logs selected");
        return Err(LogError::NothingSelected);
    }
    let unique: BTreeSet<i32> = ids.iter().copied().collect();

    conn.transaction::<_, LogError, _>(|conn| {
        let mut removed = 0;
        for id in unique {
            if delete_cascade(conn, id)? {
                removed += 1;
            }
        }
        Ok(removed)
    })
}

fn delete_cascade(conn: &mut SqliteConnection, workout_log_id: i32) -> Result<bool> {
    let owned_exercises = exercise_logs::table
        .filter(exercise_logs::workout_log_id.eq(workout_log_id))
        .select(exercise_logs::id);

    let set_rows =
        diesel::delete(sets::table.filter(sets::exercise_log_id.eq_any(owned_exercises)))
            .execute(conn)?;
    let exercise_rows = diesel::delete(
        exercise_logs::table.filter(exercise_logs::workout_log_id.eq(workout_log_id)),
    )
    .execute(conn)?;
    let log_rows = diesel::delete(workout_logs::table.find(workout_log_id)).execute(conn)?;

    if log_rows == 0 {
        debug!("Workout log {} not found, nothing to delete", workout_log_id);
    } else {
        info!(
            "Deleted workout log {} ({} exercises, {} sets)",
            workout_log_id, exercise_rows, set_rows
        );
    }
    Ok(log_rows > 0)
}

// Display rows
/// Every set joined with its exercise and workout log, newest date first.
pub fn list_log_rows(conn: &mut SqliteConnection) -> Result<Vec<LogRow>> {
    let rows = workout_logs::table
        .inner_join(exercise_logs::table.inner_join(sets::table))
        .select((
            workout_logs::id,
            workout_logs::date,
            workout_logs::workout_day_type,
            exercise_logs::exercise,
            sets::set_number,
            sets::reps,
            sets::weight_used,
        ))
        .order_by(sql::<Text>(CHRONOLOGICAL_DATE).desc())
        .then_order_by(workout_logs::workout_day_type.asc())
        .then_order_by(exercise_logs::exercise.asc())
        .then_order_by(sets::set_number.asc())
        .then_order_by(workout_logs::id.asc())
        .load::<LogRow>(conn)?;

    debug!("Loaded {} log rows", rows.len());
    Ok(rows)
}

/// Rows whose date, workout day type or exercise contains `query`, ignoring
/// case. Results keep the [`list_log_rows`] order.
///
/// Matching happens here rather than in SQL because SQLite only folds ASCII
/// case in `LIKE` and `lower()`.
pub fn search_log_rows(conn: &mut SqliteConnection, query: &str) -> Result<Vec<LogRow>> {
    let mut rows = list_log_rows(conn)?;
    let needle = query.to_lowercase();
    if !needle.is_empty() {
        rows.retain(|row| row.matches(&needle));
    }
    debug!("{} log rows match {:?}", rows.len(), query);
    Ok(rows)
}
