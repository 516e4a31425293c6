use diesel::{Insertable, Queryable};
use serde::Serialize;
use std::fmt;

use crate::db::schema;

// Workout log models
#[derive(Insertable)]
#[diesel(table_name = schema::workout_logs)]
pub struct NewWorkoutLog<'a> {
    pub date: &'a str,
    pub workout_day_type: &'a str,
}

// Exercise log models
#[derive(Insertable)]
#[diesel(table_name = schema::exercise_logs)]
pub struct NewExerciseLog<'a> {
    pub workout_log_id: i32,
    pub exercise: &'a str,
}

// Set models
#[derive(Insertable)]
#[diesel(table_name = schema::sets)]
pub struct NewSetRecord {
    pub exercise_log_id: i32,
    pub set_number: i32,
    pub reps: i32,
    pub weight_used: f64,
}

/// One displayed row: a set joined with its exercise and workout log.
///
/// Field order matches the select tuple in [`crate::db::operations`].
#[derive(Queryable, Serialize, Debug, Clone, PartialEq)]
pub struct LogRow {
    pub log_id: i32,
    pub date: String,
    pub workout_day_type: String,
    pub exercise: String,
    pub set_number: i32,
    pub reps: i32,
    pub weight_used: f64,
}

impl LogRow {
    /// Whether the date, workout day type or exercise contains `needle`,
    /// which must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        [&self.date, &self.workout_day_type, &self.exercise]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl fmt::Display for LogRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} - {}: set {} {} reps x {:.1}lbs",
            self.log_id,
            self.date,
            self.workout_day_type,
            self.exercise,
            self.set_number,
            self.reps,
            self.weight_used
        )
    }
}
