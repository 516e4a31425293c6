//! The workout entry form and its validation.
//!
//! [`WorkoutForm`] holds exactly what the user typed. [`WorkoutForm::validate`]
//! turns it into a [`NewWorkout`] ready for storage, or the first
//! [`ValidationError`] that applies.

use chrono::{Local, NaiveDate};

use crate::errors::ValidationError;

pub const DATE_FORMAT: &str = "%m-%d-%Y";

/// Raw field values of the entry form.
///
/// `set_fields` is the flattened list of set inputs: reps, weight, reps, weight, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutForm {
    pub date: String,
    pub workout_day_type: String,
    pub exercise: String,
    pub set_fields: Vec<String>,
}

impl Default for WorkoutForm {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkoutForm {
    /// A blank form dated today with room for one set.
    pub fn new() -> Self {
        Self {
            date: today(),
            workout_day_type: String::new(),
            exercise: String::new(),
            set_fields: vec![String::new(), String::new()],
        }
    }

    /// Appends an empty reps/weight pair.
    pub fn add_set_input(&mut self) {
        self.set_fields.push(String::new());
        self.set_fields.push(String::new());
    }

    pub fn set_count(&self) -> usize {
        self.set_fields.len().div_ceil(2)
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn validate(&self) -> Result<NewWorkout, ValidationError> {
        if self.set_fields.len() % 2 != 0 {
            return Err(ValidationError::IncompleteSet);
        }

        let date = parse_date(&self.date)?;

        let workout_day_type = self.workout_day_type.trim();
        let exercise = self.exercise.trim();
        if workout_day_type.is_empty() || exercise.is_empty() {
            return Err(ValidationError::MissingField);
        }

        // A log without sets never shows up in the joined rows.
        if self.set_fields.is_empty() {
            return Err(ValidationError::NoSets);
        }

        let sets = self
            .set_fields
            .chunks_exact(2)
            .enumerate()
            .map(|(idx, pair)| SetInput::parse(&pair[0], &pair[1], idx + 1))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NewWorkout {
            date,
            workout_day_type: workout_day_type.to_string(),
            exercise: exercise.to_string(),
            sets,
        })
    }
}

/// One validated set, in submission order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetInput {
    pub reps: i32,
    pub weight: f64,
}

impl SetInput {
    fn parse(reps: &str, weight: &str, set_number: usize) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidSetValue { set_number };
        let reps: i32 = reps.trim().parse().map_err(|_| invalid())?;
        let weight: f64 = weight.trim().parse().map_err(|_| invalid())?;
        if reps < 0 || !weight.is_finite() || weight < 0.0 {
            return Err(invalid());
        }
        Ok(Self { reps, weight })
    }
}

/// A workout ready to be written: one log, one exercise, its sets.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub date: NaiveDate,
    pub workout_day_type: String,
    pub exercise: String,
    pub sets: Vec<SetInput>,
}

impl NewWorkout {
    /// The date as stored: zero-padded MM-DD-YYYY.
    pub fn date_text(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Parses an MM-DD-YYYY date. Single-digit month and day are accepted, the year
/// must be four digits.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    let four_digit_year = raw
        .rsplit('-')
        .next()
        .is_some_and(|year| year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()));
    if !four_digit_year {
        return Err(ValidationError::InvalidDate);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate)
}

pub fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}
