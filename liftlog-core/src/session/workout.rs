//! Adding and deleting workout logs.

use crate::db::operations::{AddedWorkout, delete_workout_logs, insert_workout};
use crate::errors::Result;
use crate::form::WorkoutForm;
use crate::session::Session;

impl Session {
    /// Validate the form and store it as one workout log.
    ///
    /// Validation failures return before the database is touched.
    pub fn add_workout(&self, form: &WorkoutForm) -> Result<AddedWorkout> {
        let workout = form.validate()?;
        let mut conn = self.connect()?;
        insert_workout(&mut conn, &workout)
    }

    /// Delete the given workout logs with everything they own.
    ///
    /// An empty selection yields [`crate::LogError::NothingSelected`].
    pub fn delete_workouts(&self, workout_log_ids: &[i32]) -> Result<usize> {
        let mut conn = self.connect()?;
        delete_workout_logs(&mut conn, workout_log_ids)
    }
}
