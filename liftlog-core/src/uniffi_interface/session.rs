use crate::form::WorkoutForm;
use crate::session::Session;
use crate::uniffi_interface::errors::WorkoutLogError;
use crate::uniffi_interface::objects::{LogRowRecord, WorkoutFormRecord};
use log::*;
use std::sync::Arc;

#[derive(uniffi::Object)]
pub struct WorkoutLogSession {
    inner: Session,
}

#[uniffi::export]
impl WorkoutLogSession {
    #[uniffi::constructor]
    pub fn open(database_url: String) -> Result<Arc<Self>, WorkoutLogError> {
        let inner = Session::open(&database_url)?;
        Ok(Arc::new(Self { inner }))
    }

    /// Returns the id of the new workout log.
    pub fn add_workout(&self, form: WorkoutFormRecord) -> Result<i32, WorkoutLogError> {
        debug!("Adding workout from foreign form: {:?}", form);
        let form: WorkoutForm = form.into();
        let added = self.inner.add_workout(&form)?;
        Ok(added.workout_log_id)
    }

    pub fn delete_workouts(&self, workout_log_ids: Vec<i32>) -> Result<u32, WorkoutLogError> {
        let removed = self.inner.delete_workouts(&workout_log_ids)?;
        Ok(removed as u32)
    }

    pub fn list_rows(&self) -> Result<Vec<LogRowRecord>, WorkoutLogError> {
        let rows = self.inner.list_rows()?;
        Ok(rows.into_iter().map(LogRowRecord::from).collect())
    }

    pub fn search_rows(&self, query: String) -> Result<Vec<LogRowRecord>, WorkoutLogError> {
        let rows = self.inner.search_rows(&query)?;
        Ok(rows.into_iter().map(LogRowRecord::from).collect())
    }
}
