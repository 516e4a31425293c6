use crate::db::models::LogRow;
use crate::form::WorkoutForm;

#[derive(uniffi::Record, Debug, Clone)]
pub struct LogRowRecord {
    pub log_id: i32,
    pub date: String,
    pub workout_day_type: String,
    pub exercise: String,
    pub set_number: i32,
    pub reps: i32,
    pub weight_used: f64,
}

impl From<LogRow> for LogRowRecord {
    fn from(r: LogRow) -> Self {
        LogRowRecord {
            log_id: r.log_id,
            date: r.date,
            workout_day_type: r.workout_day_type,
            exercise: r.exercise,
            set_number: r.set_number,
            reps: r.reps,
            weight_used: r.weight_used,
        }
    }
}

/// Raw entry form values; `set_fields` alternates reps and weight.
#[derive(uniffi::Record, Debug, Clone)]
pub struct WorkoutFormRecord {
    pub date: String,
    pub workout_day_type: String,
    pub exercise: String,
    pub set_fields: Vec<String>,
}

impl From<WorkoutFormRecord> for WorkoutForm {
    fn from(f: WorkoutFormRecord) -> Self {
        WorkoutForm {
            date: f.date,
            workout_day_type: f.workout_day_type,
            exercise: f.exercise,
            set_fields: f.set_fields,
        }
    }
}

impl From<WorkoutForm> for WorkoutFormRecord {
    fn from(f: WorkoutForm) -> Self {
        WorkoutFormRecord {
            date: f.date,
            workout_day_type: f.workout_day_type,
            exercise: f.exercise,
            set_fields: f.set_fields,
        }
    }
}

/// A blank form dated today with one reps/weight pair.
#[uniffi::export]
pub fn blank_workout_form() -> WorkoutFormRecord {
    WorkoutForm::new().into()
}
