// Kept in sync by hand with migrations/*/up.sql.

diesel::table! {
    workout_logs (id) {
        id -> Integer,
        date -> Text,
        workout_day_type -> Text,
    }
}

diesel::table! {
    exercise_logs (id) {
        id -> Integer,
        workout_log_id -> Integer,
        exercise -> Text,
    }
}

diesel::table! {
    sets (id) {
        id -> Integer,
        exercise_log_id -> Integer,
        set_number -> Integer,
        reps -> Integer,
        weight_used -> Double,
    }
}

diesel::joinable!(exercise_logs -> workout_logs (workout_log_id));
diesel::joinable!(sets -> exercise_logs (exercise_log_id));

diesel::allow_tables_to_appear_in_same_query!(exercise_logs, sets, workout_logs,);
