pub mod db;
pub mod errors;
pub mod form;
pub mod logging;
pub mod session;

pub use db::models::LogRow;
pub use db::operations::AddedWorkout;
pub use errors::{LogError, ValidationError};
pub use form::{NewWorkout, SetInput, WorkoutForm};
pub use session::Session;

#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
#[cfg(feature = "uniffi")]
pub mod uniffi_interface;
