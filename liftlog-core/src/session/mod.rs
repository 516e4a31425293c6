//! Session module: the application state handed to every front end.
//!
//! A [`Session`] knows where the database lives and exposes the workout
//! operations (add, delete, list, search). Each call opens its own connection
//! and closes it before returning.

mod rows;
mod session;
mod workout;

pub use session::Session;
