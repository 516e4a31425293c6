//! Bindings for a native desktop front end, built with the `uniffi` feature.

pub mod errors;
pub mod logging;
pub mod objects;
pub mod session;
