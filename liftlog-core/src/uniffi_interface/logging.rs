use crate::logging::Target;

#[uniffi::export]
pub fn set_debug_log_level() {
    crate::logging::init_logger(log::LevelFilter::Trace, Target::Stdout);
}

#[uniffi::export]
pub fn set_log_level(level: &str) -> bool {
    crate::logging::set_log_level(level, Target::Stdout)
}
