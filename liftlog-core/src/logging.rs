use log::{LevelFilter, Record};
use std::io::Write;

pub use env_logger::Target;

/// Installs the process-wide logger writing to `target`. Later calls only
/// adjust the level.
///
/// The terminal UI owns stdout, so the CLI logs to [`Target::Stderr`].
pub fn init_logger(level: LevelFilter, target: Target) {
    let _ = env_logger::Builder::new()
        .format(|buf, record| writeln!(buf, "{}", format_line(record)))
        .target(target)
        .filter_level(level)
        .try_init();

    log::set_max_level(level);
}

/// `LEVEL: target - message`
fn format_line(record: &Record) -> String {
    format!("{}: {} - {}", record.level(), record.target(), record.args())
}

pub fn parse_level(level: &str) -> Option<LevelFilter> {
    let lvl = match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => return None,
    };
    Some(lvl)
}

/// Sets the log level from its name. Returns `false` for unknown names.
pub fn set_log_level(level: &str, target: Target) -> bool {
    match parse_level(level) {
        Some(lvl) => {
            init_logger(lvl, target);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_are_case_insensitive() {
        assert_eq!(parse_level("WARNING"), Some(LevelFilter::Warn));
        assert_eq!(parse_level("Debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn unknown_level_is_refused() {
        assert!(!set_log_level("verbose", Target::Stderr));
        assert!(set_log_level("error", Target::Stderr));
    }

    #[test]
    fn lines_carry_level_and_target() {
        let line = format_line(
            &Record::builder()
                .level(log::Level::Warn)
                .target("liftlog::db")
                .args(format_args!("No item selected"))
                .build(),
        );
        assert_eq!(line, "WARN: liftlog::db - No item selected");
    }
}
