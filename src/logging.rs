//! Logger setup.
//!
//! The library only uses the `log` facade; binaries call [`init_logging`] once
//! to install a `fern` dispatcher that writes to stdout.

/// Formats one record as `[HH:MM:SS.mmm LEVEL target] message`.
fn format_line(time: &str, level: log::Level, target: &str, message: &std::fmt::Arguments) -> String {
    format!("[{} {:<5} {}] {}", time, level, target, message)
}

/// Installs the global logger.
///
/// Fails if a logger has already been installed.
pub fn init_logging(level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            let time = chrono::Local::now().format("%H:%M:%S%.3f").to_string();
            out.finish(format_args!(
                "{}",
                format_line(&time, record.level(), record.target(), message)
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .apply()?;

    log::debug!("logging initialized at {}", level);
    Ok(())
}
