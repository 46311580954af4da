use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

/// Initialize the logging system with timestamp, level, and message formatting.
///
/// Format: `[YYYY-MM-DD HH:MM:SS] [LEVEL] message`
///
/// Safe to call more than once; only the first call installs the logger.
pub fn init_logger(level: LevelFilter) {
    let _ = Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(level)
        .try_init();
}
