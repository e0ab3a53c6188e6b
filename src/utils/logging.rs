//! Logging setup for the dashboard binary and tests

use log::LevelFilter;

/// Initialize the logger at INFO.
/// The RUST_LOG environment variable can override the default level.
pub fn init_logger() {
    init_logger_with_level(LevelFilter::Info);
}

/// Initialize the logger with `level` as the default.
/// Lines start with `\r` so they stay aligned while the terminal is in raw mode.
/// Calling this more than once is harmless.
pub fn init_logger_with_level(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    let result = builder
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "\r[{} {:5} {}] {}",
                buf.timestamp(),
                record.level(),
                record.module_path().unwrap_or("triphase"),
                record.args()
            )
        })
        .try_init();

    // A second call keeps the logger that is already installed
    if let Err(e) = result {
        log::debug!("logger already initialized: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_keeps_first_logger() {
        init_logger_with_level(LevelFilter::Warn);
        let level = log::max_level();

        init_logger_with_level(LevelFilter::Trace);
        init_logger();
        assert_eq!(log::max_level(), level);
    }
}
