//! Logging setup for the binary.

use log::LevelFilter;

/// Maps the `-d` count to a level. Without `-d`, `RUST_LOG` decides and
/// falls back to warnings only.
pub fn log_level(debug: u8) -> Option<LevelFilter> {
    match debug {
        0 => None,
        1 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

pub fn init_logging(debug: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = log_level(debug) {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).format_target(false);

    if let Err(e) = builder.try_init() {
        eprintln!("Note: Logger already configured: {}", e);
    }
}
