//! stderr logging for the CLI
//!
//! `RUST_LOG` wins when set; otherwise the `-v` count picks the level.

use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};

pub fn init(verbosity: u8) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(level_for(verbosity))?
        .log_to_stderr()
        .format(flexi_logger::colored_default_format)
        .start()
}

fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
