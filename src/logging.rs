//! A minimal stderr logger behind the `log` facade. Library code only ever
//! logs through the macros; installing this logger is the binary's choice.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

pub struct SimpleLogger;

static LOGGER: SimpleLogger = SimpleLogger;

impl SimpleLogger {
    /// Installs the logger with the given maximum level. Fails if another
    /// logger is already installed.
    pub fn init(max_level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_logger(&LOGGER).map(|()| log::set_max_level(max_level))
    }
}

impl Log for SimpleLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] [{}] {}", record.target(), record.level(), record.args());
        }
    }

    fn flush(&self) {}
}
