use core::fmt;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::Once;

/// Where formatted log lines go, usually the debug console.
pub type Sink = fn(fmt::Arguments);

struct Logger;

static SINK: Once<Sink> = Once::new();

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(sink) = SINK.get() {
            sink(format_args!("{} {}\n", level_tag(record.level()), record.args()));
        }
    }

    fn flush(&self) {}
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "\x1b[31merror\x1b[0m",
        Level::Warn => "\x1b[93mwarn \x1b[0m",
        Level::Info => "\x1b[34minfo \x1b[0m",
        Level::Debug => "\x1b[35mdebug\x1b[0m",
        Level::Trace => "\x1b[96mtrace\x1b[0m",
    }
}

static LOGGER: Logger = Logger;

/// Installs the kernel logger. The first registered sink wins.
pub fn init(sink: Sink, level: LevelFilter) -> Result<(), SetLoggerError> {
    SINK.call_once(|| sink);
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}
