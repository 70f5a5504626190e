// Console Logger
//
// Terminal output of the command-line tools. Info lines (one per rewritten
// file, stage banners, counts) are the tool's report and go to stdout
// unprefixed so they can be piped; diagnostics go to stderr prefixed with
// their level. Each message is written under the stream lock so lines from
// concurrent workers never interleave.

use super::logger::{LogLevel, Logger};
use std::io::{self, Write};

pub struct ConsoleLogger {
    level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Render `msg` as written to its stream, without the newline.
    pub fn format(level: LogLevel, msg: &str) -> String {
        match level {
            LogLevel::Info => msg.to_string(),
            _ => format!("{}: {}", level, msg),
        }
    }
}

impl Logger for ConsoleLogger {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn log(&self, level: LogLevel, msg: &str) {
        let line = Self::format(level, msg);
        // Write failures (a closed pipe) are ignored.
        let _ = if level == LogLevel::Info {
            writeln!(io::stdout().lock(), "{}", line)
        } else {
            writeln!(io::stderr().lock(), "{}", line)
        };
    }
}
