//! Logging
//!
//! Leveled logger passed explicitly to the rewriter and batch driver.

mod console_logger;
mod logger;

pub use console_logger::ConsoleLogger;
pub use logger::{LogLevel, Logger, MemoryLogger, NullLogger};
