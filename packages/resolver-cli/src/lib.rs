#![deny(clippy::all)]

/**
 * Import Resolver CLI
 *
 * Batch driver, repository service and command-line tools built on the
 * import resolver.
 */
pub use import_resolver as resolver;

pub mod config;
pub mod count;
pub mod driver;
pub mod formatter;
pub mod main_entry;
pub mod service;
pub mod walk;

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
