#![deny(clippy::all)]

/**
 * Import Resolver
 *
 * Canonicalizes import/export declarations across a tree of TypeScript
 * sources: a name imported through a chain of re-exporting modules is
 * re-pointed at the module that actually declares it.
 */
pub mod alias;
pub mod config;
pub mod declarations;
pub mod error;
pub mod file_system;
pub mod locator;
pub mod logging;
pub mod resolver;
pub mod rewriter;

// Re-exports
pub use alias::{PackageAlias, PackageAliasTranslator, ScopedPackageTranslator};
pub use config::DoNotRewrite;
pub use error::{ResolveError, Result};
pub use resolver::{Resolution, ResolvedReference, Resolver};
pub use rewriter::Rewriter;

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
