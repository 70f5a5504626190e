//! Resolver Errors

use thiserror::Error;

/// Failures raised while resolving and rewriting declarations.
///
/// Soft outcomes (an opaque package specifier, a wildcard boundary, a name
/// that is never declared) are not errors: they end resolution with the best
/// reference found so far.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A relative specifier points at nothing the locator recognizes.
    #[error("Not found: {base} (imported as \"{specifier}\" from {from})")]
    UnresolvableRelativeImport {
        specifier: String,
        from: String,
        base: String,
    },

    /// Following `name` revisited a (file, specifier) pair already on the chain.
    #[error("cyclic re-export of `{name}` via \"{specifier}\" in {file}")]
    CyclicReExport {
        name: String,
        file: String,
        specifier: String,
    },

    #[error("cannot access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration {path}: {message}")]
    Config { path: String, message: String },
}

impl ResolveError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        ResolveError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error must abort the whole run rather than a single file.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ResolveError::CyclicReExport { .. })
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;
