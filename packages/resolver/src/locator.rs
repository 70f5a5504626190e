//! File Locator
//!
//! Maps an extension-less module path to the TypeScript source it names.

use crate::file_system::{AbsoluteFsPath, ReadonlyFileSystem};

/// Suffixes probed, in priority order, for a TypeScript source.
const SOURCE_CANDIDATES: [&str; 4] = [".ts", ".tsx", "/index.ts", "/index.tsx"];

/// Suffixes that mark a module as existing outside the scanned sources.
const OPAQUE_CANDIDATES: [&str; 2] = [".js", "/index.d.ts"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Located {
    /// A TypeScript source the scanner can read.
    File(AbsoluteFsPath),
    /// The module exists but is not TypeScript source (plain JS, type
    /// declarations). Resolution stops here without error.
    Opaque,
    NotFound,
}

impl Located {
    pub fn file(&self) -> Option<&AbsoluteFsPath> {
        match self {
            Located::File(path) => Some(path),
            _ => None,
        }
    }
}

/// Find the source file `base` refers to.
pub fn locate(fs: &dyn ReadonlyFileSystem, base: &str) -> Located {
    if fs.extname(base) == ".js" {
        return Located::Opaque;
    }

    for suffix in SOURCE_CANDIDATES {
        let candidate = AbsoluteFsPath::new(format!("{}{}", base, suffix));
        if fs.is_file(&candidate) {
            return Located::File(candidate);
        }
    }

    let opaque = OPAQUE_CANDIDATES
        .iter()
        .any(|suffix| fs.exists(&AbsoluteFsPath::new(format!("{}{}", base, suffix))));
    if opaque {
        Located::Opaque
    } else {
        Located::NotFound
    }
}
