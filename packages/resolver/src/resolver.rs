//! Re-export Resolver
//!
//! Follows the chain of re-exports, relative imports and package aliases
//! behind an imported name until it reaches the module that actually
//! declares it, or until nothing further can be followed.

use crate::alias::PackageAliasTranslator;
use crate::declarations::parse_file;
use crate::error::{ResolveError, Result};
use crate::file_system::{
    is_relative_specifier, strip_ts_suffix, to_relative_specifier, AbsoluteFsPath, ReadonlyFileSystem,
};
use crate::locator::{locate, Located};
use crate::logging::{Logger, NullLogger};
use std::collections::HashSet;

static NULL_LOGGER: NullLogger = NullLogger;

/// Where a name was found to live.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolvedReference {
    /// A package specifier such as `@scope/pkg/sub`. Once one is seen it is
    /// kept in preference to any file reached through it.
    Package(String),
    /// A TypeScript source file.
    File(AbsoluteFsPath),
}

/// A resolved reference together with the name the referenced module
/// exports the binding under. Re-exports with `as` make it differ from the
/// name originally imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub reference: ResolvedReference,
    pub exported_name: String,
}

pub struct Resolver<'a, F: ReadonlyFileSystem> {
    fs: &'a F,
    translator: &'a dyn PackageAliasTranslator,
    packages_dir: String,
    logger: &'a dyn Logger,
}

impl<'a, F: ReadonlyFileSystem> Resolver<'a, F> {
    /// `packages_dir` holds one directory per package, each with a `src/` tree.
    pub fn new(fs: &'a F, translator: &'a dyn PackageAliasTranslator, packages_dir: impl Into<String>) -> Self {
        Self {
            fs,
            translator,
            packages_dir: packages_dir.into(),
            logger: &NULL_LOGGER,
        }
    }

    pub fn with_logger(mut self, logger: &'a dyn Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Resolve `name`, imported by `importing_file` from `specifier`, to the
    /// specifier that should be used instead.
    ///
    /// `None` means nothing could be followed at all; the caller keeps the
    /// original specifier.
    pub fn resolve(&self, importing_file: &AbsoluteFsPath, specifier: &str, name: &str) -> Result<Option<String>> {
        Ok(self
            .resolve_reference(importing_file, specifier, name)?
            .map(|reference| self.to_specifier(importing_file, &reference)))
    }

    /// Like [`Resolver::resolve`], but returns the raw reference.
    pub fn resolve_reference(
        &self,
        importing_file: &AbsoluteFsPath,
        specifier: &str,
        name: &str,
    ) -> Result<Option<ResolvedReference>> {
        Ok(self
            .resolve_binding(importing_file, specifier, name)?
            .map(|resolution| resolution.reference))
    }

    /// Follow `name` to its defining module, tracking renames along the way.
    pub fn resolve_binding(
        &self,
        importing_file: &AbsoluteFsPath,
        specifier: &str,
        name: &str,
    ) -> Result<Option<Resolution>> {
        let mut current_file = importing_file.clone();
        let mut current_specifier = specifier.to_string();
        let mut current_name = name.to_string();
        let mut best_known: Option<Resolution> = None;
        let mut visited: HashSet<(AbsoluteFsPath, String, String)> = HashSet::new();

        loop {
            if !visited.insert((current_file.clone(), current_specifier.clone(), current_name.clone())) {
                return Err(ResolveError::CyclicReExport {
                    name: current_name,
                    file: current_file.into_string(),
                    specifier: current_specifier,
                });
            }

            let target = if is_relative_specifier(&current_specifier) {
                let dir = self.fs.dirname(current_file.as_str());
                let base = self.fs.join(&dir, &[current_specifier.as_str()]);
                match locate(self.fs, &base) {
                    Located::File(path) => {
                        let package_known = matches!(
                            best_known,
                            Some(Resolution {
                                reference: ResolvedReference::Package(_),
                                ..
                            })
                        );
                        if !package_known {
                            best_known = Some(Resolution {
                                reference: ResolvedReference::File(path.clone()),
                                exported_name: current_name.clone(),
                            });
                        }
                        Some(path)
                    }
                    Located::Opaque => None,
                    Located::NotFound => {
                        return Err(ResolveError::UnresolvableRelativeImport {
                            specifier: current_specifier,
                            from: current_file.into_string(),
                            base,
                        })
                    }
                }
            } else {
                let Some(alias) = self.translator.translate(&current_specifier) else {
                    return Ok(best_known);
                };
                best_known = Some(Resolution {
                    reference: ResolvedReference::Package(current_specifier.clone()),
                    exported_name: current_name.clone(),
                });
                let base = alias.source_base(self.fs, &self.packages_dir);
                locate(self.fs, &base).file().cloned()
            };

            let Some(target) = target else {
                return Ok(best_known);
            };
            self.logger
                .debug(&format!("{}: \"{}\" -> {}", current_name, current_specifier, target));

            // The target provides `current_name` under its local binding; the
            // chain continues with the source name of that entry. Wildcards
            // bind nothing and so end the chain.
            let parsed = parse_file(self.fs, &target)?;
            let Some((next, entry)) = parsed
                .declarations()
                .find_map(|decl| decl.binding_for(&current_name).map(|entry| (decl, entry)))
            else {
                return Ok(best_known);
            };
            current_specifier = next.path.clone();
            current_name = entry.name.clone();
            current_file = target;
        }
    }

    /// Render `reference` as a specifier usable from `importing_file`.
    pub fn to_specifier(&self, importing_file: &AbsoluteFsPath, reference: &ResolvedReference) -> String {
        match reference {
            ResolvedReference::Package(specifier) => specifier.clone(),
            ResolvedReference::File(path) => {
                let dir = self.fs.dirname(importing_file.as_str());
                let relative = self.fs.relative(&dir, path.as_str());
                to_relative_specifier(&strip_ts_suffix(&relative))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::{NoPackageAliases, ScopedPackageTranslator};
    use crate::file_system::testing::MockFileSystem;

    fn path(p: &str) -> AbsoluteFsPath {
        AbsoluteFsPath::new(p)
    }

    #[test]
    fn normalizes_file_references_relative_to_importer() {
        let fs = MockFileSystem::new();
        let resolver = Resolver::new(&fs, &NoPackageAliases, "/packages");
        let importer = path("/src/app/a.ts");

        let cases = [
            ("/src/app/c.ts", "./c"),
            ("/src/app/index.ts", "."),
            ("/src/lib/index.tsx", "../lib"),
            ("/src/app/nested/d.tsx", "./nested/d"),
            ("/src/index.ts", ".."),
        ];
        for (file, expected) in cases {
            let reference = ResolvedReference::File(path(file));
            assert_eq!(resolver.to_specifier(&importer, &reference), expected, "{}", file);
        }
    }

    #[test]
    fn package_references_are_returned_verbatim() {
        let fs = MockFileSystem::new();
        let resolver = Resolver::new(&fs, &NoPackageAliases, "/packages");
        let reference = ResolvedReference::Package("@glide/common".to_string());
        assert_eq!(resolver.to_specifier(&path("/src/a.ts"), &reference), "@glide/common");
    }

    #[test]
    fn unknown_package_on_first_step_resolves_to_nothing() {
        let fs = MockFileSystem::with_files(&[("/src/a.ts", "import { x } from \"react\";")]);
        let translator = ScopedPackageTranslator::new("@glide");
        let resolver = Resolver::new(&fs, &translator, "/packages");
        assert_eq!(resolver.resolve(&path("/src/a.ts"), "react", "x").unwrap(), None);
    }
}
