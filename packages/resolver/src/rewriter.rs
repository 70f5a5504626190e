//! Declaration Rewriter
//!
//! Re-points every name of every declaration in a file at the module that
//! really declares it, grouping relocated names into new declarations and
//! leaving all other text untouched.

use crate::alias::PackageAliasTranslator;
use crate::config::DoNotRewrite;
use crate::declarations::{parse, unparse, Declaration, DeclarationNames, ImportName, NameList, Span};
use crate::error::{ResolveError, Result};
use crate::file_system::{AbsoluteFsPath, FileSystem};
use crate::logging::{Logger, NullLogger};
use crate::resolver::Resolver;
use indexmap::IndexMap;

static NULL_LOGGER: NullLogger = NullLogger;

pub struct Rewriter<'a, F: FileSystem> {
    fs: &'a F,
    resolver: Resolver<'a, F>,
    do_not_rewrite: &'a DoNotRewrite,
    logger: &'a dyn Logger,
    dry_run: bool,
}

impl<'a, F: FileSystem> Rewriter<'a, F> {
    pub fn new(
        fs: &'a F,
        translator: &'a dyn PackageAliasTranslator,
        packages_dir: impl Into<String>,
        do_not_rewrite: &'a DoNotRewrite,
    ) -> Self {
        Self {
            fs,
            resolver: Resolver::new(fs, translator, packages_dir),
            do_not_rewrite,
            logger: &NULL_LOGGER,
            dry_run: false,
        }
    }

    pub fn with_logger(mut self, logger: &'a dyn Logger) -> Self {
        self.resolver = self.resolver.with_logger(logger);
        self.logger = logger;
        self
    }

    /// Report modifications without writing them.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn resolver(&self) -> &Resolver<'a, F> {
        &self.resolver
    }

    /// Rewrite `path` in place. Returns whether the file was (or, in a dry
    /// run, would have been) modified.
    pub fn rewrite_file(&self, path: &AbsoluteFsPath) -> Result<bool> {
        let code = self
            .fs
            .read_file(path)
            .map_err(|e| ResolveError::io(path.as_str(), e))?;

        let Some(rewritten) = self.rewrite_source(path, &code)? else {
            return Ok(false);
        };

        self.logger.info(&format!("Resolved imports in {}", path));
        if !self.dry_run {
            self.fs
                .write_file(path, rewritten.as_bytes())
                .map_err(|e| ResolveError::io(path.as_str(), e))?;
        }
        Ok(true)
    }

    /// Rewrite `code`, the content of `path`. `None` when no name moved.
    pub fn rewrite_source(&self, path: &AbsoluteFsPath, code: &str) -> Result<Option<String>> {
        let mut did_rewrite = false;
        let mut result = Vec::new();

        for span in parse(code) {
            let decl = match span {
                Span::Declaration(decl) if !decl.is_wildcard() => decl,
                other => {
                    result.push(other);
                    continue;
                }
            };

            let (groups, kept) = self.regroup(path, &decl)?;
            did_rewrite |= !groups.is_empty();

            for (target, names) in groups {
                result.push(Span::Declaration(Declaration {
                    kind: decl.kind,
                    is_type: decl.is_type,
                    names: DeclarationNames::Named(names),
                    path: target,
                }));
                result.push(Span::Literal("\n".to_string()));
            }
            if !kept.is_empty() {
                result.push(Span::Declaration(Declaration {
                    names: DeclarationNames::Named(kept),
                    ..decl
                }));
            }
        }

        Ok(did_rewrite.then(|| unparse(&result)))
    }

    /// Split the names of `decl` into relocated groups (by target specifier,
    /// in first-seen order) and the names that stay.
    fn regroup(&self, path: &AbsoluteFsPath, decl: &Declaration) -> Result<(IndexMap<String, NameList>, NameList)> {
        let mut groups: IndexMap<String, NameList> = IndexMap::new();
        let mut kept = NameList::new();

        let Some(names) = decl.name_list() else {
            return Ok((groups, kept));
        };

        for name in names {
            let Some(resolution) = self.resolver.resolve_binding(path, &decl.path, &name.name)? else {
                kept.push(name.clone());
                continue;
            };
            let target = self.resolver.to_specifier(path, &resolution.reference);
            if target == decl.path || self.do_not_rewrite.contains(&decl.path, &target) {
                kept.push(name.clone());
                continue;
            }

            self.logger
                .debug(&format!("{}: {} -> {} in {}", name.name, decl.path, target, path));
            groups
                .entry(target)
                .or_default()
                .push(relocated(name, &resolution.exported_name));
        }

        Ok((groups, kept))
    }
}

/// `name` as imported from the module exporting it as `exported_name`,
/// keeping the binding visible in the rewritten file.
fn relocated(name: &ImportName, exported_name: &str) -> ImportName {
    let binding = name.binding();
    ImportName {
        name: exported_name.to_string(),
        alias: (binding != exported_name).then(|| binding.to_string()),
        is_type: name.is_type,
    }
}
