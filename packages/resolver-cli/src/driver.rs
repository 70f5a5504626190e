//! Batch Driver
//!
//! Runs the rewriter over every source below a set of roots on a bounded
//! worker pool. Files are independent; no ordering between them is kept.

use crate::walk::collect_source_files;
use anyhow::Context;
use import_resolver::file_system::{AbsoluteFsPath, FileSystem};
use import_resolver::logging::Logger;
use import_resolver::{DoNotRewrite, PackageAliasTranslator, ResolveError, Rewriter};
use rayon::prelude::*;
use std::collections::BTreeSet;

/// Everything one batch run needs.
pub struct BatchContext<'a, F: FileSystem> {
    pub fs: &'a F,
    pub translator: &'a dyn PackageAliasTranslator,
    pub packages_dir: AbsoluteFsPath,
    pub do_not_rewrite: &'a DoNotRewrite,
    pub logger: &'a dyn Logger,
    pub concurrency: usize,
    pub dry_run: bool,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files rewritten (or that would be, in a dry run).
    pub modified: BTreeSet<AbsoluteFsPath>,
    /// Files left untouched because resolving one of their names failed
    /// without invalidating the run.
    pub failures: Vec<(AbsoluteFsPath, ResolveError)>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Build a pool of `workers` threads (at least one).
pub fn thread_pool(workers: usize) -> anyhow::Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .build()
        .context("failed to start worker pool")
}

/// Rewrite every TypeScript source below `roots`.
///
/// A fatal resolution error (an unresolvable relative import, an I/O
/// failure) aborts the batch and is returned as the error.
pub fn resolve_imports_in_directories<F: FileSystem>(
    ctx: &BatchContext<'_, F>,
    roots: &[AbsoluteFsPath],
) -> anyhow::Result<BatchReport> {
    let files = collect_source_files(ctx.fs, roots).context("failed to list source files")?;
    ctx.logger
        .debug(&format!("found {} source files in {} roots", files.len(), roots.len()));

    let rewriter = Rewriter::new(ctx.fs, ctx.translator, ctx.packages_dir.as_str(), ctx.do_not_rewrite)
        .with_logger(ctx.logger)
        .with_dry_run(ctx.dry_run);

    let pool = thread_pool(ctx.concurrency)?;
    let outcomes: Result<Vec<(AbsoluteFsPath, Result<bool, ResolveError>)>, ResolveError> = pool.install(|| {
        files
            .par_iter()
            .map(|file| match rewriter.rewrite_file(file) {
                Err(err) if err.is_fatal() => Err(err),
                outcome => Ok((file.clone(), outcome)),
            })
            .collect()
    });

    let mut report = BatchReport::default();
    for (file, outcome) in outcomes? {
        match outcome {
            Ok(true) => {
                report.modified.insert(file);
            }
            Ok(false) => {}
            Err(err) => {
                ctx.logger.warn(&format!("Skipped {}: {}", file, err));
                report.failures.push((file, err));
            }
        }
    }
    Ok(report)
}
