// Repository Service
//
// Whole-repository pipeline: resolve imports in every package listed in
// `.topological-packages` plus the extra source roots, then format the
// files that changed.

use crate::config::ServiceConfig;
use crate::driver::{resolve_imports_in_directories, BatchContext, BatchReport};
use crate::formatter::run_formatter;
use anyhow::Context;
use import_resolver::file_system::{AbsoluteFsPath, FileSystem};
use import_resolver::logging::Logger;

/// File in the repository root listing package directory names, one per line.
pub const TOPOLOGICAL_PACKAGES_FILE: &str = ".topological-packages";

#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceOptions {
    pub skip_format: bool,
    pub dry_run: bool,
}

/// Package directory names listed in `content`; blank lines are ignored.
pub fn parse_package_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// `<packagesDir>/<name>/src` for every package, then the extra roots.
pub fn source_roots<F: FileSystem>(
    fs: &F,
    repo_root: &AbsoluteFsPath,
    config: &ServiceConfig,
    packages: &[String],
) -> Vec<AbsoluteFsPath> {
    let packages_dir = fs.join(repo_root.as_str(), &[config.packages_dir.as_str()]);
    let package_roots = packages
        .iter()
        .map(|name| AbsoluteFsPath::new(fs.join(&packages_dir, &[name.as_str(), "src"])));
    let extra_roots = config
        .extra_source_roots
        .iter()
        .map(|root| AbsoluteFsPath::new(fs.join(repo_root.as_str(), &[root.as_str()])));
    package_roots.chain(extra_roots).collect()
}

pub fn service<F: FileSystem>(
    fs: &F,
    repo_root: &AbsoluteFsPath,
    config: &ServiceConfig,
    options: ServiceOptions,
    logger: &dyn Logger,
) -> anyhow::Result<BatchReport> {
    let list_path = AbsoluteFsPath::new(fs.join(repo_root.as_str(), &[TOPOLOGICAL_PACKAGES_FILE]));
    let content = fs
        .read_file(&list_path)
        .with_context(|| format!("failed to read {}", list_path))?;
    let packages = parse_package_list(&content);
    let roots = source_roots(fs, repo_root, config, &packages);

    let translator = config.translator();
    let do_not_rewrite = config.do_not_rewrite_table();
    let ctx = BatchContext {
        fs,
        translator: &translator,
        packages_dir: AbsoluteFsPath::new(fs.join(repo_root.as_str(), &[config.packages_dir.as_str()])),
        do_not_rewrite: &do_not_rewrite,
        logger,
        concurrency: config.workers(),
        dry_run: options.dry_run,
    };

    logger.info("resolving imports");
    let report = resolve_imports_in_directories(&ctx, &roots)?;

    if report.modified.is_empty() {
        logger.info("No TypeScript file was modified.");
        return Ok(report);
    }
    if options.skip_format || options.dry_run {
        logger.info(&format!("Modified {} TypeScript files", report.modified.len()));
        return Ok(report);
    }

    logger.info(&format!(
        "Modified {} TypeScript files - running formatter",
        report.modified.len()
    ));
    let modified: Vec<AbsoluteFsPath> = report.modified.iter().cloned().collect();
    run_formatter(config, &modified, logger)?;
    Ok(report)
}
