// Main Entry Point
//
// Command-line surface of `resolve-imports`: argument parsing, logger
// selection and dispatch to the resolve/service/count commands.

use crate::config::ServiceConfig;
use crate::count::count_dependency_imports;
use crate::driver::{resolve_imports_in_directories, BatchContext, BatchReport};
use crate::service::{service, ServiceOptions};
use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use import_resolver::file_system::{AbsoluteFsPath, NodeJSFileSystem};
use import_resolver::logging::{ConsoleLogger, LogLevel, Logger};
use import_resolver::{DoNotRewrite, ScopedPackageTranslator};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub fn build_command() -> Command {
    let config_arg = Arg::new("config")
        .long("config")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Path to a resolve-imports.json configuration file");

    Command::new("resolve-imports")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Re-point imports at the modules that actually declare them")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Log every resolution step"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .global(true)
                .conflicts_with("verbose")
                .help("Only log warnings and errors"),
        )
        .subcommand(
            Command::new("resolve")
                .about("Rewrite the imports of every TypeScript file below the given roots")
                .arg(
                    Arg::new("roots")
                        .value_name("ROOTS")
                        .required(true)
                        .num_args(1..)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("packages-dir")
                        .long("packages-dir")
                        .value_name("DIR")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory holding one folder per package"),
                )
                .arg(
                    Arg::new("scope")
                        .long("scope")
                        .value_name("SCOPE")
                        .help("Scope of the repository's own packages, e.g. @glide"),
                )
                .arg(config_arg.clone())
                .arg(
                    Arg::new("do-not-rewrite")
                        .long("do-not-rewrite")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON table of origin -> target rewrites to suppress"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Report modified files without writing them"),
                )
                .arg(
                    Arg::new("jobs")
                        .short('j')
                        .long("jobs")
                        .value_name("N")
                        .value_parser(value_parser!(usize))
                        .help("Number of worker threads"),
                ),
        )
        .subcommand(
            Command::new("service")
                .about("Resolve imports across a whole repository, then format modified files")
                .arg(
                    Arg::new("repo")
                        .value_name("REPO")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(config_arg.clone())
                .arg(
                    Arg::new("skip-format")
                        .long("skip-format")
                        .action(ArgAction::SetTrue)
                        .help("Do not run the formatter on modified files"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Report modified files without writing them"),
                ),
        )
        .subcommand(
            Command::new("count")
                .about("Count imports of each package's dependencies")
                .arg(
                    Arg::new("repo")
                        .value_name("REPO")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(config_arg),
        )
}

/// Parse `args` (program name first), run the selected command and return
/// the process exit code.
pub fn main_entry<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match build_command().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(err) => {
            let _ = err.print();
            return err.exit_code();
        }
    };

    let level = if matches.get_flag("verbose") {
        LogLevel::Debug
    } else if matches.get_flag("quiet") {
        LogLevel::Warn
    } else {
        LogLevel::Info
    };
    let logger = ConsoleLogger::new(level);

    match run(&matches, &logger) {
        Ok(0) => 0,
        Ok(failures) => {
            logger.error(&format!("{} files could not be resolved", failures));
            1
        }
        Err(err) => {
            logger.error(&format!("{:#}", err));
            1
        }
    }
}

/// Returns the number of files that failed without aborting the run.
fn run(matches: &ArgMatches, logger: &dyn Logger) -> anyhow::Result<usize> {
    match matches.subcommand() {
        Some(("resolve", sub)) => run_resolve(sub, logger).map(|report| report.failures.len()),
        Some(("service", sub)) => run_service(sub, logger).map(|report| report.failures.len()),
        Some(("count", sub)) => run_count(sub, logger).map(|_| 0),
        _ => anyhow::bail!("no command given"),
    }
}

fn load_config(sub: &ArgMatches, repo_root: &Path) -> anyhow::Result<ServiceConfig> {
    let path = sub.get_one::<PathBuf>("config");
    ServiceConfig::discover(repo_root, path.map(PathBuf::as_path))
        .with_context(|| format!("failed to load configuration for {}", repo_root.display()))
}

fn run_resolve(sub: &ArgMatches, logger: &dyn Logger) -> anyhow::Result<BatchReport> {
    let fs = NodeJSFileSystem::new();
    let mut config = match sub.get_one::<PathBuf>("config") {
        Some(path) => ServiceConfig::load(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => ServiceConfig::default(),
    };
    if let Some(scope) = sub.get_one::<String>("scope") {
        config.scope = scope.clone();
    }
    if let Some(jobs) = sub.get_one::<usize>("jobs") {
        config.concurrency = *jobs;
    }

    let roots = sub
        .get_many::<PathBuf>("roots")
        .into_iter()
        .flatten()
        .map(|root| fs.resolve(root))
        .collect::<std::io::Result<Vec<AbsoluteFsPath>>>()?;
    let packages_dir = sub
        .get_one::<PathBuf>("packages-dir")
        .context("--packages-dir is required")?;

    let translator = ScopedPackageTranslator::new(config.scope.clone());
    let do_not_rewrite = match sub.get_one::<PathBuf>("do-not-rewrite") {
        Some(path) => DoNotRewrite::load(&fs, &fs.resolve(path)?)?,
        None => config.do_not_rewrite_table(),
    };
    let ctx = BatchContext {
        fs: &fs,
        translator: &translator,
        packages_dir: fs.resolve(packages_dir)?,
        do_not_rewrite: &do_not_rewrite,
        logger,
        concurrency: config.workers(),
        dry_run: sub.get_flag("dry-run"),
    };
    let report = resolve_imports_in_directories(&ctx, &roots)?;
    logger.info(&format!("Modified {} TypeScript files", report.modified.len()));
    Ok(report)
}

fn run_service(sub: &ArgMatches, logger: &dyn Logger) -> anyhow::Result<BatchReport> {
    let fs = NodeJSFileSystem::new();
    let repo = sub.get_one::<PathBuf>("repo").context("REPO is required")?;
    let repo_root = fs.resolve(repo)?;
    let config = load_config(sub, repo_root.as_path())?;
    let options = ServiceOptions {
        skip_format: sub.get_flag("skip-format"),
        dry_run: sub.get_flag("dry-run"),
    };
    service(&fs, &repo_root, &config, options, logger)
}

fn run_count(sub: &ArgMatches, logger: &dyn Logger) -> anyhow::Result<()> {
    let fs = NodeJSFileSystem::new();
    let repo = sub.get_one::<PathBuf>("repo").context("REPO is required")?;
    let repo_root = fs.resolve(repo)?;
    let config = load_config(sub, repo_root.as_path())?;
    count_dependency_imports(repo_root.as_path(), &config, logger)?;
    Ok(())
}
