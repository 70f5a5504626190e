// Formatter Pass
//
// Re-formats rewritten files with an external command (prettier by
// default), one process per file, bounded by the configured worker count.

use crate::config::{FormatterConfig, ServiceConfig};
use crate::driver::thread_pool;
use anyhow::{bail, Context};
use import_resolver::file_system::AbsoluteFsPath;
use import_resolver::logging::Logger;
use rayon::prelude::*;
use std::path::Path;
use std::process;

/// Run the formatter on one file, from the file's own directory.
pub fn format_file(formatter: &FormatterConfig, file: &AbsoluteFsPath) -> anyhow::Result<()> {
    let path = file.as_path();
    let dir = path.parent().unwrap_or_else(|| Path::new("/"));
    let name = path
        .file_name()
        .with_context(|| format!("not a file path: {}", file))?;

    let output = process::Command::new(&formatter.command)
        .args(&formatter.args)
        .arg(name)
        .current_dir(dir)
        .output()
        .with_context(|| format!("failed to run {} on {}", formatter.command, file))?;

    if !output.status.success() {
        bail!(
            "{} exited with {:?} on {}: {}",
            formatter.command,
            output.status.code(),
            file,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}

/// Format every file in `files` with at most `concurrency` processes at once.
pub fn run_formatter(config: &ServiceConfig, files: &[AbsoluteFsPath], logger: &dyn Logger) -> anyhow::Result<()> {
    let pool = thread_pool(config.workers())?;
    pool.install(|| {
        files.par_iter().try_for_each(|file| {
            logger.debug(&format!("formatting {}", file));
            format_file(&config.formatter, file)
        })
    })
}
