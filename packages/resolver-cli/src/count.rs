// Dependency Import Counting
//
// For every package of the nx project graph, count how many declarations
// in its sources import from each of its declared dependencies.

use crate::config::ServiceConfig;
use anyhow::{bail, Context};
use import_resolver::declarations::{parse, Span};
use import_resolver::logging::Logger;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

/// Project graph written by `nx graph --file=deps.json`.
pub const DEPS_FILE_NAME: &str = "deps.json";

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectGraphFile {
    pub graph: ProjectGraph,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectGraph {
    #[serde(default)]
    pub dependencies: IndexMap<String, Vec<ProjectDependency>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectDependency {
    pub target: String,
}

/// Import counts for one package, most used dependency first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyUsage {
    pub package: String,
    pub counts: Vec<(String, usize)>,
}

/// Count the declarations of `sources` importing from each of `dependencies`.
///
/// A declaration matches a dependency when its path is the dependency or
/// lies below it (`<dependency>/...`). Dependencies never imported are left
/// out. Ties keep the order in which dependencies were first seen.
pub fn count_in_sources<S: AsRef<str>>(sources: &[(S, S)], dependencies: &[String]) -> Vec<(String, usize)> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for (_, text) in sources {
        for span in parse(text.as_ref()) {
            let Span::Declaration(decl) = span else {
                continue;
            };
            let matched = dependencies.iter().find(|dep| {
                decl.path == **dep
                    || decl
                        .path
                        .strip_prefix(dep.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            });
            if let Some(dep) = matched {
                *counts.entry(dep.as_str()).or_default() += 1;
            }
        }
    }

    let mut sorted: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(dep, count)| (dep.to_string(), count))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted
}

/// Directory holding the sources of `package`.
pub fn package_directory(repo_root: &Path, config: &ServiceConfig, package: &str) -> PathBuf {
    match config.package_dir_name(package) {
        name @ ("app" | "functions") if name != package => repo_root.join(name),
        name => repo_root.join(&config.packages_dir).join(name),
    }
}

/// Read `deps.json` from `repo_root`, generating it with nx when missing.
pub fn load_project_graph(repo_root: &Path, logger: &dyn Logger) -> anyhow::Result<ProjectGraph> {
    let deps_path = repo_root.join(DEPS_FILE_NAME);
    if !deps_path.exists() {
        logger.info("deps.json not found in the repository, creating it with nx");
        let status = process::Command::new("npx")
            .args(["nx", "graph", "--file=deps.json"])
            .current_dir(repo_root)
            .status()
            .context("failed to run nx")?;
        if !status.success() {
            bail!("nx graph exited with {:?}", status.code());
        }
    }

    logger.info("Reading deps.json");
    let content =
        fs::read_to_string(&deps_path).with_context(|| format!("failed to read {}", deps_path.display()))?;
    let file: ProjectGraphFile =
        serde_json::from_str(&content).with_context(|| format!("invalid {}", deps_path.display()))?;
    Ok(file.graph)
}

/// Every `*.ts*` file below `dir`, as (path, text) pairs.
fn read_sources(dir: &Path) -> anyhow::Result<Vec<(String, String)>> {
    let pattern = format!("{}/**/*.ts*", glob::Pattern::escape(&dir.to_string_lossy()));
    let mut sources = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        if path.is_dir() {
            bail!("The path \"{}\" is a directory, not a file.", path.display());
        }
        let text = fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
        sources.push((path.to_string_lossy().to_string(), text));
    }
    Ok(sources)
}

pub fn count_dependency_imports(
    repo_root: &Path,
    config: &ServiceConfig,
    logger: &dyn Logger,
) -> anyhow::Result<Vec<DependencyUsage>> {
    let graph = load_project_graph(repo_root, logger)?;
    logger.info(&format!("Analyzing {} dependencies...", graph.dependencies.len()));

    let mut usages = Vec::new();
    for (package, deps) in &graph.dependencies {
        let dependencies: Vec<String> = deps.iter().map(|d| d.target.clone()).collect();
        logger.info(&format!(
            "Analyzing {}, contains {} dependencies total, counting imports for each...",
            package,
            dependencies.len()
        ));
        if dependencies.is_empty() {
            logger.info("No dependencies, skipping.");
            continue;
        }

        let sources = read_sources(&package_directory(repo_root, config, package))?;
        let counts = count_in_sources(&sources, &dependencies);

        logger.info("Used dependencies and their counts:");
        for (dep, count) in &counts {
            logger.info(&format!("{}: {}", dep, count));
        }
        usages.push(DependencyUsage {
            package: package.clone(),
            counts,
        });
    }
    Ok(usages)
}
