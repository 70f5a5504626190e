use import_resolver::{DoNotRewrite, ScopedPackageTranslator};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in a repository root.
pub const CONFIG_FILE_NAME: &str = "resolve-imports.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceConfig {
    /// Scope prefix of the repository's own packages, e.g. `@glide`.
    pub scope: String,
    /// Directory, relative to the repository root, holding one folder per package.
    pub packages_dir: String,
    /// Source roots processed besides the packages' `src/` directories.
    pub extra_source_roots: Vec<String>,
    /// `{ "<origin>": { "<target>": true } }`
    pub do_not_rewrite: HashMap<String, HashMap<String, bool>>,
    pub formatter: FormatterConfig,
    /// Worker count for rewriting and for formatting.
    pub concurrency: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            command: "npx".to_string(),
            args: vec!["prettier".to_string(), "--write".to_string()],
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let mut do_not_rewrite = HashMap::new();
        do_not_rewrite.insert(
            "@glide/plugins".to_string(),
            HashMap::from([("@glide/plugins-codecs".to_string(), true)]),
        );
        Self {
            scope: "@glide".to_string(),
            packages_dir: "packages".to_string(),
            extra_source_roots: vec!["functions/src".to_string(), "app/src".to_string()],
            do_not_rewrite,
            formatter: FormatterConfig::default(),
            concurrency: 10,
        }
    }
}

impl ServiceConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ServiceConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` if given, else `resolve-imports.json` in `repo_root` if it
    /// exists, else the defaults.
    pub fn discover(repo_root: &Path, path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let candidate = repo_root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn do_not_rewrite_table(&self) -> DoNotRewrite {
        DoNotRewrite::from_map(self.do_not_rewrite.clone())
    }

    pub fn translator(&self) -> ScopedPackageTranslator {
        ScopedPackageTranslator::new(self.scope.clone())
    }

    /// Worker count, never below one.
    pub fn workers(&self) -> usize {
        self.concurrency.max(1)
    }

    /// Directory name of `package` (a full `<scope>/<name>` specifier or a
    /// bare name) inside the packages directory.
    pub fn package_dir_name<'a>(&self, package: &'a str) -> &'a str {
        package
            .strip_prefix(self.scope.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(package)
    }
}
