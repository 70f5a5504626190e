//! Rewrite configuration
//!
//! The do-not-rewrite table lists (origin, target) specifier pairs that must
//! never be produced by a rewrite, even when resolution finds them.

use crate::error::{ResolveError, Result};
use crate::file_system::{AbsoluteFsPath, ReadonlyFileSystem};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoNotRewrite {
    pairs: HashMap<String, HashSet<String>>,
}

/// On-disk shape: `{ "<origin>": { "<target>": true } }`.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct DoNotRewriteFile(HashMap<String, HashMap<String, bool>>);

impl DoNotRewrite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a forbidden `origin -> target` rewrite.
    pub fn with(mut self, origin: impl Into<String>, target: impl Into<String>) -> Self {
        self.pairs.entry(origin.into()).or_default().insert(target.into());
        self
    }

    pub fn contains(&self, origin: &str, target: &str) -> bool {
        self.pairs
            .get(origin)
            .is_some_and(|targets| targets.contains(target))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.values().all(HashSet::is_empty)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let file: DoNotRewriteFile = serde_json::from_str(json)?;
        Ok(Self::from_map(file.0))
    }

    /// Read a JSON table from `path`.
    pub fn load(fs: &dyn ReadonlyFileSystem, path: &AbsoluteFsPath) -> Result<Self> {
        let content = fs
            .read_file(path)
            .map_err(|e| ResolveError::io(path.as_str(), e))?;
        Self::from_json(&content).map_err(|e| ResolveError::Config {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Build from the nested map form; `false` entries are ignored.
    pub fn from_map(map: HashMap<String, HashMap<String, bool>>) -> Self {
        let mut table = Self::new();
        for (origin, targets) in map {
            for (target, forbidden) in targets {
                if forbidden {
                    table = table.with(origin.clone(), target);
                }
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_system::testing::MockFileSystem;

    #[test]
    fn parses_nested_json_table() {
        let table = DoNotRewrite::from_json(
            r#"{ "@glide/plugins": { "@glide/plugins-codecs": true, "@glide/other": false } }"#,
        )
        .unwrap();
        assert!(table.contains("@glide/plugins", "@glide/plugins-codecs"));
        assert!(!table.contains("@glide/plugins", "@glide/other"));
        assert!(!table.contains("@glide/plugins-codecs", "@glide/plugins"));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(DoNotRewrite::from_json(r#"{ "a": ["b"] }"#).is_err());
    }

    #[test]
    fn loads_tables_through_the_file_system() {
        let fs = MockFileSystem::with_files(&[
            ("/repo/do-not-rewrite.json", r#"{ "./legacy": { "./modern": true } }"#),
            ("/repo/broken.json", "{ \"./legacy\": "),
        ]);

        let table = DoNotRewrite::load(&fs, &AbsoluteFsPath::new("/repo/do-not-rewrite.json")).unwrap();
        assert!(table.contains("./legacy", "./modern"));

        let err = DoNotRewrite::load(&fs, &AbsoluteFsPath::new("/repo/broken.json")).unwrap_err();
        assert!(matches!(err, ResolveError::Config { ref path, .. } if path == "/repo/broken.json"));
        assert!(err.is_fatal());

        let err = DoNotRewrite::load(&fs, &AbsoluteFsPath::new("/repo/missing.json")).unwrap_err();
        assert!(matches!(err, ResolveError::Io { .. }));
    }

    #[test]
    fn empty_table_forbids_nothing() {
        let table = DoNotRewrite::new();
        assert!(table.is_empty());
        assert!(!table.contains("./a", "./b"));
    }
}
