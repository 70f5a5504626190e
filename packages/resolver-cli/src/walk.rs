//! Source Discovery
//!
//! Collects the TypeScript sources below a set of roots.

use import_resolver::file_system::{is_ts_file, AbsoluteFsPath, ReadonlyFileSystem};
use std::collections::BTreeSet;

/// Directory names never descended into.
const SKIPPED_DIRECTORIES: [&str; 1] = ["node_modules"];

/// Every `.ts`/`.tsx` source (declaration files excluded) below `roots`,
/// sorted and de-duplicated. Missing roots contribute nothing.
pub fn collect_source_files<F: ReadonlyFileSystem>(
    fs: &F,
    roots: &[AbsoluteFsPath],
) -> std::io::Result<Vec<AbsoluteFsPath>> {
    let mut files = BTreeSet::new();
    for root in roots {
        if fs.is_file(root) {
            if is_ts_file(root.as_str()) {
                files.insert(root.clone());
            }
            continue;
        }
        if fs.is_directory(root) {
            walk_directory(fs, root, &mut files)?;
        }
    }
    Ok(files.into_iter().collect())
}

fn walk_directory<F: ReadonlyFileSystem>(
    fs: &F,
    dir: &AbsoluteFsPath,
    files: &mut BTreeSet<AbsoluteFsPath>,
) -> std::io::Result<()> {
    for entry in fs.readdir(dir)? {
        let name = entry.as_str();
        let path = AbsoluteFsPath::new(fs.join(dir.as_str(), &[name]));
        let stats = fs.stat(&path)?;
        if stats.is_directory() {
            if name.starts_with('.') || SKIPPED_DIRECTORIES.contains(&name) {
                continue;
            }
            walk_directory(fs, &path, files)?;
        } else if stats.is_file() && is_ts_file(name) {
            files.insert(path);
        }
    }
    Ok(())
}
