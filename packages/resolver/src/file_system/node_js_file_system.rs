use super::types::{AbsoluteFsPath, FileStats, FileSystem, PathManipulation, PathSegment, ReadonlyFileSystem};
use super::util::{clean_path, normalize_separators, relative_path};
use std::fs;
use std::io;
use std::path::Path;

/// Path manipulation over POSIX-style strings, independent of the host OS.
pub struct NodeJSPathManipulation;

impl PathManipulation for NodeJSPathManipulation {
    fn dirname(&self, file: &str) -> String {
        let normalized = normalize_separators(file);
        match normalized.rfind('/') {
            Some(0) => "/".to_string(),
            Some(idx) => normalized[..idx].to_string(),
            None => ".".to_string(),
        }
    }

    fn join(&self, base_path: &str, paths: &[&str]) -> String {
        let mut full_path = normalize_separators(base_path);
        for p in paths {
            let p = normalize_separators(p);
            if p.starts_with('/') {
                full_path = p;
                continue;
            }
            if !full_path.ends_with('/') {
                full_path.push('/');
            }
            full_path.push_str(&p);
        }
        clean_path(&full_path)
    }

    fn relative(&self, from: &str, to: &str) -> String {
        relative_path(from, to)
    }

    fn basename(&self, file_path: &str) -> PathSegment {
        let normalized = normalize_separators(file_path);
        let name = normalized.rsplit('/').next().unwrap_or_default();
        PathSegment::new(name)
    }

    fn extname(&self, path: &str) -> String {
        let name = self.basename(path);
        match name.as_str().rfind('.') {
            Some(idx) if idx > 0 => name.as_str()[idx..].to_string(),
            _ => String::new(),
        }
    }

    fn normalize(&self, path: &str) -> String {
        clean_path(path)
    }

    fn is_rooted(&self, path: &str) -> bool {
        path.starts_with('/') || Path::new(path).is_absolute()
    }
}

/// The real file-system, backed by `std::fs`.
pub struct NodeJSFileSystem {
    paths: NodeJSPathManipulation,
}

impl NodeJSFileSystem {
    pub fn new() -> Self {
        Self {
            paths: NodeJSPathManipulation,
        }
    }

    /// Absolute, cleaned form of `path`, resolved against the working directory.
    pub fn resolve(&self, path: &Path) -> io::Result<AbsoluteFsPath> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        Ok(AbsoluteFsPath::new(clean_path(&absolute.to_string_lossy())))
    }
}

impl Default for NodeJSFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl PathManipulation for NodeJSFileSystem {
    fn dirname(&self, file: &str) -> String { self.paths.dirname(file) }
    fn join(&self, base_path: &str, paths: &[&str]) -> String { self.paths.join(base_path, paths) }
    fn relative(&self, from: &str, to: &str) -> String { self.paths.relative(from, to) }
    fn basename(&self, file_path: &str) -> PathSegment { self.paths.basename(file_path) }
    fn extname(&self, path: &str) -> String { self.paths.extname(path) }
    fn normalize(&self, path: &str) -> String { self.paths.normalize(path) }
    fn is_rooted(&self, path: &str) -> bool { self.paths.is_rooted(path) }
}

impl ReadonlyFileSystem for NodeJSFileSystem {
    fn exists(&self, path: &AbsoluteFsPath) -> bool {
        path.as_path().exists()
    }

    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String> {
        fs::read_to_string(path.as_path())
    }

    fn readdir(&self, path: &AbsoluteFsPath) -> io::Result<Vec<PathSegment>> {
        let mut result = Vec::new();
        for entry in fs::read_dir(path.as_path())? {
            let entry = entry?;
            result.push(PathSegment::new(entry.file_name().to_string_lossy().to_string()));
        }
        Ok(result)
    }

    fn stat(&self, path: &AbsoluteFsPath) -> io::Result<FileStats> {
        let meta = fs::metadata(path.as_path())?;
        Ok(FileStats {
            is_file: meta.is_file(),
            is_directory: meta.is_dir(),
        })
    }
}

impl FileSystem for NodeJSFileSystem {
    fn write_file(&self, path: &AbsoluteFsPath, data: &[u8]) -> io::Result<()> {
        fs::write(path.as_path(), data)
    }

    fn ensure_dir(&self, path: &AbsoluteFsPath) -> io::Result<()> {
        fs::create_dir_all(path.as_path())
    }
}
