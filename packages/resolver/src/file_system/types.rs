use std::io;
use std::path::Path;

/// A fully qualified path in the file system, in POSIX form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AbsoluteFsPath(String);

impl AbsoluteFsPath {
    pub fn new(path: impl Into<String>) -> Self {
        AbsoluteFsPath(path.into())
    }

    pub fn from<P: AsRef<Path>>(path: P) -> Self {
        AbsoluteFsPath(path.as_ref().to_string_lossy().replace('\\', "/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for AbsoluteFsPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for AbsoluteFsPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl std::fmt::Display for AbsoluteFsPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single entry name inside a directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathSegment(String);

impl PathSegment {
    pub fn new(segment: impl Into<String>) -> Self {
        PathSegment(segment.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PathSegment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Information about an object in the FileSystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStats {
    pub is_file: bool,
    pub is_directory: bool,
}

impl FileStats {
    pub fn is_file(&self) -> bool {
        self.is_file
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }
}

/// An abstraction over the path manipulation aspects of a file-system.
///
/// All paths are POSIX strings; implementations never touch the disk here.
pub trait PathManipulation {
    fn dirname(&self, file: &str) -> String;
    fn join(&self, base_path: &str, paths: &[&str]) -> String;

    /// Compute the relative path between the directory `from` and `to`.
    fn relative(&self, from: &str, to: &str) -> String;

    fn basename(&self, file_path: &str) -> PathSegment;
    /// Extension of the last segment including the dot, or `""`.
    fn extname(&self, path: &str) -> String;
    fn normalize(&self, path: &str) -> String;
    fn is_rooted(&self, path: &str) -> bool;
}

/// An abstraction over the read-only aspects of a file-system.
pub trait ReadonlyFileSystem: PathManipulation + Send + Sync {
    fn exists(&self, path: &AbsoluteFsPath) -> bool;
    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String>;
    fn readdir(&self, path: &AbsoluteFsPath) -> io::Result<Vec<PathSegment>>;
    fn stat(&self, path: &AbsoluteFsPath) -> io::Result<FileStats>;

    fn is_file(&self, path: &AbsoluteFsPath) -> bool {
        self.stat(path).map(|s| s.is_file()).unwrap_or(false)
    }

    fn is_directory(&self, path: &AbsoluteFsPath) -> bool {
        self.stat(path).map(|s| s.is_directory()).unwrap_or(false)
    }
}

/// A basic interface to abstract the underlying file-system.
pub trait FileSystem: ReadonlyFileSystem {
    fn write_file(&self, path: &AbsoluteFsPath, data: &[u8]) -> io::Result<()>;
    fn ensure_dir(&self, path: &AbsoluteFsPath) -> io::Result<()>;
}
