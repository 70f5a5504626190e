use super::super::node_js_file_system::NodeJSPathManipulation;
use super::super::types::{AbsoluteFsPath, FileStats, FileSystem, PathManipulation, PathSegment, ReadonlyFileSystem};
use std::collections::BTreeMap;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone, Debug)]
pub enum Entity {
    Folder(Folder),
    File(Vec<u8>),
}

pub type Folder = BTreeMap<String, Entity>;

/// An in-memory POSIX file-system used by tests.
///
/// Clones share the same tree, so a test can hand one clone to the code under
/// test and inspect the results through another.
#[derive(Clone)]
pub struct MockFileSystem {
    paths: Arc<NodeJSPathManipulation>,
    file_tree: Arc<Mutex<Folder>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        MockFileSystem {
            paths: Arc::new(NodeJSPathManipulation),
            file_tree: Arc::new(Mutex::new(Folder::new())),
        }
    }

    /// Create a file system holding `files`, creating parent folders as needed.
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let fs = Self::new();
        fs.init_with_files(files);
        fs
    }

    pub fn init_with_files(&self, files: &[(&str, &str)]) {
        for (path, content) in files {
            let path = AbsoluteFsPath::new(*path);
            let dir = AbsoluteFsPath::new(self.dirname(path.as_str()));
            self.ensure_dir(&dir).expect("mock directory creation");
            self.write_file(&path, content.as_bytes()).expect("mock file write");
        }
    }

    /// Content of a file as a string, panicking when it does not exist.
    pub fn contents(&self, path: &str) -> String {
        self.read_file(&AbsoluteFsPath::new(path))
            .unwrap_or_else(|e| panic!("cannot read {}: {}", path, e))
    }

    fn tree(&self) -> MutexGuard<'_, Folder> {
        self.file_tree.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn split_path(path: &str) -> Vec<String> {
        path.split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .map(|s| s.to_string())
            .collect()
    }

    fn get_entity(&self, path: &AbsoluteFsPath) -> Option<Entity> {
        let tree = self.tree();
        let segments = Self::split_path(&self.normalize(path.as_str()));
        let mut current = &*tree;

        for (i, segment) in segments.iter().enumerate() {
            let last = i == segments.len() - 1;
            match current.get(segment) {
                Some(Entity::Folder(map)) if last => return Some(Entity::Folder(map.clone())),
                Some(Entity::Folder(map)) => current = map,
                Some(Entity::File(content)) if last => return Some(Entity::File(content.clone())),
                _ => return None,
            }
        }
        Some(Entity::Folder(tree.clone()))
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl PathManipulation for MockFileSystem {
    fn dirname(&self, file: &str) -> String { self.paths.dirname(file) }
    fn join(&self, base_path: &str, paths: &[&str]) -> String { self.paths.join(base_path, paths) }
    fn relative(&self, from: &str, to: &str) -> String { self.paths.relative(from, to) }
    fn basename(&self, file_path: &str) -> PathSegment { self.paths.basename(file_path) }
    fn extname(&self, path: &str) -> String { self.paths.extname(path) }
    fn normalize(&self, path: &str) -> String { self.paths.normalize(path) }
    fn is_rooted(&self, path: &str) -> bool { path.starts_with('/') }
}

impl ReadonlyFileSystem for MockFileSystem {
    fn exists(&self, path: &AbsoluteFsPath) -> bool {
        self.get_entity(path).is_some()
    }

    fn read_file(&self, path: &AbsoluteFsPath) -> io::Result<String> {
        match self.get_entity(path) {
            Some(Entity::File(content)) => {
                String::from_utf8(content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            }
            Some(Entity::Folder(_)) => Err(io::Error::new(io::ErrorKind::Other, "Is a directory")),
            None => Err(io::Error::new(io::ErrorKind::NotFound, "File not found")),
        }
    }

    fn readdir(&self, path: &AbsoluteFsPath) -> io::Result<Vec<PathSegment>> {
        match self.get_entity(path) {
            Some(Entity::Folder(map)) => Ok(map.keys().map(|k| PathSegment::new(k.clone())).collect()),
            Some(_) => Err(io::Error::new(io::ErrorKind::Other, "Not a directory")),
            None => Err(io::Error::new(io::ErrorKind::NotFound, "Directory not found")),
        }
    }

    fn stat(&self, path: &AbsoluteFsPath) -> io::Result<FileStats> {
        match self.get_entity(path) {
            Some(Entity::File(_)) => Ok(FileStats { is_file: true, is_directory: false }),
            Some(Entity::Folder(_)) => Ok(FileStats { is_file: false, is_directory: true }),
            None => Err(io::Error::new(io::ErrorKind::NotFound, "Path not found")),
        }
    }
}

impl FileSystem for MockFileSystem {
    fn write_file(&self, path: &AbsoluteFsPath, data: &[u8]) -> io::Result<()> {
        let normalized = self.normalize(path.as_str());
        let mut segments = Self::split_path(&normalized);
        let file_name = segments
            .pop()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "Cannot write to root"))?;

        let mut tree = self.tree();
        let mut current = &mut *tree;
        for segment in &segments {
            match current.get_mut(segment) {
                Some(Entity::Folder(map)) => current = map,
                Some(_) => return Err(io::Error::new(io::ErrorKind::Other, "Not a directory")),
                None => {
                    return Err(io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("Directory {} not found", segment),
                    ))
                }
            }
        }

        if let Some(Entity::Folder(_)) = current.get(&file_name) {
            return Err(io::Error::new(io::ErrorKind::Other, "Is a directory"));
        }
        current.insert(file_name, Entity::File(data.to_vec()));
        Ok(())
    }

    fn ensure_dir(&self, path: &AbsoluteFsPath) -> io::Result<()> {
        let segments = Self::split_path(&self.normalize(path.as_str()));
        let mut tree = self.tree();
        let mut current = &mut *tree;
        for segment in segments {
            let next = current
                .entry(segment)
                .or_insert_with(|| Entity::Folder(Folder::new()));
            match next {
                Entity::Folder(map) => current = map,
                Entity::File(_) => {
                    return Err(io::Error::new(io::ErrorKind::Other, "Path component is not a directory"))
                }
            }
        }
        Ok(())
    }
}
