//! Filesystem abstraction for stub consolidation
//!
//! The consolidator never touches `std::fs` directly. It works through the
//! [`Filesystem`] trait, which has two implementations:
//!
//! - [`HostFS`]: the real filesystem, used by the CLI.
//! - [`MemoryFS`]: an in-memory tree of files and directories, used by tests,
//!   benches and dry runs.
//!
//! Both report failures as [`Error::Filesystem`] with the operation and path
//! in the message.

use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The operations the consolidator needs from a filesystem.
pub trait Filesystem {
    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool {
        self.is_file(path) || self.is_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Names of the entries directly inside `path`, sorted.
    fn read_dir(&self, path: &Path) -> Result<Vec<String>>;

    fn create_dir_all(&mut self, path: &Path) -> Result<()>;

    fn remove_dir_all(&mut self, path: &Path) -> Result<()>;

    fn remove_file(&mut self, path: &Path) -> Result<()>;

    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Append to `path`, creating it if missing. The parent directory must exist.
    fn append(&mut self, path: &Path, content: &[u8]) -> Result<()>;

    /// Copy a single file, overwriting `to`. The parent of `to` must exist.
    fn copy_file(&mut self, from: &Path, to: &Path) -> Result<()>;

    /// Recursively copy the directory `from` into `to`.
    ///
    /// Missing directories are created and conflicting files are
    /// overwritten. Files already under `to` that have no counterpart in
    /// `from` are left alone.
    fn copy_tree(&mut self, from: &Path, to: &Path) -> Result<()> {
        if !self.is_dir(from) {
            return Err(Error::Filesystem {
                message: format!("Failed to copy '{}': not a directory", from.display()),
            });
        }

        self.create_dir_all(to)?;
        for name in self.read_dir(from)? {
            let src = from.join(&name);
            let dst = to.join(&name);
            if self.is_dir(&src) {
                self.copy_tree(&src, &dst)?;
            } else {
                self.copy_file(&src, &dst)?;
            }
        }
        Ok(())
    }
}

/// A file held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    /// File content as bytes
    pub content: Vec<u8>,
}

impl File {
    /// Create a new file with content
    pub fn new(content: Vec<u8>) -> Self {
        Self { content }
    }

    /// Create a new file from string content
    pub fn from_string(content: &str) -> Self {
        Self::new(content.as_bytes().to_vec())
    }
}

/// In-memory filesystem holding files and (possibly empty) directories.
///
/// Adding a file implicitly creates its ancestor directories. Paths are
/// stored exactly as given, so callers should build them with `Path::join`
/// from a common root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryFS {
    files: BTreeMap<PathBuf, File>,
    dirs: BTreeSet<PathBuf>,
}

impl MemoryFS {
    /// Create a new empty filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or update a file, creating its parent directories
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P, file: File) -> Result<()> {
        let path = path.as_ref();
        if self.dirs.contains(path) {
            return Err(Error::Filesystem {
                message: format!("Failed to add file '{}': is a directory", path.display()),
            });
        }
        if let Some(parent) = path.parent() {
            self.insert_dirs(parent)?;
        }
        self.files.insert(path.to_path_buf(), file);
        Ok(())
    }

    /// Add a file with string content
    pub fn add_file_string<P: AsRef<Path>>(&mut self, path: P, content: &str) -> Result<()> {
        self.add_file(path, File::from_string(content))
    }

    /// Add an empty directory and its ancestors
    pub fn add_dir<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.insert_dirs(path.as_ref())
    }

    /// Get a file by path
    pub fn get_file<P: AsRef<Path>>(&self, path: P) -> Option<&File> {
        self.files.get(path.as_ref())
    }

    /// Read a file as UTF-8, lossily
    pub fn read_string<P: AsRef<Path>>(&self, path: P) -> Option<String> {
        self.get_file(path)
            .map(|f| String::from_utf8_lossy(&f.content).into_owned())
    }

    /// All file paths under `root`, sorted
    pub fn list_files_under<P: AsRef<Path>>(&self, root: P) -> Vec<PathBuf> {
        let root = root.as_ref();
        self.files
            .keys()
            .filter(|p| p.starts_with(root))
            .cloned()
            .collect()
    }

    fn insert_dirs(&mut self, path: &Path) -> Result<()> {
        let ancestors: Vec<&Path> = path
            .ancestors()
            .filter(|a| !a.as_os_str().is_empty())
            .collect();

        if let Some(blocked) = ancestors.iter().copied().find(|a| self.files.contains_key(*a)) {
            return Err(Error::Filesystem {
                message: format!(
                    "Failed to create directory '{}': '{}' is a file",
                    path.display(),
                    blocked.display()
                ),
            });
        }

        for ancestor in ancestors {
            self.dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn parent_exists(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.dirs.contains(parent),
            _ => true,
        }
    }

    fn check_writable(&self, path: &Path, operation: &str) -> Result<()> {
        if self.dirs.contains(path) {
            return Err(Error::Filesystem {
                message: format!("Failed to {} '{}': is a directory", operation, path.display()),
            });
        }
        if !self.parent_exists(path) {
            return Err(Error::Filesystem {
                message: format!(
                    "Failed to {} '{}': parent directory does not exist",
                    operation,
                    path.display()
                ),
            });
        }
        Ok(())
    }
}

impl Filesystem for MemoryFS {
    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<String>> {
        if !self.dirs.contains(path) {
            return Err(Error::Filesystem {
                message: format!("Failed to read directory '{}': not a directory", path.display()),
            });
        }

        let children: BTreeSet<String> = self
            .files
            .keys()
            .chain(self.dirs.iter())
            .filter(|p| p.parent() == Some(path))
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();

        Ok(children.into_iter().collect())
    }

    fn create_dir_all(&mut self, path: &Path) -> Result<()> {
        self.insert_dirs(path)
    }

    fn remove_dir_all(&mut self, path: &Path) -> Result<()> {
        if !self.dirs.contains(path) {
            return Err(Error::Filesystem {
                message: format!("Failed to remove directory '{}': not a directory", path.display()),
            });
        }
        self.files.retain(|p, _| !p.starts_with(path));
        self.dirs.retain(|p| !p.starts_with(path));
        Ok(())
    }

    fn remove_file(&mut self, path: &Path) -> Result<()> {
        self.files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| Error::Filesystem {
                message: format!("Failed to remove file '{}': file not found", path.display()),
            })
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.files
            .get(path)
            .map(|f| f.content.clone())
            .ok_or_else(|| Error::Filesystem {
                message: format!("Failed to read '{}': file not found", path.display()),
            })
    }

    fn append(&mut self, path: &Path, content: &[u8]) -> Result<()> {
        self.check_writable(path, "append to")?;
        self.files
            .entry(path.to_path_buf())
            .or_insert_with(|| File::new(Vec::new()))
            .content
            .extend_from_slice(content);
        Ok(())
    }

    fn copy_file(&mut self, from: &Path, to: &Path) -> Result<()> {
        let file = self.files.get(from).cloned().ok_or_else(|| Error::Filesystem {
            message: format!("Failed to copy '{}': file not found", from.display()),
        })?;
        self.check_writable(to, "copy to")?;
        self.files.insert(to.to_path_buf(), file);
        Ok(())
    }
}

/// The host filesystem. Relative paths resolve against the working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFS;

fn host_error(operation: &str, path: &Path, err: impl std::fmt::Display) -> Error {
    Error::Filesystem {
        message: format!("Failed to {} '{}': {}", operation, path.display(), err),
    }
}

impl Filesystem for HostFS {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| host_error("read directory", path, e))? {
            let entry = entry.map_err(|e| host_error("read directory", path, e))?;
            let name = entry.file_name().into_string().map_err(|name| Error::Filesystem {
                message: format!(
                    "Non UTF-8 entry {:?} in '{}'",
                    name,
                    path.display()
                ),
            })?;
            names.push(name);
        }
        names.sort();
        Ok(names)
    }

    fn create_dir_all(&mut self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| host_error("create directory", path, e))
    }

    fn remove_dir_all(&mut self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path).map_err(|e| host_error("remove directory", path, e))
    }

    fn remove_file(&mut self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|e| host_error("remove file", path, e))
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| host_error("read", path, e))
    }

    fn append(&mut self, path: &Path, content: &[u8]) -> Result<()> {
        let mut file = fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|e| host_error("open for append", path, e))?;
        file.write_all(content)
            .map_err(|e| host_error("append to", path, e))
    }

    fn copy_file(&mut self, from: &Path, to: &Path) -> Result<()> {
        fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| Error::Filesystem {
                message: format!("Failed to copy '{}' to '{}': {}", from.display(), to.display(), e),
            })
    }

    fn copy_tree(&mut self, from: &Path, to: &Path) -> Result<()> {
        if !from.is_dir() {
            return Err(host_error("copy", from, "not a directory"));
        }

        for entry in WalkDir::new(from).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|e| host_error("walk", from, e))?;
            let relative = entry
                .path()
                .strip_prefix(from)
                .map_err(|e| host_error("make path relative", entry.path(), e))?;
            let target = to.join(relative);

            if entry.file_type().is_dir() {
                self.create_dir_all(&target)?;
            } else {
                self.copy_file(entry.path(), &target)?;
            }
        }
        Ok(())
    }
}

/// Snapshot the host directory `root` into a `MemoryFS`.
///
/// Paths in the result keep the `root` prefix, so the snapshot can be
/// consolidated with the same layout as the host tree.
pub fn load_tree(root: &Path) -> Result<MemoryFS> {
    if !root.is_dir() {
        return Err(Error::missing(root, "directory"));
    }

    let mut memory = MemoryFS::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| host_error("walk", root, e))?;
        let path = entry.path();

        if entry.file_type().is_dir() {
            memory.add_dir(path)?;
            continue;
        }

        let content = fs::read(path).map_err(|e| host_error("read", path, e))?;
        memory.add_file(path, File::new(content))?;
    }
    Ok(memory)
}
