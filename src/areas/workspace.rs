use crate::artifacts::objects::entry_mode::{EntryMode, FileMode};
use bytes::Bytes;
use is_executable::IsExecutable;
use std::path::{Path, PathBuf};

const IGNORED_PATHS: [&str; 3] = [".git", ".", ".."];

/// Working directory access: reading files and listing directory children
/// for snapshot building. The repository's own control directory is always
/// skipped.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a file's raw bytes. Paths are relative to the workspace root.
    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(file_path);

        let content = std::fs::read(file_path)?;

        Ok(content.into())
    }

    /// Read a symlink's target as bytes (the blob payload for mode 120000).
    pub fn read_link(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let target = std::fs::read_link(self.path.join(file_path))?;

        Ok(target.as_os_str().as_encoded_bytes().to_vec().into())
    }

    /// List the children of a directory, relative to the workspace root,
    /// sorted by file name. Control paths are filtered out.
    pub fn list_dir(&self, dir_path: Option<&Path>) -> anyhow::Result<Vec<PathBuf>> {
        let dir_path = match dir_path {
            Some(p) => self.path.join(p),
            None => self.path.clone().into(),
        };

        if !dir_path.is_dir() {
            anyhow::bail!("The specified path is not a directory: {:?}", dir_path);
        }

        let mut children = std::fs::read_dir(&dir_path)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| self.check_if_not_ignored_path(&entry.path()))
            .collect::<Vec<_>>();
        children.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        Ok(children)
    }

    /// Decide the tree entry mode for a workspace path by file type:
    /// directory, symlink, executable file, or regular file.
    pub fn entry_mode(&self, file_path: &Path) -> anyhow::Result<EntryMode> {
        let full_path = self.path.join(file_path);
        let metadata = std::fs::symlink_metadata(&full_path)?;

        let mode = if metadata.file_type().is_symlink() {
            EntryMode::Symlink
        } else if metadata.is_dir() {
            EntryMode::Directory
        } else if full_path.is_executable() {
            EntryMode::File(FileMode::Executable)
        } else {
            EntryMode::File(FileMode::Regular)
        };

        Ok(mode)
    }

    fn is_ignored(path: &Path) -> bool {
        path.components().any(|component| {
            if let std::path::Component::Normal(name) = component {
                let name_str = name.to_string_lossy();
                IGNORED_PATHS.contains(&name_str.as_ref())
            } else {
                false
            }
        })
    }

    fn check_if_not_ignored_path(&self, path: &Path) -> Option<PathBuf> {
        if !Self::is_ignored(path) {
            Some(path.strip_prefix(self.path.as_ref()).ok()?.to_path_buf())
        } else {
            None
        }
    }
}
