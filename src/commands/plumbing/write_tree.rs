use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use anyhow::Context;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Snapshot the working directory into tree objects and print the root
    /// tree id. Children are stored before their parent so every child id
    /// exists by the time the parent tree encodes.
    pub fn write_tree(&mut self) -> anyhow::Result<()> {
        let root_id = self.store_tree_for(None)?;

        writeln!(self.writer(), "{root_id}")?;

        Ok(())
    }

    fn store_tree_for(&self, dir_path: Option<&Path>) -> anyhow::Result<ObjectId> {
        let mut entries = Vec::new();

        for child in self.workspace().list_dir(dir_path)? {
            let name = child
                .file_name()
                .and_then(|name| name.to_str())
                .context(format!("Invalid entry name in {child:?}"))?
                .to_string();

            let mode = self.workspace().entry_mode(&child)?;
            let oid = match mode {
                EntryMode::Directory => self.store_tree_for(Some(&child))?,
                EntryMode::Symlink => {
                    let target = self.workspace().read_link(&child)?;
                    self.database().store(&Blob::new(target))?
                }
                EntryMode::File(_) => {
                    let content = self.workspace().read_file(&child)?;
                    self.database().store(&Blob::new(content))?
                }
            };

            entries.push((name, TreeEntry::new(mode, oid)));
        }

        let tree = Tree::from_entries(entries);
        self.database().store(&tree)
    }
}
