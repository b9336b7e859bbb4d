//! Tree object
//!
//! Trees are directory snapshots: an ordered list of entries, each carrying
//! a mode, a name, and the id of the child object.
//!
//! On disk: `tree <size>\0<entries>`, each entry `<mode> <name>\0<20-byte-id>`,
//! entries in ascending byte order of name.
//!
//! Sorting is enforced on both paths: the entry map is keyed by name, so
//! encoding always emits sorted entries, and decoding re-sorts whatever order
//! the record carried.

use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// One row of a tree: mode, child id. The name is the map key.
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct TreeEntry {
    pub mode: EntryMode,
    pub oid: ObjectId,
}

#[derive(Debug, Clone, Default)]
pub struct Tree {
    entries: BTreeMap<String, TreeEntry>,
}

impl Tree {
    /// Build a tree from (name, entry) pairs. Input order is irrelevant: the
    /// name-keyed map restores the canonical ascending order.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, TreeEntry)>) -> Self {
        Tree {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &TreeEntry)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> impl Iterator<Item = (String, TreeEntry)> {
        self.entries.into_iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the listing rows for `ls-tree`.
    ///
    /// Name-only: just the entry names. Full: `<mode> <type> <id>\t<name>`
    /// with the type label `tree` for directories and `blob` otherwise.
    pub fn display(&self, name_only: bool) -> String {
        self.entries
            .iter()
            .map(|(name, entry)| {
                if name_only {
                    name.to_string()
                } else {
                    format!(
                        "{} {} {}\t{}",
                        entry.mode.as_str(),
                        entry.mode.type_label(),
                        entry.oid.as_ref(),
                        name
                    )
                }
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut content_bytes = Vec::new();
        for (name, entry) in &self.entries {
            let header = format!("{} {}", entry.mode.as_str(), name);
            content_bytes.write_all(header.as_bytes())?;
            content_bytes.push(0);
            entry.oid.write_raw_to(&mut content_bytes)?;
        }

        let mut tree_bytes = Vec::with_capacity(content_bytes.len() + 16);
        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        tree_bytes.write_all(header.as_bytes())?;
        tree_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(tree_bytes))
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut entries = BTreeMap::new();
        let mut reader = reader;

        // Reuse scratch buffers to reduce allocs
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            if *mode_bytes.last().unwrap() != b' ' {
                return Err(anyhow::anyhow!("unexpected EOF in mode"));
            }
            mode_bytes.pop(); // drop the space

            let mode_str = std::str::from_utf8(&mode_bytes)?;
            let mode = EntryMode::try_from(mode_str)?;

            name_bytes.clear();
            let n = reader.read_until(b'\0', &mut name_bytes)?;
            if n == 0 || *name_bytes.last().unwrap() != b'\0' {
                return Err(anyhow::anyhow!("unexpected EOF in name"));
            }
            name_bytes.pop(); // drop NUL
            let name = std::str::from_utf8(&name_bytes)?.to_owned();

            let oid = ObjectId::read_raw_from(&mut reader)
                .map_err(|_| anyhow::anyhow!("unexpected EOF in object id"))?;

            entries.insert(name, TreeEntry::new(mode, oid));
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }
}
