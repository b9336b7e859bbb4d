//! Commit object
//!
//! Commits tie a tree snapshot to its history:
//!
//! ```text
//! commit <size>\0
//! tree <tree-id>
//! parent <parent-id>        (omitted entirely for a root commit)
//! author <name> <email> <timestamp-millis>
//! committer <name> <email> <timestamp-millis>
//!
//! <message>
//! ```
//!
//! The identity is a fixed literal and timestamps are millisecond-precision
//! with no timezone field. This is self-consistent (stable ids for fixed
//! inputs) but intentionally not byte-compatible with the usual
//! seconds-plus-offset convention.

use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use std::io::Write;

const AUTHOR_NAME: &str = "Kit Committer";
const AUTHOR_EMAIL: &str = "committer@kit.dev";

/// Author or committer identity plus timestamp.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp_millis: i64,
}

impl Author {
    pub fn new(name: String, email: String, timestamp_millis: i64) -> Self {
        Author {
            name,
            email,
            timestamp_millis,
        }
    }

    /// The fixed identity stamped with the current wall-clock time.
    pub fn fixed() -> Self {
        Self::new(
            AUTHOR_NAME.to_string(),
            AUTHOR_EMAIL.to_string(),
            chrono::Utc::now().timestamp_millis(),
        )
    }

    /// Header-line rendering: `name <email> millis`.
    pub fn display(&self) -> String {
        format!("{} <{}> {}", self.name, self.email, self.timestamp_millis)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    tree_oid: ObjectId,
    parent: Option<ObjectId>,
    author: Author,
    committer: Author,
    message: String,
}

impl Commit {
    pub fn new(
        tree_oid: ObjectId,
        parent: Option<ObjectId>,
        author: Author,
        message: String,
    ) -> Self {
        Commit {
            tree_oid,
            parent,
            author: author.clone(),
            committer: author,
            message,
        }
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![];

        object_content.push(format!("tree {}", self.tree_oid.as_ref()));
        if let Some(parent) = &self.parent {
            object_content.push(format!("parent {}", parent.as_ref()));
        }
        object_content.push(format!("author {}", self.author.display()));
        object_content.push(format!("committer {}", self.committer.display()));
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        let content_bytes = object_content.join("\n").into_bytes();

        let mut commit_bytes = Vec::with_capacity(content_bytes.len() + 16);
        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
