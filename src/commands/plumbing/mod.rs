//! Plumbing commands (low-level object operations)
//!
//! - `cat-file`: print an object's payload
//! - `hash-object`: compute an object id and optionally store the blob
//! - `ls-tree`: list a tree's entries
//! - `write-tree`: snapshot the working directory into tree objects
//! - `commit-tree`: wrap a tree id into a commit object

pub mod cat_file;
pub mod commit_tree;
pub mod hash_object;
pub mod ls_tree;
pub mod write_tree;
