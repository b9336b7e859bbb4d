//! Command implementations
//!
//! Commands are organized into two categories:
//!
//! - `plumbing`: low-level object manipulation (cat-file, hash-object,
//!   ls-tree, write-tree, commit-tree)
//! - `porcelain`: user-facing workflows (init, clone)
//!
//! Each command is an extension method on `Repository`.

pub mod plumbing;
pub mod porcelain;
