//! Porcelain commands (user-facing workflows)
//!
//! - `init`: create the repository skeleton
//! - `clone`: fetch a remote's pack and decode it into loose objects

pub mod clone;
pub mod init;
