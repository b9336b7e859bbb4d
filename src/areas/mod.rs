//! Core repository components
//!
//! - `database`: write-once object store (loose objects, zlib-compressed)
//! - `refs`: reference directory and the HEAD symref file
//! - `repository`: high-level aggregate handed to every command
//! - `workspace`: working directory file system operations

pub(crate) mod database;
pub(crate) mod refs;
pub mod repository;
pub(crate) mod workspace;
