//! A minimal content-addressable object store with a read-only clone path.
//!
//! The crate is organized into three layers:
//!
//! - `areas`: the repository plumbing (object database, workspace, refs)
//! - `artifacts`: the data structures and codecs (objects, pack, remote)
//! - `commands`: the command implementations layered on top of `Repository`

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
