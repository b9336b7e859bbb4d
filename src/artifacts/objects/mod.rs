//! Object types and codecs
//!
//! Everything in the store is an object identified by the SHA-1 of its
//! serialized form `<type> <size>\0<content>`:
//!
//! - **Blob**: file content (raw bytes)
//! - **Tree**: directory listing (mode, name, child id per entry)
//! - **Commit**: snapshot metadata (tree, optional parent, author, message)

pub mod blob;
pub mod commit;
pub mod entry_mode;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of an object id in hexadecimal form
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of an object id in binary form
pub const OBJECT_ID_RAW_LENGTH: usize = 20;
