//! Data structures and codecs
//!
//! - `objects`: object types (blob, tree, commit) and their byte encodings
//! - `pack`: pack stream decoding into loose objects
//! - `remote`: pkt-line framing and the smart-HTTP pack client

pub mod objects;
pub mod pack;
pub mod remote;
