//! Smart-HTTP remote access
//!
//! - `pkt_line`: the length-prefixed line framing the transport speaks
//! - `client`: ref discovery and pack download

pub mod client;
pub mod pkt_line;
