//! Typed failure taxonomy for the object store and the remote-fetch path.
//!
//! Commands propagate these through `anyhow`, so callers can either show the
//! rendered message or downcast when they need to branch on the failure kind.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KitError {
    /// No loose object file exists for the requested id.
    #[error("object {0} not found")]
    NotFound(String),

    /// The loose object file exists but cannot be decoded: inflate failed or
    /// the header's declared length disagrees with the payload.
    #[error("corrupt object {id}: {reason}")]
    CorruptObject { id: String, reason: String },

    /// The pack stream is malformed: missing signature, truncated frame, or
    /// inflate produced the wrong number of bytes.
    #[error("malformed pack stream: {0}")]
    FormatError(String),

    /// The remote answered with a non-success status.
    #[error("remote returned status {status}: {message}")]
    ProtocolError { status: u16, message: String },

    /// A pack frame carries a delta type the decoder does not resolve.
    /// The frame length is unknown, so skipping it would desynchronize every
    /// following offset; decoding must stop here.
    #[error("unsupported pack entry type {0}")]
    UnsupportedObjectType(u8),
}
