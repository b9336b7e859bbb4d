//! Pack stream decoder
//!
//! State machine: `ParseHeader -> (ReadEntryHeader -> InflateEntry ->
//! StoreEntry)* -> Done`, failing out of any step. Frames are consumed
//! strictly in order: each frame's start offset is the previous frame's
//! start plus the compressed byte count the decompressor actually consumed,
//! so nothing here may guess or estimate a length.

use crate::areas::database::Database;
use crate::artifacts::pack::entry::read_entry_header;
use crate::artifacts::pack::{HEADER_SIZE, SIGNATURE, TRAILER_SIZE};
use crate::errors::KitError;
use byteorder::{BigEndian, ByteOrder};
use std::io::Read;

/// Outcome of a completed decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackSummary {
    /// Entry count declared by the pack header (informational).
    pub declared_entries: u32,
    /// Objects actually materialized in the store.
    pub stored_entries: u32,
}

/// Decodes a buffered pack stream into loose objects, one frame at a time.
pub struct PackDecoder<'d> {
    database: &'d Database,
}

impl<'d> PackDecoder<'d> {
    pub fn new(database: &'d Database) -> Self {
        PackDecoder { database }
    }

    /// Decode every frame of `data` into the object store.
    ///
    /// `data` is the raw transport body: anything before the `PACK`
    /// signature (e.g. the negotiation acknowledgement line) is skipped, and
    /// the 20-byte checksum trailer is split off before frame iteration.
    /// Termination is driven by exhausting the frame region; the declared
    /// entry count is only compared at the end.
    pub fn decode(&self, data: &[u8]) -> anyhow::Result<PackSummary> {
        let (frames, declared_entries) = Self::parse_header(data)?;
        tracing::debug!(declared_entries, frame_bytes = frames.len(), "pack header parsed");

        let mut offset = 0;
        let mut stored_entries = 0u32;

        while offset < frames.len() {
            let header = read_entry_header(&frames[offset..])?;
            tracing::trace!(
                offset,
                entry_type = ?header.entry_type,
                inflated_size = header.inflated_size,
                "entry header read"
            );

            let object_type = header
                .entry_type
                .as_object_type()
                .ok_or(KitError::UnsupportedObjectType(header.entry_type.type_bits()))?;
            offset += header.header_len;

            let (payload, consumed) = Self::inflate_entry(&frames[offset..], header.inflated_size)?;
            tracing::trace!(offset, consumed, "entry inflated");

            let object_id = self.database.store_bytes(object_type, &payload)?;
            tracing::trace!(%object_id, "entry stored");

            // advance by what the decompressor consumed, never an estimate
            offset += consumed;
            stored_entries += 1;
        }

        if stored_entries != declared_entries {
            tracing::debug!(
                declared_entries,
                stored_entries,
                "pack entry count differs from header"
            );
        }

        Ok(PackSummary {
            declared_entries,
            stored_entries,
        })
    }

    /// Locate the signature, validate the fixed header, and split off the
    /// checksum trailer. Returns the frame region and the declared count.
    fn parse_header(data: &[u8]) -> anyhow::Result<(&[u8], u32)> {
        let start = data
            .windows(SIGNATURE.len())
            .position(|window| window == SIGNATURE)
            .ok_or_else(|| KitError::FormatError("missing PACK signature".to_string()))?;

        let rest = &data[start..];
        if rest.len() < HEADER_SIZE + TRAILER_SIZE {
            return Err(KitError::FormatError("truncated pack header".to_string()).into());
        }

        let version = BigEndian::read_u32(&rest[4..8]);
        let declared_entries = BigEndian::read_u32(&rest[8..12]);
        tracing::trace!(version, declared_entries, "pack signature located");

        let frames = &rest[HEADER_SIZE..rest.len() - TRAILER_SIZE];

        Ok((frames, declared_entries))
    }

    /// Inflate one frame from the start of `data`.
    ///
    /// Returns the payload and the exact number of compressed bytes the
    /// decompressor consumed. The frame does not declare its compressed
    /// length, so this counter is the only valid way to advance the offset.
    fn inflate_entry(data: &[u8], inflated_size: usize) -> anyhow::Result<(Vec<u8>, usize)> {
        let mut decoder = flate2::bufread::ZlibDecoder::new(data);
        let mut payload = Vec::with_capacity(inflated_size);

        decoder
            .read_to_end(&mut payload)
            .map_err(|e| KitError::FormatError(format!("inflate failed: {e}")))?;

        if payload.len() != inflated_size {
            return Err(KitError::FormatError(format!(
                "entry declares {} inflated bytes, got {}",
                inflated_size,
                payload.len()
            ))
            .into());
        }

        Ok((payload, decoder.total_in() as usize))
    }
}
