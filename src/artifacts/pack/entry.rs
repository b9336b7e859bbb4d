use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::KitError;

const VARINT_CONTINUE_FLAG: u8 = 0x80;
const TYPE_MASK: u8 = 0x7;
const FIRST_SIZE_MASK: u8 = 0xf;
const FIRST_SIZE_BITS: u8 = 4;
const SIZE_BITS: u8 = 7;

/// Frame types carried in a pack entry header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackEntryType {
    Commit,
    Tree,
    Blob,
    Tag,
    OfsDelta,
    RefDelta,
}

impl PackEntryType {
    /// Decode the 3 type bits of an entry header's first byte.
    pub fn from_type_bits(bits: u8) -> Result<Self, KitError> {
        match bits {
            1 => Ok(PackEntryType::Commit),
            2 => Ok(PackEntryType::Tree),
            3 => Ok(PackEntryType::Blob),
            4 => Ok(PackEntryType::Tag),
            6 => Ok(PackEntryType::OfsDelta),
            7 => Ok(PackEntryType::RefDelta),
            other => Err(KitError::FormatError(format!(
                "invalid pack entry type bits {other}"
            ))),
        }
    }

    /// Deltified frames encode a diff against a base object and are not
    /// resolved here.
    pub fn is_delta(&self) -> bool {
        matches!(self, PackEntryType::OfsDelta | PackEntryType::RefDelta)
    }

    pub fn type_bits(&self) -> u8 {
        match self {
            PackEntryType::Commit => 1,
            PackEntryType::Tree => 2,
            PackEntryType::Blob => 3,
            PackEntryType::Tag => 4,
            PackEntryType::OfsDelta => 6,
            PackEntryType::RefDelta => 7,
        }
    }

    /// The loose-object keyword for storable frame types; `None` for deltas.
    pub fn as_object_type(&self) -> Option<ObjectType> {
        match self {
            PackEntryType::Commit => Some(ObjectType::Commit),
            PackEntryType::Tree => Some(ObjectType::Tree),
            PackEntryType::Blob => Some(ObjectType::Blob),
            PackEntryType::Tag => Some(ObjectType::Tag),
            PackEntryType::OfsDelta | PackEntryType::RefDelta => None,
        }
    }
}

/// A decoded entry header: frame type, declared inflated size, and the
/// number of header bytes consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryHeader {
    pub entry_type: PackEntryType,
    pub inflated_size: usize,
    pub header_len: usize,
}

/// Decode one entry header at the start of `data`.
///
/// The first byte carries the type in bits 4..6 and seeds the size with its
/// low 4 bits. While the most recent byte has its high bit set, the next
/// byte contributes its low 7 bits at offsets 4, 11, 18, and so on: the
/// standard little-endian variable-length size encoding, with the type read
/// from the first byte only.
pub fn read_entry_header(data: &[u8]) -> anyhow::Result<EntryHeader> {
    let mut bytes = data.iter();
    let first = *bytes
        .next()
        .ok_or_else(|| KitError::FormatError("truncated entry header".to_string()))?;

    let entry_type = PackEntryType::from_type_bits((first >> FIRST_SIZE_BITS) & TYPE_MASK)?;
    let mut inflated_size = (first & FIRST_SIZE_MASK) as usize;
    let mut shift = FIRST_SIZE_BITS;
    let mut header_len = 1;
    let mut last = first;

    while last & VARINT_CONTINUE_FLAG != 0 {
        last = *bytes
            .next()
            .ok_or_else(|| KitError::FormatError("truncated entry size varint".to_string()))?;
        inflated_size |= ((last & !VARINT_CONTINUE_FLAG) as usize) << shift;
        shift += SIZE_BITS;
        header_len += 1;
    }

    Ok(EntryHeader {
        entry_type,
        inflated_size,
        header_len,
    })
}
