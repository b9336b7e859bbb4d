use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;
use std::path::PathBuf;

pub trait Packable {
    /// Produce the full on-disk record: `<type> <size>\0<content>`.
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    /// Rebuild the object from a reader positioned after the record header.
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    /// Content id: SHA-1 over the serialized record, rendered as 40 hex.
    ///
    /// Deterministic by construction: two objects with the same type and
    /// content always hash to the same id.
    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        let mut hasher = Sha1::new();
        hasher.update(&content);

        let oid = hasher.finalize();
        ObjectId::try_parse(format!("{oid:x}"))
    }

    fn object_path(&self) -> Result<PathBuf> {
        Ok(self.object_id()?.to_path())
    }
}

/// Hash a raw payload under the given type keyword without building a typed
/// object first. Used by the pack decoder, which receives inflated payloads
/// and a frame type rather than parsed objects.
pub fn hash_record(object_type: ObjectType, payload: &[u8]) -> Result<(ObjectId, Bytes)> {
    let mut record = Vec::with_capacity(payload.len() + 16);
    record.extend_from_slice(format!("{} {}\0", object_type.as_str(), payload.len()).as_bytes());
    record.extend_from_slice(payload);

    let mut hasher = Sha1::new();
    hasher.update(&record);
    let oid = hasher.finalize();

    Ok((
        ObjectId::try_parse(format!("{oid:x}"))?,
        Bytes::from(record),
    ))
}
