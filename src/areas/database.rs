use crate::artifacts::objects::object::{Object, Unpackable, hash_record};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::KitError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};

/// Write-once loose object store.
///
/// Objects live at `objects/<2-hex>/<38-hex>`, zlib-compressed. An id, once
/// written, is never rewritten: storing identical content is a no-op.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store a typed object, returning its content id.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        self.store_record(&object_id, object.serialize()?)?;

        Ok(object_id)
    }

    /// Store a raw payload under the given type keyword.
    ///
    /// The pack decoder lands here: it has an inflated payload and a frame
    /// type, not a parsed object.
    pub fn store_bytes(&self, object_type: ObjectType, payload: &[u8]) -> anyhow::Result<ObjectId> {
        let (object_id, record) = hash_record(object_type, payload)?;
        self.store_record(&object_id, record)?;

        Ok(object_id)
    }

    /// Load the full decompressed record `<type> <size>\0<content>`.
    ///
    /// Fails with [`KitError::NotFound`] when no loose file exists and with
    /// [`KitError::CorruptObject`] when inflate fails or the header's
    /// declared length disagrees with the payload.
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        if !object_path.exists() {
            return Err(KitError::NotFound(object_id.to_string()).into());
        }

        let compressed = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        let record = Self::decompress(compressed.into()).map_err(|e| KitError::CorruptObject {
            id: object_id.to_string(),
            reason: e.to_string(),
        })?;

        self.validate_record(object_id, &record)?;

        Ok(record)
    }

    /// Load the payload only: the record with its header stripped at the
    /// first NUL byte.
    pub fn cat_file(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let record = self.load(object_id)?;
        let cut = record
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| KitError::CorruptObject {
                id: object_id.to_string(),
                reason: "missing header terminator".to_string(),
            })?;

        Ok(record.slice(cut + 1..))
    }

    /// Decode the object as a tree, or `None` if it is some other type.
    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> anyhow::Result<Option<Tree>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Tree => Ok(Some(Tree::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    pub fn object_type(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        let (object_type, _) = self.parse_object_as_bytes(object_id)?;
        Ok(object_type)
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let record = self.load(object_id)?;
        let mut object_reader = Cursor::new(record);

        let object_type = ObjectType::parse_object_type(&mut object_reader)?;

        Ok((object_type, object_reader))
    }

    fn validate_record(&self, object_id: &ObjectId, record: &Bytes) -> anyhow::Result<()> {
        let corrupt = |reason: String| KitError::CorruptObject {
            id: object_id.to_string(),
            reason,
        };

        let cut = record
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| corrupt("missing header terminator".to_string()))?;
        let header = std::str::from_utf8(&record[..cut])
            .map_err(|_| corrupt("non-utf8 header".to_string()))?;
        let declared = header
            .rsplit(' ')
            .next()
            .and_then(|len| len.parse::<usize>().ok())
            .ok_or_else(|| corrupt(format!("unparsable header: {header:?}")))?;

        let actual = record.len() - cut - 1;
        if declared != actual {
            return Err(corrupt(format!(
                "header declares {declared} bytes, payload has {actual}"
            ))
            .into());
        }

        Ok(())
    }

    // write the object to disk unless it already exists;
    // re-storing the same id is always a no-op, never an error
    fn store_record(&self, object_id: &ObjectId, record: Bytes) -> anyhow::Result<()> {
        let object_path = self.path.join(object_id.to_path());

        if object_path.exists() {
            return Ok(());
        }

        std::fs::create_dir_all(
            object_path
                .parent()
                .context(format!("Invalid object path {}", object_path.display()))?,
        )
        .context(format!(
            "Unable to create object directory {}",
            object_path.display()
        ))?;

        self.write_object(object_path, record)
    }

    fn write_object(&self, object_path: PathBuf, record: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let compressed = Self::compress(record)?;

        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&compressed).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
