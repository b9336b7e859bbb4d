use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    pub fn cat_file(&mut self, object_id: &str) -> anyhow::Result<()> {
        let object_id = ObjectId::try_parse(object_id.to_string())?;

        // payload only: the record header is cut at the first NUL
        let payload = self.database().cat_file(&object_id)?;

        self.writer().write_all(&payload)?;

        Ok(())
    }
}
