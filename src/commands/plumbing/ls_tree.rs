use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    pub fn ls_tree(&mut self, object_id: &str, name_only: bool) -> anyhow::Result<()> {
        let object_id = ObjectId::try_parse(object_id.to_string())?;

        let tree = self
            .database()
            .parse_object_as_tree(&object_id)?
            .ok_or_else(|| anyhow::anyhow!("not a tree object: {object_id}"))?;

        if !tree.is_empty() {
            writeln!(self.writer(), "{}", tree.display(name_only))?;
        }

        Ok(())
    }
}
