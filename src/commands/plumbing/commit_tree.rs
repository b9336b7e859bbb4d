use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    pub fn commit_tree(
        &mut self,
        tree_id: &str,
        parent_id: Option<&str>,
        message: &str,
    ) -> anyhow::Result<()> {
        let tree_id = ObjectId::try_parse(tree_id.to_string())?;
        let parent_id = parent_id
            .map(|id| ObjectId::try_parse(id.to_string()))
            .transpose()?;

        let commit = Commit::new(tree_id, parent_id, Author::fixed(), message.to_string());
        let commit_id = self.database().store(&commit)?;

        writeln!(self.writer(), "{commit_id}")?;

        Ok(())
    }
}
