use crate::areas::repository::Repository;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .git/objects directory")?;

        fs::create_dir_all(self.refs().refs_path())
            .context("Failed to create .git/refs directory")?;

        self.refs()
            .write_head_symref()
            .context("Failed to create initial HEAD reference")?;

        writeln!(self.writer(), "Initialized git directory")?;

        Ok(())
    }
}
