//! References
//!
//! Only the skeleton the store needs: the `refs/` directory tree and the
//! HEAD file, a symbolic reference containing `ref: refs/heads/main\n`.

use derive_new::new;
use std::path::{Path, PathBuf};

/// Name of the HEAD reference file
pub const HEAD_REF_NAME: &str = "HEAD";

/// Branch HEAD points at after `init`
pub const DEFAULT_BRANCH: &str = "main";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the control directory (typically `.git`)
    path: Box<Path>,
}

impl Refs {
    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    /// Write the HEAD symref pointing at the default branch.
    pub fn write_head_symref(&self) -> anyhow::Result<()> {
        std::fs::write(
            self.head_path(),
            format!("ref: refs/heads/{DEFAULT_BRANCH}\n"),
        )?;

        Ok(())
    }
}
