use crate::areas::repository::Repository;
use crate::artifacts::pack::decoder::PackDecoder;
use crate::artifacts::remote::client::PackClient;
use std::io::Write;

impl Repository {
    /// Fetch the remote's head pack and decode it into loose objects.
    ///
    /// Runs strictly in sequence: discovery, then download (buffered in
    /// full), then frame-by-frame decoding. No checkout is performed. A
    /// failure mid-pack leaves every already-stored object valid, and
    /// re-running is safe because the store is write-once and
    /// content-addressed.
    pub async fn clone_from(&mut self, remote_url: &str) -> anyhow::Result<()> {
        let client = PackClient::new(remote_url);

        let head = client.discover_ref().await?;
        let pack = client.fetch_pack(&head).await?;

        let summary = PackDecoder::new(self.database()).decode(&pack)?;
        tracing::info!(
            stored = summary.stored_entries,
            declared = summary.declared_entries,
            "pack decoded"
        );

        writeln!(
            self.writer(),
            "Unpacked {} objects from {}",
            summary.stored_entries,
            remote_url
        )?;

        Ok(())
    }
}
